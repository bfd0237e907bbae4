use serde::Serialize;

use super::types::{AttemptResult, TestState};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FailedScenario {
    pub name: String,
    pub spec: String,
}

/// Failures observed in one attempt.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FailureSet {
    pub scenarios: Vec<FailedScenario>,
    /// Distinct spec paths with at least one failure, first-encountered order.
    pub specs: Vec<String>,
}

impl FailureSet {
    pub fn from_attempt(result: &AttemptResult) -> Self {
        let mut set = FailureSet::default();
        let Some(runs) = result.runs.as_deref() else {
            return set;
        };

        for run in runs {
            for test in run.tests() {
                if test.state != TestState::Failed {
                    continue;
                }
                if let Some(name) = test.scenario_name() {
                    set.scenarios.push(FailedScenario {
                        name: name.to_string(),
                        spec: run.spec.relative.clone(),
                    });
                }
            }
            if run.has_failures() && !set.specs.contains(&run.spec.relative) {
                set.specs.push(run.spec.relative.clone());
            }
        }
        set
    }

    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }

    pub fn scenario_names(&self) -> Vec<&str> {
        self.scenarios.iter().map(|s| s.name.as_str()).collect()
    }
}
