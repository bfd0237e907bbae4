use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttemptStatus {
    Finished,
    Failed,
}

/// What `cypress.run()` resolved with for one attempt.
///
/// Covers both the finished shape (`totalFailed`, `runs`) and the
/// failed-to-run shape (`failures`, `message`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttemptResult {
    pub status: AttemptStatus,
    #[serde(default)]
    pub total_failed: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub failures: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub runs: Option<Vec<RunRecord>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunRecord {
    pub spec: SpecRef,
    #[serde(default)]
    pub stats: RunStats,
    #[serde(default)]
    pub tests: Option<Vec<TestRecord>>,
}

impl RunRecord {
    pub fn tests(&self) -> &[TestRecord] {
        self.tests.as_deref().unwrap_or_default()
    }

    pub fn has_failures(&self) -> bool {
        self.stats.failures != 0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpecRef {
    pub relative: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunStats {
    #[serde(default)]
    pub failures: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestRecord {
    pub title: Vec<String>,
    pub state: TestState,
}

impl TestRecord {
    /// Scenario name: the innermost title segment.
    pub fn scenario_name(&self) -> Option<&str> {
        self.title.last().map(String::as_str)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TestState {
    Passed,
    Failed,
    Pending,
    Skipped,
    #[serde(other)]
    Other,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_finished_result() {
        let raw = r#"{
            "status": "finished",
            "totalFailed": 1,
            "totalPassed": 3,
            "runs": [{
                "spec": { "relative": "cypress/e2e/a.feature", "name": "a.feature" },
                "stats": { "failures": 1, "passes": 3 },
                "tests": [
                    { "title": ["Feature X", "Checkout fails"], "state": "failed" },
                    { "title": ["Feature X", "Login works"], "state": "passed" },
                    { "title": ["Feature X", "Odd"], "state": "unknown-state" }
                ]
            }]
        }"#;
        let r: AttemptResult = serde_json::from_str(raw).unwrap();
        assert_eq!(r.status, AttemptStatus::Finished);
        assert_eq!(r.total_failed, 1);
        let runs = r.runs.unwrap();
        assert_eq!(runs[0].spec.relative, "cypress/e2e/a.feature");
        assert!(runs[0].has_failures());
        assert_eq!(runs[0].tests()[0].scenario_name(), Some("Checkout fails"));
        assert_eq!(runs[0].tests()[2].state, TestState::Other);
    }

    #[test]
    fn decodes_failed_to_run_result() {
        let raw = r#"{ "status": "failed", "failures": 1, "message": "Could not find Cypress test run results" }"#;
        let r: AttemptResult = serde_json::from_str(raw).unwrap();
        assert_eq!(r.status, AttemptStatus::Failed);
        assert_eq!(r.failures, Some(1));
        assert!(r.runs.is_none());
    }

    #[test]
    fn null_tests_read_as_empty() {
        let raw = r#"{ "spec": { "relative": "a.feature" }, "stats": { "failures": 1 }, "tests": null }"#;
        let run: RunRecord = serde_json::from_str(raw).unwrap();
        assert!(run.tests().is_empty());
    }
}
