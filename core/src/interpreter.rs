use serde::Serialize;

use crate::results::{AttemptResult, AttemptStatus, FailureSet};

/// How the result of one attempt moves the run forward.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "verdict", rename_all = "snake_case")]
pub enum Verdict {
    /// The runner aborted before executing any spec; there is nothing to retry.
    NothingToRerun,
    Passed,
    /// Failures remain and at least one more attempt is configured.
    Retry { failures: FailureSet, total_failed: u32 },
    /// Failures remain on the final attempt.
    Exhausted { failures: FailureSet, total_failed: u32 },
    /// Cypress itself could not run.
    RunnerFailed { failures: u32, message: Option<String> },
}

impl Verdict {
    /// Exit code when this verdict ends the run; `None` for `Retry`.
    pub fn exit_code(&self) -> Option<u32> {
        match self {
            Verdict::NothingToRerun | Verdict::Passed => Some(0),
            Verdict::Retry { .. } => None,
            Verdict::Exhausted { total_failed, .. } => Some(*total_failed),
            Verdict::RunnerFailed { failures, .. } => Some(*failures),
        }
    }

    pub fn failures(&self) -> Option<&FailureSet> {
        match self {
            Verdict::Retry { failures, .. } | Verdict::Exhausted { failures, .. } => Some(failures),
            _ => None,
        }
    }
}

/// Interprets attempt `attempt` (1-based) of `total`.
pub fn interpret(result: &AttemptResult, attempt: usize, total: usize) -> Verdict {
    if result.status == AttemptStatus::Failed {
        return Verdict::RunnerFailed {
            failures: result.failures.unwrap_or(1).max(1),
            message: result.message.clone(),
        };
    }

    let has_runs = result.runs.as_ref().is_some_and(|runs| !runs.is_empty());
    if !has_runs {
        return Verdict::NothingToRerun;
    }

    let failures = FailureSet::from_attempt(result);
    if failures.is_empty() {
        return Verdict::Passed;
    }

    // A spec reported failures, so the count must not read as success.
    let total_failed = result.total_failed.max(1);
    if attempt >= total {
        Verdict::Exhausted { failures, total_failed }
    } else {
        Verdict::Retry { failures, total_failed }
    }
}
