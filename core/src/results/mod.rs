mod failure;
mod types;

pub use failure::{FailedScenario, FailureSet};
pub use types::{AttemptResult, AttemptStatus, RunRecord, RunStats, SpecRef, TestRecord, TestState};
