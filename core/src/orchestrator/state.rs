use serde::Serialize;

/// Lifecycle of a rerun session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum AttemptState {
    Pending,
    Running { attempt: usize },
    AwaitingDelay { attempt: usize },
    Completed,
    Failed,
}

impl std::fmt::Display for AttemptState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AttemptState::Pending => f.write_str("pending"),
            AttemptState::Running { attempt } => write!(f, "running #{attempt}"),
            AttemptState::AwaitingDelay { attempt } => write!(f, "awaiting delay before #{attempt}"),
            AttemptState::Completed => f.write_str("completed"),
            AttemptState::Failed => f.write_str("failed"),
        }
    }
}
