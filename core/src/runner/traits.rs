use async_trait::async_trait;

use crate::cypress::RunConfiguration;
use crate::errors::RunnerError;
use crate::results::AttemptResult;

/// Executes one attempt of the test run.
///
/// Implementations must not return before the run is over; attempts are
/// never overlapped.
#[async_trait]
pub trait RunnerPlugin: Send + Sync {
    fn name(&self) -> &str;

    async fn run_attempt(&self, config: &RunConfiguration) -> Result<AttemptResult, RunnerError>;
}
