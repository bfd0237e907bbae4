use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use cypress_rerun_core::api::{AttemptResult, RunConfiguration, RunnerError, RunnerPlugin};

use super::cypress::read_results;

/// Serves recorded `cypress.run()` results (`attempt-1.json`, `attempt-2.json`, ...).
///
/// Useful for dry runs of the rerun flow and for debugging a CI failure
/// locally without a browser.
pub struct ReplayRunnerPlugin {
    results_dir: PathBuf,
    next: AtomicUsize,
}

impl ReplayRunnerPlugin {
    pub fn new(results_dir: impl Into<PathBuf>) -> Self {
        Self {
            results_dir: results_dir.into(),
            next: AtomicUsize::new(1),
        }
    }
}

#[async_trait]
impl RunnerPlugin for ReplayRunnerPlugin {
    fn name(&self) -> &str {
        "replay"
    }

    async fn run_attempt(&self, config: &RunConfiguration) -> Result<AttemptResult, RunnerError> {
        let attempt = self.next.fetch_add(1, Ordering::SeqCst);
        let path = self.results_dir.join(format!("attempt-{attempt}.json"));
        tracing::info!(
            path = %path.display(),
            spec = config.spec.as_deref().unwrap_or("<all>"),
            "replaying recorded attempt"
        );
        read_results(&path, 0).await
    }
}
