use std::path::{Path, PathBuf};
use std::process::Stdio;

use async_trait::async_trait;
use tokio::process::Command;

use cypress_rerun_core::api::{
    normalize_exit, AttemptResult, CypressRunnerConfig, RunConfiguration, RunnerError, RunnerPlugin,
};

const BRIDGE_JS: &str = include_str!("cypress_bridge.js");

/// Runs attempts through `cypress.run()` in a Node child process.
///
/// Options and results travel through two temp files; the child's stdio is
/// inherited so Cypress output shows up as usual.
pub struct CypressRunnerPlugin {
    node_bin: String,
    workdir: Option<PathBuf>,
    exchange_dir: PathBuf,
}

impl CypressRunnerPlugin {
    pub fn new(cfg: &CypressRunnerConfig) -> Self {
        Self {
            node_bin: cfg.node_bin.clone(),
            workdir: cfg.workdir.as_ref().map(PathBuf::from),
            exchange_dir: std::env::temp_dir(),
        }
    }

    pub fn with_exchange_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.exchange_dir = dir.into();
        self
    }

    fn exchange_paths(&self) -> (PathBuf, PathBuf) {
        let id = uuid::Uuid::new_v4();
        (
            self.exchange_dir.join(format!("cypress-rerun-{id}-options.json")),
            self.exchange_dir.join(format!("cypress-rerun-{id}-results.json")),
        )
    }
}

#[async_trait]
impl RunnerPlugin for CypressRunnerPlugin {
    fn name(&self) -> &str {
        "cypress"
    }

    async fn run_attempt(&self, config: &RunConfiguration) -> Result<AttemptResult, RunnerError> {
        let (options_path, results_path) = self.exchange_paths();

        let options = serde_json::to_vec(config).map_err(RunnerError::Encode)?;
        tokio::fs::write(&options_path, options)
            .await
            .map_err(|source| exchange_err(&options_path, source))?;

        let outcome = self.spawn_and_collect(&options_path, &results_path).await;

        for p in [&options_path, &results_path] {
            if let Err(e) = tokio::fs::remove_file(p).await {
                if e.kind() != std::io::ErrorKind::NotFound {
                    tracing::debug!(path = %p.display(), error = %e, "exchange file not removed");
                }
            }
        }
        outcome
    }
}

impl CypressRunnerPlugin {
    async fn spawn_and_collect(
        &self,
        options_path: &Path,
        results_path: &Path,
    ) -> Result<AttemptResult, RunnerError> {
        let mut cmd = Command::new(&self.node_bin);
        cmd.arg("-e")
            .arg(BRIDGE_JS)
            .arg(options_path)
            .arg(results_path)
            .stdin(Stdio::null())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit());
        if let Some(dir) = &self.workdir {
            cmd.current_dir(dir);
        }

        tracing::debug!(node = %self.node_bin, options = %options_path.display(), "starting cypress bridge");
        let status = cmd
            .status()
            .await
            .map_err(|source| RunnerError::Spawn {
                program: self.node_bin.clone(),
                source,
            })?;
        let code = normalize_exit(status);
        tracing::debug!(code, "cypress bridge exited");

        read_results(results_path, code).await
    }
}

/// Decodes a results file written by the bridge (or recorded earlier).
pub async fn read_results(path: &Path, exit_code: i32) -> Result<AttemptResult, RunnerError> {
    let raw = match tokio::fs::read(path).await {
        Ok(raw) => raw,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(RunnerError::MissingResults {
                path: path.display().to_string(),
                code: exit_code,
            });
        }
        Err(source) => return Err(exchange_err(path, source)),
    };
    serde_json::from_slice(&raw).map_err(|source| RunnerError::Decode {
        path: path.display().to_string(),
        source,
    })
}

fn exchange_err(path: &Path, source: std::io::Error) -> RunnerError {
    RunnerError::ExchangeIo {
        path: path.display().to_string(),
        source,
    }
}
