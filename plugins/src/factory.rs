use std::sync::Arc;

use cypress_rerun_core::api::{AppConfig, RunnerConfig, RunnerPlugin};

use crate::runner::{CypressRunnerPlugin, ReplayRunnerPlugin};

pub fn build_runner(cfg: &AppConfig) -> Arc<dyn RunnerPlugin> {
    match &cfg.runner {
        RunnerConfig::Cypress(c_cfg) => Arc::new(CypressRunnerPlugin::new(c_cfg)),
        RunnerConfig::Replay(r_cfg) => Arc::new(ReplayRunnerPlugin::new(&r_cfg.results_dir)),
    }
}
