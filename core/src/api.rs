//! Stable re-exports for consumers (`cli`, `plugins`, and tests).
//!
//! Prefer importing from `cypress_rerun_core::api` instead of reaching into internal modules.

pub use crate::config::{
    load_default, load_dotenv, AppConfig, CypressRunnerConfig, ReplayRunnerConfig, RerunConfig,
    RunnerConfig, TaggerConfig, DEFAULT_DOTENV_FILE,
};
pub use crate::cypress::{parse_run_arguments, RunConfiguration};
pub use crate::errors::{CliError, ConfigError, RunnerError, TagError};
pub use crate::interpreter::{interpret, Verdict};
pub use crate::orchestrator::{AttemptState, Orchestrator, OrchestratorSettings, RunReport};
pub use crate::results::{AttemptResult, AttemptStatus, FailureSet};
pub use crate::runner::{normalize_exit, process_exit_code, RunnerPlugin};
pub use crate::tagger::FeatureTagger;
