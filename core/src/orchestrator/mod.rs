mod run;
mod state;
mod types;

pub use run::Orchestrator;
pub use state::AttemptState;
pub use types::{AttemptSummary, OrchestratorSettings, RunReport};
