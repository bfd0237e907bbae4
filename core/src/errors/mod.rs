mod config_error;
mod runner_error;
mod tag_error;

pub use config_error::ConfigError;
pub use runner_error::RunnerError;
pub use tag_error::TagError;

use thiserror::Error;

/// Fatal errors surfaced to `main`; every one of them ends the process with exit code 1.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Runner(#[from] RunnerError),
}
