// core/src/errors/config_error.rs
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cypress could not parse the forwarded arguments")]
    RunnerArgs(#[source] clap::Error),

    #[error("config parse error: {path}")]
    Parse { path: String, #[source] source: anyhow::Error },

    #[error("config validation error: {0}")]
    Validation(String),

    #[error("env var invalid: {key}")]
    EnvInvalid { key: String, #[source] source: anyhow::Error },
}
