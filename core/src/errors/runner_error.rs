// core/src/errors/runner_error.rs
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RunnerError {
    #[error("failed to spawn process: {program}")]
    Spawn { program: String, #[source] source: std::io::Error },

    #[error("io error on exchange file: {path}")]
    ExchangeIo { path: String, #[source] source: std::io::Error },

    #[error("runner exited without writing results: {path} (code={code})")]
    MissingResults { path: String, code: i32 },

    #[error("results decode error: {path}")]
    Decode { path: String, #[source] source: serde_json::Error },

    #[error("options encode error")]
    Encode(#[source] serde_json::Error),
}
