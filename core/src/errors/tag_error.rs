// core/src/errors/tag_error.rs
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TagError {
    #[error("feature file read failed: {path}")]
    Read { path: String, #[source] source: std::io::Error },

    #[error("feature file write failed: {path}")]
    Write { path: String, #[source] source: std::io::Error },

    #[error("feature file pattern invalid: {pattern}")]
    Pattern { pattern: String, #[source] source: glob::PatternError },
}
