//! Cypress-facing types: the forwarded `cypress run` argument parser, the
//! `--env` string and the per-attempt run configuration.

mod args;
mod env;
mod options;

pub use args::{normalize_forwarded, parse_run_arguments, CypressRunArgs};
pub use env::EnvString;
pub use options::{RunConfiguration, TestingType};
