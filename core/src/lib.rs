//! Retry orchestration for Cypress + Cucumber runs.
//!
//! The [`orchestrator::Orchestrator`] runs attempts through a
//! [`runner::RunnerPlugin`], asks the [`interpreter`] what each result means,
//! tags failed scenarios with the [`tagger`] and narrows the next attempt's
//! [`cypress::RunConfiguration`].

pub mod api;
pub mod config;
pub mod cypress;
pub mod errors;
pub mod interpreter;
pub mod orchestrator;
pub mod results;
pub mod runner;
pub mod tagger;
