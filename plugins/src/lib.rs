//! Runner plugins and the factory that builds one from [`AppConfig`](cypress_rerun_core::api::AppConfig).

pub mod factory;
pub mod runner;
