//! Configuration: `types.rs` holds the data structures and defaults,
//! `load.rs` the file + env override layering, `dotenv.rs` the `.env` loader.

mod dotenv;
mod load;
mod types;

pub use dotenv::{load_dotenv, parse_dotenv, DEFAULT_DOTENV_FILE};
pub use load::{load_default, load_from, DEFAULT_CONFIG_FILE};
pub use types::{
    AppConfig, CypressRunnerConfig, ReplayRunnerConfig, RerunConfig, RunnerConfig, TaggerConfig,
};
