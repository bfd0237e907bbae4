pub mod exit;
mod traits;

pub use exit::{normalize_exit, process_exit_code};
pub use traits::RunnerPlugin;
