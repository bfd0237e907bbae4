pub mod cypress;
pub mod replay;

pub use cypress::CypressRunnerPlugin;
pub use replay::ReplayRunnerPlugin;
