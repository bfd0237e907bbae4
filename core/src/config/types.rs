use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub rerun: RerunConfig,

    #[serde(default)]
    pub tagger: TaggerConfig,

    #[serde(default)]
    pub runner: RunnerConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RerunConfig {
    #[serde(default = "default_repeat")]
    pub repeat: usize,

    #[serde(default)]
    pub delay_secs: u64,

    /// Stop at the first passing attempt. `false` selects repeat mode, where
    /// every attempt must pass.
    #[serde(default = "default_true")]
    pub until_passes: bool,

    /// Narrow retries to the failing specs and the retry tag.
    #[serde(default = "default_true")]
    pub rerun_failed_only: bool,

    #[serde(default = "default_failed_tag")]
    pub failed_tag: String,

    /// Entries appended to `--env` on every attempt.
    #[serde(default = "default_attempt_env")]
    pub attempt_env: Vec<String>,
}

fn default_repeat() -> usize {
    2
}

fn default_true() -> bool {
    true
}

fn default_failed_tag() -> String {
    "@failed".to_string()
}

fn default_attempt_env() -> Vec<String> {
    vec!["allureClearSkippedTests=true".to_string()]
}

impl Default for RerunConfig {
    fn default() -> Self {
        Self {
            repeat: default_repeat(),
            delay_secs: 0,
            until_passes: true,
            rerun_failed_only: true,
            failed_tag: default_failed_tag(),
            attempt_env: default_attempt_env(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaggerConfig {
    #[serde(default = "default_feature_files")]
    pub feature_files: String,

    #[serde(default = "default_extension")]
    pub extension: String,
}

fn default_feature_files() -> String {
    "cypress/e2e/".to_string()
}

fn default_extension() -> String {
    "feature".to_string()
}

impl Default for TaggerConfig {
    fn default() -> Self {
        Self {
            feature_files: default_feature_files(),
            extension: default_extension(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "provider")]
pub enum RunnerConfig {
    #[serde(rename = "cypress")]
    Cypress(CypressRunnerConfig),
    #[serde(rename = "replay")]
    Replay(ReplayRunnerConfig),
}

impl Default for RunnerConfig {
    fn default() -> Self {
        RunnerConfig::Cypress(CypressRunnerConfig::default())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CypressRunnerConfig {
    #[serde(default = "default_node_bin")]
    pub node_bin: String,

    /// Working directory for the bridge process; `require('cypress')` resolves from here.
    #[serde(default)]
    pub workdir: Option<String>,
}

fn default_node_bin() -> String {
    "node".to_string()
}

impl Default for CypressRunnerConfig {
    fn default() -> Self {
        Self {
            node_bin: default_node_bin(),
            workdir: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReplayRunnerConfig {
    /// Directory holding `attempt-1.json`, `attempt-2.json`, ...
    pub results_dir: String,
}
