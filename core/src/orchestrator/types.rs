use std::time::Duration;

use serde::Serialize;

use crate::config::RerunConfig;
use crate::errors::ConfigError;
use crate::interpreter::Verdict;
use crate::runner::process_exit_code;
use crate::tagger::TagReport;

use super::state::AttemptState;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrchestratorSettings {
    pub repeat: usize,
    /// Waited before the final attempt when it is a retry.
    pub delay: Duration,
    pub until_passes: bool,
    pub rerun_failed_only: bool,
    pub retry_tag: String,
    pub attempt_env: Vec<String>,
}

impl OrchestratorSettings {
    pub fn from_config(cfg: &RerunConfig) -> Result<Self, ConfigError> {
        if cfg.repeat == 0 {
            return Err(ConfigError::Validation("repeat must be at least 1".into()));
        }
        let tag = cfg.failed_tag.trim();
        if !tag.starts_with('@') || tag.len() < 2 || tag.contains(char::is_whitespace) {
            return Err(ConfigError::Validation(format!(
                "failed_tag must look like @name, got {:?}",
                cfg.failed_tag
            )));
        }
        Ok(Self {
            repeat: cfg.repeat,
            delay: Duration::from_secs(cfg.delay_secs),
            until_passes: cfg.until_passes,
            rerun_failed_only: cfg.rerun_failed_only,
            retry_tag: tag.to_string(),
            attempt_env: cfg.attempt_env.clone(),
        })
    }
}

/// One executed attempt.
#[derive(Debug, Clone, Serialize)]
pub struct AttemptSummary {
    pub attempt: usize,
    pub spec: Option<String>,
    pub env: Option<String>,
    pub verdict: Verdict,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tagging: Option<TagReport>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub total: usize,
    pub attempts: Vec<AttemptSummary>,
    /// Every state the session passed through, in order.
    pub states: Vec<AttemptState>,
    /// Failure count carried by the final state; 0 on success.
    pub failures: u32,
}

impl RunReport {
    pub fn final_state(&self) -> AttemptState {
        self.states.last().copied().unwrap_or(AttemptState::Pending)
    }

    pub fn succeeded(&self) -> bool {
        self.final_state() == AttemptState::Completed
    }

    pub fn exit_code(&self) -> i32 {
        process_exit_code(self.failures)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn settings_reject_zero_repeat_and_bad_tags() {
        let mut cfg = RerunConfig {
            repeat: 0,
            ..Default::default()
        };
        assert!(OrchestratorSettings::from_config(&cfg).is_err());

        cfg.repeat = 3;
        cfg.failed_tag = "failed".into();
        assert!(OrchestratorSettings::from_config(&cfg).is_err());

        cfg.failed_tag = " @retry ".into();
        let settings = OrchestratorSettings::from_config(&cfg).unwrap();
        assert_eq!(settings.retry_tag, "@retry");
        assert_eq!(settings.repeat, 3);
    }
}
