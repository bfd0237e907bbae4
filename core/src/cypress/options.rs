use serde::{Deserialize, Serialize};

use super::env::EnvString;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TestingType {
    E2e,
    Component,
}

/// Options for a single `cypress.run()` call.
///
/// Serialized field names match the Cypress module API so the value can be
/// handed to the runner as-is. Every derivation (`for_attempt`,
/// `narrowed_to`) returns a new value; the base configuration parsed from the
/// command line is never mutated.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunConfiguration {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spec: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub env: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub record: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub browser: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ci_build_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config_file: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub headed: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub headless: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exit: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parallel: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quiet: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reporter: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reporter_options: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub testing_type: Option<TestingType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auto_cancel_after_failures: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub runner_ui: Option<bool>,
}

impl RunConfiguration {
    /// Decorates the configuration for attempt `attempt` of `total` (1-based).
    ///
    /// Appends the per-attempt env entries and, when recording into a group
    /// with more than one attempt, suffixes the group so dashboard runs don't
    /// clash (`nightly-1-of-3`, `nightly-2-of-3`, ...).
    pub fn for_attempt(&self, attempt: usize, total: usize, attempt_env: &[String]) -> Self {
        let mut next = self.clone();

        let mut env = EnvString::parse(next.env.as_deref().unwrap_or_default());
        for entry in attempt_env {
            env.push_raw(entry);
        }
        next.env = env.into_option();

        if next.record == Some(true) && total > 1 {
            if let Some(group) = next.group.as_mut() {
                group.push_str(&format!("-{attempt}-of-{total}"));
            }
        }
        next
    }

    /// Restricts the configuration to the failing spec files and the retry tag.
    pub fn narrowed_to(&self, failing_specs: &[String], retry_tag: &str) -> Self {
        let mut next = self.clone();
        next.spec = Some(failing_specs.join(","));

        let mut env = EnvString::parse(next.env.as_deref().unwrap_or_default());
        env.select_tags(retry_tag);
        next.env = env.into_option();
        next
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_with_module_api_names() {
        let cfg = RunConfiguration {
            spec: Some("a.feature".into()),
            ci_build_id: Some("42".into()),
            reporter_options: Some("toConsole=true".into()),
            testing_type: Some(TestingType::E2e),
            exit: Some(false),
            ..Default::default()
        };
        let v = serde_json::to_value(&cfg).unwrap();
        assert_eq!(
            v,
            serde_json::json!({
                "spec": "a.feature",
                "ciBuildId": "42",
                "reporterOptions": "toConsole=true",
                "testingType": "e2e",
                "exit": false,
            })
        );
    }

    #[test]
    fn for_attempt_suffixes_group_only_when_recording() {
        let base = RunConfiguration {
            group: Some("nightly".into()),
            record: Some(true),
            ..Default::default()
        };
        assert_eq!(base.for_attempt(2, 3, &[]).group.as_deref(), Some("nightly-2-of-3"));
        assert_eq!(base.for_attempt(1, 1, &[]).group.as_deref(), Some("nightly"));

        let not_recording = RunConfiguration {
            group: Some("nightly".into()),
            ..Default::default()
        };
        assert_eq!(not_recording.for_attempt(2, 3, &[]).group.as_deref(), Some("nightly"));
    }

    #[test]
    fn for_attempt_does_not_accumulate_env() {
        let base = RunConfiguration {
            env: Some("TAGS=@smoke".into()),
            ..Default::default()
        };
        let extra = vec!["allureClearSkippedTests=true".to_string()];
        let first = base.for_attempt(1, 2, &extra);
        let second = base.for_attempt(2, 2, &extra);
        assert_eq!(first.env.as_deref(), Some("TAGS=@smoke,allureClearSkippedTests=true"));
        assert_eq!(first.env, second.env);
        assert_eq!(base.env.as_deref(), Some("TAGS=@smoke"));
    }

    #[test]
    fn narrowed_to_joins_specs_and_selects_tag() {
        let base = RunConfiguration {
            spec: Some("cypress/e2e/**/*.feature".into()),
            env: Some("TAGS=not @wip and @smoke,foo=bar".into()),
            ..Default::default()
        };
        let next = base.narrowed_to(&["a.feature".into(), "b.feature".into()], "@failed");
        assert_eq!(next.spec.as_deref(), Some("a.feature,b.feature"));
        assert_eq!(next.env.as_deref(), Some("TAGS=@failed,foo=bar"));
        assert_eq!(base.spec.as_deref(), Some("cypress/e2e/**/*.feature"));
    }
}
