use std::path::Path;

use anyhow::Context;

use crate::errors::ConfigError;

use super::types::{AppConfig, RunnerConfig};

pub const DEFAULT_CONFIG_FILE: &str = "cypress-rerun.toml";

pub fn load_default() -> Result<AppConfig, ConfigError> {
    load_from(Path::new(DEFAULT_CONFIG_FILE), |key| std::env::var(key).ok())
}

/// Reads `path` when it exists, then applies environment overrides through `lookup`.
pub fn load_from<F>(path: &Path, lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let mut cfg: AppConfig = if path.exists() {
        let s = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))
            .map_err(|source| ConfigError::Parse {
                path: path.display().to_string(),
                source,
            })?;
        toml::from_str::<AppConfig>(&s).map_err(|e| ConfigError::Parse {
            path: path.display().to_string(),
            source: e.into(),
        })?
    } else {
        AppConfig::default()
    };

    apply_env_overrides(&mut cfg, lookup)?;
    Ok(cfg)
}

fn apply_env_overrides<F>(cfg: &mut AppConfig, lookup: F) -> Result<(), ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

    if let Some(v) = get("CYPRESS_RERUN_REPEAT") {
        cfg.rerun.repeat = parse_env("CYPRESS_RERUN_REPEAT", &v)?;
    }
    if let Some(v) = get("CYPRESS_RERUN_DELAY") {
        cfg.rerun.delay_secs = parse_env("CYPRESS_RERUN_DELAY", &v)?;
    }
    if let Some(v) = get("CYPRESS_RERUN_FEATURE_FILES") {
        cfg.tagger.feature_files = v;
    }
    if let Some(v) = get("CYPRESS_RERUN_FAILED_TAG") {
        cfg.rerun.failed_tag = v.trim().to_string();
    }
    if let Some(v) = get("CYPRESS_RERUN_NODE_BIN") {
        if let RunnerConfig::Cypress(ref mut c) = cfg.runner {
            c.node_bin = v;
        }
    }
    Ok(())
}

fn parse_env<T>(key: &str, raw: &str) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    raw.trim().parse::<T>().map_err(|e| ConfigError::EnvInvalid {
        key: key.to_string(),
        source: e.into(),
    })
}
