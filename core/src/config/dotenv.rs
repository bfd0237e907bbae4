use std::path::Path;

use crate::errors::ConfigError;

pub const DEFAULT_DOTENV_FILE: &str = ".env";

/// Parses `KEY=VALUE` lines. `#` comments, blank lines and an `export `
/// prefix are accepted; matching single or double quotes around a value are
/// stripped. Lines that are not `KEY=VALUE` are logged and skipped.
pub fn parse_dotenv(content: &str) -> Vec<(String, String)> {
    let mut out = Vec::new();
    for (idx, raw) in content.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let line = line.strip_prefix("export ").unwrap_or(line);
        let Some((key, value)) = line.split_once('=') else {
            tracing::warn!(line = idx + 1, "skipping dotenv line that is not KEY=VALUE");
            continue;
        };
        let key = key.trim();
        if key.is_empty() || key.chars().any(char::is_whitespace) {
            tracing::warn!(line = idx + 1, "skipping dotenv line with an invalid key");
            continue;
        }
        out.push((key.to_string(), unquote(value.trim()).to_string()));
    }
    out
}

fn unquote(v: &str) -> &str {
    for q in ['"', '\''] {
        if v.len() >= 2 && v.starts_with(q) && v.ends_with(q) {
            return &v[1..v.len() - 1];
        }
    }
    v
}

/// Loads `path` into the process environment when it exists. Variables that
/// are already set keep their value. Returns the number of variables set.
pub fn load_dotenv(path: &Path) -> Result<usize, ConfigError> {
    if !path.exists() {
        return Ok(0);
    }
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Parse {
        path: path.display().to_string(),
        source: e.into(),
    })?;

    let mut applied = 0;
    for (key, value) in parse_dotenv(&content) {
        if std::env::var_os(&key).is_none() {
            std::env::set_var(&key, value);
            applied += 1;
        }
    }
    tracing::debug!(path = %path.display(), applied, "dotenv loaded");
    Ok(applied)
}
