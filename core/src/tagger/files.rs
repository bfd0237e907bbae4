use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::errors::TagError;
use crate::results::FailureSet;

use super::rewrite::tag_scenarios;

/// Outcome of one tagging pass over the feature files.
#[derive(Debug, Clone, Default, Serialize)]
pub struct TagReport {
    pub files_scanned: usize,
    pub files_tagged: Vec<PathBuf>,
    pub scenarios_tagged: usize,
    /// Files skipped because they could not be read or written.
    pub skipped: Vec<PathBuf>,
}

/// Rewrites feature files under one directory so failed scenarios carry the retry tag.
#[derive(Debug, Clone)]
pub struct FeatureTagger {
    dir: PathBuf,
    extension: String,
    tag: String,
}

impl FeatureTagger {
    pub fn new(dir: impl Into<PathBuf>, extension: impl Into<String>, tag: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            extension: extension.into(),
            tag: tag.into(),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// All feature files below the directory, sorted.
    pub fn collect_files(&self) -> Result<Vec<PathBuf>, TagError> {
        let base = glob::Pattern::escape(&self.dir.to_string_lossy());
        let pattern = Path::new(&base)
            .join(format!("**/*.{}", self.extension))
            .to_string_lossy()
            .into_owned();

        let entries = glob::glob(&pattern).map_err(|source| TagError::Pattern {
            pattern: pattern.clone(),
            source,
        })?;

        let mut files: Vec<PathBuf> = entries
            .filter_map(|entry| match entry {
                Ok(p) if p.is_file() => Some(p),
                Ok(_) => None,
                Err(e) => {
                    tracing::warn!(error = %e, "unreadable entry while scanning feature files");
                    None
                }
            })
            .collect();
        files.sort();
        Ok(files)
    }

    /// Tags every failed scenario. Per-file errors are logged and skipped.
    ///
    /// All writes have completed when this returns.
    pub async fn tag_failures(&self, failures: &FailureSet) -> TagReport {
        let mut report = TagReport::default();
        if failures.scenarios.is_empty() {
            return report;
        }

        let files = match self.collect_files() {
            Ok(files) => files,
            Err(e) => {
                tracing::warn!(error = %e, dir = %self.dir.display(), "feature files not scanned");
                return report;
            }
        };
        if files.is_empty() {
            tracing::warn!(dir = %self.dir.display(), "no feature files found to tag");
            return report;
        }
        report.files_scanned = files.len();

        for file in &files {
            let names = names_for_file(failures, file, &files);
            if names.is_empty() {
                continue;
            }
            match self.tag_file(file, &names).await {
                Ok(0) => {}
                Ok(n) => {
                    report.scenarios_tagged += n;
                    report.files_tagged.push(file.clone());
                }
                Err(e) => {
                    tracing::warn!(error = %e, "skipping feature file");
                    report.skipped.push(file.clone());
                }
            }
        }
        report
    }

    async fn tag_file(&self, file: &Path, names: &[&str]) -> Result<usize, TagError> {
        let original = tokio::fs::read_to_string(file)
            .await
            .map_err(|source| TagError::Read {
                path: file.display().to_string(),
                source,
            })?;

        let out = tag_scenarios(&original, names, &self.tag);
        if !out.changed() {
            return Ok(0);
        }

        tokio::fs::write(file, out.text.as_bytes())
            .await
            .map_err(|source| TagError::Write {
                path: file.display().to_string(),
                source,
            })?;
        tracing::debug!(file = %file.display(), scenarios = ?out.tagged, "feature file tagged");
        Ok(out.tagged.len())
    }
}

/// Scenario names to look for in `file`.
///
/// A failure belongs to the files whose path ends with its spec path; a
/// failure whose spec matches none of `files` is looked for everywhere.
pub fn names_for_file<'a>(failures: &'a FailureSet, file: &Path, files: &[PathBuf]) -> Vec<&'a str> {
    let mut names: Vec<&str> = Vec::new();
    for failure in &failures.scenarios {
        let spec = Path::new(&failure.spec);
        let belongs = if file.ends_with(spec) {
            true
        } else {
            !files.iter().any(|f| f.ends_with(spec))
        };
        if belongs && !names.contains(&failure.name.as_str()) {
            names.push(failure.name.as_str());
        }
    }
    names
}
