/// The `--env` string Cypress accepts: `KEY=VALUE` entries joined by commas.
///
/// Entries keep their original order and spelling; only `TAGS` entries are
/// ever rewritten.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvString {
    entries: Vec<String>,
}

const TAGS_KEY: &str = "TAGS";

impl EnvString {
    pub fn parse(raw: &str) -> Self {
        let entries = raw
            .split(',')
            .map(str::trim)
            .filter(|e| !e.is_empty())
            .map(str::to_string)
            .collect();
        Self { entries }
    }

    pub fn push_raw(&mut self, entry: &str) {
        let entry = entry.trim();
        if !entry.is_empty() {
            self.entries.push(entry.to_string());
        }
    }

    /// Points every `TAGS` entry at `tag`, appending `tags=<tag>` when there is none.
    pub fn select_tags(&mut self, tag: &str) {
        let mut replaced = false;
        for entry in self.entries.iter_mut() {
            let key = split_entry(entry).0.to_string();
            if key.eq_ignore_ascii_case(TAGS_KEY) {
                *entry = format!("{key}={tag}");
                replaced = true;
            }
        }
        if !replaced {
            self.entries.push(format!("tags={tag}"));
        }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn into_option(self) -> Option<String> {
        if self.is_empty() {
            None
        } else {
            Some(self.to_string())
        }
    }
}

impl std::fmt::Display for EnvString {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.entries.join(","))
    }
}

fn split_entry(entry: &str) -> (&str, Option<&str>) {
    match entry.split_once('=') {
        Some((k, v)) => (k.trim(), Some(v)),
        None => (entry.trim(), None),
    }
}
