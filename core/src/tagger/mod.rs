//! Best-effort retry tagging of Gherkin feature files.
//!
//! `rewrite` is the pure text transformation; `files` handles discovery and
//! awaited read/write of the files on disk.

mod files;
mod rewrite;

pub use files::{names_for_file, FeatureTagger, TagReport};
pub use rewrite::{normalize_scenario_name, tag_scenarios, TaggedText};
