use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // cypress-cucumber names outline rows "Title (example #2)".
    static ref EXAMPLE_SUFFIX: Regex = Regex::new(r"(?i)\s*\(example\s*#?\s*\d+\)\s*$").unwrap();
    static ref PLACEHOLDER: Regex = Regex::new(r"<[^<>]+>").unwrap();
}

const SCENARIO_KEYWORDS: [&str; 4] = [
    "Scenario Outline:",
    "Scenario Template:",
    "Scenario:",
    "Example:",
];

/// Feature-file text after tagging.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaggedText {
    pub text: String,
    /// Titles of the scenario headers that received the tag, in file order.
    pub tagged: Vec<String>,
}

impl TaggedText {
    pub fn changed(&self) -> bool {
        !self.tagged.is_empty()
    }
}

/// Strips an outline row suffix and surrounding whitespace from a reported scenario name.
pub fn normalize_scenario_name(name: &str) -> String {
    EXAMPLE_SUFFIX.replace(name.trim(), "").trim().to_string()
}

fn scenario_title(trimmed_line: &str) -> Option<&str> {
    SCENARIO_KEYWORDS
        .iter()
        .find_map(|kw| trimmed_line.strip_prefix(kw))
        .map(str::trim)
}

/// Outline headers such as `Pay with <card>` match reported names with the
/// placeholders filled in.
fn outline_pattern(title: &str) -> Option<Regex> {
    if !PLACEHOLDER.is_match(title) {
        return None;
    }
    let mut pattern = String::from("^");
    let mut last = 0;
    for m in PLACEHOLDER.find_iter(title) {
        pattern.push_str(&regex::escape(&title[last..m.start()]));
        pattern.push_str(".+?");
        last = m.end();
    }
    pattern.push_str(&regex::escape(&title[last..]));
    pattern.push('$');
    Regex::new(&pattern).ok()
}

fn title_matches(title: &str, wanted: &[String]) -> bool {
    if wanted.iter().any(|w| w == title) {
        return true;
    }
    outline_pattern(title).is_some_and(|re| wanted.iter().any(|w| re.is_match(w)))
}

fn block_has_tag(block: &[&str], tag: &str) -> bool {
    block
        .iter()
        .any(|line| line.split_whitespace().any(|token| token == tag))
}

/// Inserts `tag` on its own line above every scenario header whose title is one of `names`.
///
/// Headers already carrying `tag` in the tag lines directly above them are
/// left alone, so tagging the same text twice is a no-op.
pub fn tag_scenarios<S: AsRef<str>>(text: &str, names: &[S], tag: &str) -> TaggedText {
    let wanted: Vec<String> = names
        .iter()
        .map(|n| normalize_scenario_name(n.as_ref()))
        .filter(|n| !n.is_empty())
        .collect();

    let mut tagged = Vec::new();
    if wanted.is_empty() {
        return TaggedText {
            text: text.to_string(),
            tagged,
        };
    }

    let newline = if text.contains("\r\n") { "\r\n" } else { "\n" };
    let mut out = String::with_capacity(text.len() + 64);
    let mut tag_block: Vec<&str> = Vec::new();

    for line in text.split_inclusive('\n') {
        let content = line.trim_end_matches(['\r', '\n']);
        let trimmed = content.trim_start();

        if let Some(title) = scenario_title(trimmed) {
            if title_matches(title, &wanted) && !block_has_tag(&tag_block, tag) {
                let indent = &content[..content.len() - trimmed.len()];
                out.push_str(indent);
                out.push_str(tag);
                out.push_str(newline);
                tracing::debug!(scenario = %title, tag, "tagging scenario");
                tagged.push(title.to_string());
            }
        }

        if trimmed.starts_with('@') {
            tag_block.push(trimmed);
        } else if !trimmed.is_empty() && !trimmed.starts_with('#') {
            tag_block.clear();
        }

        out.push_str(line);
    }

    TaggedText { text: out, tagged }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const FEATURE: &str = "Feature: Checkout\n\n  Scenario: Checkout fails\n    Given a cart\n\n  @smoke\n  Scenario: Checkout works\n    Given a cart\n";

    #[test]
    fn inserts_tag_above_matching_header_with_same_indent() {
        let out = tag_scenarios(FEATURE, &["Checkout fails"], "@failed");
        assert_eq!(
            out.text,
            "Feature: Checkout\n\n  @failed\n  Scenario: Checkout fails\n    Given a cart\n\n  @smoke\n  Scenario: Checkout works\n    Given a cart\n"
        );
        assert_eq!(out.tagged, vec!["Checkout fails"]);
    }

    #[test]
    fn tagging_twice_does_not_duplicate() {
        let once = tag_scenarios(FEATURE, &["Checkout fails", "Checkout works"], "@failed");
        let twice = tag_scenarios(&once.text, &["Checkout fails", "Checkout works"], "@failed");
        assert!(!twice.changed());
        assert_eq!(twice.text, once.text);
        assert_eq!(once.text.matches("@failed").count(), 2);
    }

    #[test]
    fn existing_tag_line_is_respected() {
        let text = "Feature: F\n  @smoke @failed\n  Scenario: A\n";
        let out = tag_scenarios(text, &["A"], "@failed");
        assert!(!out.changed());
    }

    #[test]
    fn outline_rows_match_outline_header() {
        let text = "Feature: F\n  Scenario Outline: Pay with <card>\n    Examples:\n      | card |\n      | visa |\n";
        let out = tag_scenarios(text, &["Pay with <card> (example #1)"], "@failed");
        assert_eq!(out.tagged, vec!["Pay with <card>"]);
        assert!(out.text.contains("  @failed\n  Scenario Outline: Pay with <card>\n"));
    }

    #[test]
    fn outline_rows_with_filled_placeholders_match_outline_header() {
        let text = "Feature: F\n  Scenario Outline: Pay with <card> in <currency>\n    Examples:\n      | card | currency |\n      | visa | EUR |\n\n  Scenario: Pay with cash\n";
        let out = tag_scenarios(text, &["Pay with visa in EUR (example #1)"], "@failed");
        assert_eq!(out.tagged, vec!["Pay with <card> in <currency>"]);
        assert_eq!(out.text.matches("@failed").count(), 1);
    }

    #[test]
    fn outline_placeholders_do_not_match_other_titles() {
        let text = "Feature: F\n  Scenario Outline: Pay with <card>\n";
        let out = tag_scenarios(text, &["Refund with visa"], "@failed");
        assert!(!out.changed());
    }

    #[test]
    fn only_exact_titles_match() {
        let out = tag_scenarios(FEATURE, &["Checkout"], "@failed");
        assert!(!out.changed());
        assert_eq!(out.text, FEATURE);
    }

    #[test]
    fn preserves_crlf_line_endings() {
        let text = "Feature: F\r\n\tScenario: A\r\n";
        let out = tag_scenarios(text, &["A"], "@failed");
        assert_eq!(out.text, "Feature: F\r\n\t@failed\r\n\tScenario: A\r\n");
    }

    #[test]
    fn header_on_last_line_without_newline() {
        let out = tag_scenarios("Feature: F\nScenario: A", &["A"], "@failed");
        assert_eq!(out.text, "Feature: F\n@failed\nScenario: A");
    }

    #[test]
    fn normalizes_reported_names() {
        assert_eq!(normalize_scenario_name("  Pay (example #12) "), "Pay");
        assert_eq!(normalize_scenario_name("Pay (Example 3)"), "Pay");
        assert_eq!(normalize_scenario_name("Pay (examples)"), "Pay (examples)");
    }
}
