//! Summary extraction: the lines after a summary/objective/profile/about
//! heading, or the first few substantial lines when no heading exists.

use crate::extraction::segmenter::{find_section, Section};

const MAX_SUMMARY_CHARS: usize = 500;
const MAX_HEADING_LINES: usize = 4;
const FALLBACK_LINES: usize = 3;
const FALLBACK_MIN_LINE_CHARS: usize = 20;

/// Extracts the profile summary. Heading-based when possible, otherwise the
/// first three lines longer than 20 characters. Always ≤500 characters.
pub fn extract_summary(lines: &[String]) -> String {
    let text = match find_section(lines, Section::Summary) {
        Some(range) => lines[range]
            .iter()
            .take(MAX_HEADING_LINES)
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(" "),
        None => lines
            .iter()
            .filter(|line| line.chars().count() > FALLBACK_MIN_LINE_CHARS)
            .take(FALLBACK_LINES)
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(" "),
    };
    truncate_chars(&text, MAX_SUMMARY_CHARS)
}

/// Truncates on a character boundary, never mid-codepoint.
fn truncate_chars(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => text[..idx].to_string(),
        None => text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extraction::segmenter::to_lines;

    #[test]
    fn test_heading_based_summary_joins_following_lines() {
        let lines = to_lines(
            "Professional Summary\n\
             Backend engineer, eight years shipping services.\n\
             Focused on reliability and data pipelines.\n\
             Skills\n\
             Python",
        );
        let summary = extract_summary(&lines);
        assert!(summary.starts_with("Backend engineer,"));
        assert!(summary.contains("data pipelines"));
        assert!(!summary.contains("Python"));
    }

    #[test]
    fn test_heading_summary_capped_at_four_lines() {
        let lines = to_lines("Objective\none\ntwo\nthree\nfour\nfive");
        let summary = extract_summary(&lines);
        assert_eq!(summary, "one two three four");
    }

    #[test]
    fn test_fallback_takes_first_three_long_lines() {
        let lines = to_lines(
            "Jane Doe\n\
             An engineer who enjoys building things.\n\
             x\n\
             Worked across several teams and stacks.\n\
             Shipped production systems for a decade.\n\
             Also this line is long enough but is fourth.",
        );
        let summary = extract_summary(&lines);
        assert!(summary.contains("enjoys building"));
        assert!(summary.contains("several teams"));
        assert!(summary.contains("for a decade"));
        assert!(!summary.contains("is fourth"));
    }

    #[test]
    fn test_truncated_to_500_chars() {
        let long = "a".repeat(600);
        let lines = vec!["Summary".to_string(), long];
        let summary = extract_summary(&lines);
        assert_eq!(summary.chars().count(), 500);
    }

    #[test]
    fn test_truncation_respects_char_boundaries() {
        let long = "é".repeat(600);
        let lines = vec!["Summary".to_string(), long];
        let summary = extract_summary(&lines);
        assert_eq!(summary.chars().count(), 500);
    }

    #[test]
    fn test_empty_input_is_empty_summary() {
        assert_eq!(extract_summary(&[]), "");
    }
}
