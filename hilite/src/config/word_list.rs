use itertools::Itertools;

use crate::config::KeywordGroup;

/// Parses the plain-text keyword list format: tokens separated by commas
/// and/or newlines. Blank tokens and bare quoted tokens are discarded.
pub fn parse_word_list(input: &str) -> Vec<String> {
    input
        .split(['\n', ','])
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .filter(|token| !is_quoted(token))
        .map(str::to_string)
        .collect_vec()
}

/// Formats a group's words for export, one comma-separated line.
pub fn format_word_list(group: &KeywordGroup) -> String {
    group.words().iter().join(", ")
}

fn is_quoted(token: &str) -> bool {
    token.len() >= 2
        && (token.starts_with('"') && token.ends_with('"')
            || token.starts_with('\'') && token.ends_with('\''))
}

#[cfg(test)]
mod tests {
    use spectral::prelude::*;

    use crate::config::KeywordGroupBuilder;

    use super::*;

    fn strings(words: &[&str]) -> Vec<String> {
        words.iter().map(|w| w.to_string()).collect()
    }

    #[test]
    fn test_parse_commas_and_newlines() {
        let input = "error, failed\npanic,fatal";
        assert_that!(parse_word_list(input))
            .is_equal_to(strings(&["error", "failed", "panic", "fatal"]));
    }

    #[test]
    fn test_parse_discards_blanks() {
        let input = "error,, \n , failed\r\n";
        assert_that!(parse_word_list(input)).is_equal_to(strings(&["error", "failed"]));
    }

    #[test]
    fn test_parse_discards_quoted_tokens() {
        let input = "error, \"quoted\", 'single', failed";
        assert_that!(parse_word_list(input)).is_equal_to(strings(&["error", "failed"]));
    }

    #[test]
    fn test_parse_keeps_inner_quotes() {
        let input = "don't, \"half";
        assert_that!(parse_word_list(input)).is_equal_to(strings(&["don't", "\"half"]));
    }

    #[test]
    fn test_format_round_trips() {
        let group = KeywordGroupBuilder::default()
            .name("Errors".to_string())
            .words(strings(&["error", "failed"]))
            .build()
            .unwrap();
        let exported = format_word_list(&group);
        assert_that!(exported).is_equal_to("error, failed".to_string());
        assert_that!(parse_word_list(exported.as_str()))
            .is_equal_to(strings(&["error", "failed"]));
    }
}
