use regex::Regex;

/// A pattern is derived from user state (selection or keyword), so anything
/// that is empty or carries whitespace is "no pattern". Callers check this
/// before building a matcher.
pub fn is_searchable(text: &str) -> bool {
    !text.is_empty() && !text.contains(char::is_whitespace)
}

pub fn is_word_constituent(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Ephemeral description of a matcher, recomputed per scan and never stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatcherSpec {
    pub pattern: String,
    pub case_sensitive: bool,
    pub whole_word: bool,
}

impl MatcherSpec {
    pub fn new(pattern: impl Into<String>, case_sensitive: bool, whole_word: bool) -> Self {
        MatcherSpec {
            pattern: pattern.into(),
            case_sensitive,
            whole_word,
        }
    }

    pub fn compile(&self) -> Matcher {
        let mut pattern = literal_pattern(self.pattern.as_str(), self.case_sensitive);
        // A boundary assertion next to a non-word character never matches,
        // so whole-word mode only applies to all-word literals; the rest
        // fall back to substring matching.
        if self.whole_word && self.pattern.chars().all(is_word_constituent) {
            pattern = format!(r"\b{}\b", pattern);
        }
        let regex = Regex::new(pattern.as_str())
            .expect("escaped literal is always a valid pattern");
        Matcher { regex }
    }
}

/// Escaped pattern for the literal. Case-insensitive mode folds ASCII
/// letters only, spelled out as two-letter classes; the regex `i` flag is
/// never used, so no Unicode case folding (Kelvin sign, dotless ı, ß/ẞ)
/// creeps in while `\b` stays Unicode-aware.
fn literal_pattern(literal: &str, case_sensitive: bool) -> String {
    if case_sensitive {
        return regex::escape(literal);
    }
    let mut pattern = String::with_capacity(literal.len() * 4);
    let mut buf = [0u8; 4];
    for c in literal.chars() {
        if c.is_ascii_alphabetic() {
            pattern.push('[');
            pattern.push(c.to_ascii_lowercase());
            pattern.push(c.to_ascii_uppercase());
            pattern.push(']');
        } else {
            pattern.push_str(regex::escape(c.encode_utf8(&mut buf)).as_str());
        }
    }
    pattern
}

pub struct Matcher {
    regex: Regex,
}

impl Matcher {
    pub fn build(text: &str, case_sensitive: bool, whole_word: bool) -> Matcher {
        MatcherSpec::new(text, case_sensitive, whole_word).compile()
    }

    pub fn find_iter<'r, 'h>(&'r self, haystack: &'h str) -> regex::Matches<'r, 'h> {
        self.regex.find_iter(haystack)
    }
}

// Tests are included according to http://xion.io/post/code/rust-unit-test-placement.html
#[cfg(test)]
#[path = "./matcher_tests.rs"]
mod matcher_tests;
