use std::ops::Add;

use regex::Match;

use crate::document::WindowRender;
use crate::search::matcher::Matcher;

// half-open span [start, end)
#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub struct Occurrence {
    pub start: usize,
    pub end: usize,
}

impl Occurrence {
    pub fn new(start: usize, end: usize) -> Self {
        Occurrence { start, end }
    }

    pub fn with_len(start: usize, len: usize) -> Self {
        Self::new(start, start + len)
    }

    pub fn from_match(m: Match) -> Self {
        Self::new(m.start(), m.end())
    }
}

impl Add<usize> for Occurrence {
    type Output = Occurrence;

    fn add(self, rhs: usize) -> Self::Output {
        Occurrence::new(self.start + rhs, self.end + rhs)
    }
}

/// Finds all matches within the supplied windows, in window order, left to
/// right within each window. Offsets are absolute document offsets.
///
/// Every window gets a fresh match iterator, so no cursor state survives
/// across window boundaries. Overlapping windows yield their matches twice;
/// deduplication is the aggregator's job.
pub fn scan_windows(matcher: &Matcher, windows: &[WindowRender]) -> Vec<Occurrence> {
    let mut occurrences = vec![];
    for window in windows {
        for m in matcher.find_iter(window.content.as_str()) {
            occurrences.push(Occurrence::from_match(m) + window.start);
        }
    }
    occurrences
}

/// Whole-text variant for the permanent-mark commands, which must transform
/// the entire document rather than the visible part.
pub fn scan_text(matcher: &Matcher, text: &str) -> Vec<Occurrence> {
    matcher.find_iter(text).map(Occurrence::from_match).collect()
}

// Tests are included according to http://xion.io/post/code/rust-unit-test-placement.html
#[cfg(test)]
#[path = "./scanner_tests.rs"]
mod scanner_tests;
