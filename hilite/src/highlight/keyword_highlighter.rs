use itertools::Itertools;

use crate::config::KeywordGroup;
use crate::document::WindowRender;
use crate::highlight::highlight::{Highlight, Highlighter};
use crate::highlight::style::{SourceClass, StyleRef, StyledSource};
use crate::search::matcher::{is_searchable, Matcher};
use crate::search::scanner::scan_windows;

/// One highlighter per enabled keyword group: one matcher per non-blank word,
/// whole-word mode, case sensitivity taken from the group.
pub struct KeywordHighlighter {
    matchers: Vec<Matcher>,
    payload: StyledSource,
}

impl KeywordHighlighter {
    pub fn from_group(group: &KeywordGroup, declaration_index: usize, style: StyleRef) -> Self {
        let matchers = group
            .words()
            .iter()
            .filter(|word| is_searchable(word.as_str()))
            .map(|word| Matcher::build(word.as_str(), group.is_case_sensitive(), true))
            .collect_vec();
        KeywordHighlighter {
            matchers,
            payload: StyledSource::new(SourceClass::KeywordGroup(declaration_index), style),
        }
    }
}

impl Highlighter<StyledSource> for KeywordHighlighter {
    fn process(&self, windows: &[WindowRender]) -> Vec<Highlight<StyledSource>> {
        self.matchers
            .iter()
            .flat_map(|matcher| scan_windows(matcher, windows))
            .map(|occurrence| Highlight::new(occurrence.start, occurrence.end, self.payload))
            .collect()
    }
}
