use crate::document::WindowRender;
use crate::highlight::highlight::{Highlight, Highlighter};
use crate::highlight::style::{SourceClass, StyleRef, StyledSource};
use crate::search::matcher::{is_searchable, Matcher};
use crate::search::scanner::scan_windows;

/// Highlights every visible occurrence of the currently selected literal.
/// Substring mode: the user selected these exact characters, so "cat" lights
/// up inside "category" too.
pub struct SelectionHighlighter {
    matcher: Matcher,
    text: String,
    payload: StyledSource,
}

impl SelectionHighlighter {
    /// `None` unless the selected text is a single non-empty, whitespace-free
    /// span.
    pub fn create(text: &str, case_sensitive: bool, style: StyleRef) -> Option<SelectionHighlighter> {
        if !is_searchable(text) {
            return None;
        }
        Some(SelectionHighlighter {
            matcher: Matcher::build(text, case_sensitive, false),
            text: text.to_string(),
            payload: StyledSource::new(SourceClass::Selection, style),
        })
    }

    pub fn text(&self) -> &str {
        self.text.as_str()
    }
}

impl Highlighter<StyledSource> for SelectionHighlighter {
    fn process(&self, windows: &[WindowRender]) -> Vec<Highlight<StyledSource>> {
        scan_windows(&self.matcher, windows)
            .into_iter()
            .map(|occurrence| Highlight::new(occurrence.start, occurrence.end, self.payload))
            .collect()
    }
}
