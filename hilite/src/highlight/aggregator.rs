use crate::config::HighlightConfig;
use crate::document::WindowRender;
use crate::highlight::highlight::{Highlight, Highlighter};
use crate::highlight::keyword_highlighter::KeywordHighlighter;
use crate::highlight::selection_highlighter::SelectionHighlighter;
use crate::highlight::style::{SourceClass, StyleRef, StyleTable, StyledSource};

/// A classified, styled span with absolute document offsets. Created fresh on
/// every recomputation and replaced wholesale, never mutated.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct MatchSpan {
    pub start: usize,
    pub end: usize,
    pub source: SourceClass,
    pub style: StyleRef,
}

/// The decoration sequence the rendering layer consumes. Sorted ascending by
/// start, ties broken by source precedence, then by end; no two spans share
/// a `(start, end)` pair.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DecorationSet {
    spans: Vec<MatchSpan>,
}

impl DecorationSet {
    pub fn spans(&self) -> &[MatchSpan] {
        &self.spans[..]
    }

    pub fn iter(&self) -> std::slice::Iter<'_, MatchSpan> {
        self.spans.iter()
    }

    pub fn len(&self) -> usize {
        self.spans.len()
    }

    pub fn is_empty(&self) -> bool {
        self.spans.is_empty()
    }
}

/// Side-channel summary of the selection source, consumed by the status
/// display: the matched literal and how many times it is visible.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionMatches {
    pub text: String,
    pub count: usize,
}

/// The enabled sources of one recomputation, built from a configuration
/// snapshot.
pub struct Sources {
    selection: Option<SelectionHighlighter>,
    keywords: Vec<KeywordHighlighter>,
}

pub fn build_sources(
    config: &HighlightConfig,
    styles: &StyleTable,
    selection_text: Option<&str>,
) -> Sources {
    let selection = selection_text
        .filter(|_| config.is_enabled() && config.is_selection_auto())
        .and_then(|text| {
            SelectionHighlighter::create(
                text,
                config.is_selection_case_sensitive(),
                styles.selection(),
            )
        });
    let keywords = if config.is_enabled() && config.is_keywords_enabled() {
        config
            .groups()
            .iter()
            .enumerate()
            .filter(|(_, group)| group.is_enabled())
            .map(|(i, group)| KeywordHighlighter::from_group(group, i, styles.keyword_group(i)))
            .collect()
    } else {
        vec![]
    };
    Sources { selection, keywords }
}

#[derive(Debug, PartialEq, Eq)]
pub struct AggregateResult {
    pub decorations: DecorationSet,
    pub selection: Option<SelectionMatches>,
}

/// Rebuilds the whole decoration set from scratch. Cheap enough because the
/// scope is the visible windows, not the document.
pub fn aggregate(windows: &[WindowRender], sources: &Sources) -> AggregateResult {
    let mut spans: Vec<MatchSpan> = vec![];
    let mut selection = None;
    if let Some(highlighter) = &sources.selection {
        let highlights = highlighter.process(windows);
        selection = Some(SelectionMatches {
            text: highlighter.text().to_string(),
            count: highlights.len(),
        });
        spans.extend(highlights.into_iter().map(to_span));
    }
    for highlighter in &sources.keywords {
        spans.extend(highlighter.process(windows).into_iter().map(to_span));
    }

    // Identical (start, end) pairs collapse to the highest-precedence source:
    // sort them adjacent with the winner first, then restore the rendering
    // order.
    spans.sort_by_key(|span| (span.start, span.end, span.source.precedence()));
    spans.dedup_by_key(|span| (span.start, span.end));
    spans.sort_by_key(|span| (span.start, span.source.precedence(), span.end));

    AggregateResult {
        decorations: DecorationSet { spans },
        selection,
    }
}

fn to_span(highlight: Highlight<StyledSource>) -> MatchSpan {
    let StyledSource { source, style } = highlight.get_payload();
    MatchSpan {
        start: highlight.get_start(),
        end: highlight.get_end(),
        source,
        style,
    }
}

// Tests are included according to http://xion.io/post/code/rust-unit-test-placement.html
#[cfg(test)]
#[path = "./aggregator_tests.rs"]
mod aggregator_tests;
