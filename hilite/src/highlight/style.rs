use std::cmp::Ordering;

use itertools::Itertools;

use crate::config::HighlightConfig;

/// Which source produced a span. Selection-driven occurrences win over
/// keyword groups; among groups, declaration order wins.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum SourceClass {
    Selection,
    KeywordGroup(usize),
}

impl SourceClass {
    pub fn precedence(&self) -> usize {
        match self {
            SourceClass::Selection => 0,
            SourceClass::KeywordGroup(declaration_index) => declaration_index + 1,
        }
    }
}

impl Ord for SourceClass {
    fn cmp(&self, other: &Self) -> Ordering {
        self.precedence().cmp(&other.precedence())
    }
}

impl PartialOrd for SourceClass {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Index into the [StyleTable] of the current configuration snapshot.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct StyleRef(usize);

impl StyleRef {
    pub fn index(&self) -> usize {
        self.0
    }
}

/// Source class together with the style its spans are rendered with.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct StyledSource {
    pub source: SourceClass,
    pub style: StyleRef,
}

impl StyledSource {
    pub fn new(source: SourceClass, style: StyleRef) -> Self {
        StyledSource { source, style }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Style {
    color: String,
}

impl Style {
    pub fn color(&self) -> &str {
        self.color.as_str()
    }
}

/// Indexed style table built once per configuration snapshot: entry 0 is the
/// selection style, followed by one entry per keyword group in declaration
/// order (disabled groups included, so indices stay stable).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleTable {
    styles: Vec<Style>,
}

impl StyleTable {
    pub fn from_config(config: &HighlightConfig) -> Self {
        let selection_style = Style {
            color: config.selection_color().to_string(),
        };
        let group_styles = config
            .groups()
            .iter()
            .map(|group| Style {
                color: group.color().to_string(),
            })
            .collect_vec();
        let mut styles = vec![selection_style];
        styles.extend(group_styles);
        StyleTable { styles }
    }

    pub fn selection(&self) -> StyleRef {
        StyleRef(0)
    }

    pub fn keyword_group(&self, declaration_index: usize) -> StyleRef {
        StyleRef(declaration_index + 1)
    }

    pub fn resolve(&self, style: StyleRef) -> &Style {
        &self.styles[style.0]
    }

    pub fn len(&self) -> usize {
        self.styles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.styles.is_empty()
    }
}
