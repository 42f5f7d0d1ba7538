pub use aggregator::{aggregate, build_sources, AggregateResult, DecorationSet, MatchSpan, SelectionMatches, Sources};
pub use highlight::{Highlight, Highlighter};
pub use style::{SourceClass, StyleRef, StyleTable, StyledSource};

pub mod aggregator;
pub mod highlight;
pub mod keyword_highlighter;
pub mod selection_highlighter;
pub mod style;
