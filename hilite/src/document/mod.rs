use thiserror::Error;

/// A host-supplied range of text that is currently materialized for rendering.
/// Live highlighting never scans beyond the supplied windows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VisibleWindow {
    pub start: usize,
    pub end: usize,
}

impl VisibleWindow {
    pub fn new(start: usize, end: usize) -> Self {
        VisibleWindow { start, end }
    }
}

/// A window together with its materialized text. `start` is the absolute
/// offset of `content` within the document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowRender {
    pub start: usize,
    pub content: String,
}

impl WindowRender {
    pub fn new(start: usize, content: impl Into<String>) -> Self {
        WindowRender {
            start,
            content: content.into(),
        }
    }
}

/// One element of a batch-edit transaction. Replaces `start..end` with
/// `replacement`; an insertion has `start == end`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edit {
    pub start: usize,
    pub end: usize,
    pub replacement: String,
}

impl Edit {
    pub fn new(start: usize, end: usize, replacement: impl Into<String>) -> Self {
        Edit {
            start,
            end,
            replacement: replacement.into(),
        }
    }
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum EditBatchError {
    #[error("Edit #{index} ({start}..{end}) is out of document bounds (length {length})")]
    OutOfBounds {
        index: usize,
        start: usize,
        end: usize,
        length: usize,
    },
    #[error("Edit #{index} does not fall on a character boundary")]
    NotCharBoundary { index: usize },
    #[error("Edits must come rightmost first and must not overlap")]
    OutOfOrder,
}

/// The host editor's document, as far as the engine is concerned.
pub trait DocumentSource {
    fn get_length(&self) -> usize;

    /// Reads `start..end`. `None` if the range is out of bounds or does not
    /// fall on character boundaries.
    fn read_raw(&self, start: usize, end: usize) -> Option<String>;

    /// Materializes the text of a visible window. The window's end is clamped
    /// to the document length.
    fn window_text(&self, window: VisibleWindow) -> WindowRender {
        let end = window.end.min(self.get_length());
        let content = if window.start < end {
            self.read_raw(window.start, end).unwrap_or_default()
        } else {
            String::new()
        };
        WindowRender {
            start: window.start,
            content,
        }
    }

    /// Applies an edit batch as one transaction. The whole batch is validated
    /// up front; on error nothing is modified.
    fn apply_batch(&mut self, batch: Vec<Edit>) -> Result<(), EditBatchError>;
}

/// Checks that every edit is in bounds, on character boundaries, and that the
/// batch is ordered rightmost first without overlaps. Applying in that order
/// keeps offsets of the edits still to come stable.
pub fn validate_batch(text: &str, batch: &[Edit]) -> Result<(), EditBatchError> {
    for (index, edit) in batch.iter().enumerate() {
        if edit.start > edit.end || edit.end > text.len() {
            return Err(EditBatchError::OutOfBounds {
                index,
                start: edit.start,
                end: edit.end,
                length: text.len(),
            });
        }
        if !text.is_char_boundary(edit.start) || !text.is_char_boundary(edit.end) {
            return Err(EditBatchError::NotCharBoundary { index });
        }
    }
    for pair in batch.windows(2) {
        if pair[1].end > pair[0].start {
            return Err(EditBatchError::OutOfOrder);
        }
    }
    Ok(())
}

/// Reference document over a plain string. Unit tests and embedding hosts
/// without an editor of their own use it as the backing document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InMemoryDocument {
    text: String,
}

impl InMemoryDocument {
    pub fn new(text: impl Into<String>) -> Self {
        InMemoryDocument { text: text.into() }
    }

    pub fn as_str(&self) -> &str {
        self.text.as_str()
    }
}

impl DocumentSource for InMemoryDocument {
    fn get_length(&self) -> usize {
        self.text.len()
    }

    fn read_raw(&self, start: usize, end: usize) -> Option<String> {
        self.text.get(start..end).map(str::to_string)
    }

    fn apply_batch(&mut self, batch: Vec<Edit>) -> Result<(), EditBatchError> {
        validate_batch(&self.text, &batch)?;
        for edit in &batch {
            self.text.replace_range(edit.start..edit.end, &edit.replacement);
        }
        Ok(())
    }
}
