use thiserror::Error;

use crate::actions::action::ActionOutcome;
use crate::document::Edit;
use crate::model::engine::HighlightModel;
use crate::search::matcher::{is_searchable, is_word_constituent, Matcher};
use crate::search::scanner::scan_text;

/// Marker pair the wrap command puts around every occurrence.
pub const WRAP_MARKER: &str = "==";
/// Sigil the tag command prefixes whole-word occurrences with.
pub const TAG_SIGIL: &str = "#";

/// User-guidance conditions. Reported as a notice, never raised; the command
/// aborts before touching the document.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum MarkError {
    #[error("No active document")]
    NoDocument,
    #[error("Select a single word without whitespace first")]
    NoSearchableSelection,
    #[error("'{0}' does not occur in the document")]
    NoMatches(String),
}

/// Shared driver of the four permanent-mark commands: resolve the selected
/// literal, derive the edit batch over the whole document and apply it as one
/// transaction. Guidance failures surface as a notice and leave the document
/// untouched.
pub fn run_mark_command(
    model: &mut HighlightModel,
    edits_for: fn(&str, &str) -> Vec<Edit>,
) -> anyhow::Result<ActionOutcome> {
    let edits = match prepare(model, edits_for) {
        Ok(edits) => edits,
        Err(guidance) => {
            log::debug!("Mark command aborted: {}", guidance);
            model.emit_notice(guidance);
            return Ok(ActionOutcome::Ignored);
        }
    };
    let count = edits.len();
    let Some(document) = model.document_mut() else {
        model.emit_notice(MarkError::NoDocument);
        return Ok(ActionOutcome::Ignored);
    };
    document.apply_batch(edits)?;
    log::info!("Transformed {} occurrence(s)", count);
    model.document_edited();
    Ok(ActionOutcome::Applied)
}

fn prepare(
    model: &HighlightModel,
    edits_for: fn(&str, &str) -> Vec<Edit>,
) -> Result<Vec<Edit>, MarkError> {
    if !model.has_document() {
        return Err(MarkError::NoDocument);
    }
    let literal = model
        .get_selected_content()
        .filter(|text| is_searchable(text.as_str()))
        .ok_or(MarkError::NoSearchableSelection)?;
    let text = model.document_text().ok_or(MarkError::NoDocument)?;
    let edits = edits_for(text.as_str(), literal.as_str());
    if edits.is_empty() {
        return Err(MarkError::NoMatches(literal));
    }
    Ok(edits)
}

/// Wraps every document-wide occurrence of the literal in the marker pair.
/// Exact substring containment, case-sensitive. Rightmost occurrence first,
/// so pending offsets never shift.
pub fn wrap_edits(text: &str, literal: &str) -> Vec<Edit> {
    let matcher = Matcher::build(literal, true, false);
    let replacement = format!("{}{}{}", WRAP_MARKER, literal, WRAP_MARKER);
    scan_text(&matcher, text)
        .into_iter()
        .rev()
        .map(|occurrence| Edit::new(occurrence.start, occurrence.end, replacement.clone()))
        .collect()
}

/// Strips the marker pair around every wrapped occurrence of the literal.
pub fn unwrap_edits(text: &str, literal: &str) -> Vec<Edit> {
    let wrapped = format!("{}{}{}", WRAP_MARKER, literal, WRAP_MARKER);
    let matcher = Matcher::build(wrapped.as_str(), true, false);
    scan_text(&matcher, text)
        .into_iter()
        .rev()
        .map(|occurrence| Edit::new(occurrence.start, occurrence.end, literal))
        .collect()
}

/// Prefixes every whole-word occurrence of the literal with the tag sigil.
pub fn tag_edits(text: &str, literal: &str) -> Vec<Edit> {
    let matcher = Matcher::build(literal, true, true);
    let replacement = format!("{}{}", TAG_SIGIL, literal);
    scan_text(&matcher, text)
        .into_iter()
        .rev()
        .map(|occurrence| Edit::new(occurrence.start, occurrence.end, replacement.clone()))
        .collect()
}

/// Strips one leading sigil from every tagged occurrence of the literal. The
/// word boundary on the right mirrors the one the tag command matched with,
/// so `#cat` before "category" is left alone.
pub fn untag_edits(text: &str, literal: &str) -> Vec<Edit> {
    let tagged = format!("{}{}", TAG_SIGIL, literal);
    let matcher = Matcher::build(tagged.as_str(), true, false);
    let check_boundary = literal.chars().all(is_word_constituent);
    scan_text(&matcher, text)
        .into_iter()
        .filter(|occurrence| !check_boundary || ends_on_word_boundary(text, occurrence.end))
        .rev()
        .map(|occurrence| Edit::new(occurrence.start, occurrence.end, literal))
        .collect()
}

fn ends_on_word_boundary(text: &str, end: usize) -> bool {
    text[end..]
        .chars()
        .next()
        .map(|c| !is_word_constituent(c))
        .unwrap_or(true)
}

// Tests are included according to http://xion.io/post/code/rust-unit-test-placement.html
#[cfg(test)]
#[path = "./transform_tests.rs"]
mod transform_tests;
