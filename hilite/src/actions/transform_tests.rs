use crossbeam_channel::{unbounded, Receiver};
use spectral::prelude::*;

use crate::actions::action::{ActionOutcome, ActionRegistry};
use crate::config::HighlightConfig;
use crate::document::{DocumentSource, Edit, InMemoryDocument};
use crate::model::engine::{HighlightModel, ModelEvent};
use crate::selection::Selection;

use super::*;

const DOC: &str = "the cat sat on the mat. category theory";

fn apply(text: &str, edits: Vec<Edit>) -> String {
    let mut document = InMemoryDocument::new(text);
    document.apply_batch(edits).unwrap();
    document.as_str().to_string()
}

#[test]
fn test_wrap_edits_wrap_every_substring_occurrence() {
    let edits = wrap_edits(DOC, "cat");
    assert_that!(apply(DOC, edits))
        .is_equal_to("the ==cat== sat on the mat. ==cat==egory theory".to_string());
}

#[test]
fn test_wrap_edits_come_rightmost_first() {
    let edits = wrap_edits(DOC, "at");
    assert_that!(edits).has_length(4);
    for pair in edits.windows(2) {
        assert_that!(pair[1].end <= pair[0].start).is_true();
    }
}

#[test]
fn test_wrap_then_unwrap_restores_document() {
    let wrapped = apply(DOC, wrap_edits(DOC, "cat"));
    let restored = apply(wrapped.as_str(), unwrap_edits(wrapped.as_str(), "cat"));
    assert_that!(restored).is_equal_to(DOC.to_string());
}

#[test]
fn test_tag_edits_tag_whole_words_only() {
    let text = "cat category cat";
    let tagged = apply(text, tag_edits(text, "cat"));
    assert_that!(tagged).is_equal_to("#cat category #cat".to_string());
}

#[test]
fn test_tag_then_untag_restores_document() {
    let text = "cat category cat";
    let tagged = apply(text, tag_edits(text, "cat"));
    let restored = apply(tagged.as_str(), untag_edits(tagged.as_str(), "cat"));
    assert_that!(restored).is_equal_to(text.to_string());
}

#[test]
fn test_untag_leaves_tagged_longer_words_alone() {
    let text = "#category #cat";
    let restored = apply(text, untag_edits(text, "cat"));
    assert_that!(restored).is_equal_to("#category cat".to_string());
}

#[test]
fn test_no_occurrences_produce_no_edits() {
    assert_that!(wrap_edits(DOC, "dog")).is_empty();
    assert_that!(tag_edits(DOC, "dog")).is_empty();
    assert_that!(untag_edits(DOC, "dog")).is_empty();
}

#[test]
fn test_wrap_is_case_sensitive() {
    let text = "Cat cat";
    let wrapped = apply(text, wrap_edits(text, "cat"));
    assert_that!(wrapped).is_equal_to("Cat ==cat==".to_string());
}

fn create_model(document: &str) -> (HighlightModel, Receiver<ModelEvent>) {
    let (sender, receiver) = unbounded();
    let mut model = HighlightModel::new(sender, HighlightConfig::default());
    model.attach_document(Box::new(InMemoryDocument::new(document)));
    (model, receiver)
}

fn notices(receiver: &Receiver<ModelEvent>) -> Vec<String> {
    receiver
        .try_iter()
        .filter_map(|e| match e {
            ModelEvent::Notice(text) => Some(text),
            _ => None,
        })
        .collect()
}

#[test]
fn test_wrap_command_transforms_whole_document() {
    let (mut model, receiver) = create_model(DOC);
    model.set_selection(Selection::create(4, 7));
    let registry = ActionRegistry::new(&HighlightConfig::default());

    let outcome = registry.lookup("wrap_matches").unwrap().perform(&mut model);

    assert_that!(outcome.unwrap()).is_equal_to(ActionOutcome::Applied);
    assert_that!(model.document_text()).contains_value(
        "the ==cat== sat on the mat. ==cat==egory theory".to_string(),
    );
    assert_that!(notices(&receiver)).is_empty();
}

#[test]
fn test_unwrap_command_restores_document() {
    let (mut model, _receiver) = create_model(DOC);
    model.set_selection(Selection::create(4, 7));
    let registry = ActionRegistry::new(&HighlightConfig::default());

    registry.lookup("wrap_matches").unwrap().perform(&mut model).unwrap();
    // the wrap moved the selection's text; reselect "cat" inside the markers
    model.set_selection(Selection::create(6, 9));
    let outcome = registry.lookup("unwrap_matches").unwrap().perform(&mut model);

    assert_that!(outcome.unwrap()).is_equal_to(ActionOutcome::Applied);
    assert_that!(model.document_text()).contains_value(DOC.to_string());
}

#[test]
fn test_empty_selection_aborts_with_notice() {
    let (mut model, receiver) = create_model(DOC);
    model.set_selection(None);
    let registry = ActionRegistry::new(&HighlightConfig::default());

    let outcome = registry.lookup("tag_matches").unwrap().perform(&mut model);

    assert_that!(outcome.unwrap()).is_equal_to(ActionOutcome::Ignored);
    assert_that!(model.document_text()).contains_value(DOC.to_string());
    assert_that!(notices(&receiver))
        .contains("Select a single word without whitespace first".to_string());
}

#[test]
fn test_whitespace_selection_aborts_with_notice() {
    let (mut model, receiver) = create_model(DOC);
    model.set_selection(Selection::create(4, 11)); // "cat sat"
    let registry = ActionRegistry::new(&HighlightConfig::default());

    let outcome = registry.lookup("wrap_matches").unwrap().perform(&mut model);

    assert_that!(outcome.unwrap()).is_equal_to(ActionOutcome::Ignored);
    assert_that!(model.document_text()).contains_value(DOC.to_string());
    assert_that!(notices(&receiver))
        .contains("Select a single word without whitespace first".to_string());
}

#[test]
fn test_zero_matches_aborts_with_notice() {
    let (mut model, receiver) = create_model(DOC);
    model.set_selection(Selection::create(4, 7));
    let registry = ActionRegistry::new(&HighlightConfig::default());

    // nothing is wrapped yet, so unwrapping finds no ==cat==
    let outcome = registry.lookup("unwrap_matches").unwrap().perform(&mut model);

    assert_that!(outcome.unwrap()).is_equal_to(ActionOutcome::Ignored);
    assert_that!(model.document_text()).contains_value(DOC.to_string());
    assert_that!(notices(&receiver)).contains("'cat' does not occur in the document".to_string());
}

#[test]
fn test_no_document_aborts_with_notice() {
    let (sender, receiver) = unbounded();
    let mut model = HighlightModel::new(sender, HighlightConfig::default());
    let registry = ActionRegistry::new(&HighlightConfig::default());

    let outcome = registry.lookup("wrap_matches").unwrap().perform(&mut model);

    assert_that!(outcome.unwrap()).is_equal_to(ActionOutcome::Ignored);
    assert_that!(notices(&receiver)).contains("No active document".to_string());
}

#[test]
fn test_applied_command_retriggers_decoration_pass() {
    let (mut model, receiver) = create_model(DOC);
    model.set_selection(Selection::create(4, 7));
    receiver.try_iter().count();
    let registry = ActionRegistry::new(&HighlightConfig::default());

    registry.lookup("tag_matches").unwrap().perform(&mut model).unwrap();

    let recomputed = receiver
        .try_iter()
        .filter(|e| *e == ModelEvent::DecorationsUpdated)
        .count();
    assert_that!(recomputed).is_equal_to(1);
}
