use crate::actions::action::ActionOutcome;
use crate::actions::transform;
use crate::model::engine::HighlightModel;

pub fn untag_matches(model: &mut HighlightModel) -> anyhow::Result<ActionOutcome> {
    transform::run_mark_command(model, transform::untag_edits)
}
