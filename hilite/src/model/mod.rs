pub use engine::{HighlightModel, ModelEvent, Trigger};

pub mod engine;
