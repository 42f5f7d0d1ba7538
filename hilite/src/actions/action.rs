use crate::actions::{tag, untag, unwrap, wrap};
use crate::config::{CommandBinding, HighlightConfig};
use crate::model::engine::HighlightModel;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionOutcome {
    /// The document was transformed.
    Applied,
    /// Nothing happened; any guidance went out as a notice.
    Ignored,
}

pub struct ActionImpl {
    pub id: &'static str,
    pub action_impl: fn(model: &mut HighlightModel) -> anyhow::Result<ActionOutcome>,
}

pub static REGISTRY: [ActionImpl; 4] = [
    ActionImpl {
        id: "wrap_matches",
        action_impl: wrap::wrap_matches,
    },
    ActionImpl {
        id: "unwrap_matches",
        action_impl: unwrap::unwrap_matches,
    },
    ActionImpl {
        id: "tag_matches",
        action_impl: tag::tag_matches,
    },
    ActionImpl {
        id: "untag_matches",
        action_impl: untag::untag_matches,
    },
];

/// A command bound to the hotkeys the configuration associates with its id.
pub struct Action {
    id: String,
    description: String,
    hotkeys: Vec<String>,
    action_impl: &'static ActionImpl,
}

impl Action {
    /// `None` when the binding names an id with no implementation; unknown
    /// ids in config are ignored rather than rejected.
    pub fn from_binding(binding: &CommandBinding) -> Option<Action> {
        let action_impl = REGISTRY.iter().find(|ai| ai.id == binding.id())?;
        Some(Action {
            id: binding.id().to_string(),
            description: binding.description().unwrap_or_default().to_string(),
            hotkeys: binding.hotkeys().clone(),
            action_impl,
        })
    }

    pub fn id(&self) -> &str {
        self.id.as_str()
    }

    /// User-friendly description of the action
    pub fn description(&self) -> &str {
        self.description.as_str()
    }

    /// Hotkey strings as configured; parsing them is the host's business.
    pub fn hotkeys(&self) -> &[String] {
        &self.hotkeys[..]
    }

    pub fn perform(&self, model: &mut HighlightModel) -> anyhow::Result<ActionOutcome> {
        (self.action_impl.action_impl)(model)
    }
}

/// Commands the current configuration exposes, looked up by id or by hotkey.
pub struct ActionRegistry {
    actions: Vec<Action>,
}

impl ActionRegistry {
    pub fn new(config: &HighlightConfig) -> Self {
        let actions = config
            .commands()
            .iter()
            .filter_map(Action::from_binding)
            .collect();
        Self { actions }
    }

    pub fn lookup(&self, id: &str) -> Option<&Action> {
        self.actions.iter().find(|action| action.id() == id)
    }

    pub fn lookup_by_hotkey(&self, hotkey: &str) -> Option<&Action> {
        self.actions
            .iter()
            .find(|action| action.hotkeys().iter().any(|hk| hk == hotkey))
    }
}

impl<'a> IntoIterator for &'a ActionRegistry {
    type Item = &'a Action;
    type IntoIter = std::slice::Iter<'a, Action>;

    fn into_iter(self) -> Self::IntoIter {
        self.actions.iter()
    }
}
