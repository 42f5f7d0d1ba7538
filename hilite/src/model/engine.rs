use crossbeam_channel::Sender;

use crate::config::{HighlightConfig, KeywordGroup};
use crate::document::{DocumentSource, VisibleWindow, WindowRender};
use crate::highlight::aggregator::{aggregate, build_sources, DecorationSet, SelectionMatches};
use crate::highlight::style::StyleTable;
use crate::selection::Selection;
use crate::utils::event_emitter::EventEmitter;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModelEvent {
    /// The decoration set was rebuilt; the host re-reads it and re-renders.
    DecorationsUpdated,
    /// Human-readable match summary for a status area; empty clears it.
    Status(String),
    /// User guidance (dismissible notice), never a fault.
    Notice(String),
}

/// Reason tag carried by a host notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    SelectionChanged,
    DocumentChanged,
    ViewportChanged,
    ConfigChanged,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EngineState {
    Idle,
    Dirty,
    Recomputing,
}

/// Last-seen values of the configuration fields the engine recomputes for.
/// Compared by value: the host may fire generic update notifications that
/// touch none of these.
#[derive(Debug, Clone, PartialEq, Eq)]
struct WatchedConfig {
    enabled: bool,
    selection_auto: bool,
    selection_case_sensitive: bool,
    keywords_enabled: bool,
    groups: Vec<KeywordGroup>,
}

impl WatchedConfig {
    fn snapshot(config: &HighlightConfig) -> Self {
        WatchedConfig {
            enabled: config.is_enabled(),
            selection_auto: config.is_selection_auto(),
            selection_case_sensitive: config.is_selection_case_sensitive(),
            keywords_enabled: config.is_keywords_enabled(),
            groups: config.groups().to_vec(),
        }
    }
}

/// The engine facade the host integration layer talks to. All work is
/// synchronous on the thread that delivers the trigger; each trigger runs at
/// most one aggregation pass before the next trigger is considered.
pub struct HighlightModel {
    model_sender: Sender<ModelEvent>,
    document: Option<Box<dyn DocumentSource>>,
    selection: Option<Selection>,
    windows: Vec<VisibleWindow>,
    config: HighlightConfig,
    styles: StyleTable,
    watched: WatchedConfig,
    state: EngineState,
    decorations: DecorationSet,
    selection_matches: Option<SelectionMatches>,
}

impl HighlightModel {
    pub fn new(model_sender: Sender<ModelEvent>, config: HighlightConfig) -> Self {
        let styles = StyleTable::from_config(&config);
        let watched = WatchedConfig::snapshot(&config);
        HighlightModel {
            model_sender,
            document: None,
            selection: None,
            windows: vec![],
            config,
            styles,
            watched,
            state: EngineState::Idle,
            decorations: DecorationSet::default(),
            selection_matches: None,
        }
    }

    pub fn has_document(&self) -> bool {
        self.document.is_some()
    }

    pub fn attach_document(&mut self, document: Box<dyn DocumentSource>) {
        log::info!("Document attached, length {}", document.get_length());
        self.document = Some(document);
        self.on_trigger(Trigger::DocumentChanged);
    }

    pub fn detach_document(&mut self) {
        if self.document.take().is_some() {
            log::info!("Document detached");
            self.selection = None;
            self.on_trigger(Trigger::DocumentChanged);
        }
    }

    pub(crate) fn document_mut(&mut self) -> Option<&mut Box<dyn DocumentSource>> {
        self.document.as_mut()
    }

    /// Full document text, for the whole-document commands.
    pub fn document_text(&self) -> Option<String> {
        self.document
            .as_ref()
            .and_then(|document| document.read_raw(0, document.get_length()))
    }

    pub fn get_selection(&self) -> Option<Selection> {
        self.selection
    }

    pub fn set_selection(&mut self, selection: Option<Selection>) {
        if self.selection != selection {
            self.selection = selection;
            self.on_trigger(Trigger::SelectionChanged);
        }
    }

    pub fn get_selected_content(&self) -> Option<String> {
        self.selection.as_ref().and_then(|selection| {
            self.document
                .as_ref()
                .and_then(|document| document.read_raw(selection.start, selection.end))
        })
    }

    pub fn get_visible_windows(&self) -> &[VisibleWindow] {
        &self.windows[..]
    }

    pub fn set_visible_windows(&mut self, windows: Vec<VisibleWindow>) {
        if self.windows != windows {
            self.windows = windows;
            self.on_trigger(Trigger::ViewportChanged);
        }
    }

    /// Host notification that the document text changed (including edits this
    /// engine's own commands applied).
    pub fn document_edited(&mut self) {
        self.on_trigger(Trigger::DocumentChanged);
    }

    pub fn config(&self) -> &HighlightConfig {
        &self.config
    }

    /// Replaces the configuration snapshot. Recomputes only when a watched
    /// field actually changed value.
    pub fn set_config(&mut self, config: HighlightConfig) {
        let watched = WatchedConfig::snapshot(&config);
        let changed = watched != self.watched;
        self.config = config;
        self.styles = StyleTable::from_config(&self.config);
        if changed {
            self.watched = watched;
            self.on_trigger(Trigger::ConfigChanged);
        } else {
            log::trace!("Configuration update without watched changes, skipping recomputation");
        }
    }

    /// Single entry point for change notifications: marks the state dirty and
    /// leaves it through a synchronous recomputation.
    pub fn on_trigger(&mut self, reason: Trigger) {
        log::trace!("Trigger {:?}: {:?} -> Dirty", reason, self.state);
        self.state = EngineState::Dirty;
        self.recompute();
    }

    pub fn decorations(&self) -> &DecorationSet {
        &self.decorations
    }

    pub fn selection_matches(&self) -> Option<&SelectionMatches> {
        self.selection_matches.as_ref()
    }

    pub(crate) fn emit_notice(&self, text: impl ToString) {
        self.emit_event(ModelEvent::Notice(text.to_string()));
    }

    fn recompute(&mut self) {
        if self.state != EngineState::Dirty {
            return;
        }
        self.state = EngineState::Recomputing;
        let windows = self.render_windows();
        let selection_text = self.get_selected_content();
        let sources = build_sources(&self.config, &self.styles, selection_text.as_deref());
        let result = aggregate(&windows[..], &sources);
        log::debug!("Recomputed decorations: {} span(s)", result.decorations.len());
        self.decorations = result.decorations;
        self.selection_matches = result.selection;
        self.emit_event(ModelEvent::DecorationsUpdated);
        self.emit_event(ModelEvent::Status(self.status_line()));
        self.state = EngineState::Idle;
    }

    fn render_windows(&self) -> Vec<WindowRender> {
        match &self.document {
            Some(document) => self
                .windows
                .iter()
                .map(|window| document.window_text(*window))
                .collect(),
            None => vec![],
        }
    }

    fn status_line(&self) -> String {
        self.selection_matches
            .as_ref()
            .map(|matches| format!("{} found {} times", matches.text, matches.count))
            .unwrap_or_default()
    }

    fn emit_event(&self, event: ModelEvent) {
        self.model_sender.emit_event(event);
    }
}

// Tests are included according to http://xion.io/post/code/rust-unit-test-placement.html
#[cfg(test)]
#[path = "./engine_tests.rs"]
mod engine_tests;
