use std::collections::HashMap;

use derive_builder::Builder;
use itertools::Itertools;
use uuid::Uuid;
use yaml_rust2::Yaml;

pub mod word_list;

pub const DEFAULT_SELECTION_COLOR: &str = "#5f87d7";
pub const DEFAULT_KEYWORD_COLOR: &str = "#ffd866";

/// Associates a permanent-mark command id with the hotkeys the host binds it
/// to. Hotkey strings are passed through to the host verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandBinding {
    id: String,
    description: Option<String>,
    hotkeys: Vec<String>,
}

impl From<&Yaml> for CommandBinding {
    /// Sample YAML fragment:
    /// ```yaml
    /// id: wrap_matches
    /// description: Wrap all occurrences of the selection
    /// hotkeys: [Ctrl+Shift+H]
    /// ```
    fn from(value: &Yaml) -> Self {
        let id = value["id"].as_str().unwrap_or_default().to_string();
        let description = value["description"].as_str().map(|s| s.to_string());
        let hotkeys = value["hotkeys"]
            .as_vec()
            .map(|arr| {
                arr.iter()
                    .filter_map(|hk| hk.as_str())
                    .map(|hk| hk.to_string())
                    .collect()
            })
            .unwrap_or_default();
        CommandBinding {
            id,
            description,
            hotkeys,
        }
    }
}

impl CommandBinding {
    pub fn new(
        id: impl ToString,
        description: Option<impl ToString>,
        hotkeys: Vec<impl ToString>,
    ) -> Self {
        Self {
            id: id.to_string(),
            description: description.map(|t| t.to_string()),
            hotkeys: hotkeys.into_iter().map(|t| t.to_string()).collect(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn hotkeys(&self) -> &Vec<String> {
        &self.hotkeys
    }

    /// Field-wise merge, `rhs` wins where it says anything.
    pub fn combine(&self, rhs: &CommandBinding) -> CommandBinding {
        assert_eq!(self.id(), rhs.id());
        let hotkeys = if rhs.hotkeys.is_empty() {
            self.hotkeys.clone()
        } else {
            rhs.hotkeys.clone()
        };
        CommandBinding {
            id: self.id.clone(),
            description: rhs.description().or(self.description()).map(String::from),
            hotkeys,
        }
    }
}

/// A named, colored, independently toggleable list of literal words that are
/// highlighted automatically. Blank words stay in storage and are filtered at
/// match time.
#[derive(Debug, Clone, PartialEq, Eq, Builder)]
#[builder(pattern = "owned")]
pub struct KeywordGroup {
    #[builder(default = "Uuid::new_v4()")]
    id: Uuid,
    name: String,
    #[builder(default = "DEFAULT_KEYWORD_COLOR.to_string()")]
    color: String,
    #[builder(default)]
    words: Vec<String>,
    #[builder(default = "true")]
    enabled: bool,
    #[builder(default = "false")]
    case_sensitive: bool,
}

impl From<&Yaml> for KeywordGroup {
    /// Sample YAML fragment:
    /// ```yaml
    /// id: 0e7f9a52-94b2-4b9e-8d5f-6d5a3e8b1c2d
    /// name: Errors
    /// color: "#ff5555"
    /// case_sensitive: false
    /// enabled: true
    /// words: [error, failed, panic]
    /// ```
    fn from(value: &Yaml) -> Self {
        let id = value["id"]
            .as_str()
            .and_then(|s| Uuid::parse_str(s).ok())
            .unwrap_or_else(Uuid::new_v4);
        let name = value["name"].as_str().unwrap_or_default().to_string();
        let color = value["color"]
            .as_str()
            .unwrap_or(DEFAULT_KEYWORD_COLOR)
            .to_string();
        let words = value["words"]
            .as_vec()
            .map(|arr| {
                arr.iter()
                    .filter_map(|w| w.as_str())
                    .map(|w| w.to_string())
                    .collect()
            })
            .unwrap_or_default();
        let enabled = value["enabled"].as_bool().unwrap_or(true);
        let case_sensitive = value["case_sensitive"].as_bool().unwrap_or(false);
        KeywordGroup {
            id,
            name,
            color,
            words,
            enabled,
            case_sensitive,
        }
    }
}

impl KeywordGroup {
    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn color(&self) -> &str {
        &self.color
    }

    pub fn words(&self) -> &[String] {
        &self.words[..]
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn is_case_sensitive(&self) -> bool {
        self.case_sensitive
    }

    pub fn add_word(&mut self, word: impl ToString) {
        self.words.push(word.to_string());
    }

    /// Removes the first word equal to `word`. `false` if the group does not
    /// contain it.
    pub fn remove_word(&mut self, word: &str) -> bool {
        match self.words.iter().position(|w| w == word) {
            Some(index) => {
                self.words.remove(index);
                true
            }
            None => false,
        }
    }

    pub fn rename_word(&mut self, word: &str, replacement: impl ToString) -> bool {
        match self.words.iter().position(|w| w == word) {
            Some(index) => {
                self.words[index] = replacement.to_string();
                true
            }
            None => false,
        }
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        if self.enabled != enabled {
            log::info!("Keyword group '{}' enabled: {}", self.name, enabled);
            self.enabled = enabled;
        }
    }

    pub fn set_color(&mut self, color: impl ToString) {
        self.color = color.to_string();
    }

    pub fn set_case_sensitive(&mut self, case_sensitive: bool) {
        self.case_sensitive = case_sensitive;
    }
}

/// Snapshot of everything the engine reads. Owned by the host's settings
/// store; the engine never mutates it, it only receives fresh copies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HighlightConfig {
    enabled: bool,
    selection_auto: bool,
    selection_case_sensitive: bool,
    selection_color: String,
    keywords_enabled: bool,
    groups: Vec<KeywordGroup>,
    commands: Vec<CommandBinding>,
}

impl Default for HighlightConfig {
    fn default() -> Self {
        HighlightConfig {
            enabled: true,
            selection_auto: true,
            selection_case_sensitive: false,
            selection_color: DEFAULT_SELECTION_COLOR.to_string(),
            keywords_enabled: true,
            groups: vec![],
            commands: vec![
                CommandBinding::new("wrap_matches", Some("Wrap all occurrences of the selection"), vec!["Ctrl+Shift+H"]),
                CommandBinding::new("unwrap_matches", Some("Remove wrap markers around the selection"), vec!["Ctrl+Shift+U"]),
                CommandBinding::new("tag_matches", Some("Tag all whole-word occurrences of the selection"), vec!["Ctrl+Shift+T"]),
                CommandBinding::new("untag_matches", Some("Remove tags from the selection"), vec!["Ctrl+Shift+R"]),
            ],
        }
    }
}

impl From<&Yaml> for HighlightConfig {
    /// Sample YAML fragment:
    /// ```yaml
    /// highlight:
    ///   enabled: true
    ///   selection:
    ///     auto: true
    ///     case_sensitive: false
    ///     color: "#5f87d7"
    ///   keywords:
    ///     enabled: true
    ///     groups:
    ///       - name: Errors
    ///         color: "#ff5555"
    ///         words: [error, failed]
    ///   commands:
    ///     - id: wrap_matches
    ///       hotkeys: [Ctrl+Shift+H]
    /// ```
    ///
    /// Missing fields fall back to the defaults; unknown fields are ignored.
    fn from(value: &Yaml) -> Self {
        let defaults = HighlightConfig::default();
        let highlight = &value["highlight"];
        let selection = &highlight["selection"];
        let keywords = &highlight["keywords"];
        let groups = keywords["groups"]
            .as_vec()
            .map(|arr| arr.iter().map(KeywordGroup::from).collect())
            .unwrap_or_default();
        let commands = highlight["commands"]
            .as_vec()
            .map(|arr| arr.iter().map(CommandBinding::from).collect())
            .unwrap_or_default();
        HighlightConfig {
            enabled: highlight["enabled"].as_bool().unwrap_or(defaults.enabled),
            selection_auto: selection["auto"].as_bool().unwrap_or(defaults.selection_auto),
            selection_case_sensitive: selection["case_sensitive"]
                .as_bool()
                .unwrap_or(defaults.selection_case_sensitive),
            selection_color: selection["color"]
                .as_str()
                .unwrap_or(defaults.selection_color.as_str())
                .to_string(),
            keywords_enabled: keywords["enabled"].as_bool().unwrap_or(defaults.keywords_enabled),
            groups,
            commands,
        }
    }
}

impl HighlightConfig {
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    pub fn is_selection_auto(&self) -> bool {
        self.selection_auto
    }

    pub fn set_selection_auto(&mut self, selection_auto: bool) {
        self.selection_auto = selection_auto;
    }

    pub fn is_selection_case_sensitive(&self) -> bool {
        self.selection_case_sensitive
    }

    pub fn set_selection_case_sensitive(&mut self, case_sensitive: bool) {
        self.selection_case_sensitive = case_sensitive;
    }

    pub fn selection_color(&self) -> &str {
        &self.selection_color
    }

    pub fn set_selection_color(&mut self, color: impl ToString) {
        self.selection_color = color.to_string();
    }

    pub fn is_keywords_enabled(&self) -> bool {
        self.keywords_enabled
    }

    pub fn set_keywords_enabled(&mut self, keywords_enabled: bool) {
        self.keywords_enabled = keywords_enabled;
    }

    pub fn groups(&self) -> &[KeywordGroup] {
        &self.groups[..]
    }

    pub fn add_group(&mut self, group: KeywordGroup) {
        self.groups.push(group);
    }

    pub fn remove_group(&mut self, id: Uuid) -> bool {
        match self.groups.iter().position(|g| g.id() == id) {
            Some(index) => {
                self.groups.remove(index);
                true
            }
            None => false,
        }
    }

    pub fn group_mut(&mut self, id: Uuid) -> Option<&mut KeywordGroup> {
        self.groups.iter_mut().find(|g| g.id() == id)
    }

    pub fn commands(&self) -> &[CommandBinding] {
        &self.commands[..]
    }

    pub fn lookup_command(&self, id: &str) -> Option<&CommandBinding> {
        self.commands.iter().find(|c| c.id() == id)
    }

    /// Merges `rhs` (user config) over `self` (defaults). Scalars come from
    /// `rhs`; commands are merged by id; the group list comes from whichever
    /// side defines one.
    pub fn combine(&self, rhs: &HighlightConfig) -> HighlightConfig {
        let mut right_commands = HashMap::with_capacity(rhs.commands.len());
        for command in &rhs.commands {
            right_commands.insert(command.id(), command);
        }
        let commands = self
            .commands
            .iter()
            .map(|x| match right_commands.get(x.id()) {
                None => x.clone(),
                Some(y) => x.combine(y),
            })
            .collect_vec();
        let groups = if rhs.groups.is_empty() {
            self.groups.clone()
        } else {
            rhs.groups.clone()
        };
        HighlightConfig {
            enabled: rhs.enabled,
            selection_auto: rhs.selection_auto,
            selection_case_sensitive: rhs.selection_case_sensitive,
            selection_color: rhs.selection_color.clone(),
            keywords_enabled: rhs.keywords_enabled,
            groups,
            commands,
        }
    }
}

#[cfg(test)]
mod tests {
    use spectral::prelude::*;
    use trim_margin::MarginTrimmable;
    use uuid::Uuid;
    use yaml_rust2::YamlLoader;

    use crate::test_extensions::ElementAssertions;

    use super::*;

    fn parse(s: String) -> HighlightConfig {
        let docs = YamlLoader::load_from_str(s.as_str()).unwrap();
        HighlightConfig::from(&docs[0])
    }

    #[test]
    fn test_parsing() {
        let s = "
            |highlight:
            |  enabled: true
            |  selection:
            |    auto: false
            |    case_sensitive: true
            |    color: \"#446688\"
            |  keywords:
            |    enabled: true
            |    groups:
            |      - id: 0e7f9a52-94b2-4b9e-8d5f-6d5a3e8b1c2d
            |        name: Errors
            |        color: \"#ff5555\"
            |        case_sensitive: true
            |        words: [error, failed, panic]
            |  commands:
            |    - id: wrap_matches
            |      hotkeys: [Ctrl+Alt+H]
            "
        .trim_margin()
        .unwrap();
        let actual = parse(s);
        assert_that!(actual.is_enabled()).is_true();
        assert_that!(actual.is_selection_auto()).is_false();
        assert_that!(actual.is_selection_case_sensitive()).is_true();
        assert_that!(actual.selection_color()).is_equal_to("#446688");
        assert_that!(actual.groups).has_length(1);
        let group = &actual.groups[0];
        assert_that!(group.id()).is_equal_to(
            Uuid::parse_str("0e7f9a52-94b2-4b9e-8d5f-6d5a3e8b1c2d").unwrap(),
        );
        assert_that!(group.name()).is_equal_to("Errors");
        assert_that!(group.words()).is_equal_to(
            &["error".to_string(), "failed".to_string(), "panic".to_string()][..],
        );
        assert_that!(group.is_case_sensitive()).is_true();
        assert_that!(group.is_enabled()).is_true();
        assert_that!(actual.commands).has_length(1);
    }

    #[test]
    fn test_parsing_fills_defaults() {
        let s = "
            |highlight:
            |  keywords:
            |    groups:
            |      - name: Bare
            "
        .trim_margin()
        .unwrap();
        let actual = parse(s);
        assert_that!(actual.is_enabled()).is_true();
        assert_that!(actual.is_selection_auto()).is_true();
        assert_that!(actual.selection_color()).is_equal_to(DEFAULT_SELECTION_COLOR);
        let group = &actual.groups()[0];
        assert_that!(group.color()).is_equal_to(DEFAULT_KEYWORD_COLOR);
        assert_that!(group.is_enabled()).is_true();
        assert_that!(group.is_case_sensitive()).is_false();
    }

    #[test]
    fn test_combine_commands_merged_by_id() {
        let defaults = HighlightConfig::default();
        let mut user = HighlightConfig::default();
        user.commands = vec![CommandBinding::new(
            "wrap_matches",
            Option::<String>::None,
            vec!["F9"],
        )];

        let combined = defaults.combine(&user);

        assert_that!(combined.commands).has_length(4);
        let wrap = combined.lookup_command("wrap_matches").unwrap();
        assert_that!(wrap.hotkeys()).is_equal_to(&vec!["F9".to_string()]);
        assert_that!(wrap.description()).contains("Wrap all occurrences of the selection");
        let tag = combined.lookup_command("tag_matches").unwrap();
        assert_that!(tag.hotkeys()).is_equal_to(&vec!["Ctrl+Shift+T".to_string()]);
    }

    #[test]
    fn test_combine_keeps_default_groups_when_user_defines_none() {
        let mut defaults = HighlightConfig::default();
        defaults.add_group(
            KeywordGroupBuilder::default()
                .name("builtin".to_string())
                .build()
                .unwrap(),
        );
        let user = HighlightConfig::default();

        let combined = defaults.combine(&user);

        assert_that!(combined.groups).has_only_element();
    }

    #[test]
    fn test_group_edit_operations() {
        let mut config = HighlightConfig::default();
        let group = KeywordGroupBuilder::default()
            .name("Errors".to_string())
            .words(vec!["error".to_string()])
            .build()
            .unwrap();
        let id = group.id();
        config.add_group(group);

        let group = config.group_mut(id).unwrap();
        group.add_word("failed");
        assert_that!(group.rename_word("error", "fault")).is_true();
        assert_that!(group.remove_word("missing")).is_false();
        group.set_enabled(false);
        group.set_color("#123456");

        let group = &config.groups()[0];
        assert_that!(group.words()).is_equal_to(
            &["fault".to_string(), "failed".to_string()][..],
        );
        assert_that!(group.is_enabled()).is_false();
        assert_that!(group.color()).is_equal_to("#123456");
        assert_that!(config.remove_group(id)).is_true();
        assert_that!(config.groups).is_empty();
    }
}
