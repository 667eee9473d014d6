//! Per-language buffer tabs.
//!
//! Localized content is edited one language at a time. Each tab owns its own
//! [`ToolbarStateManager`], so buffer, selection and undo history never leak between
//! languages. Switching tabs does not touch either tab's history.

use crate::config::EditorConfig;
use crate::state::ToolbarStateManager;
use std::collections::BTreeMap;
use thiserror::Error;

/// Workspace-level error type.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WorkspaceError {
    /// No tab is open for this language code.
    #[error("no tab open for language `{0}`")]
    UnknownTab(String),
    /// A tab is already open for this language code.
    #[error("a tab for language `{0}` is already open")]
    DuplicateTab(String),
}

/// A set of language tabs with one active tab.
#[derive(Debug, Default)]
pub struct LanguageTabs {
    tabs: BTreeMap<String, ToolbarStateManager>,
    active: Option<String>,
    config: EditorConfig,
}

impl LanguageTabs {
    /// Create an empty tab set using the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty tab set; every tab opened later uses `config`.
    pub fn with_config(config: EditorConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// Number of open tabs.
    pub fn len(&self) -> usize {
        self.tabs.len()
    }

    /// Returns `true` if no tab is open.
    pub fn is_empty(&self) -> bool {
        self.tabs.is_empty()
    }

    /// Open language codes, sorted.
    pub fn languages(&self) -> impl Iterator<Item = &str> {
        self.tabs.keys().map(String::as_str)
    }

    /// Active language code.
    pub fn active_language(&self) -> Option<&str> {
        self.active.as_deref()
    }

    /// Open a tab for `lang` with `initial` content. The first tab opened becomes active.
    pub fn open(&mut self, lang: &str, initial: &str) -> Result<(), WorkspaceError> {
        if self.tabs.contains_key(lang) {
            return Err(WorkspaceError::DuplicateTab(lang.to_string()));
        }
        self.tabs.insert(
            lang.to_string(),
            ToolbarStateManager::with_config(initial, self.config),
        );
        if self.active.is_none() {
            self.active = Some(lang.to_string());
        }
        tracing::debug!(lang, "opened language tab");
        Ok(())
    }

    /// Close the tab for `lang`. If it was active, the first remaining tab becomes active.
    pub fn close(&mut self, lang: &str) -> Result<ToolbarStateManager, WorkspaceError> {
        let manager = self
            .tabs
            .remove(lang)
            .ok_or_else(|| WorkspaceError::UnknownTab(lang.to_string()))?;
        if self.active.as_deref() == Some(lang) {
            self.active = self.tabs.keys().next().cloned();
        }
        Ok(manager)
    }

    /// Make `lang` the active tab.
    pub fn switch_to(&mut self, lang: &str) -> Result<(), WorkspaceError> {
        if !self.tabs.contains_key(lang) {
            return Err(WorkspaceError::UnknownTab(lang.to_string()));
        }
        self.active = Some(lang.to_string());
        Ok(())
    }

    /// Tab for `lang`.
    pub fn get(&self, lang: &str) -> Option<&ToolbarStateManager> {
        self.tabs.get(lang)
    }

    /// Mutable tab for `lang`.
    pub fn get_mut(&mut self, lang: &str) -> Option<&mut ToolbarStateManager> {
        self.tabs.get_mut(lang)
    }

    /// Active tab.
    pub fn active(&self) -> Option<&ToolbarStateManager> {
        self.active.as_deref().and_then(|lang| self.tabs.get(lang))
    }

    /// Mutable active tab.
    pub fn active_mut(&mut self) -> Option<&mut ToolbarStateManager> {
        let lang = self.active.as_deref()?;
        self.tabs.get_mut(lang)
    }

    /// Current text of every tab, keyed by language code.
    pub fn contents(&self) -> BTreeMap<String, String> {
        self.tabs
            .iter()
            .map(|(lang, manager)| (lang.clone(), manager.text().to_string()))
            .collect()
    }

    /// Whether any tab has unsaved changes.
    pub fn is_modified(&self) -> bool {
        self.tabs
            .values()
            .any(|manager| manager.get_toolbar_state().is_modified)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::Command;
    use crate::transform::Operation;

    #[test]
    fn test_first_tab_becomes_active() {
        let mut tabs = LanguageTabs::new();
        tabs.open("en", "Hello").unwrap();
        tabs.open("de", "Hallo").unwrap();
        assert_eq!(tabs.active_language(), Some("en"));
        assert_eq!(tabs.languages().collect::<Vec<_>>(), vec!["de", "en"]);
    }

    #[test]
    fn test_duplicate_and_unknown_tabs() {
        let mut tabs = LanguageTabs::new();
        tabs.open("en", "").unwrap();
        assert_eq!(
            tabs.open("en", "again"),
            Err(WorkspaceError::DuplicateTab("en".to_string()))
        );
        assert_eq!(
            tabs.switch_to("fr"),
            Err(WorkspaceError::UnknownTab("fr".to_string()))
        );
    }

    #[test]
    fn test_close_active_falls_back() {
        let mut tabs = LanguageTabs::new();
        tabs.open("en", "").unwrap();
        tabs.open("fr", "").unwrap();
        tabs.close("en").unwrap();
        assert_eq!(tabs.active_language(), Some("fr"));
        tabs.close("fr").unwrap();
        assert_eq!(tabs.active_language(), None);
        assert!(tabs.is_empty());
    }

    #[test]
    fn test_histories_are_per_tab() {
        let mut tabs = LanguageTabs::new();
        tabs.open("en", "Title").unwrap();
        tabs.open("tr", "Başlık").unwrap();

        let en = tabs.active_mut().unwrap();
        en.set_selection(0, 5).unwrap();
        en.execute(Command::Format(Operation::Bold));

        tabs.switch_to("tr").unwrap();
        let tr = tabs.active_mut().unwrap();
        assert!(!tr.get_toolbar_state().can_undo);
        assert!(!tr.execute(Command::Undo).is_applied());

        let contents = tabs.contents();
        assert_eq!(contents["en"], "**Title**");
        assert_eq!(contents["tr"], "Başlık");
        assert!(tabs.is_modified());
    }
}
