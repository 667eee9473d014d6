//! Editor State Interface
//!
//! Exposes the toolbar engine's state to the host in a structured, immutable manner.
//!
//! # Overview
//!
//! - **State Queries**: undo/redo availability and selection presence for toolbar affordances
//! - **Version Tracking**: a version number bumped on every observable change
//! - **Change Notifications**: subscribe to state change events
//!
//! # Example
//!
//! ```rust
//! use md_toolbar::{Command, Operation, ToolbarStateManager};
//!
//! let mut manager = ToolbarStateManager::new("hello world");
//! manager.subscribe(|change| {
//!     println!("State changed: {:?}", change.change_type);
//! });
//!
//! manager.set_selection(0, 5).unwrap();
//! manager.execute(Command::Format(Operation::Bold));
//!
//! let state = manager.get_toolbar_state();
//! assert!(state.can_undo);
//! assert!(state.is_modified);
//! assert_eq!(state.version, 2);
//! ```

use crate::commands::{Command, CommandOutcome, ToolbarExecutor};
use crate::config::EditorConfig;
use crate::delta::TextDelta;
use crate::selection::{Selection, SelectionError};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Toolbar affordance state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolbarState {
    /// Can undo
    pub can_undo: bool,
    /// Can redo
    pub can_redo: bool,
    /// Whether a non-empty selection exists (gates every formatting button).
    pub has_selection: bool,
    /// Undo stack depth
    pub undo_depth: usize,
    /// Redo stack depth
    pub redo_depth: usize,
    /// State version number
    pub version: u64,
    /// Whether the buffer changed since the last save point
    pub is_modified: bool,
}

/// State change type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StateChangeType {
    /// Buffer content modified
    DocumentModified,
    /// Selection changed
    SelectionChanged,
    /// Buffer replaced and history discarded
    HistoryReset,
}

/// State change record
#[derive(Debug, Clone)]
pub struct StateChange {
    /// Change type
    pub change_type: StateChangeType,
    /// Old version number
    pub old_version: u64,
    /// New version number
    pub new_version: u64,
    /// Structured text delta for document changes (if available).
    pub text_delta: Option<Arc<TextDelta>>,
}

impl StateChange {
    /// Create a new state change record.
    pub fn new(change_type: StateChangeType, old_version: u64, new_version: u64) -> Self {
        Self {
            change_type,
            old_version,
            new_version,
            text_delta: None,
        }
    }

    /// Attach a structured text delta to this change record.
    pub fn with_text_delta(mut self, delta: Arc<TextDelta>) -> Self {
        self.text_delta = Some(delta);
        self
    }
}

/// State change callback function type
pub type StateChangeCallback = Box<dyn FnMut(&StateChange) + Send>;

/// Toolbar state manager
///
/// Wraps a [`ToolbarExecutor`] and adds version tracking, modification tracking and change
/// notifications. No-op commands never bump the version.
pub struct ToolbarStateManager {
    executor: ToolbarExecutor,
    state_version: u64,
    is_modified: bool,
    callbacks: Vec<StateChangeCallback>,
    last_text_delta: Option<Arc<TextDelta>>,
}

impl std::fmt::Debug for ToolbarStateManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ToolbarStateManager")
            .field("executor", &self.executor)
            .field("state_version", &self.state_version)
            .field("is_modified", &self.is_modified)
            .field("callbacks", &self.callbacks.len())
            .finish()
    }
}

impl ToolbarStateManager {
    /// Create a new state manager
    pub fn new(text: &str) -> Self {
        Self::with_config(text, EditorConfig::default())
    }

    /// Create a state manager with explicit tunables
    pub fn with_config(text: &str, config: EditorConfig) -> Self {
        Self {
            executor: ToolbarExecutor::with_config(text, config),
            state_version: 0,
            is_modified: false,
            callbacks: Vec::new(),
            last_text_delta: None,
        }
    }

    /// Get a reference to the executor
    pub fn executor(&self) -> &ToolbarExecutor {
        &self.executor
    }

    /// Current buffer text
    pub fn text(&self) -> &str {
        self.executor.text()
    }

    /// Current selection
    pub fn selection(&self) -> Selection {
        self.executor.selection()
    }

    /// Execute a command and trigger state change notifications when it applied.
    pub fn execute(&mut self, command: Command) -> CommandOutcome {
        let outcome = self.executor.execute(command);
        if let CommandOutcome::Applied(request) = &outcome {
            let delta = Arc::new(request.delta.clone());
            self.last_text_delta = Some(delta.clone());
            self.mark_modified_internal(StateChangeType::DocumentModified, Some(delta));
        }
        outcome
    }

    /// Execute a command by id; unknown ids are ignored.
    pub fn apply_operation(&mut self, id: &str) -> CommandOutcome {
        match Command::from_id(id) {
            Some(command) => self.execute(command),
            None => self.executor.apply_operation(id),
        }
    }

    /// Record a raw keystroke/paste (see [`ToolbarExecutor::on_text_changed`]).
    pub fn on_text_changed(&mut self, new_value: impl Into<String>) -> bool {
        let new_value = new_value.into();
        if new_value == self.executor.text() {
            return false;
        }
        let delta = Arc::new(TextDelta::between(self.executor.text(), &new_value));
        let recorded = self.executor.on_text_changed(new_value);
        self.last_text_delta = Some(delta.clone());
        self.mark_modified_internal(StateChangeType::DocumentModified, Some(delta));
        recorded
    }

    /// Host-reported selection change.
    pub fn set_selection(&mut self, start: usize, end: usize) -> Result<(), SelectionError> {
        let before = self.executor.selection();
        self.executor.set_selection(start, end)?;
        if self.executor.selection() != before {
            self.mark_modified_internal(StateChangeType::SelectionChanged, None);
        }
        Ok(())
    }

    /// Assign a new unrelated buffer; history is discarded and the save point moves here.
    pub fn reset(&mut self, text: &str) {
        self.executor.reset(text);
        self.is_modified = false;
        self.last_text_delta = None;
        self.mark_modified_internal(StateChangeType::HistoryReset, None);
    }

    /// Get toolbar affordance state
    pub fn get_toolbar_state(&self) -> ToolbarState {
        ToolbarState {
            can_undo: self.executor.can_undo(),
            can_redo: self.executor.can_redo(),
            has_selection: self.executor.has_selection(),
            undo_depth: self.executor.undo_depth(),
            redo_depth: self.executor.redo_depth(),
            version: self.state_version,
            is_modified: self.is_modified,
        }
    }

    /// Get current version number
    pub fn version(&self) -> u64 {
        self.state_version
    }

    /// Check if there are changes after the given version
    pub fn has_changed_since(&self, version: u64) -> bool {
        self.state_version > version
    }

    /// Mark the current buffer as saved.
    pub fn mark_saved(&mut self) {
        self.is_modified = false;
    }

    /// Subscribe to state change notifications
    pub fn subscribe<F>(&mut self, callback: F)
    where
        F: FnMut(&StateChange) + Send + 'static,
    {
        self.callbacks.push(Box::new(callback));
    }

    /// Structured delta of the last document change.
    pub fn last_text_delta(&self) -> Option<&TextDelta> {
        self.last_text_delta.as_deref()
    }

    /// Take the structured delta of the last document change.
    pub fn take_last_text_delta(&mut self) -> Option<Arc<TextDelta>> {
        self.last_text_delta.take()
    }

    fn mark_modified_internal(
        &mut self,
        change_type: StateChangeType,
        delta: Option<Arc<TextDelta>>,
    ) {
        let old_version = self.state_version;
        self.state_version += 1;

        if matches!(change_type, StateChangeType::DocumentModified) {
            self.is_modified = true;
        }

        let mut change = StateChange::new(change_type, old_version, self.state_version);
        if let Some(delta) = delta {
            change = change.with_text_delta(delta);
        }
        self.notify_callbacks(&change);
    }

    fn notify_callbacks(&mut self, change: &StateChange) {
        for callback in &mut self.callbacks {
            callback(change);
        }
    }
}
