//! Command Interface Layer
//!
//! Provides a unified command interface over a single markdown buffer.
//!
//! # Overview
//!
//! [`ToolbarExecutor`] owns an [`EditorState`] (buffer, selection and snapshot history) and
//! executes [`Command`]s against it:
//!
//! - **Formatting**: apply an [`Operation`] to the current selection
//! - **History**: undo / redo whole-buffer snapshots
//! - **Typing**: coalesced history capture for free-form edits
//!
//! Invalid invocations never fail. An empty selection, an empty history stack or an unknown
//! operation id all produce [`CommandOutcome::Noop`] and leave the state untouched.
//!
//! # Example
//!
//! ```rust
//! use md_toolbar::{Command, Operation, Selection, ToolbarExecutor};
//!
//! let mut executor = ToolbarExecutor::new("hello world");
//! executor.set_selection(6, 11).unwrap();
//!
//! let outcome = executor.execute(Command::Format(Operation::Bold));
//! let request = outcome.edit_request().unwrap();
//! assert_eq!(request.text, "hello **world**");
//! assert_eq!(request.selection, Selection::new(8, 13));
//!
//! executor.execute(Command::Undo);
//! assert_eq!(executor.text(), "hello world");
//! ```

use crate::config::EditorConfig;
use crate::delta::TextDelta;
use crate::history::History;
use crate::selection::{Selection, SelectionError};
use crate::text::{char_len, slice_chars};
use crate::transform::{self, Operation, ParseOperationError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Unified command enum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum Command {
    /// Apply a formatting operation to the selection.
    Format(Operation),
    /// Restore the previous snapshot.
    Undo,
    /// Re-apply the last undone snapshot.
    Redo,
}

impl Command {
    /// Stable string id (`"bold"`, `"h2"`, `"undo"`, …).
    pub fn id(self) -> &'static str {
        match self {
            Command::Format(op) => op.id(),
            Command::Undo => "undo",
            Command::Redo => "redo",
        }
    }

    /// Look up a command by id; unknown ids yield `None`.
    pub fn from_id(id: &str) -> Option<Self> {
        id.parse().ok()
    }

    /// Whether the command can only act on a non-empty selection.
    pub fn requires_selection(self) -> bool {
        matches!(self, Command::Format(_))
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for Command {
    type Err = ParseOperationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "undo" => Ok(Command::Undo),
            "redo" => Ok(Command::Redo),
            other => other.parse().map(Command::Format),
        }
    }
}

impl From<Operation> for Command {
    fn from(op: Operation) -> Self {
        Command::Format(op)
    }
}

impl From<Command> for String {
    fn from(command: Command) -> Self {
        command.id().to_string()
    }
}

impl TryFrom<String> for Command {
    type Error = ParseOperationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Why a command left the state untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoopReason {
    /// A formatting operation was requested with nothing selected.
    EmptySelection,
    /// The undo stack is empty.
    NothingToUndo,
    /// The redo stack is empty.
    NothingToRedo,
    /// The operation id is not part of the catalog.
    UnknownOperation,
}

/// Host write-back instruction produced by an applied command.
///
/// The host replaces its text with `text`, and only once the widget reflects the new text
/// sets the selection to `selection`. When `restore_focus` is set the text surface should
/// regain input focus.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditRequest {
    /// New full buffer text.
    pub text: String,
    /// Selection to apply after the text.
    pub selection: Selection,
    /// Whether the text surface should regain focus.
    pub restore_focus: bool,
    /// Structured description of the change.
    pub delta: TextDelta,
}

/// Command execution result
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandOutcome {
    /// The buffer changed.
    Applied(EditRequest),
    /// Nothing happened.
    Noop(NoopReason),
}

impl CommandOutcome {
    /// Returns `true` if the buffer changed.
    pub fn is_applied(&self) -> bool {
        matches!(self, CommandOutcome::Applied(_))
    }

    /// The write-back request, if the command was applied.
    pub fn edit_request(&self) -> Option<&EditRequest> {
        match self {
            CommandOutcome::Applied(request) => Some(request),
            CommandOutcome::Noop(_) => None,
        }
    }

    /// Consume the outcome, returning the write-back request if any.
    pub fn into_edit_request(self) -> Option<EditRequest> {
        match self {
            CommandOutcome::Applied(request) => Some(request),
            CommandOutcome::Noop(_) => None,
        }
    }
}

/// Buffer, selection and history of one editing session.
#[derive(Debug, Clone)]
pub struct EditorState {
    /// Authoritative text.
    pub buffer: String,
    /// Current selection, `start <= end <= char_len(buffer)`.
    pub selection: Selection,
    /// Undo/redo snapshots.
    pub history: History,
}

impl EditorState {
    /// Fresh state with a caret at offset 0 and empty history.
    pub fn new(text: &str, history_limit: usize) -> Self {
        Self {
            buffer: text.to_string(),
            selection: Selection::caret(0),
            history: History::new(history_limit),
        }
    }

    /// Currently selected text.
    pub fn selected_text(&self) -> &str {
        slice_chars(&self.buffer, self.selection.start, self.selection.end)
    }

    /// Buffer length in characters.
    pub fn char_count(&self) -> usize {
        char_len(&self.buffer)
    }
}

/// Command executor
///
/// Executes toolbar commands against one buffer and tracks its snapshot history.
#[derive(Debug, Clone)]
pub struct ToolbarExecutor {
    state: EditorState,
    config: EditorConfig,
}

impl ToolbarExecutor {
    /// Create an executor with the default configuration.
    pub fn new(text: &str) -> Self {
        Self::with_config(text, EditorConfig::default())
    }

    /// Create an executor over an empty buffer.
    pub fn empty() -> Self {
        Self::new("")
    }

    /// Create an executor with explicit tunables.
    pub fn with_config(text: &str, config: EditorConfig) -> Self {
        Self {
            state: EditorState::new(text, config.history_limit),
            config,
        }
    }

    /// Current configuration.
    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    /// Read-only view of the editing state.
    pub fn state(&self) -> &EditorState {
        &self.state
    }

    /// Current buffer text.
    pub fn text(&self) -> &str {
        &self.state.buffer
    }

    /// Current selection.
    pub fn selection(&self) -> Selection {
        self.state.selection
    }

    /// Whether a non-empty selection exists.
    pub fn has_selection(&self) -> bool {
        !self.state.selection.is_empty()
    }

    /// Can undo
    pub fn can_undo(&self) -> bool {
        self.state.history.can_undo()
    }

    /// Can redo
    pub fn can_redo(&self) -> bool {
        self.state.history.can_redo()
    }

    /// Undo stack depth
    pub fn undo_depth(&self) -> usize {
        self.state.history.undo_depth()
    }

    /// Redo stack depth
    pub fn redo_depth(&self) -> usize {
        self.state.history.redo_depth()
    }

    /// Execute command
    pub fn execute(&mut self, command: Command) -> CommandOutcome {
        let outcome = match command {
            Command::Format(op) => self.execute_format(op),
            Command::Undo => self.execute_undo(),
            Command::Redo => self.execute_redo(),
        };

        if let CommandOutcome::Noop(reason) = &outcome {
            tracing::trace!(command = %command, ?reason, "command ignored");
        }
        outcome
    }

    /// Execute a command by its string id; unknown ids are ignored.
    pub fn apply_operation(&mut self, id: &str) -> CommandOutcome {
        match Command::from_id(id) {
            Some(command) => self.execute(command),
            None => {
                tracing::trace!(id, "unknown operation id");
                CommandOutcome::Noop(NoopReason::UnknownOperation)
            }
        }
    }

    /// Record a raw keystroke/paste.
    ///
    /// A value identical to the buffer is ignored. Otherwise the buffer takes `new_value`. A history snapshot of the previous buffer is
    /// recorded only when the undo stack is empty or the length changed by more than the
    /// configured coalesce threshold. Returns `true` if a snapshot was recorded.
    pub fn on_text_changed(&mut self, new_value: impl Into<String>) -> bool {
        let new_value = new_value.into();
        if new_value == self.state.buffer {
            return false;
        }
        let recorded = self.state.history.record_typed_edit(
            &self.state.buffer,
            &new_value,
            self.config.coalesce_threshold,
        );
        if recorded {
            tracing::debug!(depth = self.undo_depth(), "recorded typed edit snapshot");
        }
        self.state.buffer = new_value;
        self.state.selection = self.state.selection.clamp_to(self.state.char_count());
        recorded
    }

    /// Host-reported selection change.
    pub fn set_selection(&mut self, start: usize, end: usize) -> Result<(), SelectionError> {
        self.state.selection = Selection::checked(start, end, self.state.char_count())?;
        Ok(())
    }

    /// Replace the buffer with an unrelated value and forget all history.
    pub fn reset(&mut self, text: &str) {
        self.state = EditorState::new(text, self.config.history_limit);
    }

    fn execute_format(&mut self, op: Operation) -> CommandOutcome {
        let selection = self.state.selection;
        if selection.is_empty() {
            return CommandOutcome::Noop(NoopReason::EmptySelection);
        }

        let before = self.state.buffer.clone();
        self.state.history.push(before.clone());

        let result = transform::apply(op, &before, selection);
        let replaced_len = char_len(&result.text) + selection.len() - char_len(&before);
        let inserted = slice_chars(&result.text, selection.start, selection.start + replaced_len);
        let delta = TextDelta::replace(&before, selection.start, selection.end, inserted);

        tracing::debug!(
            op = %op,
            start = selection.start,
            end = selection.end,
            new_start = result.selection.start,
            new_end = result.selection.end,
            "applied toolbar transform"
        );

        self.state.buffer = result.text;
        self.state.selection = result.selection;
        CommandOutcome::Applied(EditRequest {
            text: self.state.buffer.clone(),
            selection: self.state.selection,
            restore_focus: true,
            delta,
        })
    }

    fn execute_undo(&mut self) -> CommandOutcome {
        let current = self.state.buffer.clone();
        match self.state.history.undo(current) {
            Some(snapshot) => {
                tracing::debug!(depth = self.undo_depth(), "undo");
                CommandOutcome::Applied(self.restore_snapshot(snapshot))
            }
            None => CommandOutcome::Noop(NoopReason::NothingToUndo),
        }
    }

    fn execute_redo(&mut self) -> CommandOutcome {
        let current = self.state.buffer.clone();
        match self.state.history.redo(current) {
            Some(snapshot) => {
                tracing::debug!(depth = self.redo_depth(), "redo");
                CommandOutcome::Applied(self.restore_snapshot(snapshot))
            }
            None => CommandOutcome::Noop(NoopReason::NothingToRedo),
        }
    }

    /// Content-only restore: the selection is not rolled back, only kept in bounds.
    fn restore_snapshot(&mut self, snapshot: String) -> EditRequest {
        let delta = TextDelta::between(&self.state.buffer, &snapshot);
        self.state.buffer = snapshot;
        self.state.selection = self.state.selection.clamp_to(self.state.char_count());
        EditRequest {
            text: self.state.buffer.clone(),
            selection: self.state.selection,
            restore_focus: false,
            delta,
        }
    }
}
