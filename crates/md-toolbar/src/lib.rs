#![warn(missing_docs)]
//! md-toolbar - Headless Markdown Toolbar Engine
//!
//! # Overview
//!
//! `md-toolbar` implements the state logic behind a markdown editor toolbar: it applies a
//! named formatting operation (bold, heading, list, link, table, …) to the current selection
//! of a single text buffer and keeps a bounded undo/redo history of whole-buffer snapshots.
//! It does not render anything; the host owns the text widget and applies the returned
//! [`EditRequest`]s to it.
//!
//! # Architecture Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │  Language Tabs (one state per language)     │  ← Workspace
//! ├─────────────────────────────────────────────┤
//! │  State Manager (versions + notifications)   │  ← Host API
//! ├─────────────────────────────────────────────┤
//! │  Command Executor (apply / undo / typing)   │  ← Commands
//! ├─────────────────────────────────────────────┤
//! │  Transforms (pure)  │  Snapshot History     │  ← Core
//! └─────────────────────────────────────────────┘
//! ```
//!
//! # Quick Start
//!
//! ```rust
//! use md_toolbar::{Command, Operation, Selection, ToolbarExecutor};
//!
//! let mut executor = ToolbarExecutor::new("see text");
//! executor.set_selection(4, 8).unwrap();
//!
//! let request = executor
//!     .execute(Command::Format(Operation::Link))
//!     .into_edit_request()
//!     .unwrap();
//!
//! // The URL placeholder is selected, ready to be overtyped.
//! assert_eq!(request.text, "see [text](https://)");
//! assert_eq!(request.selection, Selection::new(11, 19));
//! ```
//!
//! # No-op semantics
//!
//! Nothing in the engine returns an error. Formatting with an empty selection, undo/redo on
//! an empty stack and unknown operation ids all yield [`CommandOutcome::Noop`]. Errors exist
//! only at host boundaries: selection validation, operation id parsing, configuration
//! loading and tab management.
//!
//! # Module Description
//!
//! - [`transform`] - pure formatting transforms and the operation catalog
//! - [`history`] - bounded snapshot undo/redo and typed-edit coalescing
//! - [`commands`] - command interface over one buffer
//! - [`state`] - state queries, versioning and change notifications
//! - [`shortcuts`] - keyboard shortcut resolution
//! - [`workspace`] - per-language tabs
//! - [`config`] - engine tunables
//! - [`delta`] - structured text deltas

pub mod commands;
pub mod config;
pub mod delta;
pub mod history;
pub mod selection;
pub mod shortcuts;
pub mod state;
pub mod text;
pub mod transform;
pub mod workspace;

pub use commands::{
    Command, CommandOutcome, EditRequest, EditorState, NoopReason, ToolbarExecutor,
};
pub use config::{ConfigError, EditorConfig};
pub use delta::{TextDelta, TextDeltaEdit};
pub use history::{DEFAULT_COALESCE_THRESHOLD, DEFAULT_HISTORY_LIMIT, History};
pub use selection::{Selection, SelectionError};
pub use shortcuts::KeyChord;
pub use state::{
    StateChange, StateChangeCallback, StateChangeType, ToolbarState, ToolbarStateManager,
};
pub use transform::{HeadingLevel, Operation, ParseOperationError, TransformResult};
pub use workspace::{LanguageTabs, WorkspaceError};
