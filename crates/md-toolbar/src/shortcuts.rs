//! Keyboard shortcuts.
//!
//! Formatting shortcuts only fire while a non-empty selection exists; undo and redo are
//! always available (they degrade to no-ops on an empty stack).

use crate::commands::Command;
use crate::transform::{HeadingLevel, Operation};
use std::fmt;

/// A key press with modifiers. `key` is compared case-insensitively.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyChord {
    /// The character key.
    pub key: char,
    /// Control (or Command on macOS hosts).
    pub ctrl: bool,
    /// Shift.
    pub shift: bool,
    /// Alt / Option.
    pub alt: bool,
}

impl KeyChord {
    /// `Ctrl+key`
    pub const fn ctrl(key: char) -> Self {
        Self {
            key,
            ctrl: true,
            shift: false,
            alt: false,
        }
    }

    /// `Alt+key`
    pub const fn alt(key: char) -> Self {
        Self {
            key,
            ctrl: false,
            shift: false,
            alt: true,
        }
    }

    /// The same chord with Shift held.
    pub const fn with_shift(mut self) -> Self {
        self.shift = true;
        self
    }

    fn normalized(self) -> Self {
        Self {
            key: self.key.to_ascii_lowercase(),
            ..self
        }
    }
}

impl fmt::Display for KeyChord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.ctrl {
            f.write_str("Ctrl+")?;
        }
        if self.alt {
            f.write_str("Alt+")?;
        }
        if self.shift {
            f.write_str("Shift+")?;
        }
        write!(f, "{}", self.key.to_ascii_uppercase())
    }
}

const BINDINGS: [(KeyChord, Command); 18] = [
    (KeyChord::ctrl('b'), Command::Format(Operation::Bold)),
    (KeyChord::ctrl('i'), Command::Format(Operation::Italic)),
    (KeyChord::ctrl('z'), Command::Undo),
    (KeyChord::ctrl('y'), Command::Redo),
    (KeyChord::ctrl('z').with_shift(), Command::Redo),
    (
        KeyChord::alt('1'),
        Command::Format(Operation::Heading(HeadingLevel::H1)),
    ),
    (
        KeyChord::alt('2'),
        Command::Format(Operation::Heading(HeadingLevel::H2)),
    ),
    (
        KeyChord::alt('3'),
        Command::Format(Operation::Heading(HeadingLevel::H3)),
    ),
    (KeyChord::alt('c'), Command::Format(Operation::InlineCode)),
    (KeyChord::alt('u'), Command::Format(Operation::BulletList)),
    (KeyChord::alt('o'), Command::Format(Operation::NumberedList)),
    (KeyChord::alt('q'), Command::Format(Operation::Blockquote)),
    (KeyChord::alt('l'), Command::Format(Operation::Link)),
    (KeyChord::alt('m'), Command::Format(Operation::Image)),
    (KeyChord::alt('k'), Command::Format(Operation::CodeBlock)),
    (KeyChord::alt('t'), Command::Format(Operation::Table)),
    (KeyChord::alt('h'), Command::Format(Operation::HorizontalRule)),
    (KeyChord::alt('i'), Command::Format(Operation::Italic)),
];

/// Resolve a key press into a command.
///
/// Returns `None` for unbound chords and for formatting chords pressed without a selection.
pub fn resolve(chord: KeyChord, has_selection: bool) -> Option<Command> {
    let chord = chord.normalized();
    let command = BINDINGS
        .iter()
        .find(|(binding, _)| *binding == chord)
        .map(|(_, command)| *command)?;

    if command.requires_selection() && !has_selection {
        return None;
    }
    Some(command)
}

/// Primary chord bound to `command`, for tooltips and help lines.
pub fn binding_for(command: Command) -> Option<KeyChord> {
    BINDINGS
        .iter()
        .find(|(_, bound)| *bound == command)
        .map(|(chord, _)| *chord)
}
