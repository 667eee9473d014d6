//! Selection ranges in character offsets.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A half-open selection `start..end` in character offsets.
///
/// `start == end` denotes a caret with nothing selected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Selection {
    /// Inclusive start character offset.
    pub start: usize,
    /// Exclusive end character offset.
    pub end: usize,
}

/// Rejected host-provided selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SelectionError {
    /// `start` is greater than `end`.
    #[error("selection start {start} is after end {end}")]
    Inverted {
        /// Requested start offset.
        start: usize,
        /// Requested end offset.
        end: usize,
    },
    /// `end` lies past the end of the buffer.
    #[error("selection end {end} is past buffer length {len}")]
    OutOfBounds {
        /// Requested end offset.
        end: usize,
        /// Buffer length in characters.
        len: usize,
    },
}

impl Selection {
    /// Create a selection; callers are responsible for `start <= end`.
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// A caret (empty selection) at `offset`.
    pub fn caret(offset: usize) -> Self {
        Self::new(offset, offset)
    }

    /// Validate a selection against a buffer of `len` characters.
    pub fn checked(start: usize, end: usize, len: usize) -> Result<Self, SelectionError> {
        if start > end {
            return Err(SelectionError::Inverted { start, end });
        }
        if end > len {
            return Err(SelectionError::OutOfBounds { end, len });
        }
        Ok(Self::new(start, end))
    }

    /// Returns `true` if this is a caret.
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Length of the selection in characters.
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Clamp both bounds into `0..=len`.
    pub fn clamp_to(self, len: usize) -> Self {
        Self::new(self.start.min(len), self.end.min(len))
    }
}
