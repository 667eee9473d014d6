//! Structured text change deltas.
//!
//! Hosts that keep their own widget model (a DOM textarea, a rope in a native view) can patch
//! incrementally instead of replacing the whole buffer. Deltas are expressed in **character
//! offsets** (Unicode scalar values).

use crate::text::{char_len, slice_chars};
use serde::{Deserialize, Serialize};

/// A single text edit expressed in character offsets.
///
/// Semantics:
/// - `start` is a character offset in the document **at the time this edit is applied**.
/// - The deleted range is defined by the length (in `char`s) of `deleted_text`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextDeltaEdit {
    /// Start character offset of the edit.
    pub start: usize,
    /// Exact deleted text (may be empty).
    pub deleted_text: String,
    /// Exact inserted text (may be empty).
    pub inserted_text: String,
}

impl TextDeltaEdit {
    /// Length of `deleted_text` in characters.
    pub fn deleted_len(&self) -> usize {
        char_len(&self.deleted_text)
    }

    /// Length of `inserted_text` in characters.
    pub fn inserted_len(&self) -> usize {
        char_len(&self.inserted_text)
    }

    /// Exclusive end character offset in the pre-edit document.
    pub fn end(&self) -> usize {
        self.start.saturating_add(self.deleted_len())
    }
}

/// A structured description of a document text change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextDelta {
    /// Character count before applying `edits`.
    pub before_char_count: usize,
    /// Character count after applying `edits`.
    pub after_char_count: usize,
    /// Ordered list of edits that transforms the "before" document into the "after" document.
    pub edits: Vec<TextDeltaEdit>,
}

impl TextDelta {
    /// Returns `true` if this delta contains no edits.
    pub fn is_empty(&self) -> bool {
        self.edits.is_empty()
    }

    /// Delta for replacing `start..end` of `before` with `inserted`.
    pub fn replace(before: &str, start: usize, end: usize, inserted: &str) -> Self {
        let before_char_count = char_len(before);
        let deleted_text = slice_chars(before, start, end).to_string();
        let after_char_count = before_char_count - char_len(&deleted_text) + char_len(inserted);
        Self {
            before_char_count,
            after_char_count,
            edits: vec![TextDeltaEdit {
                start,
                deleted_text,
                inserted_text: inserted.to_string(),
            }],
        }
    }

    /// Minimal single-edit delta between two whole-buffer versions.
    ///
    /// Trims the common prefix and suffix; identical inputs produce an empty delta.
    pub fn between(before: &str, after: &str) -> Self {
        let before_chars: Vec<char> = before.chars().collect();
        let after_chars: Vec<char> = after.chars().collect();

        let prefix = before_chars
            .iter()
            .zip(&after_chars)
            .take_while(|(a, b)| a == b)
            .count();
        let max_suffix = before_chars.len().min(after_chars.len()) - prefix;
        let suffix = before_chars
            .iter()
            .rev()
            .zip(after_chars.iter().rev())
            .take(max_suffix)
            .take_while(|(a, b)| a == b)
            .count();

        let edits = if prefix == before_chars.len() && prefix == after_chars.len() {
            Vec::new()
        } else {
            vec![TextDeltaEdit {
                start: prefix,
                deleted_text: before_chars[prefix..before_chars.len() - suffix]
                    .iter()
                    .collect(),
                inserted_text: after_chars[prefix..after_chars.len() - suffix]
                    .iter()
                    .collect(),
            }]
        };

        Self {
            before_char_count: before_chars.len(),
            after_char_count: after_chars.len(),
            edits,
        }
    }

    /// Apply the edits to `text` in order.
    pub fn apply_to(&self, text: &str) -> String {
        self.edits.iter().fold(text.to_string(), |acc, edit| {
            crate::text::replace_chars(&acc, edit.start, edit.end(), &edit.inserted_text)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_replace_delta() {
        let delta = TextDelta::replace("hello world", 6, 11, "**world**");
        assert_eq!(delta.before_char_count, 11);
        assert_eq!(delta.after_char_count, 15);
        assert_eq!(delta.edits[0].deleted_text, "world");
        assert_eq!(delta.apply_to("hello world"), "hello **world**");
    }

    #[test]
    fn test_between_trims_common_affixes() {
        let delta = TextDelta::between("abcXdef", "abcYYdef");
        assert_eq!(
            delta.edits,
            vec![TextDeltaEdit {
                start: 3,
                deleted_text: "X".to_string(),
                inserted_text: "YY".to_string(),
            }]
        );
    }

    #[test]
    fn test_between_repeated_chars() {
        let delta = TextDelta::between("aaa", "aaaa");
        assert_eq!(delta.apply_to("aaa"), "aaaa");
        assert_eq!(delta.edits[0].inserted_len(), 1);
        assert_eq!(delta.edits[0].deleted_len(), 0);
    }

    #[test]
    fn test_between_identical_is_empty() {
        assert!(TextDelta::between("same", "same").is_empty());
    }
}
