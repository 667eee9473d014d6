//! Character-offset helpers over plain `String` buffers.
//!
//! All public offsets in this crate are expressed in `char`s (Unicode scalar values). Rust
//! strings are indexed by byte, so every slice goes through these helpers.

/// Number of characters in `text`.
pub fn char_len(text: &str) -> usize {
    text.chars().count()
}

/// Convert a character offset into a byte offset, clamping to the end of `text`.
pub fn char_to_byte(text: &str, char_offset: usize) -> usize {
    text.char_indices()
        .nth(char_offset)
        .map(|(byte, _)| byte)
        .unwrap_or(text.len())
}

/// Slice `text` by a half-open character range.
pub fn slice_chars(text: &str, start: usize, end: usize) -> &str {
    let start_byte = char_to_byte(text, start);
    let end_byte = char_to_byte(text, end.max(start));
    &text[start_byte..end_byte]
}

/// Replace the half-open character range `start..end` of `text` with `replacement`.
pub fn replace_chars(text: &str, start: usize, end: usize, replacement: &str) -> String {
    let start_byte = char_to_byte(text, start);
    let end_byte = char_to_byte(text, end.max(start));
    let mut out = String::with_capacity(text.len() - (end_byte - start_byte) + replacement.len());
    out.push_str(&text[..start_byte]);
    out.push_str(replacement);
    out.push_str(&text[end_byte..]);
    out
}

pub(crate) fn split_lines_preserve_trailing(text: &str) -> Vec<&str> {
    // `str::split('\n')` preserves trailing empty segments: N newlines => N+1 lines.
    text.split('\n').collect()
}
