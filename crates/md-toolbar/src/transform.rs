//! Toolbar transforms.
//!
//! Every formatting operation is a pure function of `(selected_text, full_text, start, end)`.
//! It replaces exactly the selected range and reports where the new selection should land.
//!
//! # Example
//!
//! ```rust
//! use md_toolbar::{Operation, Selection, transform};
//!
//! let result = transform::apply(Operation::Bold, "hello world", Selection::new(6, 11));
//! assert_eq!(result.text, "hello **world**");
//! assert_eq!(result.selection, Selection::new(8, 13));
//! ```

use crate::selection::Selection;
use crate::text::{char_len, replace_chars, slice_chars, split_lines_preserve_trailing};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Range;
use std::str::FromStr;
use thiserror::Error;

/// Placeholder inserted as the URL of links and images, selected for overtyping.
pub const URL_PLACEHOLDER: &str = "https://";

const TABLE_HEADER: &str = "| Column 1 | Column 2 |\n";
const TABLE_SEPARATOR: &str = "| -------- | -------- |\n";
const HORIZONTAL_RULE: &str = "\n---\n";

/// Heading level supported by the toolbar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HeadingLevel {
    /// `# `
    H1,
    /// `## `
    H2,
    /// `### `
    H3,
}

impl HeadingLevel {
    /// Number of `#` characters.
    pub fn depth(self) -> usize {
        match self {
            HeadingLevel::H1 => 1,
            HeadingLevel::H2 => 2,
            HeadingLevel::H3 => 3,
        }
    }

    fn marker(self) -> &'static str {
        match self {
            HeadingLevel::H1 => "# ",
            HeadingLevel::H2 => "## ",
            HeadingLevel::H3 => "### ",
        }
    }
}

/// A formatting operation from the toolbar catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum Operation {
    /// Prefix each selected line with `#`s.
    Heading(HeadingLevel),
    /// `**text**`
    Bold,
    /// `*text*`
    Italic,
    /// `` `text` ``
    InlineCode,
    /// Prefix each line with `- ` unless already bulleted.
    BulletList,
    /// Prefix each line with `1. `, `2. `, …
    NumberedList,
    /// Prefix each line with `> `.
    Blockquote,
    /// `[text](https://)`
    Link,
    /// `![text](https://)`
    Image,
    /// Triple-backtick fence around the selection.
    CodeBlock,
    /// Two-column table seeded with the selection.
    Table,
    /// Replace the selection with a horizontal rule.
    HorizontalRule,
}

/// Unknown operation id.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown toolbar operation `{0}`")]
pub struct ParseOperationError(pub String);

impl Operation {
    /// Every operation, in toolbar order.
    pub const ALL: [Operation; 14] = [
        Operation::Heading(HeadingLevel::H1),
        Operation::Heading(HeadingLevel::H2),
        Operation::Heading(HeadingLevel::H3),
        Operation::Bold,
        Operation::Italic,
        Operation::InlineCode,
        Operation::BulletList,
        Operation::NumberedList,
        Operation::Blockquote,
        Operation::Link,
        Operation::Image,
        Operation::CodeBlock,
        Operation::Table,
        Operation::HorizontalRule,
    ];

    /// Stable string id used by hosts (`"bold"`, `"h1"`, `"link"`, …).
    pub fn id(self) -> &'static str {
        match self {
            Operation::Heading(HeadingLevel::H1) => "h1",
            Operation::Heading(HeadingLevel::H2) => "h2",
            Operation::Heading(HeadingLevel::H3) => "h3",
            Operation::Bold => "bold",
            Operation::Italic => "italic",
            Operation::InlineCode => "code",
            Operation::BulletList => "ul",
            Operation::NumberedList => "ol",
            Operation::Blockquote => "quote",
            Operation::Link => "link",
            Operation::Image => "image",
            Operation::CodeBlock => "codeblock",
            Operation::Table => "table",
            Operation::HorizontalRule => "hr",
        }
    }

    /// Human-readable toolbar label.
    pub fn label(self) -> &'static str {
        match self {
            Operation::Heading(HeadingLevel::H1) => "Heading 1",
            Operation::Heading(HeadingLevel::H2) => "Heading 2",
            Operation::Heading(HeadingLevel::H3) => "Heading 3",
            Operation::Bold => "Bold",
            Operation::Italic => "Italic",
            Operation::InlineCode => "Inline code",
            Operation::BulletList => "Bullet list",
            Operation::NumberedList => "Numbered list",
            Operation::Blockquote => "Quote",
            Operation::Link => "Link",
            Operation::Image => "Image",
            Operation::CodeBlock => "Code block",
            Operation::Table => "Table",
            Operation::HorizontalRule => "Horizontal rule",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for Operation {
    type Err = ParseOperationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Operation::ALL
            .into_iter()
            .find(|op| op.id() == s)
            .ok_or_else(|| ParseOperationError(s.to_string()))
    }
}

impl From<Operation> for String {
    fn from(op: Operation) -> Self {
        op.id().to_string()
    }
}

impl TryFrom<String> for Operation {
    type Error = ParseOperationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Output of a transform: the whole new buffer and the selection to restore.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransformResult {
    /// New full buffer text.
    pub text: String,
    /// New selection, always within `0..=char_len(text)`.
    pub selection: Selection,
}

/// Text that replaces the selection, plus the new selection relative to its start.
struct Replacement {
    text: String,
    selected: Range<usize>,
}

impl Replacement {
    fn whole(text: String) -> Self {
        let len = char_len(&text);
        Self {
            text,
            selected: 0..len,
        }
    }
}

/// Apply `op` to `selection` within `full_text`.
///
/// The caller is expected to have rejected empty selections already; an empty selection is
/// still handled (it formats an empty string).
pub fn apply(op: Operation, full_text: &str, selection: Selection) -> TransformResult {
    let selected_text = slice_chars(full_text, selection.start, selection.end);
    transform(op, selected_text, full_text, selection.start, selection.end)
}

/// Pure transform over `(selected_text, full_text, start, end)`.
pub fn transform(
    op: Operation,
    selected_text: &str,
    full_text: &str,
    start: usize,
    end: usize,
) -> TransformResult {
    let replacement = match op {
        Operation::Heading(level) => prefix_lines(selected_text, |_| level.marker().to_string()),
        Operation::Bold => wrap(selected_text, "**", "**"),
        Operation::Italic => wrap(selected_text, "*", "*"),
        Operation::InlineCode => wrap(selected_text, "`", "`"),
        Operation::BulletList => bullet_list(selected_text),
        Operation::NumberedList => prefix_lines(selected_text, |i| format!("{}. ", i + 1)),
        Operation::Blockquote => prefix_lines(selected_text, |_| "> ".to_string()),
        Operation::Link => link(selected_text, "["),
        Operation::Image => link(selected_text, "!["),
        Operation::CodeBlock => wrap(selected_text, "```\n", "\n```"),
        Operation::Table => table(selected_text),
        Operation::HorizontalRule => Replacement::whole(HORIZONTAL_RULE.to_string()),
    };

    TransformResult {
        text: replace_chars(full_text, start, end, &replacement.text),
        selection: Selection::new(
            start + replacement.selected.start,
            start + replacement.selected.end,
        ),
    }
}

fn wrap(selected: &str, open: &str, close: &str) -> Replacement {
    let inner_start = char_len(open);
    Replacement {
        text: format!("{open}{selected}{close}"),
        selected: inner_start..inner_start + char_len(selected),
    }
}

fn prefix_lines<F>(selected: &str, prefix: F) -> Replacement
where
    F: Fn(usize) -> String,
{
    let block = split_lines_preserve_trailing(selected)
        .into_iter()
        .enumerate()
        .map(|(i, line)| format!("{}{line}", prefix(i)))
        .collect::<Vec<_>>()
        .join("\n");
    Replacement::whole(block)
}

fn bullet_list(selected: &str) -> Replacement {
    let block = split_lines_preserve_trailing(selected)
        .into_iter()
        .map(|line| {
            if line.trim_start().starts_with("- ") {
                line.to_string()
            } else {
                format!("- {line}")
            }
        })
        .collect::<Vec<_>>()
        .join("\n");
    Replacement::whole(block)
}

fn link(selected: &str, open: &str) -> Replacement {
    // `[text](` or `![text](`
    let url_start = char_len(open) + char_len(selected) + 2;
    Replacement {
        text: format!("{open}{selected}]({URL_PLACEHOLDER})"),
        selected: url_start..url_start + char_len(URL_PLACEHOLDER),
    }
}

fn table(selected: &str) -> Replacement {
    let cell_start = char_len(TABLE_HEADER) + char_len(TABLE_SEPARATOR) + 2;
    Replacement {
        text: format!("{TABLE_HEADER}{TABLE_SEPARATOR}| {selected} |  |"),
        selected: cell_start..cell_start + char_len(selected),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn run(op: Operation, text: &str, start: usize, end: usize) -> (String, usize, usize) {
        let result = apply(op, text, Selection::new(start, end));
        (result.text, result.selection.start, result.selection.end)
    }

    #[test]
    fn test_bold_wraps_and_selects_inner_text() {
        assert_eq!(
            run(Operation::Bold, "hello world", 6, 11),
            ("hello **world**".to_string(), 8, 13)
        );
    }

    #[test]
    fn test_italic_and_inline_code() {
        assert_eq!(run(Operation::Italic, "a b", 2, 3), ("a *b*".to_string(), 3, 4));
        assert_eq!(
            run(Operation::InlineCode, "x foo", 2, 5),
            ("x `foo`".to_string(), 3, 6)
        );
    }

    #[test]
    fn test_heading_prefixes_every_line() {
        let (text, start, end) = run(
            Operation::Heading(HeadingLevel::H2),
            "before\na\nb\nafter",
            7,
            10,
        );
        assert_eq!(text, "before\n## a\n## b\nafter");
        assert_eq!((start, end), (7, 16));
        assert_eq!(&text[7..16], "## a\n## b");
    }

    #[test]
    fn test_bullet_list_skips_bulleted_lines() {
        let (text, _, _) = run(Operation::BulletList, "- a\n  - b\nc", 0, 11);
        assert_eq!(text, "- a\n  - b\n- c");
    }

    #[test]
    fn test_numbered_list_counts_within_selection() {
        let (text, start, end) = run(Operation::NumberedList, "x\nfoo\nbar", 2, 9);
        assert_eq!(text, "x\n1. foo\n2. bar");
        assert_eq!((start, end), (2, 15));
    }

    #[test]
    fn test_blockquote() {
        let (text, _, _) = run(Operation::Blockquote, "one\ntwo", 0, 7);
        assert_eq!(text, "> one\n> two");
    }

    #[test]
    fn test_link_selects_url_placeholder() {
        let (text, start, end) = run(Operation::Link, "see text now", 4, 8);
        assert_eq!(text, "see [text](https://) now");
        assert_eq!(slice_chars(&text, start, end), URL_PLACEHOLDER);
    }

    #[test]
    fn test_image_selects_url_placeholder() {
        let (text, start, end) = run(Operation::Image, "cat", 0, 3);
        assert_eq!(text, "![cat](https://)");
        assert_eq!((start, end), (7, 15));
    }

    #[test]
    fn test_code_block_selects_inner_text() {
        let (text, start, end) = run(Operation::CodeBlock, "let x;", 0, 6);
        assert_eq!(text, "```\nlet x;\n```");
        assert_eq!(slice_chars(&text, start, end), "let x;");
    }

    #[test]
    fn test_table_seeds_first_cell() {
        let (text, start, end) = run(Operation::Table, "name", 0, 4);
        assert_eq!(
            text,
            "| Column 1 | Column 2 |\n| -------- | -------- |\n| name |  |"
        );
        assert_eq!(slice_chars(&text, start, end), "name");
    }

    #[test]
    fn test_horizontal_rule_discards_selection() {
        let (text, start, end) = run(Operation::HorizontalRule, "abcdef", 2, 4);
        assert_eq!(text, "ab\n---\nef");
        assert_eq!((start, end), (2, 7));
    }

    #[test]
    fn test_multibyte_offsets_are_chars() {
        let (text, start, end) = run(Operation::Bold, "日本語", 1, 2);
        assert_eq!(text, "日**本**語");
        assert_eq!((start, end), (3, 4));
    }

    #[test]
    fn test_operation_ids_round_trip() {
        for op in Operation::ALL {
            assert_eq!(op.id().parse::<Operation>(), Ok(op));
        }
        assert!("strikethrough".parse::<Operation>().is_err());
    }

    #[test]
    fn test_operation_serde_uses_ids() {
        let json = serde_json::to_string(&Operation::Heading(HeadingLevel::H3)).unwrap();
        assert_eq!(json, "\"h3\"");
        let op: Operation = serde_json::from_str("\"ul\"").unwrap();
        assert_eq!(op, Operation::BulletList);
    }
}
