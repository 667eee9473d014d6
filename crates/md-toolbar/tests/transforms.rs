use md_toolbar::{Command, HeadingLevel, Operation, Selection, ToolbarExecutor};
use pretty_assertions::assert_eq;

fn apply(text: &str, start: usize, end: usize, op: Operation) -> ToolbarExecutor {
    let mut executor = ToolbarExecutor::new(text);
    executor.set_selection(start, end).unwrap();
    assert!(executor.execute(Command::Format(op)).is_applied());
    executor
}

#[test]
fn test_bold_exact_wrapping() {
    let executor = apply("hello world", 6, 11, Operation::Bold);
    assert_eq!(executor.text(), "hello **world**");
    assert_eq!(executor.selection(), Selection::new(8, 13));
}

#[test]
fn test_italic_exact_wrapping() {
    let executor = apply("hello world", 6, 11, Operation::Italic);
    assert_eq!(executor.text(), "hello *world*");
    assert_eq!(executor.selection(), Selection::new(7, 12));
}

#[test]
fn test_heading_multi_line_leaves_surroundings() {
    let executor = apply("x\na\nb\ny", 2, 5, Operation::Heading(HeadingLevel::H2));
    assert_eq!(executor.text(), "x\n## a\n## b\ny");
    assert_eq!(executor.state().selected_text(), "## a\n## b");
}

#[test]
fn test_link_placeholder_selected() {
    let executor = apply("text", 0, 4, Operation::Link);
    assert_eq!(executor.text(), "[text](https://)");
    assert_eq!(executor.state().selected_text(), "https://");
}

#[test]
fn test_bullet_list_is_idempotent_on_bulleted_lines() {
    let text = "- one\n   - two\n\t- three";
    let len = text.chars().count();
    let executor = apply(text, 0, len, Operation::BulletList);
    assert_eq!(executor.text(), text);
    assert_eq!(executor.undo_depth(), 1);
}

#[test]
fn test_bullet_list_mixed_lines() {
    let executor = apply("- done\ntodo", 0, 11, Operation::BulletList);
    assert_eq!(executor.text(), "- done\n- todo");
    assert_eq!(executor.selection(), Selection::new(0, 13));
}

#[test]
fn test_table_selects_seeded_cell() {
    let executor = apply("Intro: Name", 7, 11, Operation::Table);
    assert_eq!(
        executor.text(),
        "Intro: | Column 1 | Column 2 |\n| -------- | -------- |\n| Name |  |"
    );
    assert_eq!(executor.state().selected_text(), "Name");
}

#[test]
fn test_horizontal_rule_replaces_selection() {
    let executor = apply("above\nGONE\nbelow", 6, 10, Operation::HorizontalRule);
    assert_eq!(executor.text(), "above\n\n---\n\nbelow");
    assert_eq!(executor.state().selected_text(), "\n---\n");
}

#[test]
fn test_trailing_newline_in_selection_is_prefixed() {
    let executor = apply("a\nb\n", 0, 4, Operation::Blockquote);
    assert_eq!(executor.text(), "> a\n> b\n> ");
}
