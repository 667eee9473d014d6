//! TUI markdown editor demo
//!
//! A terminal markdown editor built with crossterm and ratatui on top of `md-toolbar`.
//! Every file passed on the command line opens as a language tab; the language code is the
//! last dotted segment of the file stem (`article.en.md` -> `en`).
//!
//! # Usage
//!
//! ```bash
//! cargo run -p md-toolbar-tui -- article.en.md article.de.md
//! ```
//!
//! # Environment
//!
//! - `MD_TOOLBAR_CONFIG`: path to a JSON [`EditorConfig`] (`history_limit`, `coalesce_threshold`)
//! - `MD_TOOLBAR_LOG`: append `tracing` output to this file (filter via `RUST_LOG`)
//!
//! # Shortcuts
//!
//! - Arrow keys / Home / End: move cursor (Shift extends the selection)
//! - Ctrl+B / Alt+I: bold / italic (selection required)
//! - Alt+1..3, Alt+C/U/O/Q/L/M/K/T/H: other toolbar operations (selection required)
//! - Ctrl+Z / Ctrl+Y: undo / redo
//! - F2: focus the toolbar (Left/Right to pick, Enter to apply, Esc to return)
//! - F6 / Shift+F6: next / previous language tab
//! - Ctrl+S: save all tabs
//! - Ctrl+Q: quit

use crossterm::{
    event::{
        self, DisableBracketedPaste, EnableBracketedPaste, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers,
    },
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use md_toolbar::{
    Command, CommandOutcome, EditorConfig, HeadingLevel, KeyChord, LanguageTabs, NoopReason,
    Operation,
    shortcuts,
    text::{char_len, char_to_byte, replace_chars},
};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};
use std::{
    collections::BTreeMap,
    env, fs,
    io::{self, stdout},
    path::{Path, PathBuf},
    process,
    sync::Mutex,
    time::Duration,
};
use tracing_subscriber::EnvFilter;
use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthChar;

const TAB_CELLS: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Focus {
    Editor,
    Toolbar,
}

/// Toolbar buttons: the formatting catalog followed by undo/redo.
fn toolbar_items() -> Vec<Command> {
    Operation::ALL
        .into_iter()
        .map(Command::Format)
        .chain([Command::Undo, Command::Redo])
        .collect()
}

fn short_label(command: Command) -> &'static str {
    match command {
        Command::Format(op) => match op {
            Operation::Heading(HeadingLevel::H1) => "H1",
            Operation::Heading(HeadingLevel::H2) => "H2",
            Operation::Heading(HeadingLevel::H3) => "H3",
            Operation::Bold => "B",
            Operation::Italic => "I",
            Operation::InlineCode => "`",
            Operation::BulletList => "•",
            Operation::NumberedList => "1.",
            Operation::Blockquote => ">",
            Operation::Link => "Link",
            Operation::Image => "Img",
            Operation::CodeBlock => "```",
            Operation::Table => "Tbl",
            Operation::HorizontalRule => "—",
        },
        Command::Undo => "Undo",
        Command::Redo => "Redo",
    }
}

fn language_for_path(path: &Path) -> String {
    let stem = path
        .file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or("doc");
    match stem.rsplit_once('.') {
        Some((_, lang)) if !lang.is_empty() => lang.to_string(),
        _ => stem.to_string(),
    }
}

fn cell_width(ch: char) -> usize {
    if ch == '\t' {
        TAB_CELLS
    } else {
        ch.width().unwrap_or(0)
    }
}

/// (line, column) of a character offset; columns are in characters.
fn line_col(text: &str, offset: usize) -> (usize, usize) {
    let mut line = 0;
    let mut col = 0;
    for ch in text.chars().take(offset) {
        if ch == '\n' {
            line += 1;
            col = 0;
        } else {
            col += 1;
        }
    }
    (line, col)
}

/// Character offset of (line, column), clamping the column to the line length.
fn offset_for(text: &str, line: usize, col: usize) -> usize {
    let mut offset = 0;
    for (idx, content) in text.split('\n').enumerate() {
        let len = char_len(content);
        if idx == line {
            return offset + col.min(len);
        }
        offset += len + 1;
    }
    char_len(text)
}

fn prev_grapheme_boundary(text: &str, offset: usize) -> usize {
    let byte = char_to_byte(text, offset);
    text.grapheme_indices(true)
        .map(|(idx, _)| idx)
        .take_while(|idx| *idx < byte)
        .last()
        .map(|idx| char_len(&text[..idx]))
        .unwrap_or(0)
}

fn next_grapheme_boundary(text: &str, offset: usize) -> usize {
    let byte = char_to_byte(text, offset);
    text.grapheme_indices(true)
        .map(|(idx, g)| idx + g.len())
        .find(|end| *end > byte)
        .map(|end| char_len(&text[..end]))
        .unwrap_or_else(|| char_len(text))
}

fn describe_noop(reason: NoopReason) -> &'static str {
    match reason {
        NoopReason::EmptySelection => "Select some text first",
        NoopReason::NothingToUndo => "Nothing to undo",
        NoopReason::NothingToRedo => "Nothing to redo",
        NoopReason::UnknownOperation => "Unknown operation",
    }
}

/// Application state
struct App {
    /// One buffer per language
    tabs: LanguageTabs,
    /// Language code -> file path
    paths: BTreeMap<String, PathBuf>,
    /// Selection anchor (char offset)
    anchor: usize,
    /// Caret / active end of the selection (char offset)
    cursor: usize,
    focus: Focus,
    toolbar_index: usize,
    scroll_top: usize,
    should_quit: bool,
    confirm_quit: bool,
    status_message: String,
}

impl App {
    fn new(files: &[PathBuf], config: EditorConfig) -> io::Result<Self> {
        let mut tabs = LanguageTabs::with_config(config);
        let mut paths = BTreeMap::new();

        for path in files {
            let content = if path.exists() {
                fs::read_to_string(path)?
            } else {
                String::new()
            };
            let lang = language_for_path(path);
            tabs.open(&lang, &content)
                .map_err(|err| io::Error::new(io::ErrorKind::InvalidInput, err))?;
            paths.insert(lang, path.clone());
        }

        tracing::info!(tabs = tabs.len(), "editor started");

        Ok(Self {
            tabs,
            paths,
            anchor: 0,
            cursor: 0,
            focus: Focus::Editor,
            toolbar_index: 0,
            scroll_top: 0,
            should_quit: false,
            confirm_quit: false,
            status_message: String::new(),
        })
    }

    fn text(&self) -> &str {
        self.tabs.active().map(|manager| manager.text()).unwrap_or("")
    }

    fn has_selection(&self) -> bool {
        self.anchor != self.cursor
    }

    fn selection_range(&self) -> (usize, usize) {
        (self.anchor.min(self.cursor), self.anchor.max(self.cursor))
    }

    /// Push the local anchor/cursor into the engine.
    fn sync_selection(&mut self) {
        let (start, end) = self.selection_range();
        if let Some(manager) = self.tabs.active_mut()
            && let Err(err) = manager.set_selection(start, end)
        {
            tracing::warn!(%err, "selection rejected");
            self.status_message = format!("Selection rejected: {err}");
        }
    }

    fn handle_key_event(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }

        if self.confirm_quit {
            match key.code {
                KeyCode::Char('y' | 'Y') => {
                    if let Err(e) = self.save_all() {
                        self.status_message = format!("Save failed: {e}");
                        self.confirm_quit = false;
                    } else {
                        self.should_quit = true;
                    }
                }
                KeyCode::Char('n' | 'N') => {
                    self.should_quit = true;
                }
                KeyCode::Esc => {
                    self.confirm_quit = false;
                    self.status_message.clear();
                }
                _ => {}
            }
            return;
        }

        if self.focus == Focus::Toolbar {
            self.handle_toolbar_key(key);
            return;
        }

        if let Some(chord) = Self::chord_for(key)
            && let Some(command) = shortcuts::resolve(chord, self.has_selection())
        {
            self.execute(command);
            return;
        }

        let selecting = key.modifiers.contains(KeyModifiers::SHIFT);
        match (key.modifiers, key.code) {
            (KeyModifiers::CONTROL, KeyCode::Char('s')) => match self.save_all() {
                Ok(()) => self.status_message = format!("Saved {} file(s)", self.paths.len()),
                Err(e) => self.status_message = format!("Save failed: {e}"),
            },
            (KeyModifiers::CONTROL, KeyCode::Char('q')) => {
                if self.tabs.is_modified() {
                    self.confirm_quit = true;
                    self.status_message = "Unsaved changes. Save? (y/n)".to_string();
                } else {
                    self.should_quit = true;
                }
            }
            (KeyModifiers::CONTROL, KeyCode::Char('b' | 'i')) => {
                // Formatting shortcut without a selection.
                self.status_message = describe_noop(NoopReason::EmptySelection).to_string();
            }
            (_, KeyCode::F(2)) => {
                self.focus = Focus::Toolbar;
                self.status_message = "Toolbar: Left/Right to pick, Enter to apply".to_string();
            }
            (KeyModifiers::SHIFT, KeyCode::F(6)) => self.cycle_tab(false),
            (_, KeyCode::F(6)) => self.cycle_tab(true),
            (_, KeyCode::Left) => {
                let target = prev_grapheme_boundary(self.text(), self.cursor);
                self.move_cursor_to(target, selecting);
            }
            (_, KeyCode::Right) => {
                let target = next_grapheme_boundary(self.text(), self.cursor);
                self.move_cursor_to(target, selecting);
            }
            (_, KeyCode::Up) => self.move_vertical(-1, selecting),
            (_, KeyCode::Down) => self.move_vertical(1, selecting),
            (_, KeyCode::Home) => {
                let (line, _) = line_col(self.text(), self.cursor);
                let target = offset_for(self.text(), line, 0);
                self.move_cursor_to(target, selecting);
            }
            (_, KeyCode::End) => {
                let (line, _) = line_col(self.text(), self.cursor);
                let target = offset_for(self.text(), line, usize::MAX);
                self.move_cursor_to(target, selecting);
            }
            (_, KeyCode::Backspace) => self.backspace(),
            (_, KeyCode::Delete) => self.delete(),
            (_, KeyCode::Enter) => self.replace_selection("\n"),
            (_, KeyCode::Tab) => self.replace_selection("\t"),
            (mods, KeyCode::Char(c))
                if !mods.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
            {
                let mut buf = [0u8; 4];
                self.replace_selection(c.encode_utf8(&mut buf));
            }
            _ => {}
        }
    }

    fn chord_for(key: KeyEvent) -> Option<KeyChord> {
        let KeyCode::Char(c) = key.code else {
            return None;
        };
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        let alt = key.modifiers.contains(KeyModifiers::ALT);
        if !ctrl && !alt {
            return None;
        }
        Some(KeyChord {
            key: c,
            ctrl,
            alt,
            shift: key.modifiers.contains(KeyModifiers::SHIFT),
        })
    }

    fn handle_toolbar_key(&mut self, key: KeyEvent) {
        let items = toolbar_items();
        match key.code {
            KeyCode::Left => {
                self.toolbar_index = (self.toolbar_index + items.len() - 1) % items.len();
            }
            KeyCode::Right => {
                self.toolbar_index = (self.toolbar_index + 1) % items.len();
            }
            KeyCode::Enter => {
                let command = items[self.toolbar_index];
                self.execute(command);
            }
            KeyCode::Esc | KeyCode::F(2) => {
                self.focus = Focus::Editor;
                self.status_message.clear();
            }
            _ => {}
        }
    }

    /// Run a command and write its result back into the view.
    fn execute(&mut self, command: Command) {
        let Some(manager) = self.tabs.active_mut() else {
            return;
        };

        match manager.execute(command) {
            CommandOutcome::Applied(request) => {
                // Text is already in the engine; the selection follows it.
                self.anchor = request.selection.start;
                self.cursor = request.selection.end;
                if request.restore_focus {
                    self.focus = Focus::Editor;
                }
                self.status_message = match command {
                    Command::Format(op) => op.label().to_string(),
                    Command::Undo => "Undone".to_string(),
                    Command::Redo => "Redone".to_string(),
                };
            }
            CommandOutcome::Noop(reason) => {
                self.status_message = describe_noop(reason).to_string();
            }
        }
    }

    /// Replace the selection (or insert at the caret) as a typed edit.
    fn replace_selection(&mut self, inserted: &str) {
        let (start, end) = self.selection_range();
        self.replace_range(start, end, inserted);
    }

    fn replace_range(&mut self, start: usize, end: usize, inserted: &str) {
        let Some(manager) = self.tabs.active_mut() else {
            return;
        };
        let new_text = replace_chars(manager.text(), start, end, inserted);
        manager.on_text_changed(new_text);

        let caret = start + char_len(inserted);
        self.anchor = caret;
        self.cursor = caret;
        self.sync_selection();
        self.status_message.clear();
    }

    fn backspace(&mut self) {
        if self.has_selection() {
            self.replace_selection("");
        } else if self.cursor > 0 {
            let start = prev_grapheme_boundary(self.text(), self.cursor);
            self.replace_range(start, self.cursor, "");
        }
    }

    fn delete(&mut self) {
        if self.has_selection() {
            self.replace_selection("");
        } else if self.cursor < char_len(self.text()) {
            let end = next_grapheme_boundary(self.text(), self.cursor);
            self.replace_range(self.cursor, end, "");
        }
    }

    fn move_cursor_to(&mut self, target: usize, selecting: bool) {
        self.cursor = target;
        if !selecting {
            self.anchor = target;
        }
        self.sync_selection();
    }

    fn move_vertical(&mut self, delta: isize, selecting: bool) {
        let (line, col) = line_col(self.text(), self.cursor);
        let target_line = line.saturating_add_signed(delta);
        let line_count = self.text().split('\n').count();
        if target_line >= line_count || (delta < 0 && line == 0) {
            return;
        }
        let target = offset_for(self.text(), target_line, col);
        self.move_cursor_to(target, selecting);
    }

    fn cycle_tab(&mut self, forward: bool) {
        let languages: Vec<String> = self.tabs.languages().map(str::to_string).collect();
        if languages.len() < 2 {
            return;
        }
        let current = self
            .tabs
            .active_language()
            .and_then(|lang| languages.iter().position(|l| l == lang))
            .unwrap_or(0);
        let next = if forward {
            (current + 1) % languages.len()
        } else {
            (current + languages.len() - 1) % languages.len()
        };

        if let Err(err) = self.tabs.switch_to(&languages[next]) {
            self.status_message = err.to_string();
            return;
        }
        let selection = self
            .tabs
            .active()
            .map(|manager| manager.selection())
            .unwrap_or_default();
        self.anchor = selection.start;
        self.cursor = selection.end;
        self.scroll_top = 0;
        self.status_message = format!("Language: {}", languages[next]);
    }

    fn save_all(&mut self) -> io::Result<()> {
        for (lang, content) in self.tabs.contents() {
            if let Some(path) = self.paths.get(&lang) {
                fs::write(path, content)?;
                tracing::info!(lang = %lang, path = %path.display(), "saved");
            }
            if let Some(manager) = self.tabs.get_mut(&lang) {
                manager.mark_saved();
            }
        }
        Ok(())
    }

    /// Render UI
    fn render(&mut self, frame: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // language tabs
                Constraint::Length(1), // toolbar
                Constraint::Min(1),    // editor
                Constraint::Length(1), // status line
                Constraint::Length(1), // shortcut hints
            ])
            .split(frame.area());

        self.render_tabs(frame, chunks[0]);
        self.render_toolbar(frame, chunks[1]);
        self.render_editor(frame, chunks[2]);
        self.render_status_line(frame, chunks[3]);
        self.render_shortcuts(frame, chunks[4]);
    }

    fn render_tabs(&self, frame: &mut Frame, area: Rect) {
        let active = self.tabs.active_language();
        let mut spans = Vec::new();
        for lang in self.tabs.languages() {
            let modified = self
                .tabs
                .get(lang)
                .is_some_and(|manager| manager.get_toolbar_state().is_modified);
            let label = format!(" {lang}{} ", if modified { "*" } else { "" });
            let style = if Some(lang) == active {
                Style::default().bg(Color::Blue).fg(Color::White)
            } else {
                Style::default().fg(Color::Gray)
            };
            spans.push(Span::styled(label, style));
        }
        frame.render_widget(Paragraph::new(Line::from(spans)), area);
    }

    fn render_toolbar(&self, frame: &mut Frame, area: Rect) {
        let state = self
            .tabs
            .active()
            .map(|manager| manager.get_toolbar_state());
        let mut spans = Vec::new();

        for (idx, command) in toolbar_items().into_iter().enumerate() {
            let enabled = state.is_some_and(|state| match command {
                Command::Format(_) => state.has_selection,
                Command::Undo => state.can_undo,
                Command::Redo => state.can_redo,
            });
            let mut style = if enabled {
                Style::default().fg(Color::White)
            } else {
                Style::default().fg(Color::DarkGray)
            };
            if self.focus == Focus::Toolbar && idx == self.toolbar_index {
                style = style.add_modifier(Modifier::REVERSED);
            }
            if matches!(command, Command::Undo) {
                spans.push(Span::raw(" |"));
            }
            spans.push(Span::styled(format!(" {} ", short_label(command)), style));
        }

        frame.render_widget(Paragraph::new(Line::from(spans)), area);
    }

    fn render_editor(&mut self, frame: &mut Frame, area: Rect) {
        let block = Block::default().borders(Borders::ALL).title(" markdown ");
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let height = inner.height as usize;
        if height == 0 {
            return;
        }

        let (cursor_line, cursor_col) = line_col(self.text(), self.cursor);
        if cursor_line < self.scroll_top {
            self.scroll_top = cursor_line;
        } else if cursor_line >= self.scroll_top + height {
            self.scroll_top = cursor_line + 1 - height;
        }

        let (sel_start, sel_end) = self.selection_range();
        let selected_style = Style::default().add_modifier(Modifier::REVERSED);
        let text = self.text();

        let mut offset = 0;
        let mut lines = Vec::with_capacity(height);
        for (idx, content) in text.split('\n').enumerate() {
            let len = char_len(content);
            if idx >= self.scroll_top && idx < self.scroll_top + height {
                let mut spans = Vec::new();
                let mut run = String::new();
                let mut run_selected = false;
                for (i, ch) in content.chars().enumerate() {
                    let selected = (sel_start..sel_end).contains(&(offset + i));
                    if selected != run_selected && !run.is_empty() {
                        let style = if run_selected { selected_style } else { Style::default() };
                        spans.push(Span::styled(std::mem::take(&mut run), style));
                    }
                    run_selected = selected;
                    if ch == '\t' {
                        run.push_str(&" ".repeat(TAB_CELLS));
                    } else {
                        run.push(ch);
                    }
                }
                if !run.is_empty() {
                    let style = if run_selected { selected_style } else { Style::default() };
                    spans.push(Span::styled(run, style));
                }
                lines.push(Line::from(spans));
            }
            offset += len + 1;
        }

        frame.render_widget(Paragraph::new(lines), inner);

        if self.focus == Focus::Editor {
            let cursor_cells: usize = text
                .split('\n')
                .nth(cursor_line)
                .map(|line| line.chars().take(cursor_col).map(cell_width).sum())
                .unwrap_or(0);
            let max_x = inner.width.saturating_sub(1) as usize;
            let x = inner.x + cursor_cells.min(max_x) as u16;
            let y = inner.y + (cursor_line - self.scroll_top) as u16;
            frame.set_cursor_position((x, y));
        }
    }

    fn render_status_line(&self, frame: &mut Frame, area: Rect) {
        let status_text = if !self.status_message.is_empty() {
            self.status_message.clone()
        } else {
            let (line, col) = line_col(self.text(), self.cursor);
            let (start, end) = self.selection_range();
            match self.tabs.active() {
                Some(manager) => {
                    let state = manager.get_toolbar_state();
                    format!(
                        "{} | Ln {} Col {} | Sel {} | Undo {} Redo {} | v{}{}",
                        self.tabs.active_language().unwrap_or("-"),
                        line + 1,
                        col + 1,
                        end - start,
                        state.undo_depth,
                        state.redo_depth,
                        state.version,
                        if state.is_modified { " (modified)" } else { "" },
                    )
                }
                None => "No buffer".to_string(),
            }
        };

        let status_line = Paragraph::new(status_text).style(
            Style::default()
                .bg(Color::DarkGray)
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        );
        frame.render_widget(status_line, area);
    }

    fn render_shortcuts(&self, frame: &mut Frame, area: Rect) {
        let shortcuts = if self.confirm_quit {
            "Y:save and quit  N:quit without saving  Esc:cancel".to_string()
        } else {
            let bold = shortcuts::binding_for(Command::Format(Operation::Bold))
                .map(|chord| chord.to_string())
                .unwrap_or_default();
            format!(
                "{bold}:bold  Alt-I:italic  Alt-1..3:heading  Ctrl-Z/Y:undo/redo  F2:toolbar  F6:next tab  Ctrl-S:save  Ctrl-Q:quit"
            )
        };

        let shortcuts_line =
            Paragraph::new(shortcuts).style(Style::default().bg(Color::Blue).fg(Color::White));
        frame.render_widget(shortcuts_line, area);
    }
}

fn load_config() -> EditorConfig {
    let Some(path) = env::var_os("MD_TOOLBAR_CONFIG") else {
        return EditorConfig::default();
    };
    match EditorConfig::from_path(&path) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{}: {err}", PathBuf::from(path).display());
            process::exit(1);
        }
    }
}

fn init_logging() -> io::Result<()> {
    let Some(path) = env::var_os("MD_TOOLBAR_LOG") else {
        return Ok(());
    };
    let file = fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)?;
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("md_toolbar=debug,md_toolbar_tui=debug"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

fn main() -> io::Result<()> {
    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        eprintln!("Usage: {} <file.md>...", args[0]);
        eprintln!("\nExample:");
        eprintln!("  {} article.en.md article.de.md", args[0]);
        process::exit(1);
    }

    init_logging()?;
    let config = load_config();
    let files: Vec<PathBuf> = args[1..].iter().map(PathBuf::from).collect();
    let mut app = App::new(&files, config)?;

    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen, EnableBracketedPaste)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableBracketedPaste
    )?;
    terminal.show_cursor()?;

    if let Err(err) = result {
        tracing::error!(%err, "editor exited with error");
        eprintln!("Error: {err}");
    }

    Ok(())
}

fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
) -> io::Result<()> {
    loop {
        terminal.draw(|f| app.render(f))?;

        if app.should_quit {
            break;
        }

        if event::poll(Duration::from_millis(100))? {
            match event::read()? {
                Event::Key(key) => app.handle_key_event(key),
                Event::Paste(text) => app.replace_selection(&text),
                _ => {}
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_language_for_path() {
        assert_eq!(language_for_path(Path::new("posts/article.en.md")), "en");
        assert_eq!(language_for_path(Path::new("notes.md")), "notes");
    }

    #[test]
    fn test_line_col_round_trip() {
        let text = "ab\ncde\n\nf";
        assert_eq!(line_col(text, 4), (1, 1));
        assert_eq!(offset_for(text, 1, 1), 4);
        assert_eq!(offset_for(text, 0, 99), 2);
        assert_eq!(offset_for(text, 2, 5), 7);
    }

    #[test]
    fn test_grapheme_boundaries() {
        let text = "ae\u{301}x";
        assert_eq!(next_grapheme_boundary(text, 1), 3);
        assert_eq!(prev_grapheme_boundary(text, 3), 1);
        assert_eq!(prev_grapheme_boundary(text, 0), 0);
        assert_eq!(next_grapheme_boundary(text, 4), 4);
    }

    #[test]
    fn test_paste_is_one_recorded_edit() {
        let dir = std::env::temp_dir().join("md-toolbar-tui-test");
        let mut app = App::new(&[dir.join("paste.en.md")], EditorConfig::default()).unwrap();
        app.replace_selection("a");

        app.replace_selection(" and a pasted paragraph");
        assert_eq!(app.text(), "a and a pasted paragraph");
        let state = app.tabs.active().unwrap().get_toolbar_state();
        assert_eq!(state.undo_depth, 2);

        app.execute(Command::Undo);
        assert_eq!(app.text(), "a");
    }

    #[test]
    fn test_replace_selection_counts_chars() {
        let dir = std::env::temp_dir().join("md-toolbar-tui-test");
        let mut app = App::new(&[dir.join("multi.en.md")], EditorConfig::default()).unwrap();
        app.replace_selection("héllo");
        app.anchor = 1;
        app.cursor = 2;
        app.replace_selection("e");
        assert_eq!(app.text(), "hello");
        assert_eq!(app.selection_range(), (2, 2));
    }

    #[test]
    fn test_toolbar_click_restores_editor_focus() {
        let dir = std::env::temp_dir().join("md-toolbar-tui-test");
        let mut app = App::new(&[dir.join("doc.en.md")], EditorConfig::default()).unwrap();
        app.replace_selection("word");
        app.anchor = 0;
        app.cursor = 4;
        app.sync_selection();

        app.focus = Focus::Toolbar;
        app.toolbar_index = 3; // bold
        app.handle_toolbar_key(KeyEvent::from(KeyCode::Enter));

        assert_eq!(app.text(), "**word**");
        assert_eq!(app.selection_range(), (2, 6));
        assert_eq!(app.focus, Focus::Editor);
    }
}
