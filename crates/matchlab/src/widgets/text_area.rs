//! Multi-line editor used for the output and configuration panes.
//!
//! Every edit emits [`Message::Changed`] with the full buffer contents, which
//! the playground forwards to the session. Cursor movement never emits.

use std::cell::Cell;
use std::collections::VecDeque;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;
use unicode_width::UnicodeWidthChar;

use crate::command::Command;
use crate::component::Component;

/// Messages for the text area component.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    /// A keyboard event.
    KeyPress(KeyEvent),
    /// Insert text at the cursor position.
    Paste(String),
    /// Emitted after any edit, carrying the full contents.
    Changed(String),
}

type UndoEntry = (Vec<Vec<char>>, (usize, usize));

const UNDO_LIMIT: usize = 100;

/// Style configuration for the text area.
#[derive(Debug, Clone)]
pub struct TextAreaStyle {
    pub text: Style,
    pub cursor: Style,
    pub line_number: Style,
    pub placeholder: Style,
}

impl Default for TextAreaStyle {
    fn default() -> Self {
        Self {
            text: Style::default(),
            cursor: Style::default().add_modifier(Modifier::REVERSED),
            line_number: Style::default().fg(Color::DarkGray),
            placeholder: Style::default().fg(Color::DarkGray),
        }
    }
}

/// A multi-line plain text editor with line numbers and undo.
///
/// The editor draws only its content; the parent supplies the surrounding
/// block (see [`field_block`](crate::widgets::chrome::field_block)).
pub struct TextArea {
    lines: Vec<Vec<char>>,
    cursor_row: usize,
    cursor_col: usize,
    focus: bool,
    placeholder: String,
    style: TextAreaStyle,
    undo_stack: VecDeque<UndoEntry>,
    redo_stack: VecDeque<UndoEntry>,
    // Scroll offsets are adjusted while rendering to keep the cursor visible.
    scroll_row: Cell<usize>,
    scroll_col: Cell<usize>,
}

impl TextArea {
    /// Create an empty text area.
    pub fn new() -> Self {
        Self {
            lines: vec![Vec::new()],
            cursor_row: 0,
            cursor_col: 0,
            focus: false,
            placeholder: String::new(),
            style: TextAreaStyle::default(),
            undo_stack: VecDeque::new(),
            redo_stack: VecDeque::new(),
            scroll_row: Cell::new(0),
            scroll_col: Cell::new(0),
        }
    }

    /// Text shown (dimmed) while the buffer is empty.
    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    /// Give this editor keyboard focus.
    pub fn focus(&mut self) {
        self.focus = true;
    }

    /// Remove keyboard focus.
    pub fn blur(&mut self) {
        self.focus = false;
    }

    /// The full content as a newline-separated string.
    pub fn value(&self) -> String {
        self.lines
            .iter()
            .map(|l| l.iter().collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Replace the content, resetting cursor, scroll and undo history.
    ///
    /// Does not emit [`Message::Changed`]: programmatic replacement is not an edit.
    pub fn set_value(&mut self, content: &str) {
        self.lines = content.split('\n').map(|l| l.chars().collect()).collect();
        self.cursor_row = 0;
        self.cursor_col = 0;
        self.scroll_row.set(0);
        self.scroll_col.set(0);
        self.undo_stack.clear();
        self.redo_stack.clear();
    }

    /// Return the total number of lines.
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Current cursor position as (row, column).
    pub fn cursor(&self) -> (usize, usize) {
        (self.cursor_row, self.cursor_col)
    }

    fn insert_str(&mut self, s: &str) {
        for c in s.chars() {
            match c {
                '\n' => self.split_line(),
                // CR from pasted CRLF text would otherwise show up as a control char.
                '\r' => {}
                c => {
                    self.lines[self.cursor_row].insert(self.cursor_col, c);
                    self.cursor_col += 1;
                }
            }
        }
    }

    fn split_line(&mut self) {
        let rest = self.lines[self.cursor_row].split_off(self.cursor_col);
        self.cursor_row += 1;
        self.cursor_col = 0;
        self.lines.insert(self.cursor_row, rest);
    }

    fn current_line_len(&self) -> usize {
        self.lines[self.cursor_row].len()
    }

    fn clamp_cursor_col(&mut self) {
        self.cursor_col = self.cursor_col.min(self.current_line_len());
    }

    fn prev_word_boundary(&self) -> usize {
        let line = &self.lines[self.cursor_row];
        let mut col = self.cursor_col;
        while col > 0 && line[col - 1].is_whitespace() {
            col -= 1;
        }
        while col > 0 && !line[col - 1].is_whitespace() {
            col -= 1;
        }
        col
    }

    fn next_word_boundary(&self) -> usize {
        let line = &self.lines[self.cursor_row];
        let len = line.len();
        let mut col = self.cursor_col;
        while col < len && !line[col].is_whitespace() {
            col += 1;
        }
        while col < len && line[col].is_whitespace() {
            col += 1;
        }
        col
    }

    fn push_undo(&mut self) {
        self.undo_stack
            .push_back((self.lines.clone(), (self.cursor_row, self.cursor_col)));
        self.redo_stack.clear();
        if self.undo_stack.len() > UNDO_LIMIT {
            self.undo_stack.pop_front();
        }
    }

    fn restore(&mut self, entry: UndoEntry) {
        let (lines, (row, col)) = entry;
        self.lines = lines;
        self.cursor_row = row;
        self.cursor_col = col;
    }

    fn snapshot(&self) -> UndoEntry {
        (self.lines.clone(), (self.cursor_row, self.cursor_col))
    }

    fn changed(&self) -> Command<Message> {
        Command::message(Message::Changed(self.value()))
    }

    /// Apply an editing key. Returns whether the buffer changed.
    fn edit(&mut self, key: KeyEvent) -> bool {
        match (key.code, key.modifiers) {
            (KeyCode::Char('z'), KeyModifiers::CONTROL) => match self.undo_stack.pop_back() {
                Some(entry) => {
                    self.redo_stack.push_back(self.snapshot());
                    self.restore(entry);
                    true
                }
                None => false,
            },
            (KeyCode::Char('y'), KeyModifiers::CONTROL) => match self.redo_stack.pop_back() {
                Some(entry) => {
                    self.undo_stack.push_back(self.snapshot());
                    self.restore(entry);
                    true
                }
                None => false,
            },
            // Ctrl+K: kill to end of line, joining the next line at the end.
            (KeyCode::Char('k'), KeyModifiers::CONTROL) => {
                if self.cursor_col < self.current_line_len() {
                    self.push_undo();
                    self.lines[self.cursor_row].truncate(self.cursor_col);
                    true
                } else if self.cursor_row + 1 < self.lines.len() {
                    self.push_undo();
                    let next = self.lines.remove(self.cursor_row + 1);
                    self.lines[self.cursor_row].extend(next);
                    true
                } else {
                    false
                }
            }
            // Ctrl+U: kill to start of line.
            (KeyCode::Char('u'), KeyModifiers::CONTROL) => {
                if self.cursor_col == 0 {
                    return false;
                }
                self.push_undo();
                self.lines[self.cursor_row].drain(..self.cursor_col);
                self.cursor_col = 0;
                true
            }
            (KeyCode::Char(c), KeyModifiers::NONE | KeyModifiers::SHIFT) => {
                self.push_undo();
                self.lines[self.cursor_row].insert(self.cursor_col, c);
                self.cursor_col += 1;
                true
            }
            (KeyCode::Enter, _) => {
                self.push_undo();
                self.split_line();
                true
            }
            (KeyCode::Backspace, _) => {
                if self.cursor_col > 0 {
                    self.push_undo();
                    self.cursor_col -= 1;
                    self.lines[self.cursor_row].remove(self.cursor_col);
                    true
                } else if self.cursor_row > 0 {
                    self.push_undo();
                    let current = self.lines.remove(self.cursor_row);
                    self.cursor_row -= 1;
                    self.cursor_col = self.current_line_len();
                    self.lines[self.cursor_row].extend(current);
                    true
                } else {
                    false
                }
            }
            (KeyCode::Delete, _) => {
                if self.cursor_col < self.current_line_len() {
                    self.push_undo();
                    self.lines[self.cursor_row].remove(self.cursor_col);
                    true
                } else if self.cursor_row + 1 < self.lines.len() {
                    self.push_undo();
                    let next = self.lines.remove(self.cursor_row + 1);
                    self.lines[self.cursor_row].extend(next);
                    true
                } else {
                    false
                }
            }
            _ => {
                self.move_cursor(key);
                false
            }
        }
    }

    fn move_cursor(&mut self, key: KeyEvent) {
        match (key.code, key.modifiers) {
            (KeyCode::Left, KeyModifiers::CONTROL | KeyModifiers::ALT) => {
                self.cursor_col = self.prev_word_boundary();
            }
            (KeyCode::Right, KeyModifiers::CONTROL | KeyModifiers::ALT) => {
                self.cursor_col = self.next_word_boundary();
            }
            (KeyCode::Left, _) => {
                if self.cursor_col > 0 {
                    self.cursor_col -= 1;
                } else if self.cursor_row > 0 {
                    self.cursor_row -= 1;
                    self.cursor_col = self.current_line_len();
                }
            }
            (KeyCode::Right, _) => {
                if self.cursor_col < self.current_line_len() {
                    self.cursor_col += 1;
                } else if self.cursor_row + 1 < self.lines.len() {
                    self.cursor_row += 1;
                    self.cursor_col = 0;
                }
            }
            (KeyCode::Up, _) => {
                if self.cursor_row > 0 {
                    self.cursor_row -= 1;
                    self.clamp_cursor_col();
                }
            }
            (KeyCode::Down, _) => {
                if self.cursor_row + 1 < self.lines.len() {
                    self.cursor_row += 1;
                    self.clamp_cursor_col();
                }
            }
            (KeyCode::Home, _) => self.cursor_col = 0,
            (KeyCode::End, _) => self.cursor_col = self.current_line_len(),
            (KeyCode::PageUp, _) => {
                self.cursor_row = self.cursor_row.saturating_sub(10);
                self.clamp_cursor_col();
            }
            (KeyCode::PageDown, _) => {
                self.cursor_row = (self.cursor_row + 10).min(self.lines.len() - 1);
                self.clamp_cursor_col();
            }
            _ => {}
        }
    }

    /// Pick the first visible row so the cursor row is on screen.
    fn visible_row_offset(&self, height: usize) -> usize {
        let scroll = self.scroll_row.get();
        let scroll = if self.cursor_row < scroll {
            self.cursor_row
        } else if height > 0 && self.cursor_row >= scroll + height {
            self.cursor_row + 1 - height
        } else {
            scroll
        };
        self.scroll_row.set(scroll);
        scroll
    }

    /// Pick the first visible column so the cursor cell fits in `width` cells.
    fn visible_col_offset(&self, width: usize) -> usize {
        let line = &self.lines[self.cursor_row];
        let mut scroll = self.scroll_col.get().min(self.cursor_col);
        // Width of the text between the scroll offset and the cursor, plus
        // one cell for the cursor itself.
        let span_width = |from: usize| -> usize {
            line[from..self.cursor_col]
                .iter()
                .map(|c| c.width().unwrap_or(0))
                .sum::<usize>()
                + 1
        };
        while scroll < self.cursor_col && span_width(scroll) > width {
            scroll += 1;
        }
        self.scroll_col.set(scroll);
        scroll
    }
}

impl Default for TextArea {
    fn default() -> Self {
        Self::new()
    }
}

impl Component for TextArea {
    type Message = Message;

    fn update(&mut self, msg: Message) -> Command<Message> {
        if !self.focus {
            return Command::none();
        }
        match msg {
            Message::Paste(text) => {
                self.push_undo();
                self.insert_str(&text);
                self.changed()
            }
            Message::KeyPress(key) => {
                if self.edit(key) {
                    self.changed()
                } else {
                    Command::none()
                }
            }
            Message::Changed(_) => Command::none(),
        }
    }

    fn view(&self, frame: &mut Frame, area: Rect) {
        if area.width == 0 || area.height == 0 {
            return;
        }

        if self.lines.len() == 1 && self.lines[0].is_empty() && !self.placeholder.is_empty() {
            let mut spans = Vec::new();
            if self.focus {
                spans.push(Span::styled(" ", self.style.cursor));
            }
            spans.push(Span::styled(self.placeholder.as_str(), self.style.placeholder));
            frame.render_widget(Paragraph::new(Line::from(spans)), area);
            return;
        }

        let height = area.height as usize;
        let gutter = self.lines.len().to_string().len() + 1;
        let text_width = (area.width as usize).saturating_sub(gutter);

        let row_offset = self.visible_row_offset(height);
        let col_offset = self.visible_col_offset(text_width);

        let end = self.lines.len().min(row_offset + height);
        let display_lines: Vec<Line> = self.lines[row_offset..end]
            .iter()
            .enumerate()
            .map(|(i, chars)| {
                let row = row_offset + i;
                let mut spans = vec![Span::styled(
                    format!("{:>width$} ", row + 1, width = gutter - 1),
                    self.style.line_number,
                )];
                // Only the cursor line scrolls horizontally.
                let skip = if row == self.cursor_row { col_offset } else { 0 };
                let visible: String = chars.iter().skip(skip).collect();

                if self.focus && row == self.cursor_row {
                    let col = self.cursor_col - skip;
                    let before: String = visible.chars().take(col).collect();
                    let cursor_char = visible.chars().nth(col);
                    let after: String = visible.chars().skip(col + 1).collect();
                    if !before.is_empty() {
                        spans.push(Span::styled(before, self.style.text));
                    }
                    let cursor_text = cursor_char.map_or_else(|| " ".to_string(), String::from);
                    spans.push(Span::styled(cursor_text, self.style.cursor));
                    if !after.is_empty() {
                        spans.push(Span::styled(after, self.style.text));
                    }
                } else {
                    spans.push(Span::styled(visible, self.style.text));
                }
                Line::from(spans)
            })
            .collect();

        frame.render_widget(Paragraph::new(display_lines), area);
    }

    fn focused(&self) -> bool {
        self.focus
    }
}
