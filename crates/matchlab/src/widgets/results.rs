//! Read-only, scrollable pane that shows the latest match outcome.

use std::cell::Cell;

use crossterm::event::{KeyCode, KeyEvent};
use matchlab_core::{Diagnostic, MatchError};
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState, Wrap};
use ratatui::Frame;
use serde::Serialize;
use serde_json::ser::PrettyFormatter;

use crate::command::Command;
use crate::component::Component;

/// Messages for the results panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    /// A key press forwarded while the panel is focused.
    KeyPress(KeyEvent),
    /// Jump back to the first line, e.g. after new content was loaded.
    ScrollToTop,
}

/// Pretty-print diagnostics as a JSON array with 4-space indentation.
///
/// No diagnostics at all renders as `{}`, matching what the playground has
/// always displayed before a first successful run.
pub fn render_json(diagnostics: Option<&[Diagnostic]>) -> String {
    let Some(diagnostics) = diagnostics else {
        return "{}".to_string();
    };
    let mut buf = Vec::new();
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(b"    "));
    match diagnostics.serialize(&mut ser) {
        Ok(()) => String::from_utf8_lossy(&buf).into_owned(),
        Err(err) => format!("failed to render diagnostics: {err}"),
    }
}

/// Banner, error alert and JSON listing of the current outcome.
pub struct ResultsPanel {
    banner: Option<String>,
    alert: Option<String>,
    json: String,
    offset: u16,
    focus: bool,
    visible_height: Cell<u16>,
}

impl ResultsPanel {
    pub fn new() -> Self {
        Self {
            banner: None,
            alert: None,
            json: render_json(None),
            offset: 0,
            focus: false,
            visible_height: Cell::new(10),
        }
    }

    /// Replace the displayed outcome.
    ///
    /// The banner is shown for every successful run, even one that matched
    /// nothing. The scroll position is kept so re-running on every keystroke
    /// doesn't jump.
    pub fn set_outcome(&mut self, matches: Option<&[Diagnostic]>, error: Option<&MatchError>) {
        self.banner = matches.map(|found| {
            format!(
                "Your problem matcher works! {} diagnostic{} matched.",
                found.len(),
                if found.len() == 1 { "" } else { "s" }
            )
        });
        self.alert = error.map(ToString::to_string);
        self.json = render_json(matches);
        self.offset = self.offset.min(self.bottom());
    }

    pub fn banner(&self) -> Option<&str> {
        self.banner.as_deref()
    }

    pub fn alert(&self) -> Option<&str> {
        self.alert.as_deref()
    }

    pub fn json(&self) -> &str {
        &self.json
    }

    pub fn y_offset(&self) -> u16 {
        self.offset
    }

    pub fn focus(&mut self) {
        self.focus = true;
    }

    pub fn blur(&mut self) {
        self.focus = false;
    }

    fn lines(&self) -> Vec<Line<'_>> {
        let mut lines = Vec::new();
        if let Some(banner) = &self.banner {
            lines.push(Line::from(Span::styled(
                format!(" ✔ {banner}"),
                Style::default().fg(Color::Black).bg(Color::Green),
            )));
            lines.push(Line::default());
        }
        if let Some(alert) = &self.alert {
            lines.push(Line::from(Span::styled(
                format!(" ✖ {alert}"),
                Style::default()
                    .fg(Color::White)
                    .bg(Color::Red)
                    .add_modifier(Modifier::BOLD),
            )));
            lines.push(Line::default());
        }
        lines.extend(self.json.lines().map(Line::raw));
        lines
    }

    fn max_offset(&self, total: usize, visible_height: u16) -> u16 {
        u16::try_from(total)
            .unwrap_or(u16::MAX)
            .saturating_sub(visible_height)
    }

    /// Largest offset that still fills the pane, as of the last render.
    fn bottom(&self) -> u16 {
        self.max_offset(self.lines().len(), self.visible_height.get())
    }
}

impl Default for ResultsPanel {
    fn default() -> Self {
        Self::new()
    }
}

impl Component for ResultsPanel {
    type Message = Message;

    fn update(&mut self, msg: Message) -> Command<Message> {
        match msg {
            Message::KeyPress(key) if self.focus => {
                let page = self.visible_height.get();
                let bottom = self.bottom();
                self.offset = match key.code {
                    KeyCode::Up | KeyCode::Char('k') => self.offset.saturating_sub(1),
                    KeyCode::Down | KeyCode::Char('j') => self.offset.saturating_add(1),
                    KeyCode::PageUp => self.offset.saturating_sub(page),
                    KeyCode::PageDown => self.offset.saturating_add(page),
                    KeyCode::Home | KeyCode::Char('g') => 0,
                    KeyCode::End | KeyCode::Char('G') => bottom,
                    _ => self.offset,
                }
                .min(bottom);
            }
            Message::KeyPress(_) => {}
            Message::ScrollToTop => self.offset = 0,
        }
        Command::none()
    }

    fn view(&self, frame: &mut Frame, area: Rect) {
        self.visible_height.set(area.height);

        let lines = self.lines();
        let total = lines.len();
        let max = self.max_offset(total, area.height);
        let offset = self.offset.min(max);

        let paragraph = Paragraph::new(Text::from(lines))
            .wrap(Wrap { trim: false })
            .scroll((offset, 0));
        frame.render_widget(paragraph, area);

        if total > area.height as usize {
            let mut state = ScrollbarState::new(max as usize).position(offset as usize);
            frame.render_stateful_widget(
                Scrollbar::new(ScrollbarOrientation::VerticalRight),
                area,
                &mut state,
            );
        }
    }

    fn focused(&self) -> bool {
        self.focus
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;
    use matchlab_core::{invoke, parse, EngineOptions};
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    fn diagnostics(output: &str) -> Vec<Diagnostic> {
        let config = parse(
            r#"{"owner":"t","pattern":[{"regexp":"^(\\S+):(\\d+) (.*)$","file":1,"line":2,"message":3}]}"#,
        )
        .unwrap();
        invoke(&config, output, &EngineOptions::default()).unwrap()
    }

    #[test]
    fn json_uses_four_space_indent() {
        let found = diagnostics("a.rs:3 bad");
        let json = render_json(Some(found.as_slice()));
        assert!(json.starts_with("[\n    {\n        \"file\": \"a.rs\""));
        assert!(json.contains("        \"line\": 3"));
    }

    #[test]
    fn json_skips_unset_fields() {
        let found = diagnostics("a.rs:3 bad");
        let json = render_json(Some(found.as_slice()));
        assert!(!json.contains("column"));
        assert!(!json.contains("code"));
    }

    #[test]
    fn absent_matches_render_as_empty_object() {
        assert_eq!(render_json(None), "{}");
        assert_eq!(render_json(Some(Vec::new().as_slice())), "[]");
    }

    #[test]
    fn banner_follows_every_successful_run() {
        let mut panel = ResultsPanel::new();
        assert!(panel.banner().is_none());

        panel.set_outcome(Some(Vec::new().as_slice()), None);
        assert_eq!(
            panel.banner(),
            Some("Your problem matcher works! 0 diagnostics matched.")
        );

        let found = diagnostics("a.rs:3 bad\nb.rs:4 worse");
        panel.set_outcome(Some(found.as_slice()), None);
        assert_eq!(
            panel.banner(),
            Some("Your problem matcher works! 2 diagnostics matched.")
        );

        panel.set_outcome(None, None);
        assert!(panel.banner().is_none());
    }

    #[test]
    fn alert_shows_match_error() {
        let config = parse(r#"{"owner":"o","pattern":[]}"#).unwrap();
        let err = invoke(&config, "x", &EngineOptions::default()).unwrap_err();
        let mut panel = ResultsPanel::new();
        panel.set_outcome(None, Some(&err));
        assert!(panel.alert().is_some_and(|a| a.starts_with("o: ")));
        assert!(panel.banner().is_none());
        assert_eq!(panel.json(), "{}");
    }

    fn key(code: KeyCode) -> Message {
        Message::KeyPress(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn draw(panel: &ResultsPanel, height: u16) {
        let mut terminal = Terminal::new(TestBackend::new(60, height)).unwrap();
        terminal
            .draw(|frame| panel.view(frame, frame.area()))
            .unwrap();
    }

    fn tall_panel(height: u16) -> ResultsPanel {
        let output: Vec<String> = (1..=20).map(|n| format!("f{n}.rs:{n} problem")).collect();
        let found = diagnostics(&output.join("\n"));
        let mut panel = ResultsPanel::new();
        panel.set_outcome(Some(found.as_slice()), None);
        draw(&panel, height);
        panel
    }

    #[test]
    fn scrolling_requires_focus_for_keys() {
        let mut panel = tall_panel(10);
        panel.update(key(KeyCode::Down));
        assert_eq!(panel.y_offset(), 0);
        panel.focus();
        panel.update(key(KeyCode::Down));
        assert_eq!(panel.y_offset(), 1);
        panel.update(Message::ScrollToTop);
        assert_eq!(panel.y_offset(), 0);
    }

    #[test]
    fn end_then_up_moves_off_the_bottom() {
        let mut panel = tall_panel(10);
        panel.focus();
        let bottom = panel.bottom();
        assert!(bottom > 2);

        panel.update(key(KeyCode::End));
        assert_eq!(panel.y_offset(), bottom);
        panel.update(key(KeyCode::Up));
        panel.update(key(KeyCode::Up));
        assert_eq!(panel.y_offset(), bottom - 2);
    }

    #[test]
    fn scrolling_down_stops_at_the_bottom() {
        let mut panel = tall_panel(10);
        panel.focus();
        let bottom = panel.bottom();
        for _ in 0..bottom + 50 {
            panel.update(key(KeyCode::Char('j')));
        }
        panel.update(key(KeyCode::PageDown));
        assert_eq!(panel.y_offset(), bottom);
        panel.update(key(KeyCode::Char('k')));
        assert_eq!(panel.y_offset(), bottom - 1);
    }

    #[test]
    fn shorter_outcome_pulls_offset_back() {
        let mut panel = tall_panel(10);
        panel.focus();
        panel.update(key(KeyCode::End));
        panel.set_outcome(Some(diagnostics("a.rs:1 only").as_slice()), None);
        assert_eq!(panel.y_offset(), panel.bottom());
        assert!(panel.y_offset() < 10);
    }
}
