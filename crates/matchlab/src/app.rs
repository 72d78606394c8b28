//! The playground: two editors feeding a [`Session`] and a results pane.

use crossterm::event::{KeyCode, KeyModifiers};
use matchlab_core::{presets, EngineOptions, Session};
use ratatui::layout::{Constraint, Layout};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;
use tracing::{debug, info, warn};

use crate::command::Command;
use crate::component::Component;
use crate::event::TerminalEvent;
use crate::model::Model;
use crate::widgets::chrome::{field_block, focus_block, Validity};
use crate::widgets::results::{self, ResultsPanel};
use crate::widgets::text_area::{self, TextArea};

/// Start-up options for the [`Playground`].
#[derive(Debug, Clone, Default)]
pub struct AppFlags {
    /// Preset to load right after start-up.
    pub example: Option<String>,
    pub engine: EngineOptions,
}

/// Which pane receives keyboard input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Pane {
    #[default]
    Output,
    Config,
    Results,
}

impl Pane {
    pub fn next(self) -> Self {
        match self {
            Pane::Output => Pane::Config,
            Pane::Config => Pane::Results,
            Pane::Results => Pane::Output,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            Pane::Output => Pane::Results,
            Pane::Config => Pane::Output,
            Pane::Results => Pane::Config,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    Output(text_area::Message),
    Config(text_area::Message),
    Results(results::Message),
    LoadExample(String),
    FocusNext,
    FocusPrev,
    Quit,
}

pub struct Playground {
    session: Session,
    output: TextArea,
    config: TextArea,
    results: ResultsPanel,
    focus: Pane,
    notice: Option<String>,
}

impl Playground {
    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn focused_pane(&self) -> Pane {
        self.focus
    }

    /// One-line status shown in the footer (last preset loaded, or why not).
    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    pub fn results(&self) -> &ResultsPanel {
        &self.results
    }

    pub fn output_editor(&self) -> &TextArea {
        &self.output
    }

    pub fn config_editor(&self) -> &TextArea {
        &self.config
    }

    fn config_validity(&self) -> Validity {
        if self.session.config_error().is_some() {
            Validity::Invalid
        } else if self.session.config().is_some() {
            Validity::Valid
        } else {
            Validity::Unknown
        }
    }

    fn sync_results(&mut self) {
        self.results
            .set_outcome(self.session.matches(), self.session.match_error());
    }

    fn set_focus(&mut self, pane: Pane) {
        self.focus = pane;
        self.output.blur();
        self.config.blur();
        self.results.blur();
        match pane {
            Pane::Output => self.output.focus(),
            Pane::Config => self.config.focus(),
            Pane::Results => self.results.focus(),
        }
    }

    /// Returns whether the preset was loaded.
    fn load_example(&mut self, name: &str) -> bool {
        match self.session.load_example(name) {
            Ok(()) => {
                self.output.set_value(self.session.output());
                self.config.set_value(self.session.config_text());
                let label = presets::find(name).map_or(name, |p| p.label);
                info!(example = name, "loaded example");
                self.notice = Some(format!("Loaded example: {label}"));
                self.sync_results();
                true
            }
            Err(err) => {
                warn!(error = %err, "example load rejected");
                self.notice = Some(err.to_string());
                false
            }
        }
    }

    fn render_header(&self, frame: &mut Frame, area: ratatui::layout::Rect) {
        let key = Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD);
        let mut spans = vec![Span::styled(
            " matchlab ",
            Style::default().fg(Color::Black).bg(Color::Cyan),
        )];
        for (i, (_, label)) in presets::list_examples().into_iter().enumerate() {
            spans.push(Span::raw("  "));
            spans.push(Span::styled(format!("F{}", i + 1), key));
            spans.push(Span::raw(format!(" {label}")));
        }
        frame.render_widget(Paragraph::new(Line::from(spans)), area);
    }

    fn render_footer(&self, frame: &mut Frame, area: ratatui::layout::Rect) {
        let key = Style::default().fg(Color::Cyan);
        let mut spans = vec![
            Span::styled("Tab", key),
            Span::raw(" next  "),
            Span::styled("Shift+Tab", key),
            Span::raw(" prev  "),
            Span::styled("Esc", key),
            Span::raw(" quit"),
        ];
        if let Some(notice) = &self.notice {
            spans.push(Span::raw("  |  "));
            spans.push(Span::styled(notice.as_str(), Style::default().fg(Color::Yellow)));
        }
        frame.render_widget(Paragraph::new(Line::from(spans)), area);
    }
}

impl Model for Playground {
    type Message = Msg;
    type Flags = AppFlags;

    fn init(flags: AppFlags) -> (Self, Command<Msg>) {
        let mut app = Playground {
            session: Session::with_options(flags.engine),
            output: TextArea::new().with_placeholder("Paste tool output here"),
            config: TextArea::new().with_placeholder("Problem matcher JSON"),
            results: ResultsPanel::new(),
            focus: Pane::Output,
            notice: None,
        };
        app.set_focus(Pane::Output);
        let cmd = match flags.example {
            Some(name) => Command::message(Msg::LoadExample(name)),
            None => Command::none(),
        };
        (app, cmd)
    }

    fn update(&mut self, msg: Msg) -> Command<Msg> {
        match msg {
            Msg::Output(text_area::Message::Changed(text)) => {
                self.session.edit_output(text);
                self.sync_results();
                Command::none()
            }
            Msg::Config(text_area::Message::Changed(text)) => {
                self.session.edit_configuration(text);
                self.sync_results();
                Command::none()
            }
            Msg::Output(m) => self.output.update(m).map(Msg::Output),
            Msg::Config(m) => self.config.update(m).map(Msg::Config),
            Msg::Results(m) => self.results.update(m).map(Msg::Results),
            Msg::LoadExample(name) => {
                if self.load_example(&name) {
                    Command::message(Msg::Results(results::Message::ScrollToTop))
                } else {
                    Command::none()
                }
            }
            Msg::FocusNext => {
                self.set_focus(self.focus.next());
                debug!(pane = ?self.focus, "focus moved");
                Command::none()
            }
            Msg::FocusPrev => {
                self.set_focus(self.focus.prev());
                debug!(pane = ?self.focus, "focus moved");
                Command::none()
            }
            Msg::Quit => Command::quit(),
        }
    }

    fn view(&self, frame: &mut Frame) {
        let [header_area, main_area, footer_area] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Fill(1),
            Constraint::Length(1),
        ])
        .areas(frame.area());

        self.render_header(frame, header_area);

        let [left_area, results_area] =
            Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)])
                .areas(main_area);
        let [output_area, config_area] =
            Layout::vertical([Constraint::Percentage(40), Constraint::Percentage(60)])
                .areas(left_area);

        let block = focus_block("Example Logs Output", self.output.focused());
        let inner = block.inner(output_area);
        frame.render_widget(block, output_area);
        self.output.view(frame, inner);

        let block = field_block("Problem Matcher", self.config.focused(), self.config_validity());
        let inner = block.inner(config_area);
        frame.render_widget(block, config_area);
        match self.session.config_error() {
            Some(err) => {
                let [editor_area, error_area] =
                    Layout::vertical([Constraint::Fill(1), Constraint::Length(1)]).areas(inner);
                self.config.view(frame, editor_area);
                frame.render_widget(
                    Paragraph::new(err.message()).style(Style::default().fg(Color::Red)),
                    error_area,
                );
            }
            None => self.config.view(frame, inner),
        }

        let block = focus_block("Output", self.results.focused());
        let inner = block.inner(results_area);
        frame.render_widget(block, results_area);
        self.results.view(frame, inner);

        self.render_footer(frame, footer_area);
    }

    fn on_event(&self, event: TerminalEvent) -> Option<Msg> {
        match event {
            TerminalEvent::Key(key) => match (key.code, key.modifiers) {
                (KeyCode::Esc, _) => Some(Msg::Quit),
                (KeyCode::Char('q' | 'c'), m) if m.contains(KeyModifiers::CONTROL) => {
                    Some(Msg::Quit)
                }
                (KeyCode::Tab, KeyModifiers::NONE) => Some(Msg::FocusNext),
                (KeyCode::BackTab, _) => Some(Msg::FocusPrev),
                (KeyCode::F(n), _) => preset_message(usize::from(n)),
                (KeyCode::Char(c @ '1'..='9'), m) if m.contains(KeyModifiers::CONTROL) => {
                    c.to_digit(10).and_then(|n| preset_message(n as usize))
                }
                _ => Some(match self.focus {
                    Pane::Output => Msg::Output(text_area::Message::KeyPress(key)),
                    Pane::Config => Msg::Config(text_area::Message::KeyPress(key)),
                    Pane::Results => Msg::Results(results::Message::KeyPress(key)),
                }),
            },
            TerminalEvent::Paste(text) => match self.focus {
                Pane::Output => Some(Msg::Output(text_area::Message::Paste(text))),
                Pane::Config => Some(Msg::Config(text_area::Message::Paste(text))),
                Pane::Results => None,
            },
            TerminalEvent::Resize(..) => None,
        }
    }
}

/// Message loading the `n`th preset (1-based), if there is one.
fn preset_message(n: usize) -> Option<Msg> {
    let preset = presets::PRESETS.get(n.checked_sub(1)?)?;
    Some(Msg::LoadExample(preset.name.to_string()))
}
