use crossterm::event::{Event, KeyEvent, KeyEventKind};

/// Terminal input the runtime hands to [`Model::on_event`](crate::Model::on_event).
///
/// Only the events the playground reacts to are represented; mouse and focus
/// reports are dropped when converting from crossterm.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TerminalEvent {
    /// A key press (releases and repeats reported by some terminals are dropped).
    Key(KeyEvent),
    /// Bracketed paste content.
    Paste(String),
    /// Terminal resized to (columns, rows).
    Resize(u16, u16),
}

impl TerminalEvent {
    /// Convert a raw crossterm event, or `None` if the playground ignores it.
    pub fn from_crossterm(event: Event) -> Option<Self> {
        match event {
            Event::Key(key) if key.kind == KeyEventKind::Press => Some(TerminalEvent::Key(key)),
            Event::Paste(text) => Some(TerminalEvent::Paste(text)),
            Event::Resize(w, h) => Some(TerminalEvent::Resize(w, h)),
            _ => None,
        }
    }
}
