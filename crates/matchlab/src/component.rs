use crate::command::Command;
use ratatui::{layout::Rect, Frame};

/// A reusable piece of the playground UI that renders into a given [`Rect`].
///
/// Components work like [`Model`](crate::Model) but receive the area to draw
/// into, so the parent decides the layout. The parent wraps the component's
/// message type in one of its own variants and lifts commands with
/// [`Command::map`]:
///
/// ```rust,ignore
/// Msg::Output(m) => self.output.update(m).map(Msg::Output),
/// ```
pub trait Component {
    /// The component's internal message type.
    type Message;

    /// Process a message and return a [`Command`] in the component's own
    /// message type.
    fn update(&mut self, msg: Self::Message) -> Command<Self::Message>;

    /// Render into `area` of the frame.
    fn view(&self, frame: &mut Frame, area: Rect);

    /// Whether this component currently has focus.
    fn focused(&self) -> bool {
        false
    }
}
