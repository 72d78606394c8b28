//! Border helpers shared by the playground panes.

use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Borders};

/// Whether a pane's content is currently accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Validity {
    /// Nothing to judge yet (e.g. the configuration was never edited).
    #[default]
    Unknown,
    Valid,
    Invalid,
}

/// Create a bordered block with focus-dependent border color.
///
/// Uses cyan when focused, dark gray when unfocused.
pub fn focus_block(title: &str, focused: bool) -> Block<'_> {
    field_block(title, focused, Validity::Unknown)
}

/// Create a bordered block whose color reflects validity first, then focus.
///
/// Valid is green and invalid is red; the title is bold while focused so focus
/// stays visible on a colored border.
pub fn field_block(title: &str, focused: bool, validity: Validity) -> Block<'_> {
    let color = match validity {
        Validity::Valid => Color::Green,
        Validity::Invalid => Color::Red,
        Validity::Unknown if focused => Color::Cyan,
        Validity::Unknown => Color::DarkGray,
    };
    let title_style = if focused {
        Style::default().add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    };
    Block::new()
        .borders(Borders::ALL)
        .title(title)
        .title_style(title_style)
        .border_style(Style::default().fg(color))
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::buffer::Buffer;
    use ratatui::layout::Rect;
    use ratatui::widgets::Widget;

    fn corner_color(block: Block<'_>) -> Option<Color> {
        let area = Rect::new(0, 0, 10, 3);
        let mut buf = Buffer::empty(area);
        block.render(area, &mut buf);
        buf[(0, 0)].style().fg
    }

    #[test]
    fn validity_overrides_focus_color() {
        assert_eq!(corner_color(field_block("c", true, Validity::Valid)), Some(Color::Green));
        assert_eq!(corner_color(field_block("c", false, Validity::Invalid)), Some(Color::Red));
    }

    #[test]
    fn unknown_validity_uses_focus_color() {
        assert_eq!(corner_color(focus_block("o", true)), Some(Color::Cyan));
        assert_eq!(corner_color(focus_block("o", false)), Some(Color::DarkGray));
    }
}
