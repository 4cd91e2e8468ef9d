use tui::text::Span;
use tui::widgets::{Block, Borders};

use crate::theme::Theme;

pub fn new(title: &str, theme: Theme) -> Block {
    Block::default()
        .borders(Borders::ALL)
        .border_style(theme.style().fg(theme.border_primary()))
        .title(Span::styled(title, theme.style().fg(theme.text_normal())))
}

/// Input blocks highlight their border while they have focus
pub fn input(title: &str, theme: Theme, focused: bool) -> Block {
    let border = if focused {
        theme.highlight_focused()
    } else {
        theme.highlight_unfocused()
    };

    Block::default()
        .borders(Borders::ALL)
        .border_style(theme.style().fg(border))
        .title(Span::styled(title, theme.style().fg(theme.text_normal())))
}
