use tui::buffer::Buffer;
use tui::layout::{Alignment, Rect};
use tui::style::Modifier;
use tui::text::{Line, Span};
use tui::widgets::{Paragraph, StatefulWidget, Widget, Wrap};

use super::block;
use crate::common::MAX_AMOUNT_DIGITS;
use crate::theme::Theme;

pub struct AmountInputState {
    input: String,
    error_msg: Option<String>,
}

impl AmountInputState {
    pub fn new(amount: Option<u64>) -> AmountInputState {
        AmountInputState {
            input: amount.map(|a| a.to_string()).unwrap_or_default(),
            error_msg: None,
        }
    }

    /// Only digits are accepted, anything else leaves the input unchanged
    pub fn add_char(&mut self, c: char) -> bool {
        if !c.is_ascii_digit() {
            self.error_msg = Some(format!("'{}' is not a digit", c));
            return false;
        }

        if self.input.len() == MAX_AMOUNT_DIGITS {
            self.error_msg = Some("Amount is too large".to_string());
            return false;
        }

        self.input.push(c);
        self.error_msg = None;
        true
    }

    pub fn del_char(&mut self) {
        self.input.pop();
        self.error_msg = None;
    }

    pub fn reset(&mut self) {
        self.input.drain(..);
        self.error_msg = None;
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn error_msg(&self) -> Option<&str> {
        self.error_msg.as_deref()
    }

    /// `None` until at least one digit has been entered
    pub fn amount(&self) -> Option<u64> {
        self.input.parse().ok()
    }
}

pub struct AmountInputWidget {
    pub focused: bool,
    pub theme: Theme,
}

impl StatefulWidget for AmountInputWidget {
    type State = AmountInputState;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        let theme = self.theme;

        let mut spans = vec![
            Span::styled("$ ", theme.style()),
            Span::styled(
                state.input.clone(),
                theme
                    .style()
                    .add_modifier(Modifier::BOLD)
                    .fg(theme.text_secondary()),
            ),
        ];

        if self.focused {
            spans.push(Span::styled("_", theme.style().fg(theme.text_primary())));
        }

        if let Some(error_msg) = state.error_msg.as_ref() {
            spans.push(Span::styled(
                format!("  {}", error_msg),
                theme.style().add_modifier(Modifier::BOLD).fg(theme.loss()),
            ));
        }

        Paragraph::new(Line::from(spans))
            .block(block::input(" Amount ", theme, self.focused))
            .style(theme.style())
            .alignment(Alignment::Left)
            .wrap(Wrap { trim: true })
            .render(area, buf);
    }
}
