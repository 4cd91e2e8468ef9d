use engine::{Comparison, PercentageSeries};
use tui::buffer::Buffer;
use tui::layout::{Alignment, Rect};
use tui::style::Modifier;
use tui::text::{Line, Span};
use tui::widgets::{Paragraph, Widget};

use super::block;
use crate::common::{format_amount, format_pct};
use crate::theme::Theme;

/// Footer with the last day of each series and the status line
pub struct SummaryWidget<'a> {
    pub comparison: Option<&'a Comparison>,
    pub amount: Option<u64>,
    pub status: &'a str,
    pub theme: Theme,
}

impl<'a> SummaryWidget<'a> {
    fn group_spans(&self, label: &'a str, series: &PercentageSeries) -> Vec<Span<'a>> {
        let theme = self.theme;

        let (pct, value) = match series.last() {
            Some((_, pct)) => (pct, self.amount.and_then(|a| series.value_of(a))),
            None => return vec![],
        };

        let mut spans = vec![
            Span::styled(format!("{}: ", label), theme.style().fg(theme.text_normal())),
            Span::styled(
                format_pct(pct),
                theme
                    .style()
                    .add_modifier(Modifier::BOLD)
                    .fg(theme.change(pct)),
            ),
        ];

        if let Some(value) = value {
            spans.push(Span::styled(
                format!(" (${})", format_amount(value)),
                theme.style().fg(theme.text_secondary()),
            ));
        }

        spans.push(Span::raw("   "));
        spans
    }
}

impl<'a> Widget for SummaryWidget<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let theme = self.theme;

        let mut spans = vec![];

        if let Some(comparison) = self.comparison {
            spans.extend(self.group_spans("Fund", &comparison.basket));
            spans.extend(self.group_spans("Rest of market", &comparison.complement));
        }

        spans.push(Span::styled(self.status, theme.style().fg(theme.gray())));

        Paragraph::new(Line::from(spans))
            .block(block::new(" Summary ", theme))
            .style(theme.style())
            .alignment(Alignment::Left)
            .render(area, buf);
    }
}
