use chrono::{Duration, Months, NaiveDate};
use tui::buffer::Buffer;
use tui::layout::{Alignment, Rect};
use tui::style::Modifier;
use tui::text::{Line, Span};
use tui::widgets::{Paragraph, StatefulWidget, Widget};

use super::block;
use crate::theme::Theme;

/// Purchase date selection, bounded to days the dataset can answer for
pub struct DatePickerState {
    date: Option<NaiveDate>,
    min: Option<NaiveDate>,
    max: NaiveDate,
}

impl DatePickerState {
    pub fn new(date: Option<NaiveDate>, max: NaiveDate) -> DatePickerState {
        let mut state = DatePickerState {
            date,
            min: None,
            max,
        };
        state.clamp();
        state
    }

    /// Called once the dataset is known. Picks `min` when nothing was
    /// selected yet.
    pub fn set_min(&mut self, min: NaiveDate) {
        self.min = Some(min.min(self.max));

        if self.date.is_none() {
            self.date = self.min;
        }

        self.clamp();
    }

    pub fn date(&self) -> Option<NaiveDate> {
        self.date
    }

    pub fn next_day(&mut self) {
        self.shift(|d| d.checked_add_signed(Duration::days(1)));
    }

    pub fn previous_day(&mut self) {
        self.shift(|d| d.checked_sub_signed(Duration::days(1)));
    }

    pub fn next_month(&mut self) {
        self.shift(|d| d.checked_add_months(Months::new(1)));
    }

    pub fn previous_month(&mut self) {
        self.shift(|d| d.checked_sub_months(Months::new(1)));
    }

    pub fn next_year(&mut self) {
        self.shift(|d| d.checked_add_months(Months::new(12)));
    }

    pub fn previous_year(&mut self) {
        self.shift(|d| d.checked_sub_months(Months::new(12)));
    }

    fn shift<F: Fn(NaiveDate) -> Option<NaiveDate>>(&mut self, f: F) {
        if let Some(date) = self.date.and_then(f) {
            self.date = Some(date);
            self.clamp();
        }
    }

    fn clamp(&mut self) {
        if let Some(date) = self.date.as_mut() {
            if *date > self.max {
                *date = self.max;
            }

            if let Some(min) = self.min {
                if *date < min {
                    *date = min;
                }
            }
        }
    }
}

pub struct DatePickerWidget {
    pub focused: bool,
    pub theme: Theme,
}

impl StatefulWidget for DatePickerWidget {
    type State = DatePickerState;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        let theme = self.theme;

        let date = state
            .date
            .map(|d| d.format(engine::DATE_FORMAT).to_string())
            .unwrap_or_else(|| "----------".to_string());

        let arrow_style = if self.focused {
            theme.style().fg(theme.text_primary())
        } else {
            theme.style().fg(theme.gray())
        };

        let line = Line::from(vec![
            Span::styled("< ", arrow_style),
            Span::styled(
                date,
                theme
                    .style()
                    .add_modifier(Modifier::BOLD)
                    .fg(theme.text_secondary()),
            ),
            Span::styled(" >", arrow_style),
        ]);

        Paragraph::new(line)
            .block(block::input(" Purchase Date ", theme, self.focused))
            .style(theme.style())
            .alignment(Alignment::Center)
            .render(area, buf);
    }
}
