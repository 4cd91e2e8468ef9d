use engine::Comparison;
use tui::buffer::Buffer;
use tui::layout::{Alignment, Rect};
use tui::symbols::Marker;
use tui::text::Span;
use tui::widgets::{Axis, Chart, Dataset, GraphType, LegendPosition, Paragraph, Widget};

use super::block;
use crate::common::{cast_as_dataset, format_pct};
use crate::theme::Theme;

pub const NUM_LOADING_TICKS: usize = 4;

/// Line chart of the basket series against the complement series
pub struct ComparisonChart<'a> {
    pub comparison: Option<&'a Comparison>,
    pub loading: bool,
    pub loading_tick: usize,
    pub theme: Theme,
}

impl<'a> ComparisonChart<'a> {
    fn y_bounds(min: f64, max: f64) -> [f64; 2] {
        let margin = ((max - min) * 0.05).max(0.5);

        [min - margin, max + margin]
    }

    fn y_labels(&self, min: f64, max: f64) -> Vec<Span<'static>> {
        let [low, high] = Self::y_bounds(min, max);

        vec![
            Span::styled(format!("{:>9}", format_pct(low)), self.theme.style()),
            Span::styled(
                format!("{:>9}", format_pct((low + high) / 2.0)),
                self.theme.style(),
            ),
            Span::styled(format!("{:>9}", format_pct(high)), self.theme.style()),
        ]
    }

    fn x_labels(&self, comparison: &Comparison) -> Vec<Span<'static>> {
        let window = comparison.window();
        let middle = window.start + (window.last_day() - window.start) / 2;

        vec![window.start, middle, window.last_day()]
            .into_iter()
            .map(|d| {
                Span::styled(
                    d.format(engine::DATE_FORMAT).to_string(),
                    self.theme.style().fg(self.theme.text_normal()),
                )
            })
            .collect()
    }

    fn render_message(&self, message: String, area: Rect, buf: &mut Buffer) {
        let block = block::new(" Comparison ", self.theme);
        let inner = block.inner(area);
        block.render(area, buf);

        let mut message_area = inner;
        message_area.y += inner.height / 2;
        message_area.height = message_area.height.saturating_sub(inner.height / 2);

        Paragraph::new(message)
            .style(self.theme.style().fg(self.theme.text_primary()))
            .alignment(Alignment::Center)
            .render(message_area, buf);
    }
}

impl<'a> Widget for ComparisonChart<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if self.loading {
            let dots = ".".repeat(self.loading_tick % (NUM_LOADING_TICKS + 1));
            self.render_message(format!("Loading{:<4}", dots), area, buf);
            return;
        }

        let comparison = match self.comparison {
            Some(comparison) => comparison,
            None => {
                self.render_message(
                    "Enter an amount and press <Enter> to compare".to_string(),
                    area,
                    buf,
                );
                return;
            }
        };

        let (min, max) = comparison.bounds().unwrap_or((0.0, 0.0));

        let basket = cast_as_dataset(&comparison.basket);
        let complement = cast_as_dataset(&comparison.complement);

        // Need more than one point for GraphType::Line to work
        let graph_type = if basket.len() <= 1 {
            GraphType::Scatter
        } else {
            GraphType::Line
        };

        let datasets = vec![
            Dataset::default()
                .name("Fund")
                .marker(Marker::Braille)
                .style(self.theme.style().fg(self.theme.basket()))
                .graph_type(graph_type)
                .data(&basket),
            Dataset::default()
                .name("Rest of market")
                .marker(Marker::Braille)
                .style(self.theme.style().fg(self.theme.complement()))
                .graph_type(graph_type)
                .data(&complement),
        ];

        let x_max = (comparison.window().num_days() - 1).max(1) as f64;

        Chart::new(datasets)
            .block(block::new(" Comparison ", self.theme))
            .style(self.theme.style())
            .legend_position(Some(LegendPosition::TopLeft))
            .x_axis(
                Axis::default()
                    .bounds([0.0, x_max])
                    .labels(self.x_labels(comparison))
                    .style(self.theme.style().fg(self.theme.border_axis())),
            )
            .y_axis(
                Axis::default()
                    .bounds(Self::y_bounds(min, max))
                    .labels(self.y_labels(min, max))
                    .style(self.theme.style().fg(self.theme.border_axis())),
            )
            .render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use engine::{Basket, PriceRecord, PriceTable, ReportWindow};

    use super::*;
    use crate::widget::test_util::render;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, engine::DATE_FORMAT).unwrap()
    }

    fn comparison() -> Comparison {
        let table = PriceTable::from_records(&[
            PriceRecord::new("AAA", date("2018-01-02"), Some(10.0)),
            PriceRecord::new("AAA", date("2018-01-05"), Some(11.0)),
            PriceRecord::new("AAA", date("2018-01-09"), Some(12.0)),
            PriceRecord::new("BBB", date("2018-01-02"), Some(10.0)),
            PriceRecord::new("BBB", date("2018-01-09"), Some(9.0)),
        ]);

        Comparison::compute(
            &table,
            &Basket::parse("AAA:100").unwrap(),
            date("2018-01-01"),
            ReportWindow::new(date("2018-01-02"), date("2018-01-09")),
        )
        .unwrap()
    }

    #[test]
    fn y_bounds_leave_a_margin() {
        assert_eq!(ComparisonChart::y_bounds(-10.0, 10.0), [-11.0, 11.0]);
        assert_eq!(ComparisonChart::y_bounds(0.0, 0.0), [-0.5, 0.5]);
    }

    #[test]
    fn dataset_points_are_indexed_by_day() {
        let comparison = comparison();

        let points = cast_as_dataset(&comparison.basket);

        assert_eq!(points.len(), 7);
        assert_eq!(points[0], (0.0, 10.0));
        assert_eq!(points[6].0, 6.0);
    }

    #[test]
    fn renders_legend_and_window_labels() {
        let comparison = comparison();
        let widget = ComparisonChart {
            comparison: Some(&comparison),
            loading: false,
            loading_tick: 0,
            theme: Theme::default(),
        };

        let screen = render(widget, 100, 30).join("\n");

        assert!(screen.contains("Comparison"));
        assert!(screen.contains("Fund"));
        assert!(screen.contains("Rest of market"));
        assert!(screen.contains("2018-01-02"));
        assert!(screen.contains("2018-01-08"));
    }

    #[test]
    fn removed_chart_shows_prompt() {
        let widget = ComparisonChart {
            comparison: None,
            loading: false,
            loading_tick: 0,
            theme: Theme::default(),
        };

        let screen = render(widget, 60, 10).join("\n");

        assert!(screen.contains("press <Enter> to compare"));
    }

    #[test]
    fn loading_replaces_chart() {
        let comparison = comparison();
        let widget = ComparisonChart {
            comparison: Some(&comparison),
            loading: true,
            loading_tick: 2,
            theme: Theme::default(),
        };

        let screen = render(widget, 60, 10).join("\n");

        assert!(screen.contains("Loading.."));
        assert!(!screen.contains("Rest of market"));
    }
}
