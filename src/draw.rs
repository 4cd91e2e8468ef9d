use std::io;

use tui::backend::Backend;
use tui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use tui::style::Modifier;
use tui::text::{Line, Span};
use tui::widgets::{Paragraph, Wrap};
use tui::{Frame, Terminal};

use crate::app::{App, Mode};
use crate::widget::{
    block, AmountInputWidget, ComparisonChart, DatePickerWidget, HelpWidget, SummaryWidget,
    HELP_HEIGHT, HELP_WIDTH,
};

pub fn draw<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> io::Result<()> {
    terminal.draw(|frame| {
        // chunks[0] - Header
        // chunks[1] - Amount / date inputs
        // chunks[2] - Chart
        // chunks[3] - Summary
        let chunks = Layout::default()
            .constraints(
                [
                    Constraint::Length(3),
                    Constraint::Length(3),
                    Constraint::Min(0),
                    Constraint::Length(3),
                ]
                .as_ref(),
            )
            .split(frame.size());

        draw_header(frame, app, chunks[0]);
        draw_inputs(frame, app, chunks[1]);

        frame.render_widget(
            ComparisonChart {
                comparison: app.comparison.as_ref(),
                loading: app.loading,
                loading_tick: app.loading_tick,
                theme: app.theme,
            },
            chunks[2],
        );

        frame.render_widget(
            SummaryWidget {
                comparison: app.comparison.as_ref(),
                amount: app.amount.amount(),
                status: &app.status,
                theme: app.theme,
            },
            chunks[3],
        );

        if app.mode == Mode::Help {
            draw_help(frame, app);
        }
    })?;

    Ok(())
}

fn draw_header(frame: &mut Frame, app: &App, area: Rect) {
    let theme = app.theme;

    frame.render_widget(block::new(" Fund ", theme), area);

    // header[0] - Basket tickers and weights
    // header[1] - (Optional) help icon
    let mut header = if app.hide_help {
        vec![area]
    } else {
        Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Min(0), Constraint::Length(10)].as_ref())
            .split(area)
            .to_vec()
    };

    header[0] = add_padding(header[0], 1, PaddingDirection::Top);
    header[0] = add_padding(header[0], 2, PaddingDirection::Left);

    let basket = &app.config.basket;
    let mut spans = vec![];
    for (ticker, weight) in basket.tickers().iter().zip(basket.weights()) {
        spans.push(Span::styled(
            ticker.clone(),
            theme
                .style()
                .add_modifier(Modifier::BOLD)
                .fg(theme.basket()),
        ));
        spans.push(Span::styled(
            format!(":{}  ", weight),
            theme.style().fg(theme.gray()),
        ));
    }

    frame.render_widget(
        Paragraph::new(Line::from(spans))
            .style(theme.style())
            .wrap(Wrap { trim: true }),
        header[0],
    );

    if !app.hide_help {
        header[1] = add_padding(header[1], 1, PaddingDirection::Top);
        header[1] = add_padding(header[1], 2, PaddingDirection::Right);

        frame.render_widget(
            Paragraph::new(Span::styled("Help '?'", theme.style()))
                .style(theme.style().fg(theme.text_normal()))
                .alignment(Alignment::Center),
            header[1],
        );
    }
}

fn draw_inputs(frame: &mut Frame, app: &mut App, area: Rect) {
    let theme = app.theme;

    // inputs[0] - Amount
    // inputs[1] - Purchase date
    // inputs[2] - Report window
    let inputs = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(
            [
                Constraint::Min(20),
                Constraint::Length(22),
                Constraint::Length(34),
            ]
            .as_ref(),
        )
        .split(area);

    frame.render_stateful_widget(
        AmountInputWidget {
            focused: app.mode == Mode::EditAmount,
            theme,
        },
        inputs[0],
        &mut app.amount,
    );

    frame.render_stateful_widget(
        DatePickerWidget {
            focused: app.mode == Mode::EditDate,
            theme,
        },
        inputs[1],
        &mut app.purchase_date,
    );

    let window = app.config.window;
    frame.render_widget(
        Paragraph::new(Span::styled(
            format!(
                "{} - {}",
                window.start.format(engine::DATE_FORMAT),
                window.last_day().format(engine::DATE_FORMAT)
            ),
            theme.style().fg(theme.text_secondary()),
        ))
        .block(block::new(
            &format!(" Last {} Months ", app.config.compare_months),
            theme,
        ))
        .style(theme.style())
        .alignment(Alignment::Center),
        inputs[2],
    );
}

fn draw_help(frame: &mut Frame, app: &App) {
    let area = frame.size();
    let help = HelpWidget { theme: app.theme };

    if area.width < HELP_WIDTH || area.height < HELP_HEIGHT {
        frame.render_widget(
            Paragraph::new(Span::styled(
                "Increase screen size to display help",
                app.theme.style(),
            ))
            .style(app.theme.style()),
            area,
        );
    } else {
        frame.render_widget(help, help.get_rect(area));
    }
}

pub fn add_padding(mut rect: Rect, n: u16, direction: PaddingDirection) -> Rect {
    match direction {
        PaddingDirection::Top => {
            rect.y += n.min(rect.height);
            rect.height = rect.height.saturating_sub(n);
            rect
        }
        PaddingDirection::Bottom => {
            rect.height = rect.height.saturating_sub(n);
            rect
        }
        PaddingDirection::Left => {
            rect.x += n.min(rect.width);
            rect.width = rect.width.saturating_sub(n);
            rect
        }
        PaddingDirection::Right => {
            rect.width = rect.width.saturating_sub(n);
            rect
        }
    }
}

#[allow(dead_code)]
pub enum PaddingDirection {
    Top,
    Bottom,
    Left,
    Right,
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use chrono::NaiveDate;
    use engine::ComparisonConfig;
    use tui::backend::TestBackend;

    use super::*;
    use crate::opts::Opts;
    use crate::widget::test_util::buffer_lines;

    fn app() -> App {
        let end = NaiveDate::parse_from_str("2018-02-07", engine::DATE_FORMAT).unwrap();
        let config = ComparisonConfig::new(Some("AAPL:60,MSFT:40"), Some(6), end).unwrap();
        let (sender, _) = crossbeam_channel::bounded(1);

        App::new(
            &Opts::default(),
            config,
            PathBuf::from("not-loaded.csv"),
            sender,
        )
    }

    #[test]
    fn padding_never_underflows() {
        let rect = Rect::new(0, 0, 3, 1);

        assert_eq!(
            add_padding(rect, 2, PaddingDirection::Top),
            Rect::new(0, 1, 3, 0)
        );
        assert_eq!(
            add_padding(rect, 5, PaddingDirection::Right),
            Rect::new(0, 0, 0, 1)
        );
        assert_eq!(
            add_padding(rect, 2, PaddingDirection::Left),
            Rect::new(2, 0, 1, 1)
        );
    }

    #[test]
    fn dashboard_shows_basket_and_window() {
        let mut app = app();
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();

        draw(&mut terminal, &mut app).unwrap();

        let screen = buffer_lines(terminal.backend().buffer()).join("\n");

        assert!(screen.contains("AAPL:60"));
        assert!(screen.contains("MSFT:40"));
        assert!(screen.contains("Help '?'"));
        assert!(screen.contains("Last 6 Months"));
        assert!(screen.contains("2017-08-07 - 2018-02-06"));
        assert!(screen.contains("Purchase Date"));
    }

    #[test]
    fn help_overlays_dashboard() {
        let mut app = app();
        app.mode = Mode::Help;
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();

        draw(&mut terminal, &mut app).unwrap();

        let screen = buffer_lines(terminal.backend().buffer()).join("\n");

        assert!(screen.contains("Help - <ESC> to go back"));
    }
}
