use tui::buffer::Buffer;
use tui::layout::Rect;
use tui::text::{Line, Text};
use tui::widgets::{Clear, Paragraph, Widget};

use super::block;
use crate::draw::{add_padding, PaddingDirection};
use crate::theme::Theme;

const TEXT: &str = r#"
Quit: q or <Ctrl+c>
Change Focus:
  - <Tab>: next input
  - <Shift+Tab>: previous input
  - a: edit amount
  - d: edit purchase date
  - <Escape>: back to chart
Amount:
  - 0-9: type digits
  - <Backspace>: delete digit
  - <Delete>: clear amount
Purchase Date:
  - <Left / Right>: day
  - <Up / Down>: month
  - <PgUp / PgDn>: year
Compare:
  - <Enter>: recompute chart
"#;

pub const HELP_WIDTH: u16 = 36;
pub const HELP_HEIGHT: u16 = 20;

#[derive(Copy, Clone)]
pub struct HelpWidget {
    pub theme: Theme,
}

impl HelpWidget {
    pub fn get_rect(self, area: Rect) -> Rect {
        Rect {
            x: area.x + (area.width.saturating_sub(HELP_WIDTH)) / 2,
            y: area.y + (area.height.saturating_sub(HELP_HEIGHT)) / 2,
            width: HELP_WIDTH.min(area.width),
            height: HELP_HEIGHT.min(area.height),
        }
    }
}

impl Widget for HelpWidget {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Clear.render(area, buf);
        block::new(" Help - <ESC> to go back ", self.theme).render(area, buf);

        let text: Vec<_> = TEXT
            .lines()
            .map(|line| Line::styled(line, self.theme.style()))
            .collect();

        let mut help_area = area;
        help_area = add_padding(help_area, 2, PaddingDirection::Left);
        help_area = add_padding(help_area, 1, PaddingDirection::Top);

        Paragraph::new(Text::from(text)).render(help_area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rect_is_centered() {
        let help = HelpWidget {
            theme: Theme::default(),
        };

        let rect = help.get_rect(Rect::new(0, 0, 100, 40));

        assert_eq!(rect, Rect::new(32, 10, HELP_WIDTH, HELP_HEIGHT));
    }

    #[test]
    fn every_line_fits() {
        for line in TEXT.lines() {
            assert!(line.len() as u16 <= HELP_WIDTH - 3, "{}", line);
        }
        assert!(TEXT.lines().count() as u16 <= HELP_HEIGHT - 2);
    }
}
