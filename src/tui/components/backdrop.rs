// Desk backdrop
//
// Grey desk with a faint grid, the branding header and the handle in the
// corner. Header pieces drop out on narrow terminals.

use crate::tui::layout::Breakpoint;
use crate::tui::palette;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
    Frame,
};

const GRID_COLUMNS: u16 = 8;
const GRID_ROWS: u16 = 4;

pub fn render(f: &mut Frame, area: Rect) {
    f.render_widget(Desk, area);

    let bp = Breakpoint::from_width(area.width);
    if bp.at_least(Breakpoint::Normal) && area.height > 4 {
        let title = Line::from(Span::styled(
            "G E M I N I",
            Style::default()
                .fg(palette::INK_MUTED)
                .add_modifier(Modifier::BOLD),
        ));
        let subtitle = Line::from(vec![
            Span::styled("──── ", Style::default().fg(palette::INK_MUTED)),
            Span::styled("FAX BEEPER", Style::default().fg(palette::PAPER_FAINT)),
            Span::styled(" ────", Style::default().fg(palette::INK_MUTED)),
        ]);
        let header = Paragraph::new(vec![title, subtitle]).alignment(Alignment::Center);
        f.render_widget(header, Rect::new(area.x, area.y + 1, area.width, 2));
    }

    if bp.at_least(Breakpoint::Wide) {
        let handle = Paragraph::new(Span::styled(
            "@Lessnoise365 ⓘ",
            Style::default().fg(palette::INK_MUTED),
        ))
        .alignment(Alignment::Right);
        f.render_widget(handle, Rect::new(area.x, area.y + 1, area.width - 2, 1));
    }
}

/// Desk fill with grid marks
struct Desk;

impl Widget for Desk {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let desk = Style::default().bg(palette::DESK).fg(palette::DESK_GRID);
        buf.set_style(area, desk);
        for y in area.top()..area.bottom() {
            for x in area.left()..area.right() {
                let on_row = (y - area.y) % GRID_ROWS == 0;
                let on_column = (x - area.x) % GRID_COLUMNS == 0;
                let mark = match (on_row, on_column) {
                    (true, true) => "┼",
                    (true, false) => "─",
                    (false, true) => "│",
                    (false, false) => " ",
                };
                if let Some(cell) = buf.cell_mut((x, y)) {
                    cell.set_symbol(mark);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn desk_draws_grid() {
        let area = Rect::new(0, 0, 17, 5);
        let mut buf = Buffer::empty(area);
        Desk.render(area, &mut buf);

        assert_eq!(buf[(0, 0)].symbol(), "┼");
        assert_eq!(buf[(1, 0)].symbol(), "─");
        assert_eq!(buf[(0, 1)].symbol(), "│");
        assert_eq!(buf[(1, 1)].symbol(), " ");
        assert_eq!(buf[(8, 4)].symbol(), "┼");
        assert_eq!(buf[(3, 2)].bg, palette::DESK);
    }
}
