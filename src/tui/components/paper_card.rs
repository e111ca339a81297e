// Paper card widget
//
// Draws one printed card straight into the buffer, cell by cell, because a
// card may hang partly off-screen (negative position) and each row is shifted
// by the card's tilt. Anything outside the target area is clipped.
//
// Layout (CARD_WIDTH x CARD_HEIGHT):
//
//   row 0   ▲▲▲▲▲▲▲▲▲▲▲▲▲▲▲▲      jagged top
//   row 1   PAGER MESSAGE  12:04 [x]
//   row 2   ID: 7K2QXA
//   row 3   ──────────────────────
//   row 4-8 message text, wrapped, with a cursor while typing
//   row 9            END OF TRANSMISSION
//   row 10  ▼▼▼▼▼▼▼▼▼▼▼▼▼▼▼▼      jagged bottom

use crate::cards::{Card, CARD_HEIGHT, CARD_WIDTH};
use crate::tui::palette;
use ratatui::{
    buffer::Buffer,
    layout::{Position, Rect},
    style::{Modifier, Style},
    widgets::Widget,
};
use unicode_width::UnicodeWidthChar;

const MARGIN: i32 = 2;
const TEXT_FIRST_ROW: u16 = 4;
const TEXT_ROWS: usize = 5;
const CURSOR: &str = "▌";

pub struct PaperCard<'a> {
    card: &'a Card,
    /// Revealed part of the message
    text: &'a str,
    /// Card is being dragged: drawn with a drop shadow
    lifted: bool,
    /// Cursor visible this frame
    cursor: bool,
}

impl<'a> PaperCard<'a> {
    pub fn new(card: &'a Card, text: &'a str) -> Self {
        Self {
            card,
            text,
            lifted: false,
            cursor: false,
        }
    }

    pub fn lifted(mut self, lifted: bool) -> Self {
        self.lifted = lifted;
        self
    }

    pub fn cursor(mut self, cursor: bool) -> Self {
        self.cursor = cursor;
        self
    }
}

impl Widget for PaperCard<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let card = self.card;
        let width = CARD_WIDTH as i32;
        let paper = Style::default().bg(palette::PAPER).fg(palette::PAPER_INK);
        let faint = paper.fg(palette::PAPER_FAINT);
        let label = faint.add_modifier(Modifier::BOLD);

        let mut canvas = Canvas { area, buf };
        let x_at = |row: u16| card.position.x + card.row_shift(row);
        let y_at = |row: u16| card.position.y + row as i32;

        if self.lifted {
            let shadow = Style::default().bg(palette::SHADOW);
            for row in 1..CARD_HEIGHT {
                canvas.fill(x_at(row) + 1, y_at(row) + 1, width, shadow);
            }
        }

        // Jagged edges keep the desk colour behind them
        let edge = Style::default().fg(palette::PAPER);
        canvas.put(x_at(0), y_at(0), &"▲".repeat(CARD_WIDTH as usize), edge);
        let bottom = CARD_HEIGHT - 1;
        canvas.put(x_at(bottom), y_at(bottom), &"▼".repeat(CARD_WIDTH as usize), edge);

        for row in 1..bottom {
            canvas.fill(x_at(row), y_at(row), width, paper);
        }

        // Header
        let (x, y) = (x_at(1), y_at(1));
        canvas.put(x + MARGIN, y, "PAGER MESSAGE", label);
        let delete = card.delete_control();
        canvas.put(delete.x - card.timestamp.len() as i32 - 1, y, &card.timestamp, faint);
        canvas.put(delete.x, y, "[x]", paper.fg(palette::TEAR));

        canvas.put(x_at(2) + MARGIN, y_at(2), &format!("ID: {}", card.id), faint);
        canvas.put(
            x_at(3) + MARGIN,
            y_at(3),
            &"─".repeat((width - 2 * MARGIN) as usize),
            Style::default().bg(palette::PAPER).fg(palette::PAPER_EDGE),
        );

        // Body
        let mut lines = wrap_text(self.text, (width - 2 * MARGIN) as usize);
        if lines.is_empty() {
            lines.push(String::new());
        }
        let overflow = lines.len() > TEXT_ROWS;
        lines.truncate(TEXT_ROWS);
        if overflow {
            if let Some(last) = lines.last_mut() {
                last.pop();
                last.push('…');
            }
        }

        for (i, line) in lines.iter().enumerate() {
            let row = TEXT_FIRST_ROW + i as u16;
            let end = canvas.put(x_at(row) + MARGIN, y_at(row), line, paper);
            if self.cursor && i == lines.len() - 1 && !overflow {
                canvas.put(end, y_at(row), CURSOR, paper.fg(palette::SHADOW));
            }
        }

        let footer = "END OF TRANSMISSION";
        let row = bottom - 1;
        canvas.put(
            x_at(row) + width - MARGIN - footer.len() as i32,
            y_at(row),
            footer,
            Style::default().bg(palette::PAPER).fg(palette::PAPER_EDGE),
        );
    }
}

/// Clipped writer over a buffer area with signed coordinates
struct Canvas<'b> {
    area: Rect,
    buf: &'b mut Buffer,
}

impl Canvas<'_> {
    fn cell_at(&mut self, x: i32, y: i32) -> Option<&mut ratatui::buffer::Cell> {
        let (x, y) = (u16::try_from(x).ok()?, u16::try_from(y).ok()?);
        if !self.area.contains(Position::new(x, y)) {
            return None;
        }
        self.buf.cell_mut((x, y))
    }

    /// Write `text` starting at (x, y); returns the column after it
    fn put(&mut self, mut x: i32, y: i32, text: &str, style: Style) -> i32 {
        for c in text.chars() {
            let w = c.width().unwrap_or(0) as i32;
            if w == 0 {
                continue;
            }
            if let Some(cell) = self.cell_at(x, y) {
                cell.set_char(c).set_style(style);
            }
            // Wide glyphs cover the following cell
            for pad in 1..w {
                if let Some(cell) = self.cell_at(x + pad, y) {
                    cell.set_symbol("").set_style(style);
                }
            }
            x += w;
        }
        x
    }

    fn fill(&mut self, x: i32, y: i32, width: i32, style: Style) {
        for dx in 0..width {
            if let Some(cell) = self.cell_at(x + dx, y) {
                cell.set_char(' ').set_style(style);
            }
        }
    }
}

/// Wrap text to `width` columns
///
/// Honours explicit newlines, breaks between words and splits words longer
/// than a line.
pub fn wrap_text(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();

    for paragraph in text.split('\n') {
        let mut line = String::new();
        let mut line_width = 0;

        for word in paragraph.split(' ') {
            let word_width: usize = word.chars().map(|c| c.width().unwrap_or(0)).sum();
            let gap = usize::from(!line.is_empty());

            if line_width + gap + word_width <= width {
                if gap == 1 {
                    line.push(' ');
                }
                line.push_str(word);
                line_width += gap + word_width;
                continue;
            }

            if !line.is_empty() {
                lines.push(std::mem::take(&mut line));
                line_width = 0;
            }

            for c in word.chars() {
                let w = c.width().unwrap_or(0);
                if line_width + w > width {
                    lines.push(std::mem::take(&mut line));
                    line_width = 0;
                }
                line.push(c);
                line_width += w;
            }
        }
        lines.push(line);
    }

    lines
}
