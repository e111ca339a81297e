// Status bar component
//
// One line at the bottom: card count, device state, key hints, and the most
// recent warning or error from the log buffer.

use crate::logging::LogLevel;
use crate::tui::app::App;
use crate::tui::layout::Breakpoint;
use crate::tui::palette;
use crate::tui::traits::Interactive;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Render the status bar
///
/// Adapts to terminal width:
/// - Wide: counts, device state and key hints
/// - Narrow: counts and device state only
pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let bp = Breakpoint::from_width(area.width);
    let base = Style::default().bg(palette::SCREEN).fg(palette::PHOSPHOR);

    let device_state = if app.device.is_busy() {
        "RECEIVING"
    } else if app.device.has_focus() {
        "COMPOSE"
    } else {
        "IDLE"
    };

    let mut spans = vec![
        Span::styled(
            format!(" ▤ {} ", app.store.len()),
            base.add_modifier(Modifier::BOLD),
        ),
        Span::styled(format!("│ {} ", device_state), base),
    ];

    if bp.at_least(Breakpoint::Wide) {
        spans.push(Span::styled(
            "│ ⏎ print  ^G gen  ^L clear  ^J newline  esc/tab focus  ^C quit ",
            base.fg(palette::PHOSPHOR_DIM),
        ));
    }

    if let Some(entry) = app.latest_problem() {
        let colour = match entry.level {
            LogLevel::Error => palette::ERROR,
            _ => palette::WARN,
        };
        spans.push(Span::styled(
            format!("│ {} {} ", entry.level.as_str(), entry.message),
            base.fg(palette::LABEL).bg(colour),
        ));
    }

    let status = Paragraph::new(Line::from(spans)).style(base);
    f.render_widget(status, area);
}
