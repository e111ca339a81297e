// Device panel component
//
// Renders the beeper: green casing, phosphor display with the draft, and the
// GEN / CLR / PRINT buttons. Geometry comes from DeviceLayout so drawing and
// hit testing agree.

use crate::tui::device::DevicePanel;
use crate::tui::layout::DeviceLayout;
use crate::tui::palette;
use crate::tui::traits::Interactive;
use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Wrap},
    Frame,
};

/// Spinner frames for the busy generate button
const SPINNER: &[&str] = &["◐", "◓", "◑", "◒"];

const PLACEHOLDER_IDLE: &str = "TYPE MESSAGE HERE...";
const PLACEHOLDER_BUSY: &str = "RECEIVING SIGNAL...";

pub fn render(f: &mut Frame, layout: &DeviceLayout, device: &DevicePanel, frame: usize) {
    let casing = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(palette::CASING_DARK).bg(palette::CASING))
        .style(Style::default().bg(palette::CASING))
        .title_bottom(
            Line::from(Span::styled(
                " FAX BEEPER ",
                Style::default()
                    .fg(palette::CASING)
                    .bg(palette::SCREEN)
                    .add_modifier(Modifier::BOLD),
            ))
            .centered(),
        );

    // Never draw past the frame, whatever the layout was computed for
    let area = f.area();
    let outer = layout.outer.intersection(area);
    f.render_widget(Clear, outer);
    f.render_widget(casing, outer);

    render_screen(f, layout.screen.intersection(area), device, frame);

    let busy = device.is_busy();
    let generate_label = if busy {
        SPINNER[frame % SPINNER.len()]
    } else {
        "✶ GEN"
    };
    render_button(f, layout.generate.intersection(area), generate_label, palette::BUTTON, busy);
    render_button(f, layout.clear.intersection(area), "CLR", palette::BUTTON, false);
    render_button(f, layout.print.intersection(area), "PRINT ▤", palette::PRINT, false);
}

fn render_screen(f: &mut Frame, area: Rect, device: &DevicePanel, frame: usize) {
    if area.height == 0 {
        return;
    }

    let phosphor = Style::default().fg(palette::PHOSPHOR).bg(palette::SCREEN);
    let dim = phosphor.fg(palette::PHOSPHOR_DIM);

    let block = Block::default()
        .borders(Borders::LEFT | Borders::RIGHT)
        .border_style(Style::default().fg(palette::CASING_DARK).bg(palette::SCREEN))
        .style(Style::default().bg(palette::SCREEN));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let pulse = if frame % 10 < 5 { "●" } else { " " };
    let status = Paragraph::new(Span::styled(format!("{} COMPOSE_MODE", pulse), phosphor));
    let signal = Paragraph::new(Span::styled("▂▄▆ ▮▮▮", phosphor)).alignment(Alignment::Right);
    let status_area = Rect::new(inner.x, inner.y, inner.width, 1.min(inner.height));
    f.render_widget(status, status_area);
    f.render_widget(signal, status_area);

    let text_area = Rect::new(
        inner.x,
        inner.y + status_area.height,
        inner.width,
        inner.height - status_area.height,
    );

    let busy = device.is_busy();
    let lines: Vec<Line> = if device.draft().is_empty() {
        let placeholder = if busy { PLACEHOLDER_BUSY } else { PLACEHOLDER_IDLE };
        vec![Line::from(Span::styled(placeholder, dim))]
    } else {
        let style = if busy {
            phosphor.add_modifier(Modifier::SLOW_BLINK)
        } else {
            phosphor
        };
        let shown = device.draft().to_uppercase();
        let mut lines: Vec<Line> = shown
            .split('\n')
            .map(|l| Line::from(Span::styled(l.to_string(), style)))
            .collect();
        if device.has_focus() && !busy && frame % 6 < 3 {
            if let Some(last) = lines.last_mut() {
                last.push_span(Span::styled("█", phosphor));
            }
        }
        lines
    };

    // Keep the end of a long draft in view
    let columns = text_area.width.max(1) as usize;
    let rows: usize = lines.iter().map(|l| l.width().max(1).div_ceil(columns)).sum();
    let scroll = rows.saturating_sub(text_area.height as usize) as u16;

    let text = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .scroll((scroll, 0));
    f.render_widget(text, text_area);
}

fn render_button(
    f: &mut Frame,
    area: Rect,
    label: &str,
    colour: ratatui::style::Color,
    disabled: bool,
) {
    if area.width == 0 || area.height == 0 {
        return;
    }
    let face = if disabled {
        palette::BUTTON_DISABLED
    } else {
        colour
    };
    let block = Block::default()
        .borders(Borders::BOTTOM)
        .border_type(BorderType::Thick)
        .border_style(Style::default().fg(palette::SCREEN).bg(palette::CASING))
        .style(Style::default().bg(face));

    let button = Paragraph::new(label)
        .alignment(Alignment::Center)
        .style(
            Style::default()
                .fg(palette::LABEL)
                .bg(face)
                .add_modifier(Modifier::BOLD),
        )
        .block(block);
    f.render_widget(button, area);
}
