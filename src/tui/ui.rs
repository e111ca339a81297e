// UI rendering logic
//
// Painter's order, back to front: desk, cards in stack order, the device,
// then the status bar and any toast. The device sits above every card, the
// same order the mouse hit test uses.

use super::app::App;
use super::components::{backdrop, device_panel, status_bar, PaperCard};
use super::layout::DeviceLayout;
use ratatui::{
    layout::{Constraint, Direction, Layout},
    Frame,
};

/// Main UI render function - called on every frame
pub fn draw(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(1)])
        .split(f.area());
    let desk = chunks[0];

    // The frame may already have the new size before the resize event is read
    let layout = if desk == app.canvas() {
        *app.layout()
    } else {
        DeviceLayout::new(desk)
    };

    backdrop::render(f, desk);

    let dragging = app.dragging();
    let cursor_on = app.animation_frame % 6 < 3;
    for (card, view) in app.cards_in_draw_order() {
        let widget = PaperCard::new(card, view.visible_text())
            .lifted(dragging.as_ref() == Some(&card.id))
            .cursor(view.is_revealing() || cursor_on);
        f.render_widget(widget, desk);
    }

    device_panel::render(f, &layout, &app.device, app.animation_frame);

    status_bar::render(f, chunks[1], app);

    if let Some(toast) = &app.toast {
        toast.render(f, desk);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::generator::testing::ScriptedSource;
    use crate::logging::LogBuffer;
    use crate::tui::event::channel;
    use ratatui::{backend::TestBackend, layout::Rect, Terminal};

    fn screen_text(terminal: &Terminal<TestBackend>) -> String {
        let buffer = terminal.backend().buffer();
        let mut text = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                text.push_str(buffer[(x, y)].symbol());
            }
            text.push('\n');
        }
        text
    }

    #[tokio::test]
    async fn test_draws_device_and_cards() {
        let area = Rect::new(0, 0, 120, 50);
        let (tx, _rx) = channel();
        let mut app = App::new(
            &Config::default(),
            ScriptedSource::failing().generator(),
            LogBuffer::new(),
            tx,
            Rect::new(0, 0, 120, 49),
        );
        app.on_print("hello");

        let mut terminal = Terminal::new(TestBackend::new(area.width, area.height)).unwrap();
        terminal.draw(|f| draw(f, &app)).unwrap();
        let text = screen_text(&terminal);

        assert!(text.contains("TYPE MESSAGE HERE..."));
        assert!(text.contains("PRINT"));
        assert!(text.contains("PAGER MESSAGE"));
        assert!(text.contains("FAX BEEPER"));
        assert!(text.contains("PRINTED"));
    }

    #[tokio::test]
    async fn test_shrunk_terminal_draws_before_resize_event() {
        let (tx, _rx) = channel();
        let mut app = App::new(
            &Config::default(),
            ScriptedSource::failing().generator(),
            LogBuffer::new(),
            tx,
            Rect::new(0, 0, 120, 49),
        );
        app.on_print("still here");

        // The app still believes in the old canvas
        let mut terminal = Terminal::new(TestBackend::new(60, 20)).unwrap();
        terminal.draw(|f| draw(f, &app)).unwrap();
        let text = screen_text(&terminal);
        assert!(text.contains("PRINT"));
        assert!(text.contains("FAX BEEPER"));
    }

    #[tokio::test]
    async fn test_tiny_terminal_does_not_panic() {
        let (tx, _rx) = channel();
        let mut app = App::new(
            &Config::default(),
            ScriptedSource::failing().generator(),
            LogBuffer::new(),
            tx,
            Rect::new(0, 0, 10, 4),
        );
        app.on_print("squeezed");
        app.device.set_draft("x");

        let mut terminal = Terminal::new(TestBackend::new(10, 5)).unwrap();
        terminal.draw(|f| draw(f, &app)).unwrap();
    }
}
