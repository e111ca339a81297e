// TUI module - Terminal User Interface
//
// This module manages the terminal UI using ratatui. It handles:
// - Terminal initialization and cleanup (raw mode, alternate screen, mouse)
// - Event loop (keyboard and mouse input, redraw ticks, background events)
// - Rendering the desk, the cards and the device

pub mod app;
pub mod card_view;
pub mod components;
pub mod device;
pub mod event;
pub mod layout;
pub mod palette;
pub mod scope;
pub mod traits;
pub mod typewriter;
pub mod ui;

use crate::config::Config;
use crate::generator::Generator;
use crate::logging::LogBuffer;
use anyhow::{Context, Result};
use app::App;
use crossterm::{
    event::{
        self as term, DisableMouseCapture, EnableMouseCapture, Event, KeyEvent, KeyEventKind,
        MouseButton, MouseEvent, MouseEventKind,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use event::EventReceiver;
use ratatui::{backend::CrosstermBackend, layout::Rect, Terminal};
use std::io;
use std::time::Duration;

/// Run the TUI
///
/// This function sets up the terminal, runs the event loop, and cleans up
/// when done. The terminal is restored even when the loop fails.
pub async fn run_tui(config: Config, generator: Generator, log_buffer: LogBuffer) -> Result<()> {
    // Set up terminal
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)
        .context("Failed to setup terminal")?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;

    let size = terminal.size().context("Failed to read terminal size")?;
    let (events_tx, mut events_rx) = event::channel();
    let mut app = App::new(
        &config,
        generator,
        log_buffer,
        events_tx,
        desk_area(size.width, size.height),
    );

    tracing::info!(
        width = size.width,
        height = size.height,
        "fax beeper ready"
    );

    let tick_rate = Duration::from_millis(config.tick_rate_ms);
    let result = run_event_loop(&mut terminal, &mut app, &mut events_rx, tick_rate).await;

    // Drop the app first: aborts typewriter timers and any generation request
    drop(app);

    // Restore terminal
    disable_raw_mode().context("Failed to disable raw mode")?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )
    .context("Failed to restore terminal")?;
    terminal.show_cursor().context("Failed to show cursor")?;

    result
}

/// Desk area for a terminal size: everything but the status row
fn desk_area(width: u16, height: u16) -> Rect {
    Rect::new(0, 0, width, height.saturating_sub(1))
}

/// Main event loop
///
/// Waits on three sources with tokio::select!:
/// 1. Terminal input (keys, mouse, resize)
/// 2. Timer ticks (toast expiry, spinner, cursor blink)
/// 3. App events from background tasks (typewriter steps, generation results)
async fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    events_rx: &mut EventReceiver,
    tick_rate: Duration,
) -> Result<()> {
    let mut tick_interval = tokio::time::interval(tick_rate);

    loop {
        terminal
            .draw(|f| ui::draw(f, app))
            .context("Failed to draw terminal")?;

        tokio::select! {
            // Keyboard, mouse or resize
            _ = async {
                if term::poll(Duration::from_millis(10)).unwrap_or(false) {
                    match term::read() {
                        Ok(Event::Key(key_event)) => handle_key_event(app, key_event),
                        Ok(Event::Mouse(mouse_event)) => handle_mouse_event(app, mouse_event),
                        Ok(Event::Resize(width, height)) => app.resize(desk_area(width, height)),
                        _ => {}
                    }
                }
            } => {}

            _ = tick_interval.tick() => {
                app.tick();
            }

            Some(app_event) = events_rx.recv() => {
                app.handle_event(app_event);
            }
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}

/// Handle keyboard input
///
/// Only presses count; terminals that report releases would otherwise
/// trigger every action twice.
fn handle_key_event(app: &mut App, key_event: KeyEvent) {
    if key_event.kind != KeyEventKind::Press {
        return;
    }
    app.handle_key(key_event);
}

/// Handle mouse input
///
/// Presses are hit tested by the app; drags and releases go to whichever
/// card holds the pointer capture.
fn handle_mouse_event(app: &mut App, mouse_event: MouseEvent) {
    let (column, row) = (mouse_event.column, mouse_event.row);
    match mouse_event.kind {
        MouseEventKind::Down(MouseButton::Left) => app.mouse_down(column, row),
        MouseEventKind::Drag(MouseButton::Left) => app.mouse_drag(column, row),
        MouseEventKind::Up(MouseButton::Left) => app.mouse_up(),
        _ => {}
    }
}
