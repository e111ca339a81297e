// TUI application state
//
// The App is the orchestrator: it owns the card store, one view per card and
// the device panel. Views and the device never touch the store themselves;
// they hand back intents (print text, focus/move/delete a card) and the App
// applies them here, on the UI task.

use super::card_view::{CardIntent, CardView};
use super::components::Toast;
use super::device::DevicePanel;
use super::event::{AppEvent, EventSender};
use super::layout::{DeviceHit, DeviceLayout};
use super::scope::PointerCapture;
use super::traits::{Handled, Interactive};
use crate::cards::{Card, CardId, CardStore, Point};
use crate::config::Config;
use crate::generator::Generator;
use crate::logging::{LogBuffer, LogEntry, LogLevel};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::layout::Rect;
use std::collections::HashMap;
use std::time::Duration;

/// Main application state for the TUI
pub struct App {
    /// Live cards and the stacking counter
    pub store: CardStore,

    /// Interaction state per live card
    views: HashMap<CardId, CardView>,

    /// The beeper
    pub device: DevicePanel,

    /// Window-level pointer listener for drags
    pointer: PointerCapture,

    generator: Generator,

    /// Sender handed to timers and the generation task
    events: EventSender,

    /// Current terminal area and the device placed in it
    canvas: Rect,
    layout: DeviceLayout,

    typewriter_interval: Duration,

    /// Captured logs (status bar shows the latest warning)
    pub log_buffer: LogBuffer,

    /// Toast notification (auto-dismisses)
    pub toast: Option<Toast>,

    /// Animation frame counter for the busy spinner
    pub animation_frame: usize,

    /// Whether the app should quit
    pub should_quit: bool,
}

impl App {
    pub fn new(
        config: &Config,
        generator: Generator,
        log_buffer: LogBuffer,
        events: EventSender,
        canvas: Rect,
    ) -> Self {
        Self {
            store: CardStore::new(),
            views: HashMap::new(),
            device: DevicePanel::new(),
            pointer: PointerCapture::new(),
            generator,
            events,
            canvas,
            layout: DeviceLayout::new(canvas),
            typewriter_interval: Duration::from_millis(config.typewriter_interval_ms),
            log_buffer,
            toast: None,
            animation_frame: 0,
            should_quit: false,
        }
    }

    // ─────────────────────────────────────────────────────────────────────
    // Geometry
    // ─────────────────────────────────────────────────────────────────────

    /// Terminal resized: re-place the device and with it the anchor
    pub fn resize(&mut self, canvas: Rect) {
        self.canvas = canvas;
        self.layout = DeviceLayout::new(canvas);
        tracing::trace!(width = canvas.width, height = canvas.height, "canvas resized");
    }

    pub fn canvas(&self) -> Rect {
        self.canvas
    }

    pub fn layout(&self) -> &DeviceLayout {
        &self.layout
    }

    /// Where new cards are seeded
    pub fn anchor(&self) -> Point {
        self.layout.anchor()
    }

    // ─────────────────────────────────────────────────────────────────────
    // Rendering accessors
    // ─────────────────────────────────────────────────────────────────────

    /// Cards bottom-first with their views, ready to draw
    pub fn cards_in_draw_order(&self) -> Vec<(&Card, &CardView)> {
        self.store
            .by_stack_order()
            .into_iter()
            .filter_map(|card| self.views.get(&card.id).map(|view| (card, view)))
            .collect()
    }

    /// Most recent warning or error, for the status bar
    pub fn latest_problem(&self) -> Option<LogEntry> {
        self.log_buffer.latest_at_least(LogLevel::Warn)
    }

    // ─────────────────────────────────────────────────────────────────────
    // Device actions
    // ─────────────────────────────────────────────────────────────────────

    /// Print the device's draft as a new card
    pub fn print(&mut self) {
        if let Some(text) = self.device.print() {
            self.on_print(&text);
        }
    }

    /// Create a card for `text` and mount its view
    pub fn on_print(&mut self, text: &str) {
        let Some(card) = self.store.create(text, self.anchor()) else {
            return;
        };
        let view = CardView::mount(&card, self.typewriter_interval, self.events.clone());
        self.views.insert(card.id.clone(), view);
        tracing::info!(
            id = %card.id,
            cards = self.store.len(),
            top = self.store.max_stack_order(),
            "message printed"
        );
        self.toast = Some(Toast::new("PRINTED"));
    }

    pub fn generate(&mut self) {
        if !self.device.auto_generate(&self.generator, &self.events) {
            tracing::debug!("generate ignored while a request is outstanding");
        }
    }

    pub fn clear_device(&mut self) {
        self.device.clear();
    }

    // ─────────────────────────────────────────────────────────────────────
    // Card intents and background events
    // ─────────────────────────────────────────────────────────────────────

    pub fn apply(&mut self, intent: CardIntent) {
        match intent {
            CardIntent::Focus(id) => self.store.focus(&id),
            CardIntent::Update(id, patch) => self.store.update(&id, patch),
            CardIntent::Delete(id) => {
                self.store.delete(&id);
                // Dropping the view stops its timer and frees any capture
                if self.views.remove(&id).is_some() {
                    self.toast = Some(Toast::new("TORN OFF"));
                }
            }
        }
    }

    pub fn handle_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::Reveal { card, generation } => {
                if let Some(view) = self.views.get_mut(&card) {
                    view.on_reveal_tick(generation);
                }
            }
            AppEvent::Generated { ticket, text } => {
                self.device.complete_generation(ticket, text);
            }
        }
    }

    /// Drop views whose card is gone and refresh texts from the store
    fn sync_views(&mut self) {
        let store = &self.store;
        self.views.retain(|id, _| store.contains(id));
        for card in self.store.iter() {
            if let Some(view) = self.views.get_mut(&card.id) {
                view.set_text(&card.text);
            }
        }
    }

    // ─────────────────────────────────────────────────────────────────────
    // Pointer input
    // ─────────────────────────────────────────────────────────────────────

    /// Left button pressed
    ///
    /// The device is drawn over the cards, so it is hit-tested first; then
    /// the topmost card; a press on bare desk releases the text field.
    pub fn mouse_down(&mut self, column: u16, row: u16) {
        // A press while something is captured means the release was lost
        self.mouse_up();

        if let Some(hit) = self.layout.hit(column, row) {
            match hit {
                DeviceHit::Generate => self.generate(),
                DeviceHit::Clear => self.clear_device(),
                DeviceHit::Print => self.print(),
                DeviceHit::Screen => self.device.focus_input(),
                DeviceHit::Body => {}
            }
            return;
        }

        let point = Point::new(column as i32, row as i32);
        if let Some(card) = self.store.top_at(point).cloned() {
            let mut intents = Vec::new();
            let handled = match self.views.get_mut(&card.id) {
                Some(view) => view.press(&card, point, &self.pointer, &mut intents),
                None => Handled::No,
            };
            for intent in intents {
                self.apply(intent);
            }
            if handled.was_handled() {
                return;
            }
        }

        self.device.blur_input();
    }

    /// Pointer moved with the button held; only the capture owner sees it
    pub fn mouse_drag(&mut self, column: u16, row: u16) {
        let Some(owner) = self.pointer.owner() else {
            return;
        };
        let point = Point::new(column as i32, row as i32);
        let intent = self.views.get(&owner).and_then(|view| view.drag_to(point));
        if let Some(intent) = intent {
            self.apply(intent);
        }
    }

    /// Button released anywhere
    pub fn mouse_up(&mut self) {
        if let Some(owner) = self.pointer.owner() {
            if let Some(view) = self.views.get_mut(&owner) {
                view.release();
            }
        }
    }

    // ─────────────────────────────────────────────────────────────────────
    // Keyboard input
    // ─────────────────────────────────────────────────────────────────────

    /// Layered dispatch: global → device → fallback
    pub fn handle_key(&mut self, key: KeyEvent) {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

        // Layer 1: global shortcuts
        match key.code {
            KeyCode::Char('c') if ctrl => {
                self.should_quit = true;
                return;
            }
            KeyCode::Char('g') if ctrl => {
                self.generate();
                return;
            }
            KeyCode::Char('l') if ctrl => {
                self.clear_device();
                return;
            }
            KeyCode::Enter if self.device.has_focus() => {
                self.print();
                return;
            }
            KeyCode::Esc => {
                self.device.blur_input();
                return;
            }
            _ => {}
        }

        // Layer 2: the text field
        if self.device.handle_key(key) == Handled::Yes {
            return;
        }

        // Layer 3: fallback keys when nothing took it
        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Tab => self.device.focus_input(),
            _ => {}
        }
    }

    // ─────────────────────────────────────────────────────────────────────
    // Housekeeping
    // ─────────────────────────────────────────────────────────────────────

    /// Redraw tick: advance the spinner, expire toasts
    pub fn tick(&mut self) {
        self.animation_frame = self.animation_frame.wrapping_add(1);
        if self.toast.as_ref().is_some_and(Toast::is_expired) {
            self.toast = None;
        }
        self.sync_views();
    }

    /// Dragging card, if any (drawn with a shadow)
    pub fn dragging(&self) -> Option<CardId> {
        self.pointer.owner()
    }
}
