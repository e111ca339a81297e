// Card view - interaction state for one printed card
//
// Owns the drag state machine and the typewriter reveal for a single card and
// turns raw pointer input into intents for the card store. It never mutates
// the store itself.
//
// Drag states:
//
//   [Idle] ──press (offset captured, focus requested)──▶ [Dragging]
//     ▲                                                       │
//     └────────────────release anywhere───────────────────────┘
//
// While dragging, the view holds a pointer capture guard, so moves and the
// release reach it even when the pointer leaves the card.

use super::event::EventSender;
use super::scope::{CaptureGuard, PointerCapture, TaskGuard};
use super::traits::Handled;
use super::typewriter::{spawn_reveal_timer, Typewriter};
use crate::cards::{Card, CardId, CardPatch, Point};
use std::time::Duration;

/// Requests a card view makes of the card store
#[derive(Debug, Clone, PartialEq)]
pub enum CardIntent {
    Focus(CardId),
    Update(CardId, CardPatch),
    Delete(CardId),
}

#[derive(Debug)]
enum DragState {
    Idle,
    Dragging {
        /// Pointer position minus card position at press time
        offset: Point,
        _capture: CaptureGuard,
    },
}

#[derive(Debug)]
pub struct CardView {
    id: CardId,
    drag: DragState,
    typewriter: Typewriter,
    /// Bumped whenever the reveal restarts
    generation: u64,
    timer: Option<TaskGuard>,
    interval: Duration,
    events: EventSender,
}

impl CardView {
    /// Mount a view for `card` and start its reveal
    pub fn mount(card: &Card, interval: Duration, events: EventSender) -> Self {
        let mut view = Self {
            id: card.id.clone(),
            drag: DragState::Idle,
            typewriter: Typewriter::new(""),
            generation: 0,
            timer: None,
            interval,
            events,
        };
        view.restart_reveal(&card.text);
        view
    }

    pub fn id(&self) -> &CardId {
        &self.id
    }

    /// Text revealed so far
    pub fn visible_text(&self) -> &str {
        self.typewriter.visible()
    }

    pub fn is_revealing(&self) -> bool {
        !self.typewriter.is_complete()
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.drag, DragState::Dragging { .. })
    }

    /// Restart the reveal if the card's text differs from what is shown
    pub fn set_text(&mut self, text: &str) {
        if self.typewriter.text() != text {
            self.restart_reveal(text);
        }
    }

    fn restart_reveal(&mut self, text: &str) {
        // Old timer goes first so two never run for one view
        self.timer = None;
        self.generation += 1;
        self.typewriter = Typewriter::new(text);

        if !self.typewriter.is_complete() {
            self.timer = Some(spawn_reveal_timer(
                self.id.clone(),
                self.generation,
                self.typewriter.len(),
                self.interval,
                self.events.clone(),
            ));
        }
    }

    /// Apply one reveal step; stale generations are ignored
    pub fn on_reveal_tick(&mut self, generation: u64) -> bool {
        if generation != self.generation {
            return false;
        }
        let advanced = self.typewriter.step();
        if self.typewriter.is_complete() {
            self.timer = None;
        }
        advanced
    }

    /// Pointer pressed at `pointer` while this card is the topmost hit
    ///
    /// Consumes the press so nothing underneath reacts. The delete control
    /// requests deletion without starting a drag.
    pub fn press(
        &mut self,
        card: &Card,
        pointer: Point,
        capture: &PointerCapture,
        intents: &mut Vec<CardIntent>,
    ) -> Handled {
        if !card.contains(pointer) {
            return Handled::No;
        }

        if card.hits_delete_control(pointer) {
            intents.push(CardIntent::Delete(self.id.clone()));
            return Handled::Yes;
        }

        // A press while still dragging (lost release) starts over; the old
        // guard must go before the new grab or its drop would clear it
        self.release();

        intents.push(CardIntent::Focus(self.id.clone()));
        self.drag = DragState::Dragging {
            offset: pointer - card.position,
            _capture: capture.acquire(self.id.clone()),
        };
        Handled::Yes
    }

    /// Pointer moved anywhere on screen while dragging
    pub fn drag_to(&self, pointer: Point) -> Option<CardIntent> {
        match &self.drag {
            DragState::Dragging { offset, .. } => Some(CardIntent::Update(
                self.id.clone(),
                CardPatch::position(pointer - *offset),
            )),
            DragState::Idle => None,
        }
    }

    /// Pointer released anywhere on screen
    pub fn release(&mut self) {
        self.drag = DragState::Idle;
    }
}
