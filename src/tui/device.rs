// Device panel - the beeper's input surface
//
// Holds the draft message and the busy flag for auto-generate. Print and
// generate results flow back to the orchestrator; the panel itself never
// touches the card store.
//
// Generation requests are tagged with a ticket. A result is applied only if
// its ticket is the one outstanding, and dropping the panel aborts the
// request, so a late response can never write into a panel that is gone.

use super::event::{AppEvent, EventSender};
use super::scope::TaskGuard;
use super::traits::{Handled, Interactive};
use crate::generator::Generator;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

#[derive(Debug)]
pub struct DevicePanel {
    draft: String,
    busy: bool,
    input_focused: bool,
    /// Ticket of the most recent generation request
    ticket: u64,
    request: Option<TaskGuard>,
}

impl Default for DevicePanel {
    fn default() -> Self {
        Self::new()
    }
}

impl DevicePanel {
    pub fn new() -> Self {
        Self {
            draft: String::new(),
            busy: false,
            input_focused: true,
            ticket: 0,
            request: None,
        }
    }

    pub fn draft(&self) -> &str {
        &self.draft
    }

    pub fn is_busy(&self) -> bool {
        self.busy
    }

    pub fn set_draft(&mut self, text: impl Into<String>) {
        self.draft = text.into();
    }

    /// Empty the draft and put input focus back on the text field
    pub fn clear(&mut self) {
        self.draft.clear();
        self.input_focused = true;
    }

    pub fn focus_input(&mut self) {
        self.input_focused = true;
    }

    pub fn blur_input(&mut self) {
        self.input_focused = false;
    }

    /// Take the draft as a print request
    ///
    /// A blank draft is ignored and left as it is.
    pub fn print(&mut self) -> Option<String> {
        if self.draft.trim().is_empty() {
            return None;
        }
        Some(std::mem::take(&mut self.draft))
    }

    /// Ask the generator for a message
    ///
    /// Returns false while a request is already outstanding. The result
    /// arrives later as [`AppEvent::Generated`].
    pub fn auto_generate(&mut self, generator: &Generator, events: &EventSender) -> bool {
        if self.busy {
            return false;
        }

        self.busy = true;
        self.ticket += 1;
        let ticket = self.ticket;
        let generator = generator.clone();
        let events = events.clone();

        tracing::debug!(ticket, "requesting generated message");
        self.request = Some(TaskGuard::spawn(async move {
            let text = generator.generate().await;
            let _ = events.send(AppEvent::Generated { ticket, text });
        }));
        true
    }

    /// Apply a generation result; returns false for stale tickets
    pub fn complete_generation(&mut self, ticket: u64, text: String) -> bool {
        if !self.busy || ticket != self.ticket {
            tracing::debug!(ticket, current = self.ticket, "discarding stale generation");
            return false;
        }
        self.draft = text;
        self.busy = false;
        self.request = None;
        true
    }

    fn insert_char(&mut self, c: char) {
        self.draft.push(c);
    }

    fn backspace(&mut self) {
        self.draft.pop();
    }
}

impl Interactive for DevicePanel {
    /// Text editing keys; ignored while a request is outstanding
    fn handle_key(&mut self, key: KeyEvent) -> Handled {
        if !self.input_focused {
            return Handled::No;
        }

        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        let editing = match key.code {
            KeyCode::Char('j') if ctrl => Some('\n'),
            KeyCode::Char(c) if !ctrl => Some(c),
            KeyCode::Backspace => None,
            _ => return Handled::No,
        };

        if !self.busy {
            match editing {
                Some(c) => self.insert_char(c),
                None => self.backspace(),
            }
        }
        Handled::Yes
    }

    fn has_focus(&self) -> bool {
        self.input_focused
    }
}
