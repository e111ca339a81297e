//! Interactive trait for components that handle keyboard input

use crossterm::event::KeyEvent;

/// Result of offering an input event to a component
///
/// `Yes` stops routing: nothing underneath sees the event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Handled {
    /// Event was consumed by the component
    Yes,
    /// Event was not handled, keep routing
    No,
}

impl Handled {
    pub fn was_handled(self) -> bool {
        self == Self::Yes
    }
}

/// Components that take keyboard input while focused
///
/// # Event Flow
///
/// ```text
/// KeyEvent
///    │
///    ▼
/// App (global keys: Ctrl+C, Enter, Ctrl+G, Ctrl+L)
///    │
///    │ if not handled
///    ▼
/// Focused component (via Interactive)
///    │
///    │ Handled::Yes or Handled::No
///    ▼
/// App (fallback keys: q, Tab)
/// ```
pub trait Interactive {
    /// Offer a key to the component
    fn handle_key(&mut self, key: KeyEvent) -> Handled;

    /// Whether the component currently wants keyboard input
    fn has_focus(&self) -> bool;
}
