// Messages from background tasks to the UI loop
//
// Timers and the generation request never touch UI state directly. They post
// an AppEvent and the UI loop applies it, so every mutation happens on the
// loop's task.

use crate::cards::CardId;
use tokio::sync::mpsc;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    /// One typewriter step is due for a card
    Reveal { card: CardId, generation: u64 },
    /// A generation request finished (success or fallback text)
    Generated { ticket: u64, text: String },
}

pub type EventSender = mpsc::UnboundedSender<AppEvent>;
pub type EventReceiver = mpsc::UnboundedReceiver<AppEvent>;

pub fn channel() -> (EventSender, EventReceiver) {
    mpsc::unbounded_channel()
}
