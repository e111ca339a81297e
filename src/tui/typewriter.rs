// Typewriter reveal
//
// A card types its message out one character per interval. The reveal state
// is plain data; the timer is a task owned by the card view that posts one
// `AppEvent::Reveal` per step. Each timer carries a generation number so a
// step from a superseded timer is recognisably stale.

use super::event::{AppEvent, EventSender};
use super::scope::TaskGuard;
use crate::cards::CardId;
use std::time::Duration;

/// How much of a text is currently visible
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Typewriter {
    text: String,
    /// Byte offsets of every char boundary after the first char
    boundaries: Vec<usize>,
    revealed: usize,
}

impl Typewriter {
    pub fn new(text: &str) -> Self {
        let boundaries = text
            .char_indices()
            .map(|(i, c)| i + c.len_utf8())
            .collect();
        Self {
            text: text.to_string(),
            boundaries,
            revealed: 0,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Number of characters in the full text
    pub fn len(&self) -> usize {
        self.boundaries.len()
    }

    /// Currently visible prefix
    pub fn visible(&self) -> &str {
        match self.revealed {
            0 => "",
            n => &self.text[..self.boundaries[n - 1]],
        }
    }

    pub fn is_complete(&self) -> bool {
        self.revealed >= self.boundaries.len()
    }

    /// Reveal one more character; returns false once nothing is left
    pub fn step(&mut self) -> bool {
        if self.is_complete() {
            return false;
        }
        self.revealed += 1;
        true
    }
}

/// Start a reveal timer posting `steps` ticks, the first one `interval` from now
pub fn spawn_reveal_timer(
    card: CardId,
    generation: u64,
    steps: usize,
    interval: Duration,
    events: EventSender,
) -> TaskGuard {
    TaskGuard::spawn(async move {
        let start = tokio::time::Instant::now() + interval;
        let mut ticker = tokio::time::interval_at(start, interval);
        for _ in 0..steps {
            ticker.tick().await;
            let tick = AppEvent::Reveal {
                card: card.clone(),
                generation,
            };
            if events.send(tick).is_err() {
                break;
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reveals_every_prefix_in_order() {
        let mut tw = Typewriter::new("beep");
        assert_eq!(tw.visible(), "");

        let mut seen = Vec::new();
        while tw.step() {
            seen.push(tw.visible().to_string());
        }

        assert_eq!(seen, vec!["b", "be", "bee", "beep"]);
        assert!(tw.is_complete());
        assert!(!tw.step());
        assert_eq!(tw.visible(), "beep");
    }

    #[test]
    fn test_multibyte_text_steps_by_char() {
        let mut tw = Typewriter::new("né☎");
        assert_eq!(tw.len(), 3);
        tw.step();
        assert_eq!(tw.visible(), "n");
        tw.step();
        assert_eq!(tw.visible(), "né");
        tw.step();
        assert_eq!(tw.visible(), "né☎");
    }

    #[test]
    fn test_empty_text_is_complete() {
        let mut tw = Typewriter::new("");
        assert!(tw.is_complete());
        assert!(!tw.step());
        assert_eq!(tw.visible(), "");
    }

    #[tokio::test(start_paused = true)]
    async fn test_timer_posts_one_tick_per_interval() {
        let (tx, mut rx) = crate::tui::event::channel();
        let card = CardId::new("TICK00");
        let interval = Duration::from_millis(50);
        let started = tokio::time::Instant::now();

        let _timer = spawn_reveal_timer(card.clone(), 3, 4, interval, tx);

        for n in 1..=4u32 {
            let event = rx.recv().await.unwrap();
            assert_eq!(
                event,
                AppEvent::Reveal {
                    card: card.clone(),
                    generation: 3
                }
            );
            assert_eq!(started.elapsed(), interval * n);
        }
        // Timer task ends after the last step, dropping its sender
        assert!(rx.recv().await.is_none());
    }
}
