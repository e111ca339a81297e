//! Scoped UI resources
//!
//! Both types here release what they hold when dropped, so a card view or
//! the device panel going away can never leave a timer running or a pointer
//! grab dangling.

use crate::cards::CardId;
use std::cell::RefCell;
use std::future::Future;
use std::rc::Rc;
use tokio::task::JoinHandle;

/// A spawned task that is aborted when the guard is dropped
#[derive(Debug)]
pub struct TaskGuard(JoinHandle<()>);

impl TaskGuard {
    pub fn spawn<F>(future: F) -> Self
    where
        F: Future<Output = ()> + Send + 'static,
    {
        Self(tokio::spawn(future))
    }
}

impl Drop for TaskGuard {
    fn drop(&mut self) {
        self.0.abort();
    }
}

/// Window-level pointer listener slot
///
/// While a card is being dragged it owns the slot and receives every pointer
/// move and release, wherever they happen on screen. Ownership is held
/// through a [`CaptureGuard`]; dropping the guard detaches the listener.
#[derive(Debug, Clone, Default)]
pub struct PointerCapture {
    owner: Rc<RefCell<Option<CardId>>>,
}

impl PointerCapture {
    pub fn new() -> Self {
        Self::default()
    }

    /// Route window pointer events to `id` until the guard is dropped
    pub fn acquire(&self, id: CardId) -> CaptureGuard {
        *self.owner.borrow_mut() = Some(id.clone());
        CaptureGuard {
            owner: Rc::clone(&self.owner),
            id,
        }
    }

    /// Card currently receiving window pointer events
    pub fn owner(&self) -> Option<CardId> {
        self.owner.borrow().clone()
    }

    #[cfg(test)]
    pub fn is_captured(&self) -> bool {
        self.owner.borrow().is_some()
    }
}

/// Held by a dragging card view; releases the capture on drop
#[derive(Debug)]
pub struct CaptureGuard {
    owner: Rc<RefCell<Option<CardId>>>,
    id: CardId,
}

impl Drop for CaptureGuard {
    fn drop(&mut self) {
        let mut owner = self.owner.borrow_mut();
        // A newer grab may have replaced ours
        if owner.as_ref() == Some(&self.id) {
            *owner = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;
    use std::time::Duration;

    #[test]
    fn test_capture_released_on_drop() {
        let capture = PointerCapture::new();
        let id = CardId::new("AAAAAA");

        let guard = capture.acquire(id.clone());
        assert_eq!(capture.owner(), Some(id));

        drop(guard);
        assert!(!capture.is_captured());
    }

    #[test]
    fn test_stale_guard_does_not_release_newer_grab() {
        let capture = PointerCapture::new();
        let first = capture.acquire(CardId::new("AAAAAA"));
        let _second = capture.acquire(CardId::new("BBBBBB"));

        drop(first);
        assert_eq!(capture.owner(), Some(CardId::new("BBBBBB")));
    }

    #[tokio::test(start_paused = true)]
    async fn test_task_guard_aborts_on_drop() {
        let finished = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&finished);

        let guard = TaskGuard::spawn(async move {
            tokio::time::sleep(Duration::from_millis(100)).await;
            flag.store(true, Ordering::SeqCst);
        });

        tokio::time::sleep(Duration::from_millis(10)).await;
        drop(guard);
        tokio::time::sleep(Duration::from_millis(200)).await;

        assert!(!finished.load(Ordering::SeqCst));
    }
}
