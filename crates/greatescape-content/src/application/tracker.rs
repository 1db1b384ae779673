//! Tracks in-flight generation requests.

use std::sync::{Arc, Mutex, PoisonError};

use tokio::sync::watch;

/// Counts generation requests in flight and publishes whether any are
/// running. The flag is true exactly while the count is non-zero.
#[derive(Debug)]
pub struct GenerationTracker {
    in_flight: Mutex<usize>,
    sender: watch::Sender<bool>,
}

impl Default for GenerationTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl GenerationTracker {
    /// Creates an idle tracker.
    #[must_use]
    pub fn new() -> Self {
        let (sender, _) = watch::channel(false);
        Self {
            in_flight: Mutex::new(0),
            sender,
        }
    }

    /// Marks a request as started. The returned guard marks it finished
    /// when dropped, including on early return or panic unwinding.
    #[must_use]
    pub fn begin(self: &Arc<Self>) -> GenerationGuard {
        self.adjust(1, 0);
        GenerationGuard {
            tracker: Arc::clone(self),
        }
    }

    /// Whether any request is in flight.
    #[must_use]
    pub fn is_generating(&self) -> bool {
        *self.sender.borrow()
    }

    /// Subscribes to changes of the generating flag.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<bool> {
        self.sender.subscribe()
    }

    fn adjust(&self, add: usize, sub: usize) {
        let mut count = self.in_flight.lock().unwrap_or_else(PoisonError::into_inner);
        *count = (*count + add).saturating_sub(sub);
        let generating = *count > 0;
        self.sender.send_if_modified(|current| {
            if *current == generating {
                false
            } else {
                *current = generating;
                true
            }
        });
    }
}

/// Marks one generation request as in flight for its lifetime.
#[derive(Debug)]
pub struct GenerationGuard {
    tracker: Arc<GenerationTracker>,
}

impl Drop for GenerationGuard {
    fn drop(&mut self) {
        self.tracker.adjust(0, 1);
    }
}
