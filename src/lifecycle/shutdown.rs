//! Shutdown coordination.

use tokio::sync::watch;

/// Single-fire shutdown signal shared by the server and tests.
///
/// Backed by a watch channel. A receiver created after `trigger` does not
/// wake from `changed()`, so consumers check `borrow()` first; an earlier
/// trigger stays visible there.
pub struct Shutdown {
    tx: watch::Sender<bool>,
}

impl Shutdown {
    /// Create a new shutdown coordinator.
    pub fn new() -> Self {
        let (tx, _) = watch::channel(false);
        Self { tx }
    }

    /// Subscribe to the shutdown signal.
    pub fn subscribe(&self) -> watch::Receiver<bool> {
        self.tx.subscribe()
    }

    /// Trigger the shutdown signal.
    pub fn trigger(&self) {
        let _ = self.tx.send(true);
    }
}

impl Default for Shutdown {
    fn default() -> Self {
        Self::new()
    }
}
