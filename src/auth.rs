//! Authentication flag source.
//!
//! The surrounding app recomputes "does the current account have valid
//! credentials" whenever its account state changes and pushes the result
//! here. The presence adapter observes it both for gating the timer and
//! for the re-check at tick time.

use tokio::sync::watch;

/// Publisher for the authenticated flag, backed by a watch channel.
pub struct AuthWatch {
    tx: watch::Sender<bool>,
}

impl AuthWatch {
    pub fn new(authenticated: bool) -> Self {
        let (tx, _rx) = watch::channel(authenticated);
        Self { tx }
    }

    /// Push a recomputed authenticated flag.
    pub fn set_authenticated(&self, authenticated: bool) {
        self.tx.send_replace(authenticated);
    }

    /// Subscribe to flag changes.
    pub fn subscribe(&self) -> watch::Receiver<bool> {
        self.tx.subscribe()
    }

    /// Current flag value.
    pub fn is_authenticated(&self) -> bool {
        *self.tx.borrow()
    }
}

impl Default for AuthWatch {
    fn default() -> Self {
        Self::new(false)
    }
}
