//! Host application lifecycle source.
//!
//! The host embedding (the mobile shell or desktop window) pushes
//! foreground/background transitions into a [`LifecycleSource`]; the
//! presence adapter subscribes and only cares whether the current state
//! is [`LifecycleState::Active`].

use serde::{Deserialize, Serialize};
use tokio::sync::watch;

/// Lifecycle state as reported by the host environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LifecycleState {
    /// App is foregrounded and receiving input.
    Active,
    /// App is transitioning (e.g. app switcher, incoming call overlay).
    Inactive,
    /// App is backgrounded.
    Background,
}

impl LifecycleState {
    /// Whether the app counts as foregrounded for presence purposes.
    pub fn is_active(self) -> bool {
        matches!(self, LifecycleState::Active)
    }
}

/// Publisher for lifecycle transitions, backed by a watch channel.
///
/// The host calls [`set_state`](Self::set_state) on every transition;
/// subscribers always see the current value and get woken on change.
pub struct LifecycleSource {
    tx: watch::Sender<LifecycleState>,
}

impl LifecycleSource {
    pub fn new(initial: LifecycleState) -> Self {
        let (tx, _rx) = watch::channel(initial);
        Self { tx }
    }

    /// Publish a lifecycle transition.
    pub fn set_state(&self, state: LifecycleState) {
        self.tx.send_replace(state);
    }

    /// Subscribe to lifecycle changes.
    pub fn subscribe(&self) -> watch::Receiver<LifecycleState> {
        self.tx.subscribe()
    }

    /// Current lifecycle state.
    pub fn current(&self) -> LifecycleState {
        *self.tx.borrow()
    }
}

impl Default for LifecycleSource {
    fn default() -> Self {
        Self::new(LifecycleState::Background)
    }
}
