//! Presence event tracking for UI status display

use serde::Serialize;
use std::sync::RwLock;

/// Outcome of one heartbeat tick
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum PresenceStatus {
    /// Tick fired and the presence report was sent
    Sent,
    /// Tick fired but was dropped (user not authenticated at tick time)
    Skipped,
    /// Report was attempted and failed
    Failed,
}

/// A presence event for tracking/display
#[derive(Debug, Clone, Serialize)]
pub struct PresenceEvent {
    /// Timestamp in milliseconds
    pub ts: u64,
    /// Outcome of the tick
    pub status: PresenceStatus,
    /// Reason for skip/failure
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

/// Global state for last presence event
static LAST_PRESENCE: RwLock<Option<PresenceEvent>> = RwLock::new(None);

/// Emit a presence event (stores it for later retrieval)
pub fn emit_presence_event(event: PresenceEvent) {
    if let Ok(mut guard) = LAST_PRESENCE.write() {
        *guard = Some(event);
    }
}

/// Get the last presence event
pub fn get_last_presence_event() -> Option<PresenceEvent> {
    LAST_PRESENCE.read().ok().and_then(|guard| guard.clone())
}

/// Helper to get current timestamp in milliseconds
pub fn now_ms() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}
