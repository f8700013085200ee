//! Presence heartbeat: periodic timer, lifecycle adapter, event tracking.

mod events;
mod presence;
mod timer;


pub use events::{PresenceEvent, PresenceStatus, emit_presence_event, get_last_presence_event};
pub use presence::PresenceHeartbeat;
pub use timer::HeartbeatTimer;
