//! chat-presence — presence heartbeat for a chat client
//!
//! This crate provides the component that keeps a user's online status
//! fresh on the server, including:
//! - Restartable periodic heartbeat timer with idempotent start/stop
//! - Lifecycle adapter binding the timer to foreground/auth state
//! - Presence reporter abstraction with HTTP and mock implementations
//! - Last-event tracking for UI status display

pub mod auth;
pub mod config;
pub mod heartbeat;
pub mod lifecycle;
pub mod reporter;

pub use config::HeartbeatConfig;
pub use heartbeat::{HeartbeatTimer, PresenceHeartbeat};
pub use lifecycle::{LifecycleSource, LifecycleState};
pub use reporter::PresenceReporter;
