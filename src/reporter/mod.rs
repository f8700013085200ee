//! Report-presence action: trait and implementations.
//!
//! The heartbeat treats reporting as fire-and-forget: a failed report is
//! logged and recorded, never fed back into timer state. Retry and backoff
//! belong to the transport behind the trait, not to this crate.

pub mod http;
pub mod mock;

use anyhow::Result;
use async_trait::async_trait;

pub use http::HttpReporter;
pub use mock::MockReporter;

/// Sends the user's presence status to the server.
#[async_trait]
pub trait PresenceReporter: Send + Sync {
    /// Report the user as online (`true`) or idle (`false`).
    async fn report_presence(&self, online: bool) -> Result<()>;

    /// Human-readable reporter name.
    fn name(&self) -> &str;
}
