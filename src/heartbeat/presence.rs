//! Presence lifecycle adapter.
//!
//! Binds the heartbeat timer to two externally observed booleans: the
//! host lifecycle ("app is foregrounded") and the authenticated flag.
//! The timer runs exactly while both are true; each tick re-checks the
//! authenticated flag before issuing the fire-and-forget presence
//! report, because the account state may have changed since the timer
//! was armed.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::heartbeat::events::{PresenceEvent, PresenceStatus, emit_presence_event, now_ms};
use crate::heartbeat::timer::HeartbeatTimer;
use crate::lifecycle::LifecycleState;
use crate::reporter::PresenceReporter;

/// Mounted driver task handle.
struct Driver {
    cancel: CancellationToken,
    handle: JoinHandle<()>,
}

/// Keeps the user's online status fresh on the server.
///
/// Unmounted until [`mount`](Self::mount) is called; while mounted, a
/// driver task watches lifecycle and auth changes and drives the timer.
/// One instance serves one account: a multi-account host creates one
/// adapter per account, each with that account's own auth watch and
/// reporter.
pub struct PresenceHeartbeat {
    reporter: Arc<dyn PresenceReporter>,
    lifecycle: watch::Receiver<LifecycleState>,
    auth: watch::Receiver<bool>,
    period: Duration,
    driver: Option<Driver>,
}

fn should_run(lifecycle: &watch::Receiver<LifecycleState>, auth: &watch::Receiver<bool>) -> bool {
    lifecycle.borrow().is_active() && *auth.borrow()
}

/// Build the per-tick callback: re-check auth at tick time, then spawn
/// the fire-and-forget report.
fn tick_callback(
    auth: watch::Receiver<bool>,
    reporter: Arc<dyn PresenceReporter>,
) -> impl Fn() + Send + Sync + 'static {
    move || {
        if !*auth.borrow() {
            debug!("presence tick dropped, not authenticated");
            emit_presence_event(PresenceEvent {
                ts: now_ms(),
                status: PresenceStatus::Skipped,
                reason: Some("unauthenticated".to_string()),
            });
            return;
        }

        let reporter = reporter.clone();
        tokio::spawn(async move {
            match reporter.report_presence(true).await {
                Ok(()) => emit_presence_event(PresenceEvent {
                    ts: now_ms(),
                    status: PresenceStatus::Sent,
                    reason: None,
                }),
                Err(e) => {
                    warn!(reporter = reporter.name(), "presence report failed: {e:#}");
                    emit_presence_event(PresenceEvent {
                        ts: now_ms(),
                        status: PresenceStatus::Failed,
                        reason: Some(e.to_string()),
                    });
                }
            }
        });
    }
}

impl PresenceHeartbeat {
    pub fn new(
        reporter: Arc<dyn PresenceReporter>,
        lifecycle: watch::Receiver<LifecycleState>,
        auth: watch::Receiver<bool>,
        period: Duration,
    ) -> Self {
        Self {
            reporter,
            lifecycle,
            auth,
            period,
            driver: None,
        }
    }

    /// Subscribe to lifecycle/auth changes and start driving the timer.
    ///
    /// Applies the derived state once immediately, so mounting while the
    /// app is already foregrounded and authenticated arms the timer
    /// without waiting for the next transition. No-op if already mounted.
    pub fn mount(&mut self) {
        if self.driver.is_some() {
            return;
        }

        let mut timer = HeartbeatTimer::new(
            tick_callback(self.auth.clone(), self.reporter.clone()),
            self.period,
        );
        let mut lifecycle = self.lifecycle.clone();
        let mut auth = self.auth.clone();

        let cancel = CancellationToken::new();
        let task_cancel = cancel.clone();

        let handle = tokio::spawn(async move {
            timer.to_state(should_run(&lifecycle, &auth));

            loop {
                tokio::select! {
                    biased;
                    _ = task_cancel.cancelled() => break,
                    res = lifecycle.changed() => {
                        // A closed channel means the publisher is gone;
                        // treat it like unmount.
                        if res.is_err() {
                            break;
                        }
                    }
                    res = auth.changed() => {
                        if res.is_err() {
                            break;
                        }
                    }
                }
                timer.to_state(should_run(&lifecycle, &auth));
            }

            // Unconditional stop, regardless of current running state.
            timer.stop();
        });

        self.driver = Some(Driver { cancel, handle });
        info!(period_ms = self.period.as_millis() as u64, "presence heartbeat mounted");
    }

    /// Unsubscribe and stop the timer.
    ///
    /// Waits for the driver to wind down, so no tick fires and no new
    /// report is issued after this returns. No-op if not mounted.
    pub async fn unmount(&mut self) {
        if let Some(driver) = self.driver.take() {
            driver.cancel.cancel();
            let _ = driver.handle.await;
            info!("presence heartbeat unmounted");
        }
    }

    pub fn is_mounted(&self) -> bool {
        self.driver.is_some()
    }
}

impl Drop for PresenceHeartbeat {
    fn drop(&mut self) {
        if let Some(driver) = self.driver.take() {
            driver.cancel.cancel();
        }
    }
}
