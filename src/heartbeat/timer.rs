//! Restartable periodic heartbeat timer.
//!
//! Fires a caller-supplied callback on a fixed period while running.
//! Start and stop are idempotent; stop guarantees the callback does not
//! fire again after it returns.

use std::sync::Arc;
use std::time::Duration;

use tokio::time::{Instant, interval_at};
use tokio_util::sync::CancellationToken;
use tracing::debug;

/// Periodic timer with idempotent start/stop transitions.
///
/// While running, one spawned task owns the schedule; the first tick
/// fires after one full period, not immediately. Drift correction is
/// intentionally absent: the period is a plain wall-clock interval.
pub struct HeartbeatTimer {
    callback: Arc<dyn Fn() + Send + Sync>,
    period: Duration,
    cancel: Option<CancellationToken>,
}

impl HeartbeatTimer {
    /// Create a stopped timer. Does not schedule anything.
    pub fn new(callback: impl Fn() + Send + Sync + 'static, period: Duration) -> Self {
        Self {
            callback: Arc::new(callback),
            period,
            cancel: None,
        }
    }

    /// Start firing the callback every period. No-op if already running.
    pub fn start(&mut self) {
        if self.cancel.is_some() {
            return;
        }

        let token = CancellationToken::new();
        let task_token = token.clone();
        let callback = self.callback.clone();
        let period = self.period;

        tokio::spawn(async move {
            let mut ticks = interval_at(Instant::now() + period, period);
            loop {
                tokio::select! {
                    biased;
                    _ = task_token.cancelled() => break,
                    _ = ticks.tick() => (callback)(),
                }
            }
        });

        self.cancel = Some(token);
        debug!(period_ms = period.as_millis() as u64, "heartbeat timer started");
    }

    /// Cancel the schedule. No-op if not running.
    ///
    /// The cancellation branch of the timer task wins over a pending
    /// tick, so no callback fires after this returns.
    pub fn stop(&mut self) {
        if let Some(token) = self.cancel.take() {
            token.cancel();
            debug!("heartbeat timer stopped");
        }
    }

    /// Drive the timer to the given state: start if `active`, stop if not.
    /// Safe to call repeatedly with the same value.
    pub fn to_state(&mut self, active: bool) {
        if active {
            self.start();
        } else {
            self.stop();
        }
    }

    /// Whether the timer currently owns an active schedule.
    pub fn is_running(&self) -> bool {
        self.cancel.is_some()
    }
}

impl Drop for HeartbeatTimer {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    const PERIOD: Duration = Duration::from_millis(60_000);

    fn counting_timer() -> (HeartbeatTimer, Arc<AtomicU32>) {
        let ticks = Arc::new(AtomicU32::new(0));
        let ticks_clone = ticks.clone();
        let timer = HeartbeatTimer::new(
            move || {
                ticks_clone.fetch_add(1, Ordering::SeqCst);
            },
            PERIOD,
        );
        (timer, ticks)
    }

    /// Advance virtual time and let the timer task run.
    ///
    /// Yield first so a freshly spawned timer task registers its
    /// schedule before the clock moves.
    async fn advance(duration: Duration) {
        for _ in 0..5 {
            tokio::task::yield_now().await;
        }
        tokio::time::advance(duration).await;
        for _ in 0..5 {
            tokio::task::yield_now().await;
        }
    }

    #[tokio::test(start_paused = true)]
    async fn construction_does_not_fire() {
        let (_timer, ticks) = counting_timer();
        advance(PERIOD * 3).await;
        assert_eq!(ticks.load(Ordering::SeqCst), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn first_tick_after_one_full_period() {
        let (mut timer, ticks) = counting_timer();
        timer.start();

        advance(PERIOD - Duration::from_millis(1)).await;
        assert_eq!(ticks.load(Ordering::SeqCst), 0);

        advance(Duration::from_millis(1)).await;
        assert_eq!(ticks.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn fires_once_per_period() {
        let (mut timer, ticks) = counting_timer();
        timer.start();

        for expected in 1..=4 {
            advance(PERIOD).await;
            assert_eq!(ticks.load(Ordering::SeqCst), expected);
        }
    }

    #[tokio::test(start_paused = true)]
    async fn double_start_keeps_one_schedule() {
        let (mut timer, ticks) = counting_timer();
        timer.start();
        timer.start();

        advance(PERIOD).await;
        advance(PERIOD).await;
        advance(PERIOD).await;

        // N periods produce N ticks, not 2N
        assert_eq!(ticks.load(Ordering::SeqCst), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn stop_prevents_further_ticks() {
        let (mut timer, ticks) = counting_timer();
        timer.start();
        advance(PERIOD).await;
        assert_eq!(ticks.load(Ordering::SeqCst), 1);

        timer.stop();
        advance(PERIOD * 5).await;
        assert_eq!(ticks.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn double_stop_is_noop() {
        let (mut timer, ticks) = counting_timer();
        timer.start();
        timer.stop();
        timer.stop();

        advance(PERIOD * 3).await;
        assert_eq!(ticks.load(Ordering::SeqCst), 0);
        assert!(!timer.is_running());
    }

    #[tokio::test(start_paused = true)]
    async fn stop_when_never_started_is_noop() {
        let (mut timer, ticks) = counting_timer();
        timer.stop();
        advance(PERIOD).await;
        assert_eq!(ticks.load(Ordering::SeqCst), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn restart_schedules_fresh_period() {
        let (mut timer, ticks) = counting_timer();
        timer.start();
        advance(PERIOD).await;
        timer.stop();

        // Half a period passes while stopped.
        advance(PERIOD / 2).await;
        timer.start();

        // The new schedule counts from restart, so half a period in
        // nothing has fired yet.
        advance(PERIOD / 2).await;
        assert_eq!(ticks.load(Ordering::SeqCst), 1);

        advance(PERIOD / 2).await;
        assert_eq!(ticks.load(Ordering::SeqCst), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn to_state_is_idempotent() {
        let (mut timer, ticks) = counting_timer();
        timer.to_state(true);
        timer.to_state(true);
        timer.to_state(true);

        advance(PERIOD).await;
        advance(PERIOD).await;
        assert_eq!(ticks.load(Ordering::SeqCst), 2);

        timer.to_state(false);
        timer.to_state(false);
        advance(PERIOD * 4).await;
        assert_eq!(ticks.load(Ordering::SeqCst), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn is_running_tracks_transitions() {
        let (mut timer, _ticks) = counting_timer();
        assert!(!timer.is_running());
        timer.start();
        assert!(timer.is_running());
        timer.to_state(false);
        assert!(!timer.is_running());
    }

    #[tokio::test(start_paused = true)]
    async fn drop_cancels_schedule() {
        let (mut timer, ticks) = counting_timer();
        timer.start();
        drop(timer);

        advance(PERIOD * 3).await;
        assert_eq!(ticks.load(Ordering::SeqCst), 0);
    }
}
