//! Mock presence reporter for testing.
//!
//! Records every `report_presence` call so tests can assert on call
//! counts and arguments, with an optional scripted failure mode to
//! exercise the fire-and-forget path.

use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

use anyhow::{Result, bail};
use async_trait::async_trait;

use crate::reporter::PresenceReporter;

/// Mock reporter that records calls instead of touching the network.
#[derive(Default)]
pub struct MockReporter {
    calls: Mutex<Vec<bool>>,
    fail: AtomicBool,
}

impl MockReporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// A reporter whose every call fails.
    pub fn failing() -> Self {
        let reporter = Self::new();
        reporter.fail.store(true, Ordering::SeqCst);
        reporter
    }

    /// Make subsequent calls fail (or succeed again).
    pub fn set_fail(&self, fail: bool) {
        self.fail.store(fail, Ordering::SeqCst);
    }

    /// All recorded `online` arguments, in call order.
    pub fn calls(&self) -> Vec<bool> {
        self.calls.lock().unwrap().clone()
    }

    /// Number of recorded calls.
    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl PresenceReporter for MockReporter {
    async fn report_presence(&self, online: bool) -> Result<()> {
        self.calls.lock().unwrap().push(online);
        if self.fail.load(Ordering::SeqCst) {
            bail!("mock reporter failure");
        }
        Ok(())
    }

    fn name(&self) -> &str {
        "mock"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn records_calls_in_order() {
        let reporter = MockReporter::new();
        reporter.report_presence(true).await.unwrap();
        reporter.report_presence(false).await.unwrap();
        reporter.report_presence(true).await.unwrap();

        assert_eq!(reporter.calls(), vec![true, false, true]);
        assert_eq!(reporter.call_count(), 3);
    }

    #[tokio::test]
    async fn failing_reporter_still_records() {
        let reporter = MockReporter::failing();
        assert!(reporter.report_presence(true).await.is_err());
        assert_eq!(reporter.call_count(), 1);
    }

    #[tokio::test]
    async fn set_fail_toggles_mode() {
        let reporter = MockReporter::new();
        assert!(reporter.report_presence(true).await.is_ok());

        reporter.set_fail(true);
        assert!(reporter.report_presence(true).await.is_err());

        reporter.set_fail(false);
        assert!(reporter.report_presence(true).await.is_ok());
    }
}
