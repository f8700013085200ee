//! HTTP presence reporter.
//!
//! POSTs `{"status": "active"|"idle"}` to the configured presence
//! endpoint, authenticating with a bearer token when one is configured.

use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::Serialize;
use tracing::debug;

use crate::config::HeartbeatConfig;
use crate::reporter::PresenceReporter;

/// Request body for the presence endpoint.
#[derive(Debug, Clone, Serialize)]
struct PresenceBody {
    status: &'static str,
}

impl PresenceBody {
    fn new(online: bool) -> Self {
        Self {
            status: if online { "active" } else { "idle" },
        }
    }
}

/// Reports presence over HTTP using the configured endpoint.
pub struct HttpReporter {
    config: HeartbeatConfig,
    client: reqwest::Client,
}

impl HttpReporter {
    pub fn new(config: HeartbeatConfig) -> Self {
        Self {
            config,
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl PresenceReporter for HttpReporter {
    async fn report_presence(&self, online: bool) -> Result<()> {
        let body = PresenceBody::new(online);

        let mut request = self
            .client
            .post(self.config.endpoint.trim_end_matches('/'))
            .json(&body);
        if let Some(token) = &self.config.token {
            request = request.bearer_auth(token);
        }

        request
            .send()
            .await
            .context("presence request failed")?
            .error_for_status()
            .context("presence endpoint returned error status")?;

        debug!(status = body.status, "presence reported");
        Ok(())
    }

    fn name(&self) -> &str {
        "http"
    }
}
