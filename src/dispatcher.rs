use anyhow::Result;
use reqwest::Client;

use std::sync::atomic::Ordering;
use std::time::Duration;

use crate::config::Config;
use crate::metrics::METRICS;
use crate::schema::Payload;

/// Timeout for the single webhook call.
pub const DISPATCH_TIMEOUT: Duration = Duration::from_secs(15);

/// ============================================================
/// WebhookDispatcher
/// ============================================================
///
/// Delivers the run's payload to the configured webhook.
///
/// Behavior:
/// - One POST, JSON body, 15s timeout
/// - No retry, no queue
/// - Reports success as a plain bool; the caller only logs it
///
/// DEMO MODE:
/// - No network call
/// - Payload is printed to stdout and counted as delivered
pub struct WebhookDispatcher {
    http: Client,
    url: Option<String>,
    demo: bool,
    debug: bool,
}

impl WebhookDispatcher {

    pub fn new(cfg: &Config, http: Client) -> Self {
        if cfg.demo() {
            log::warn!("WebhookDispatcher running in DEMO mode");
        }

        Self {
            http,
            url: cfg.credentials.webhook_url.clone(),
            demo: cfg.demo(),
            debug: cfg.debug_log(),
        }
    }

    /// Sends the payload once.
    ///
    /// RETURNS:
    /// - `true` on a 2xx response (or in demo mode)
    /// - `false` on missing URL, transport error, timeout or non-2xx
    ///
    /// This function never fails.
    pub async fn send(&self, payload: &Payload) -> bool {
        match self.try_send(payload).await {
            Ok(()) => {
                METRICS.dispatches_sent.fetch_add(1, Ordering::Relaxed);
                true
            }
            Err(e) => {
                METRICS.dispatch_errors.fetch_add(1, Ordering::Relaxed);
                log::warn!("Webhook dispatch failed: {:#}", e);
                false
            }
        }
    }

    async fn try_send(&self, payload: &Payload) -> Result<()> {
        if self.demo {
            println!("DEMO → {}", serde_json::to_string(payload)?);
            return Ok(());
        }

        let url = self
            .url
            .as_deref()
            .ok_or_else(|| anyhow::anyhow!("ZAPIER_WEBHOOK is not set"))?;

        if self.debug {
            log::info!("[webhook] SEND {}", serde_json::to_string(payload)?);
        }

        self.http
            .post(url)
            .json(payload)
            .timeout(DISPATCH_TIMEOUT)
            .send()
            .await?
            .error_for_status()?;

        Ok(())
    }
}
