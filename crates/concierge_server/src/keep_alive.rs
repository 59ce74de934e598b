//! Self-ping loop.
//!
//! Issues a GET to the bot's own public liveness URL on a fixed interval so
//! the hosting platform does not suspend the service. Failures are logged and
//! the loop carries on.

use concierge_error::{HttpError, HttpErrorKind};
use std::time::Duration;
use tracing::{error, info, instrument};

/// Periodic GET against the public liveness URL.
#[derive(Debug, Clone)]
pub struct KeepAlive {
    client: reqwest::Client,
    url: String,
    interval: Duration,
}

impl KeepAlive {
    /// Create a pinger for `url`.
    pub fn new(url: impl Into<String>, interval: Duration) -> Self {
        Self {
            client: reqwest::Client::new(),
            url: url.into(),
            interval,
        }
    }

    /// The pinged URL.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Ping once and return the response status code.
    ///
    /// # Errors
    ///
    /// Returns error if the request could not be completed.
    #[instrument(skip(self), fields(url = %self.url))]
    pub async fn ping(&self) -> Result<u16, HttpError> {
        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| {
                HttpError::new(HttpErrorKind::Ping {
                    url: self.url.clone(),
                    reason: e.to_string(),
                })
            })?;
        Ok(response.status().as_u16())
    }

    /// Ping forever, sleeping `interval` after each attempt.
    pub async fn run(self) {
        loop {
            match self.ping().await {
                Ok(status) => info!(status, "Pinged liveness URL"),
                Err(e) => error!(error = %e, "Failed to ping liveness URL"),
            }
            tokio::time::sleep(self.interval).await;
        }
    }
}
