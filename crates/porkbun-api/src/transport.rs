// Transport configuration for building the shared reqwest::Client.
//
// The client makes exactly one attempt per call. No retry, no backoff,
// and no timeout unless one is configured here.

use std::time::Duration;

use crate::error::Error;

/// Fixed client identifier sent as `User-Agent` on every request.
pub const CLIENT_IDENTIFIER: &str = concat!("porkbun-api/", env!("CARGO_PKG_VERSION"));

/// Shared transport configuration for building HTTP clients.
#[derive(Debug, Clone, Default)]
pub struct TransportConfig {
    /// Whole-request timeout. `None` leaves reqwest's default (no timeout).
    pub timeout: Option<Duration>,
}

impl TransportConfig {
    /// Set a whole-request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Build a `reqwest::Client` from this config.
    pub fn build_client(&self) -> Result<reqwest::Client, Error> {
        let mut builder = reqwest::Client::builder().user_agent(CLIENT_IDENTIFIER);

        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }

        Ok(builder.build()?)
    }
}
