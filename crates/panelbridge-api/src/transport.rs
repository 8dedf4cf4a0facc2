// Shared transport configuration for building reqwest::Client instances.
//
// The panel speaks plain HTTP on the local network, so there is no TLS
// or cookie handling here -- just the request timeout and the default
// header set (used to inject the bearer token).

use std::time::Duration;

use crate::error::Error;

/// Transport configuration for the panel client.
#[derive(Debug, Clone)]
pub struct TransportConfig {
    /// Applied to every request, connect + read combined.
    pub timeout: Duration,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(10),
        }
    }
}

impl TransportConfig {
    /// Build a `reqwest::Client` from this config with the given default
    /// headers (the panel client injects `Authorization` here).
    pub fn build_client(
        &self,
        headers: reqwest::header::HeaderMap,
    ) -> Result<reqwest::Client, Error> {
        reqwest::Client::builder()
            .timeout(self.timeout)
            .user_agent(concat!("panelbridge/", env!("CARGO_PKG_VERSION")))
            .default_headers(headers)
            .build()
            .map_err(|e| Error::Api {
                message: format!("failed to build HTTP client: {e}"),
                status: None,
            })
    }
}
