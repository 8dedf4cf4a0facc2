use thiserror::Error;

/// Top-level error type for the `panelbridge-api` crate.
///
/// A deliberately closed taxonomy: credential rejection is the only
/// non-retryable failure, everything else on the wire collapses into
/// [`Error::Api`] and is retried by the caller's normal polling cadence.
/// A 200 response with a non-JSON payload is NOT an error -- the read
/// operations return `Ok(None)` for that case (see `PanelClient`).
#[derive(Debug, Error)]
pub enum Error {
    /// Credentials rejected by the panel (HTTP 401/403).
    /// Not retryable without user intervention.
    #[error("Authentication failed: {message}")]
    Authentication { message: String },

    /// Any other API failure: transport error, timeout, non-2xx status,
    /// or a malformed JSON payload.
    #[error("Panel API error: {message}")]
    Api {
        message: String,
        /// HTTP status code, if the failure came from a response.
        status: Option<u16>,
    },

    /// URL parsing error (bad host/port combination).
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

impl Error {
    /// Returns `true` if this error means the token was rejected and
    /// re-pairing might resolve it.
    pub fn is_auth(&self) -> bool {
        matches!(self, Self::Authentication { .. })
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Api {
                message: "request timed out".into(),
                status: None,
            }
        } else {
            Self::Api {
                status: err.status().map(|s| s.as_u16()),
                message: format!("transport error: {err}"),
            }
        }
    }
}
