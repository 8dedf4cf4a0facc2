use thiserror::Error;

/// Errors surfaced by the bridge and its coordinators.
///
/// Cloneable so a single refresh outcome can be handed to every caller
/// that joined an in-flight refresh.
#[derive(Debug, Clone, Error)]
pub enum CoreError {
    /// The panel rejected our token. Setup must fail, or an established
    /// bridge must flag that reauthentication is needed.
    #[error("Authentication required: {message}")]
    AuthenticationRequired { message: String },

    /// Transport failure, non-success HTTP status, or an unparseable body.
    #[error("Panel API error: {message}")]
    Api {
        message: String,
        status: Option<u16>,
    },

    /// A caller-supplied value was rejected before any request was made.
    #[error("Validation failed: {message}")]
    Validation { message: String },

    /// The bridge could not be constructed from its configuration.
    #[error("Configuration error: {message}")]
    Config { message: String },
}

impl CoreError {
    /// True when the panel needs a fresh token before anything else will work.
    #[must_use]
    pub fn is_auth(&self) -> bool {
        matches!(self, Self::AuthenticationRequired { .. })
    }
}

impl From<panelbridge_api::Error> for CoreError {
    fn from(err: panelbridge_api::Error) -> Self {
        match err {
            panelbridge_api::Error::Authentication { message } => {
                Self::AuthenticationRequired { message }
            }
            panelbridge_api::Error::Api { message, status } => Self::Api { message, status },
            panelbridge_api::Error::InvalidUrl(e) => Self::Config {
                message: format!("invalid panel URL: {e}"),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn auth_errors_translate_to_auth_required() {
        let err = CoreError::from(panelbridge_api::Error::Authentication {
            message: "HTTP 401".to_owned(),
        });
        assert!(err.is_auth());
    }

    #[test]
    fn api_errors_keep_their_status() {
        let err = CoreError::from(panelbridge_api::Error::Api {
            message: "HTTP 500".to_owned(),
            status: Some(500),
        });
        assert!(!err.is_auth());
        assert!(matches!(err, CoreError::Api { status: Some(500), .. }));
    }
}
