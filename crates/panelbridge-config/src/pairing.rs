//! Pairing-string parsing.
//!
//! The panel's settings screen shows a QR code whose payload is a plain
//! query string: `api_server=10.0.0.5&api_port=8080&api_token=xyz`.
//! Some firmware versions wrap the same keys in a full URL instead.

use secrecy::{ExposeSecret, SecretString};
use url::Url;

use crate::ConfigError;

/// Connection details captured from the panel's pairing screen.
#[derive(Debug, Clone)]
pub struct PairingInfo {
    pub host: String,
    pub port: u16,
    pub token: SecretString,
}

impl PairingInfo {
    pub fn new(host: impl Into<String>, port: u16, token: SecretString) -> Self {
        Self {
            host: host.into(),
            port,
            token,
        }
    }

    /// Parse the bare query-string payload. All three keys are required.
    pub fn from_pairing_string(raw: &str) -> Result<Self, ConfigError> {
        let mut host = None;
        let mut port = None;
        let mut token = None;
        for (key, value) in url::form_urlencoded::parse(raw.trim().as_bytes()) {
            match key.as_ref() {
                "api_server" => host = Some(value.into_owned()),
                "api_port" => port = Some(value.into_owned()),
                "api_token" => token = Some(value.into_owned()),
                _ => {}
            }
        }

        let host = host.filter(|h| !h.is_empty()).ok_or_else(|| missing("api_server"))?;
        let port = port.ok_or_else(|| missing("api_port"))?;
        let port: u16 = port.parse().map_err(|_| ConfigError::Validation {
            field: "api_port".into(),
            reason: format!("'{port}' is not a valid port"),
        })?;
        let token = token.filter(|t| !t.is_empty()).ok_or_else(|| missing("api_token"))?;

        Ok(Self::new(host, port, SecretString::from(token)))
    }

    /// Parse a pairing payload wrapped in a URL. The host and port come
    /// from the URL itself; the token from a `token` or `api_token`
    /// query parameter.
    pub fn from_pairing_url(raw: &str) -> Result<Self, ConfigError> {
        let url: Url = raw.trim().parse().map_err(|e| ConfigError::Validation {
            field: "pairing_url".into(),
            reason: format!("{e}"),
        })?;

        let host = url
            .host_str()
            .filter(|h| !h.is_empty())
            .ok_or_else(|| missing("host"))?
            .to_owned();
        let port = url.port().ok_or_else(|| missing("port"))?;
        let token = url
            .query_pairs()
            .find(|(key, _)| key == "token" || key == "api_token")
            .map(|(_, value)| value.into_owned())
            .filter(|t| !t.is_empty())
            .ok_or_else(|| missing("token"))?;

        Ok(Self::new(host, port, SecretString::from(token)))
    }

    /// Serialize back to the bare query-string form.
    #[must_use]
    pub fn to_pairing_string(&self) -> String {
        url::form_urlencoded::Serializer::new(String::new())
            .append_pair("api_server", &self.host)
            .append_pair("api_port", &self.port.to_string())
            .append_pair("api_token", self.token.expose_secret())
            .finish()
    }
}

fn missing(field: &str) -> ConfigError {
    ConfigError::Validation {
        field: field.into(),
        reason: "missing from pairing payload".into(),
    }
}
