// Hand-crafted async HTTP client for the panel's local control API.
//
// Base path: http://{host}:{port}/api/
// Auth: Bearer token in the Authorization header

use reqwest::StatusCode;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};
use secrecy::ExposeSecret;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};
use url::Url;

use crate::error::Error;
use crate::models::{DeviceStatus, PanelConfig};
use crate::transport::TransportConfig;

/// Async client for the panel's control/status API.
///
/// Read operations return `Ok(None)` when the panel answers HTTP 200
/// with a non-JSON payload -- a known firmware quirk that must not fail
/// a refresh cycle. Command operations expect an empty success response.
pub struct PanelClient {
    http: reqwest::Client,
    base_url: Url,
}

impl PanelClient {
    // ── Constructors ─────────────────────────────────────────────────

    /// Build a client for the panel at `host:port`, authenticating every
    /// request with the given API token.
    ///
    /// Injects `Authorization: Bearer …` as a sensitive default header.
    pub fn new(
        host: &str,
        port: u16,
        token: &secrecy::SecretString,
        transport: &TransportConfig,
    ) -> Result<Self, Error> {
        let mut headers = HeaderMap::new();
        let mut auth = HeaderValue::from_str(&format!("Bearer {}", token.expose_secret()))
            .map_err(|e| Error::Authentication {
                message: format!("invalid token header value: {e}"),
            })?;
        auth.set_sensitive(true);
        headers.insert(AUTHORIZATION, auth);

        let http = transport.build_client(headers)?;
        let base_url = Url::parse(&format!("http://{host}:{port}/api/"))?;

        Ok(Self { http, base_url })
    }

    /// Wrap an existing `reqwest::Client` (caller manages auth headers).
    ///
    /// `base_url` is the panel root (e.g. `http://10.0.0.5:8080`);
    /// the `/api/` segment is appended here.
    pub fn with_client(http: reqwest::Client, base_url: &Url) -> Result<Self, Error> {
        let root = base_url.as_str().trim_end_matches('/');
        let base_url = Url::parse(&format!("{root}/api/"))?;
        Ok(Self { http, base_url })
    }

    /// The resolved API base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    // ── URL builder ──────────────────────────────────────────────────

    /// Join a relative path (e.g. `"display/on"`) onto the base URL.
    fn url(&self, path: &str) -> Url {
        // base_url always ends with `/api/`, so joining relative paths works.
        self.base_url
            .join(path)
            .expect("path should be valid relative URL")
    }

    // ── HTTP verbs ───────────────────────────────────────────────────

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<Option<T>, Error> {
        let url = self.url(path);
        debug!("GET {url}");

        let resp = self.http.get(url.clone()).send().await?;
        Self::handle_json(&url, resp).await
    }

    async fn post(&self, path: &str, query: &[(&str, String)]) -> Result<(), Error> {
        let url = self.url(path);
        debug!("POST {url} query={query:?}");

        let mut req = self.http.post(url.clone());
        if !query.is_empty() {
            req = req.query(query);
        }
        let resp = req.send().await?;
        Self::handle_empty(&url, resp).await
    }

    // ── Response handling ────────────────────────────────────────────

    async fn handle_json<T: DeserializeOwned>(
        url: &Url,
        resp: reqwest::Response,
    ) -> Result<Option<T>, Error> {
        let status = resp.status();
        debug!(%status, "response from {url}");

        Self::check_status(url, &resp).await?;

        let content_type = resp
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("")
            .to_owned();
        let body = resp.text().await?;

        // The panel occasionally answers 200 OK with a text/html payload.
        // That is "no data", not a failure -- the caller keeps polling.
        if !content_type.starts_with("application/json") {
            warn!(
                "GET {url} returned HTTP 200 with content-type {content_type:?} instead of \
                 JSON; treating as no data (body: {:?})",
                preview(&body)
            );
            return Ok(None);
        }

        serde_json::from_str(&body).map(Some).map_err(|e| Error::Api {
            message: format!("malformed JSON payload: {e} (body preview: {:?})", preview(&body)),
            status: Some(status.as_u16()),
        })
    }

    async fn handle_empty(url: &Url, resp: reqwest::Response) -> Result<(), Error> {
        debug!(status = %resp.status(), "response from {url}");
        Self::check_status(url, &resp).await
    }

    /// Map 401/403 to `Authentication` and any other non-2xx to `Api`.
    async fn check_status(url: &Url, resp: &reqwest::Response) -> Result<(), Error> {
        let status = resp.status();

        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(Error::Authentication {
                message: format!("panel rejected credentials (HTTP {status}) at {url}"),
            });
        }

        if !status.is_success() {
            return Err(Error::Api {
                message: format!("HTTP {status} from {url}"),
                status: Some(status.as_u16()),
            });
        }

        Ok(())
    }

    // ━━ Public API ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

    // ── GET endpoints ────────────────────────────────────────────────

    /// Get device status (battery, live brightness, vendor fields).
    pub async fn get_device(&self) -> Result<Option<DeviceStatus>, Error> {
        self.get("device").await
    }

    /// Get the full app configuration, including the tab list.
    pub async fn get_config(&self) -> Result<Option<PanelConfig>, Error> {
        self.get("config").await
    }

    // ── POST endpoints (commands) ────────────────────────────────────

    /// Turn the display on.
    pub async fn display_on(&self) -> Result<(), Error> {
        self.post("display/on", &[]).await
    }

    /// Turn the display off.
    pub async fn display_off(&self) -> Result<(), Error> {
        self.post("display/off", &[]).await
    }

    /// Set display brightness. The panel accepts 0-100; range checking
    /// is the caller's responsibility (the number façade enforces it).
    pub async fn set_brightness(&self, value: u8) -> Result<(), Error> {
        self.post("display/brightness", &[("value", value.to_string())])
            .await
    }

    /// Close the floating (picture-in-picture) window.
    pub async fn close_floating(&self) -> Result<(), Error> {
        self.post("floating/close", &[]).await
    }

    /// Float a specific tab by its position in the config's tab list.
    pub async fn float_tab(&self, index: usize) -> Result<(), Error> {
        self.post(&format!("tabs/{index}/float"), &[]).await
    }

    /// Reload a specific tab by its position in the config's tab list.
    pub async fn reload_tab(&self, index: usize) -> Result<(), Error> {
        self.post(&format!("tabs/{index}/reload"), &[]).await
    }
}

/// Clamp a body to a short preview for log/error messages.
fn preview(body: &str) -> &str {
    body.get(..200).unwrap_or(body)
}
