#![allow(clippy::unwrap_used)]
// Integration tests for `PanelClient` using wiremock.

use serde_json::json;
use url::Url;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use panelbridge_api::{Error, PanelClient, TransportConfig};

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup() -> (MockServer, PanelClient) {
    let server = MockServer::start().await;
    let base_url = Url::parse(&server.uri()).unwrap();
    let client = PanelClient::with_client(reqwest::Client::new(), &base_url).unwrap();
    (server, client)
}

/// Client built through the real constructor so the bearer header is set.
async fn setup_with_token(token: &str) -> (MockServer, PanelClient) {
    let server = MockServer::start().await;
    let url = Url::parse(&server.uri()).unwrap();
    let host = url.host_str().unwrap().to_owned();
    let port = url.port().unwrap();

    let secret: secrecy::SecretString = token.to_owned().into();
    let client = PanelClient::new(&host, port, &secret, &TransportConfig::default()).unwrap();
    (server, client)
}

// ── Read endpoints ──────────────────────────────────────────────────

#[tokio::test]
async fn get_device_parses_status() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/device"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "batteryLevel": 93,
            "brightness": 55,
            "screenOn": true
        })))
        .mount(&server)
        .await;

    let status = client.get_device().await.unwrap().unwrap();

    assert_eq!(status.battery_level, Some(93));
    assert_eq!(status.brightness, Some(55));
    assert_eq!(status.extra["screenOn"], json!(true));
}

#[tokio::test]
async fn get_config_parses_tabs() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/config"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "kioskMode": true,
            "floatingView": { "enabled": false },
            "tabs": [{ "title": "Home" }, { "title": "Energy" }]
        })))
        .mount(&server)
        .await;

    let config = client.get_config().await.unwrap().unwrap();

    assert_eq!(config.kiosk_mode, Some(true));
    assert_eq!(config.floating_view_enabled(), Some(false));
    assert_eq!(config.tabs.len(), 2);
    assert_eq!(config.tabs[0].title.as_deref(), Some("Home"));
}

#[tokio::test]
async fn bearer_token_sent_on_every_request() {
    let (server, client) = setup_with_token("sekrit-123").await;

    Mock::given(method("GET"))
        .and(path("/api/device"))
        .and(header("Authorization", "Bearer sekrit-123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "batteryLevel": 1 })))
        .expect(1)
        .mount(&server)
        .await;

    client.get_device().await.unwrap();
}

// ── The no-data quirk ───────────────────────────────────────────────

#[tokio::test]
async fn success_with_non_json_body_is_no_data() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/device"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-type", "text/html")
                .set_body_string("<html>busy</html>"),
        )
        .mount(&server)
        .await;

    let status = client.get_device().await.unwrap();
    assert!(status.is_none(), "non-JSON 200 must map to Ok(None)");
}

#[tokio::test]
async fn malformed_json_is_api_error() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/config"))
        .respond_with(
            // set_body_string would force the mime to text/plain, overriding
            // insert_header; set_body_raw keeps the JSON content-type.
            ResponseTemplate::new(200).set_body_raw("{not json", "application/json"),
        )
        .mount(&server)
        .await;

    let result = client.get_config().await;
    assert!(
        matches!(result, Err(Error::Api { .. })),
        "expected Api error, got: {result:?}"
    );
}

// ── Error mapping ───────────────────────────────────────────────────

#[tokio::test]
async fn http_401_maps_to_authentication() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/device"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let result = client.get_device().await;
    assert!(matches!(result, Err(ref e) if e.is_auth()), "got: {result:?}");
}

#[tokio::test]
async fn http_403_maps_to_authentication() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/display/on"))
        .respond_with(ResponseTemplate::new(403))
        .mount(&server)
        .await;

    let result = client.display_on().await;
    assert!(matches!(result, Err(ref e) if e.is_auth()), "got: {result:?}");
}

#[tokio::test]
async fn http_500_maps_to_api_error() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/device"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;

    let result = client.get_device().await;
    assert!(
        matches!(result, Err(Error::Api { status: Some(500), .. })),
        "got: {result:?}"
    );
}

// ── Command endpoints ───────────────────────────────────────────────

#[tokio::test]
async fn set_brightness_sends_value_query() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/display/brightness"))
        .and(query_param("value", "72"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    client.set_brightness(72).await.unwrap();
}

#[tokio::test]
async fn tab_commands_hit_indexed_paths() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/tabs/2/reload"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/tabs/0/float"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    client.reload_tab(2).await.unwrap();
    client.float_tab(0).await.unwrap();
}

#[tokio::test]
async fn close_floating_posts_to_floating_close() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/floating/close"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    client.close_floating().await.unwrap();
}
