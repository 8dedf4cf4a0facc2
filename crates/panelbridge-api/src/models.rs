// Snapshot models for the two read endpoints.
//
// Each refresh replaces a snapshot wholesale -- there are no partial
// updates, so these types are plain immutable records. Unknown vendor
// fields are preserved via `#[serde(flatten)]` rather than dropped;
// the panel firmware adds keys between releases.

use serde::{Deserialize, Serialize};

/// Device status snapshot from `GET /api/device`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceStatus {
    #[serde(default)]
    pub battery_level: Option<i64>,

    #[serde(default)]
    pub brightness: Option<i64>,

    /// Everything else the firmware reports (screen state, IP, uptime…).
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Full app configuration snapshot from `GET /api/config`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PanelConfig {
    #[serde(default)]
    pub kiosk_mode: Option<bool>,

    #[serde(default)]
    pub fullscreen: Option<bool>,

    #[serde(default)]
    pub reload_on_tab_reselect: Option<bool>,

    #[serde(default)]
    pub reload_on_swipe: Option<bool>,

    #[serde(default)]
    pub reload_on_wakeup: Option<bool>,

    #[serde(default)]
    pub run_on_reboot: Option<bool>,

    #[serde(default)]
    pub device_admin_lock: Option<bool>,

    #[serde(default)]
    pub tabs_swipable: Option<bool>,

    /// Configured display brightness (0-100), distinct from the live
    /// value reported by `/device`.
    #[serde(default)]
    pub brightness: Option<i64>,

    #[serde(default)]
    pub floating_view: Option<FloatingView>,

    #[serde(default)]
    pub pin_protection: Option<PinProtection>,

    /// Ordered tab list. Position within this sequence is the tab's
    /// identity as far as the bridge is concerned.
    #[serde(default)]
    pub tabs: Vec<Tab>,

    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl PanelConfig {
    pub fn floating_view_enabled(&self) -> Option<bool> {
        self.floating_view.as_ref().and_then(|f| f.enabled)
    }

    pub fn pin_protection_enabled(&self) -> Option<bool> {
        self.pin_protection.as_ref().and_then(|p| p.enabled)
    }
}

/// The floating (picture-in-picture) view settings block.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FloatingView {
    #[serde(default)]
    pub enabled: Option<bool>,

    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// The PIN protection settings block.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PinProtection {
    #[serde(default)]
    pub enabled: Option<bool>,

    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// One browser tab as reported in the config's `tabs` sequence.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tab {
    #[serde(default)]
    pub title: Option<String>,

    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}
