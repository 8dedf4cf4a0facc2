// panelbridge-api: async client for the panel's local HTTP control API

pub mod client;
pub mod error;
pub mod models;
pub mod transport;

pub use client::PanelClient;
pub use error::Error;
pub use models::{DeviceStatus, FloatingView, PanelConfig, PinProtection, Tab};
pub use transport::TransportConfig;
