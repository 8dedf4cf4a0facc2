//! Core bridge logic for a kiosk panel: polling caches over the panel's
//! HTTP API, tab-to-button reconciliation, and entity façades consumers
//! expose to a host platform.

pub mod bridge;
pub mod config;
pub mod coordinator;
pub mod entity;
pub mod error;
pub mod reconciler;

pub use bridge::PanelBridge;
pub use config::BridgeConfig;
pub use coordinator::{Coordinator, FetchFn, ListenerHandle};
pub use entity::{
    BatterySensor, BrightnessNumber, CloseFloatingButton, ConfigFlag, ConfigFlagSensor,
    DisplaySwitch, Entity, EntitySink, RefreshButton, TabAction, TabButton,
};
pub use error::CoreError;
pub use reconciler::TabReconciler;
