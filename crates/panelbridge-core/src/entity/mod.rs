//! Entity façades over the panel caches and client.
//!
//! Each façade pairs a stable unique id with either a read-only view of a
//! coordinator snapshot or a command that hits the panel directly.

mod binary_sensor;
mod button;
mod number;
mod sensor;
mod switch;

pub use binary_sensor::{ConfigFlag, ConfigFlagSensor};
pub use button::{CloseFloatingButton, RefreshButton, TabAction, TabButton};
pub use number::BrightnessNumber;
pub use sensor::BatterySensor;
pub use switch::DisplaySwitch;

/// Common surface every façade exposes to the host platform.
pub trait Entity {
    /// Stable identity of the form `{instance}_{suffix}`.
    fn unique_id(&self) -> &str;
    /// Human-readable name.
    fn name(&self) -> &str;
}

/// Destination for entities created after startup. The bridge publishes
/// per-tab buttons here as tabs are discovered; implementors decide how
/// they reach the host platform.
pub trait EntitySink: Send + Sync {
    fn add_tab_buttons(&self, buttons: Vec<TabButton>);
}
