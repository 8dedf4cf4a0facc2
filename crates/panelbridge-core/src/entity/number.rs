use std::sync::Arc;

use panelbridge_api::{PanelClient, PanelConfig};
use tracing::warn;

use crate::coordinator::Coordinator;
use crate::entity::Entity;
use crate::error::CoreError;

/// Display brightness as a settable number.
pub struct BrightnessNumber {
    client: Arc<PanelClient>,
    coordinator: Coordinator<PanelConfig>,
    unique_id: String,
}

impl BrightnessNumber {
    pub const MIN: i64 = 0;
    pub const MAX: i64 = 100;

    pub(crate) fn new(
        instance_id: &str,
        client: Arc<PanelClient>,
        coordinator: Coordinator<PanelConfig>,
    ) -> Self {
        Self {
            unique_id: format!("{instance_id}_brightness"),
            client,
            coordinator,
        }
    }

    /// Configured brightness from the config cache.
    #[must_use]
    pub fn value(&self) -> Option<i64> {
        self.coordinator.latest().and_then(|c| c.brightness)
    }

    /// Sets the panel brightness. Values outside 0-100 are rejected
    /// before any request is made. On success the config cache is
    /// refreshed so readers see the new value promptly; a failure of
    /// that follow-up refresh does not fail the set.
    pub async fn set(&self, value: i64) -> Result<(), CoreError> {
        let level = u8::try_from(value)
            .ok()
            .filter(|v| *v <= 100)
            .ok_or_else(|| CoreError::Validation {
                message: format!("brightness {value} out of range 0-100"),
            })?;
        self.client.set_brightness(level).await?;
        if let Err(e) = self.coordinator.refresh().await {
            warn!(error = %e, "config refresh after brightness change failed");
        }
        Ok(())
    }
}

impl Entity for BrightnessNumber {
    fn unique_id(&self) -> &str {
        &self.unique_id
    }

    fn name(&self) -> &str {
        "Brightness"
    }
}
