use panelbridge_api::DeviceStatus;

use crate::coordinator::Coordinator;
use crate::entity::Entity;

/// Battery percentage reported by the panel device.
pub struct BatterySensor {
    coordinator: Coordinator<DeviceStatus>,
    unique_id: String,
}

impl BatterySensor {
    pub(crate) fn new(instance_id: &str, coordinator: Coordinator<DeviceStatus>) -> Self {
        Self {
            unique_id: format!("{instance_id}_battery"),
            coordinator,
        }
    }

    /// Current battery level, or `None` when the cache has never been
    /// populated or the panel did not report one.
    #[must_use]
    pub fn value(&self) -> Option<i64> {
        self.coordinator.latest().and_then(|s| s.battery_level)
    }
}

impl Entity for BatterySensor {
    fn unique_id(&self) -> &str {
        &self.unique_id
    }

    fn name(&self) -> &str {
        "Battery"
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    use futures::FutureExt;

    use super::*;

    fn coordinator_with(source: Arc<Mutex<Option<DeviceStatus>>>) -> Coordinator<DeviceStatus> {
        Coordinator::new(
            "device_status",
            Duration::from_secs(60),
            Box::new(move || {
                let source = Arc::clone(&source);
                async move { Ok(source.lock().unwrap().clone()) }.boxed()
            }),
        )
    }

    #[tokio::test]
    async fn reports_battery_level_from_snapshot() {
        let source = Arc::new(Mutex::new(Some(DeviceStatus {
            battery_level: Some(93),
            ..Default::default()
        })));
        let coordinator = coordinator_with(source);
        let sensor = BatterySensor::new("panel_10.0.0.5", coordinator.clone());

        assert_eq!(sensor.value(), None);
        coordinator.refresh().await.unwrap();
        assert_eq!(sensor.value(), Some(93));
        assert_eq!(sensor.unique_id(), "panel_10.0.0.5_battery");
    }
}
