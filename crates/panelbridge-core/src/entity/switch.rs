use std::sync::Arc;

use panelbridge_api::PanelClient;

use crate::entity::Entity;
use crate::error::CoreError;

/// Display power as a switch.
///
/// The panel never reports whether the display is on, so this is an
/// assumed-state entity: its position reflects the last command sent,
/// not observed state.
pub struct DisplaySwitch {
    client: Arc<PanelClient>,
    unique_id: String,
}

impl DisplaySwitch {
    pub(crate) fn new(instance_id: &str, client: Arc<PanelClient>) -> Self {
        Self {
            unique_id: format!("{instance_id}_display_switch"),
            client,
        }
    }

    pub async fn turn_on(&self) -> Result<(), CoreError> {
        self.client.display_on().await.map_err(Into::into)
    }

    pub async fn turn_off(&self) -> Result<(), CoreError> {
        self.client.display_off().await.map_err(Into::into)
    }
}

impl Entity for DisplaySwitch {
    fn unique_id(&self) -> &str {
        &self.unique_id
    }

    fn name(&self) -> &str {
        "Display"
    }
}
