use std::sync::Arc;

use panelbridge_api::PanelClient;

use crate::coordinator::Coordinator;
use crate::entity::Entity;
use crate::error::CoreError;

/// What a per-tab button does when pressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TabAction {
    Reload,
    Float,
}

/// A button bound to one tab position. Identity is positional: the
/// button keeps acting on its index even if the panel reorders or
/// renames tabs afterwards.
pub struct TabButton {
    client: Arc<PanelClient>,
    action: TabAction,
    index: usize,
    unique_id: String,
    name: String,
}

impl TabButton {
    pub(crate) fn new(
        instance_id: &str,
        client: Arc<PanelClient>,
        action: TabAction,
        index: usize,
        title: &str,
    ) -> Self {
        let (verb, suffix) = match action {
            TabAction::Reload => ("Reload", "reload_tab"),
            TabAction::Float => ("Float", "float_tab"),
        };
        Self {
            unique_id: format!("{instance_id}_{suffix}_{index}"),
            name: format!("{verb} {title}"),
            client,
            action,
            index,
        }
    }

    #[must_use]
    pub fn action(&self) -> TabAction {
        self.action
    }

    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }

    pub async fn press(&self) -> Result<(), CoreError> {
        match self.action {
            TabAction::Reload => self.client.reload_tab(self.index).await,
            TabAction::Float => self.client.float_tab(self.index).await,
        }
        .map_err(Into::into)
    }
}

impl Entity for TabButton {
    fn unique_id(&self) -> &str {
        &self.unique_id
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Closes the panel's floating (picture-in-picture) window.
pub struct CloseFloatingButton {
    client: Arc<PanelClient>,
    unique_id: String,
}

impl CloseFloatingButton {
    pub(crate) fn new(instance_id: &str, client: Arc<PanelClient>) -> Self {
        Self {
            unique_id: format!("{instance_id}_close_float"),
            client,
        }
    }

    pub async fn press(&self) -> Result<(), CoreError> {
        self.client.close_floating().await.map_err(Into::into)
    }
}

impl Entity for CloseFloatingButton {
    fn unique_id(&self) -> &str {
        &self.unique_id
    }

    fn name(&self) -> &str {
        "Close Floating View"
    }
}

/// Triggers an immediate refresh of one cache.
pub struct RefreshButton<T> {
    coordinator: Coordinator<T>,
    unique_id: String,
    name: &'static str,
}

impl<T: Send + Sync + 'static> RefreshButton<T> {
    pub(crate) fn new(
        instance_id: &str,
        suffix: &str,
        name: &'static str,
        coordinator: Coordinator<T>,
    ) -> Self {
        Self {
            unique_id: format!("{instance_id}_{suffix}"),
            coordinator,
            name,
        }
    }

    pub async fn press(&self) -> Result<(), CoreError> {
        self.coordinator.refresh().await
    }
}

impl<T> Entity for RefreshButton<T> {
    fn unique_id(&self) -> &str {
        &self.unique_id
    }

    fn name(&self) -> &str {
        self.name
    }
}
