//! Dynamic tab-to-button reconciliation.
//!
//! Tabs are identified by their position in the panel's configured tab
//! list. Every reconcile pass diffs the latest config snapshot against
//! the set of indices already seen and publishes a Reload and a Float
//! button for each tab seen for the first time. The known set only ever
//! grows: buttons are never removed or renamed when tabs disappear or
//! change, so repeated passes over the same config are no-ops.

use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use panelbridge_api::{PanelClient, PanelConfig};
use tracing::debug;

use crate::coordinator::Coordinator;
use crate::entity::{EntitySink, TabAction, TabButton};

pub struct TabReconciler {
    instance_id: String,
    client: Arc<PanelClient>,
    coordinator: Coordinator<PanelConfig>,
    sink: Arc<dyn EntitySink>,
    known: Mutex<HashSet<usize>>,
}

impl TabReconciler {
    pub fn new(
        instance_id: String,
        client: Arc<PanelClient>,
        coordinator: Coordinator<PanelConfig>,
        sink: Arc<dyn EntitySink>,
    ) -> Self {
        Self {
            instance_id,
            client,
            coordinator,
            sink,
            known: Mutex::new(HashSet::new()),
        }
    }

    /// Runs one reconcile pass against the latest config snapshot.
    /// Does nothing when the cache holds no snapshot.
    pub fn reconcile(&self) {
        let Some(config) = self.coordinator.latest() else {
            return;
        };

        let mut new_buttons = Vec::new();
        {
            let mut known = self.known.lock().expect("known-tab lock poisoned");
            for (index, tab) in config.tabs.iter().enumerate() {
                if !known.insert(index) {
                    continue;
                }
                let title = tab
                    .title
                    .clone()
                    .unwrap_or_else(|| format!("Tab {index}"));
                debug!(index, title = %title, "publishing buttons for new tab");
                for action in [TabAction::Reload, TabAction::Float] {
                    new_buttons.push(TabButton::new(
                        &self.instance_id,
                        Arc::clone(&self.client),
                        action,
                        index,
                        &title,
                    ));
                }
            }
        }

        if !new_buttons.is_empty() {
            self.sink.add_tab_buttons(new_buttons);
        }
    }

    #[must_use]
    pub fn known_tab_count(&self) -> usize {
        self.known.lock().expect("known-tab lock poisoned").len()
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use std::sync::Mutex as StdMutex;
    use std::time::Duration;

    use futures::FutureExt;
    use panelbridge_api::{Tab, TransportConfig};
    use secrecy::SecretString;

    use super::*;
    use crate::entity::Entity;

    #[derive(Default)]
    struct RecordingSink {
        published: StdMutex<Vec<(String, String)>>,
    }

    impl EntitySink for RecordingSink {
        fn add_tab_buttons(&self, buttons: Vec<TabButton>) {
            let mut published = self.published.lock().unwrap();
            for button in buttons {
                published.push((button.name().to_owned(), button.unique_id().to_owned()));
            }
        }
    }

    fn tab(title: Option<&str>) -> Tab {
        Tab {
            title: title.map(str::to_owned),
            ..Default::default()
        }
    }

    fn config_with(tabs: Vec<Tab>) -> PanelConfig {
        PanelConfig {
            tabs,
            ..Default::default()
        }
    }

    struct Fixture {
        source: Arc<StdMutex<Option<PanelConfig>>>,
        coordinator: Coordinator<PanelConfig>,
        sink: Arc<RecordingSink>,
        reconciler: TabReconciler,
    }

    fn fixture(initial: Option<PanelConfig>) -> Fixture {
        let source = Arc::new(StdMutex::new(initial));
        let coordinator = Coordinator::new(
            "panel_config",
            Duration::from_secs(60),
            Box::new({
                let source = Arc::clone(&source);
                move || {
                    let source = Arc::clone(&source);
                    async move { Ok(source.lock().unwrap().clone()) }.boxed()
                }
            }),
        );
        // The client is never called; reconcile only constructs buttons.
        let client = Arc::new(
            PanelClient::new(
                "127.0.0.1",
                1,
                &SecretString::from("token"),
                &TransportConfig::default(),
            )
            .unwrap(),
        );
        let sink = Arc::new(RecordingSink::default());
        let reconciler = TabReconciler::new(
            "panel_t".to_owned(),
            client,
            coordinator.clone(),
            Arc::clone(&sink) as Arc<dyn EntitySink>,
        );
        Fixture {
            source,
            coordinator,
            sink,
            reconciler,
        }
    }

    #[tokio::test]
    async fn two_tabs_yield_four_buttons_in_order() {
        let f = fixture(Some(config_with(vec![tab(Some("A")), tab(Some("B"))])));
        f.coordinator.refresh().await.unwrap();

        f.reconciler.reconcile();

        let published = f.sink.published.lock().unwrap();
        let names: Vec<&str> = published.iter().map(|(n, _)| n.as_str()).collect();
        assert_eq!(names, vec!["Reload A", "Float A", "Reload B", "Float B"]);
        let ids: Vec<&str> = published.iter().map(|(_, id)| id.as_str()).collect();
        assert_eq!(
            ids,
            vec![
                "panel_t_reload_tab_0",
                "panel_t_float_tab_0",
                "panel_t_reload_tab_1",
                "panel_t_float_tab_1",
            ]
        );
    }

    #[tokio::test]
    async fn repeated_passes_are_idempotent() {
        let f = fixture(Some(config_with(vec![tab(Some("A"))])));
        f.coordinator.refresh().await.unwrap();

        f.reconciler.reconcile();
        f.reconciler.reconcile();
        f.reconciler.reconcile();

        assert_eq!(f.sink.published.lock().unwrap().len(), 2);
        assert_eq!(f.reconciler.known_tab_count(), 1);
    }

    #[tokio::test]
    async fn growth_publishes_only_the_new_tabs() {
        let f = fixture(Some(config_with(vec![tab(Some("A")), tab(Some("B"))])));
        f.coordinator.refresh().await.unwrap();
        f.reconciler.reconcile();

        *f.source.lock().unwrap() = Some(config_with(vec![
            tab(Some("A")),
            tab(Some("B")),
            tab(Some("C")),
        ]));
        f.coordinator.refresh().await.unwrap();
        f.reconciler.reconcile();

        let published = f.sink.published.lock().unwrap();
        assert_eq!(published.len(), 6);
        assert_eq!(published[4].0, "Reload C");
        assert_eq!(published[5].0, "Float C");
    }

    #[tokio::test]
    async fn shrink_and_rename_leave_known_buttons_alone() {
        let f = fixture(Some(config_with(vec![tab(Some("A")), tab(Some("B"))])));
        f.coordinator.refresh().await.unwrap();
        f.reconciler.reconcile();

        // Tab 1 removed, tab 0 renamed. Neither produces new buttons.
        *f.source.lock().unwrap() = Some(config_with(vec![tab(Some("Renamed"))]));
        f.coordinator.refresh().await.unwrap();
        f.reconciler.reconcile();

        assert_eq!(f.sink.published.lock().unwrap().len(), 4);
        assert_eq!(f.reconciler.known_tab_count(), 2);
    }

    #[tokio::test]
    async fn untitled_tabs_get_positional_names() {
        let f = fixture(Some(config_with(vec![tab(None), tab(Some("B"))])));
        f.coordinator.refresh().await.unwrap();

        f.reconciler.reconcile();

        let published = f.sink.published.lock().unwrap();
        assert_eq!(published[0].0, "Reload Tab 0");
        assert_eq!(published[1].0, "Float Tab 0");
    }

    #[tokio::test]
    async fn empty_cache_is_a_no_op() {
        let f = fixture(None);

        f.reconciler.reconcile();

        assert!(f.sink.published.lock().unwrap().is_empty());
        assert_eq!(f.reconciler.known_tab_count(), 0);
    }
}
