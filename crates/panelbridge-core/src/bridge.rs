//! Bridge lifecycle: construct the client and both caches, perform the
//! mandatory first refreshes, wire tab reconciliation, and keep the
//! caches fresh in the background until shutdown.

use std::sync::{Arc, Mutex};

use futures::FutureExt;
use panelbridge_api::{DeviceStatus, PanelClient, PanelConfig, TransportConfig};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use crate::config::BridgeConfig;
use crate::coordinator::Coordinator;
use crate::entity::{
    BatterySensor, BrightnessNumber, CloseFloatingButton, ConfigFlag, ConfigFlagSensor,
    DisplaySwitch, EntitySink, RefreshButton,
};
use crate::error::CoreError;
use crate::reconciler::TabReconciler;

/// Cheaply cloneable handle onto one bridged panel.
#[derive(Clone)]
pub struct PanelBridge {
    inner: Arc<BridgeInner>,
}

struct BridgeInner {
    config: BridgeConfig,
    client: Arc<PanelClient>,
    device: Coordinator<DeviceStatus>,
    panel_config: Coordinator<PanelConfig>,
    auth_required: watch::Sender<bool>,
    cancel: CancellationToken,
    tasks: Mutex<Vec<JoinHandle<()>>>,
}

impl PanelBridge {
    /// Builds the client and both coordinators. No requests are made
    /// until [`PanelBridge::start`].
    pub fn new(config: BridgeConfig) -> Result<Self, CoreError> {
        let transport = TransportConfig {
            timeout: config.timeout,
        };
        let client = Arc::new(PanelClient::new(
            &config.host,
            config.port,
            &config.token,
            &transport,
        )?);

        let device = Coordinator::new(
            "device_status",
            config.device_interval,
            Box::new({
                let client = Arc::clone(&client);
                move || {
                    let client = Arc::clone(&client);
                    async move { client.get_device().await }.boxed()
                }
            }),
        );
        let panel_config = Coordinator::new(
            "panel_config",
            config.config_interval,
            Box::new({
                let client = Arc::clone(&client);
                move || {
                    let client = Arc::clone(&client);
                    async move { client.get_config().await }.boxed()
                }
            }),
        );

        let (auth_required, _) = watch::channel(false);
        Ok(Self {
            inner: Arc::new(BridgeInner {
                config,
                client,
                device,
                panel_config,
                auth_required,
                cancel: CancellationToken::new(),
                tasks: Mutex::new(Vec::new()),
            }),
        })
    }

    /// Performs the mandatory first refresh of both caches, publishes
    /// buttons for the tabs present at startup, and spawns the periodic
    /// refresh tasks.
    ///
    /// Any first-refresh failure aborts setup; an authentication failure
    /// here means the token must be replaced before retrying.
    pub async fn start(&self, sink: Arc<dyn EntitySink>) -> Result<(), CoreError> {
        self.inner.device.refresh().await?;
        self.inner.panel_config.refresh().await?;

        let reconciler = Arc::new(TabReconciler::new(
            self.inner.config.instance_id.clone(),
            Arc::clone(&self.inner.client),
            self.inner.panel_config.clone(),
            sink,
        ));
        {
            let reconciler = Arc::clone(&reconciler);
            self.inner
                .panel_config
                .add_listener(move || reconciler.reconcile());
        }
        // Pick up the tabs from the snapshot we just fetched.
        reconciler.reconcile();

        let cancel = self.inner.cancel.child_token();
        let mut tasks = self.inner.tasks.lock().expect("task list lock poisoned");
        tasks.push(tokio::spawn(refresh_task(
            self.inner.device.clone(),
            cancel.clone(),
            self.inner.auth_required.clone(),
        )));
        tasks.push(tokio::spawn(refresh_task(
            self.inner.panel_config.clone(),
            cancel,
            self.inner.auth_required.clone(),
        )));

        info!(panel = %self.inner.config.host, "bridge started");
        Ok(())
    }

    /// Stops the refresh tasks and drops all listeners. Idempotent.
    pub async fn shutdown(&self) {
        self.inner.cancel.cancel();
        let tasks: Vec<JoinHandle<()>> = self
            .inner
            .tasks
            .lock()
            .expect("task list lock poisoned")
            .drain(..)
            .collect();
        for task in tasks {
            let _ = task.await;
        }
        self.inner.device.clear_listeners();
        self.inner.panel_config.clear_listeners();
        info!(panel = %self.inner.config.host, "bridge stopped");
    }

    #[must_use]
    pub fn client(&self) -> Arc<PanelClient> {
        Arc::clone(&self.inner.client)
    }

    #[must_use]
    pub fn device_coordinator(&self) -> Coordinator<DeviceStatus> {
        self.inner.device.clone()
    }

    #[must_use]
    pub fn config_coordinator(&self) -> Coordinator<PanelConfig> {
        self.inner.panel_config.clone()
    }

    /// Flips to `true` when a scheduled refresh is rejected by the panel
    /// as unauthenticated, and back to `false` once a refresh succeeds.
    #[must_use]
    pub fn auth_required(&self) -> watch::Receiver<bool> {
        self.inner.auth_required.subscribe()
    }

    // ── Entity façades ───────────────────────────────────────────────

    #[must_use]
    pub fn battery_sensor(&self) -> BatterySensor {
        BatterySensor::new(&self.inner.config.instance_id, self.inner.device.clone())
    }

    #[must_use]
    pub fn config_flag_sensors(&self) -> Vec<ConfigFlagSensor> {
        ConfigFlag::ALL
            .into_iter()
            .map(|flag| {
                ConfigFlagSensor::new(
                    &self.inner.config.instance_id,
                    self.inner.panel_config.clone(),
                    flag,
                )
            })
            .collect()
    }

    #[must_use]
    pub fn brightness_number(&self) -> BrightnessNumber {
        BrightnessNumber::new(
            &self.inner.config.instance_id,
            Arc::clone(&self.inner.client),
            self.inner.panel_config.clone(),
        )
    }

    #[must_use]
    pub fn display_switch(&self) -> DisplaySwitch {
        DisplaySwitch::new(
            &self.inner.config.instance_id,
            Arc::clone(&self.inner.client),
        )
    }

    #[must_use]
    pub fn close_floating_button(&self) -> CloseFloatingButton {
        CloseFloatingButton::new(
            &self.inner.config.instance_id,
            Arc::clone(&self.inner.client),
        )
    }

    #[must_use]
    pub fn refresh_device_button(&self) -> RefreshButton<DeviceStatus> {
        RefreshButton::new(
            &self.inner.config.instance_id,
            "get_device_info",
            "Get Device Info",
            self.inner.device.clone(),
        )
    }

    #[must_use]
    pub fn refresh_config_button(&self) -> RefreshButton<PanelConfig> {
        RefreshButton::new(
            &self.inner.config.instance_id,
            "get_config",
            "Get Config",
            self.inner.panel_config.clone(),
        )
    }
}

/// Periodic refresh loop for one cache. The first tick fires after a
/// full interval; manual refreshes never reset the schedule.
async fn refresh_task<T: Send + Sync + 'static>(
    coordinator: Coordinator<T>,
    cancel: CancellationToken,
    auth_required: watch::Sender<bool>,
) {
    let mut interval = tokio::time::interval(coordinator.interval());
    interval.tick().await;

    loop {
        tokio::select! {
            biased;
            () = cancel.cancelled() => break,
            _ = interval.tick() => {
                match coordinator.refresh().await {
                    Ok(()) => {
                        auth_required.send_if_modified(|flag| {
                            std::mem::replace(flag, false)
                        });
                    }
                    Err(e) => {
                        if e.is_auth() {
                            auth_required.send_replace(true);
                        }
                        warn!(
                            cache = coordinator.name(),
                            error = %e,
                            "scheduled refresh failed, keeping stale data",
                        );
                    }
                }
            }
        }
    }
}
