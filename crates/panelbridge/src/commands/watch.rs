//! `panelbridge watch` -- run the full bridge until interrupted.
//!
//! Starts both caches, prints every entity as it is published, and
//! reports state changes as refreshes land. This is the closest the CLI
//! gets to how a host platform consumes the bridge.

use std::sync::Arc;

use panelbridge_core::{Entity, EntitySink, PanelBridge, TabButton};

use crate::cli::GlobalOpts;
use crate::error::CliError;
use crate::output;

struct PrintingSink {
    quiet: bool,
}

impl EntitySink for PrintingSink {
    fn add_tab_buttons(&self, buttons: Vec<TabButton>) {
        for button in &buttons {
            output::print_output(
                &format!("entity added: {} ({})", button.name(), button.unique_id()),
                self.quiet,
            );
        }
    }
}

pub async fn handle(bridge: &PanelBridge, global: &GlobalOpts) -> Result<(), CliError> {
    let sink = Arc::new(PrintingSink {
        quiet: global.quiet,
    });
    bridge.start(sink as Arc<dyn EntitySink>).await?;

    let quiet = global.quiet;
    {
        let sensor = bridge.battery_sensor();
        if let Some(level) = sensor.value() {
            output::print_output(&format!("battery: {level}%"), quiet);
        }
        bridge.device_coordinator().add_listener(move || {
            if let Some(level) = sensor.value() {
                output::print_output(&format!("battery: {level}%"), quiet);
            }
        });
    }
    {
        let coordinator = bridge.config_coordinator();
        let observer = coordinator.clone();
        coordinator.add_listener(move || {
            let tabs = observer.latest().map_or(0, |c| c.tabs.len());
            output::print_output(&format!("config refreshed ({tabs} tabs)"), quiet);
        });
    }

    let mut auth = bridge.auth_required();
    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => break,
            changed = auth.changed() => {
                if changed.is_err() {
                    break;
                }
                if *auth.borrow_and_update() {
                    eprintln!("panel rejected the token; reauthentication required");
                }
            }
        }
    }

    bridge.shutdown().await;
    output::print_output("bridge stopped", quiet);
    Ok(())
}
