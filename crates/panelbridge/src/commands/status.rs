//! `panelbridge status` -- one-shot device status.

use owo_colors::OwoColorize;
use panelbridge_api::DeviceStatus;
use panelbridge_core::PanelBridge;

use crate::cli::GlobalOpts;
use crate::error::CliError;
use crate::output;

pub async fn handle(bridge: &PanelBridge, global: &GlobalOpts) -> Result<(), CliError> {
    let Some(status) = bridge.client().get_device().await? else {
        output::print_output("panel returned no device data", global.quiet);
        return Ok(());
    };

    let color = output::should_color(&global.color);
    let rendered = output::render_single(
        &global.output,
        &status,
        |s| detail(s, color),
        |s| {
            s.battery_level
                .map_or_else(|| "-".into(), |level| level.to_string())
        },
    );
    output::print_output(&rendered, global.quiet);
    Ok(())
}

fn detail(status: &DeviceStatus, color: bool) -> String {
    let mut lines = Vec::new();
    lines.push(field("Battery", status.battery_level, "%", color));
    lines.push(field("Brightness", status.brightness, "", color));
    lines.join("\n")
}

fn field(label: &str, value: Option<i64>, unit: &str, color: bool) -> String {
    let value = value.map_or_else(|| "unknown".into(), |v| format!("{v}{unit}"));
    if color {
        format!("{}: {value}", label.bold())
    } else {
        format!("{label}: {value}")
    }
}
