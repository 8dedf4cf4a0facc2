//! `panelbridge config` -- show the panel's app configuration.

use panelbridge_api::PanelConfig;
use panelbridge_core::PanelBridge;
use tabled::Tabled;

use crate::cli::GlobalOpts;
use crate::error::CliError;
use crate::output;

#[derive(Tabled)]
struct SettingRow {
    #[tabled(rename = "SETTING")]
    setting: String,
    #[tabled(rename = "STATE")]
    state: String,
}

pub async fn handle(bridge: &PanelBridge, global: &GlobalOpts) -> Result<(), CliError> {
    let Some(config) = bridge.client().get_config().await? else {
        output::print_output("panel returned no configuration", global.quiet);
        return Ok(());
    };

    let rendered = output::render_single(
        &global.output,
        &config,
        detail,
        |c| c.tabs.len().to_string(),
    );
    output::print_output(&rendered, global.quiet);
    Ok(())
}

fn detail(config: &PanelConfig) -> String {
    let settings = [
        ("kiosk mode", config.kiosk_mode),
        ("fullscreen", config.fullscreen),
        ("reload on tab reselect", config.reload_on_tab_reselect),
        ("reload on swipe", config.reload_on_swipe),
        ("reload on wakeup", config.reload_on_wakeup),
        ("run on reboot", config.run_on_reboot),
        ("device admin lock", config.device_admin_lock),
        ("tabs swipable", config.tabs_swipable),
        ("floating view", config.floating_view_enabled()),
        ("pin protection", config.pin_protection_enabled()),
    ];
    let rows: Vec<SettingRow> = settings
        .into_iter()
        .map(|(setting, state)| SettingRow {
            setting: setting.to_owned(),
            state: state.map_or_else(|| "unknown".into(), |on| on.to_string()),
        })
        .collect();

    let mut out = tabled::Table::new(&rows)
        .with(tabled::settings::Style::rounded())
        .to_string();

    if !config.tabs.is_empty() {
        let titles: Vec<String> = config
            .tabs
            .iter()
            .enumerate()
            .map(|(i, tab)| {
                format!("  {i}: {}", tab.title.as_deref().unwrap_or("(untitled)"))
            })
            .collect();
        out.push_str("\ntabs:\n");
        out.push_str(&titles.join("\n"));
    }
    out
}
