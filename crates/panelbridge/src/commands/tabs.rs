//! `panelbridge tabs` -- list, reload, and float tabs.

use panelbridge_api::Tab;
use panelbridge_core::PanelBridge;
use tabled::Tabled;

use crate::cli::{GlobalOpts, TabsAction, TabsArgs};
use crate::error::CliError;
use crate::output;

#[derive(Tabled)]
struct TabRow {
    #[tabled(rename = "INDEX")]
    index: usize,
    #[tabled(rename = "TITLE")]
    title: String,
}

pub async fn handle(
    bridge: &PanelBridge,
    args: TabsArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.action {
        TabsAction::List => {
            let tabs: Vec<Tab> = bridge
                .client()
                .get_config()
                .await?
                .map_or_else(Vec::new, |c| c.tabs);
            let indexed: Vec<(usize, Tab)> = tabs.into_iter().enumerate().collect();
            let rendered = output::render_list(
                &global.output,
                &indexed,
                |(index, tab)| TabRow {
                    index: *index,
                    title: tab.title.clone().unwrap_or_else(|| "(untitled)".into()),
                },
                |(_, tab)| tab.title.clone().unwrap_or_default(),
            );
            output::print_output(&rendered, global.quiet);
        }
        TabsAction::Reload { index } => {
            bridge.client().reload_tab(index).await?;
            output::print_output(&format!("reloaded tab {index}"), global.quiet);
        }
        TabsAction::Float { index } => {
            bridge.client().float_tab(index).await?;
            output::print_output(&format!("floated tab {index}"), global.quiet);
        }
    }
    Ok(())
}
