//! `panelbridge display` -- display power and brightness.

use panelbridge_core::PanelBridge;

use crate::cli::{DisplayAction, DisplayArgs, GlobalOpts};
use crate::error::CliError;
use crate::output;

pub async fn handle(
    bridge: &PanelBridge,
    args: DisplayArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let message = match args.action {
        DisplayAction::On => {
            bridge.display_switch().turn_on().await?;
            "display on".to_owned()
        }
        DisplayAction::Off => {
            bridge.display_switch().turn_off().await?;
            "display off".to_owned()
        }
        DisplayAction::Brightness { value } => {
            bridge.brightness_number().set(value).await?;
            format!("brightness set to {value}")
        }
    };
    output::print_output(&message, global.quiet);
    Ok(())
}
