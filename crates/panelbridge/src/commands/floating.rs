//! `panelbridge floating` -- floating view control.

use panelbridge_core::PanelBridge;

use crate::cli::{FloatingAction, FloatingArgs, GlobalOpts};
use crate::error::CliError;
use crate::output;

pub async fn handle(
    bridge: &PanelBridge,
    args: FloatingArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.action {
        FloatingAction::Close => {
            bridge.close_floating_button().press().await?;
            output::print_output("floating view closed", global.quiet);
        }
    }
    Ok(())
}
