//! Command dispatch: bridges CLI args -> panel operations -> output.

pub mod config_cmd;
pub mod display;
pub mod floating;
pub mod profile_cmd;
pub mod status;
pub mod tabs;
pub mod watch;

use panelbridge_core::PanelBridge;

use crate::cli::{Command, GlobalOpts};
use crate::error::CliError;

/// Dispatch a panel-bound command to the appropriate handler.
pub async fn dispatch(
    cmd: Command,
    bridge: &PanelBridge,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match cmd {
        Command::Status => status::handle(bridge, global).await,
        Command::Config => config_cmd::handle(bridge, global).await,
        Command::Display(args) => display::handle(bridge, args, global).await,
        Command::Tabs(args) => tabs::handle(bridge, args, global).await,
        Command::Floating(args) => floating::handle(bridge, args, global).await,
        Command::Watch => watch::handle(bridge, global).await,
        // Profile is handled before dispatch
        Command::Profile(_) => unreachable!(),
    }
}
