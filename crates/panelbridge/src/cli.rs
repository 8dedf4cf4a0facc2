//! Clap derive structures for the `panelbridge` CLI.
//!
//! Defines the complete command tree, global flags, and shared types.

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// panelbridge -- bridge kiosk panel tablets from the command line
#[derive(Debug, Parser)]
#[command(
    name = "panelbridge",
    version,
    about = "Inspect and control kiosk panel tablets over their HTTP API",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Panel profile to use
    #[arg(long, short = 'p', env = "PANELBRIDGE_PROFILE", global = true)]
    pub profile: Option<String>,

    /// Panel host or IP (overrides profile)
    #[arg(long, short = 'H', env = "PANELBRIDGE_HOST", global = true)]
    pub host: Option<String>,

    /// Panel API port (overrides profile)
    #[arg(long, short = 'P', env = "PANELBRIDGE_PORT", global = true)]
    pub port: Option<u16>,

    /// Panel API token
    #[arg(long, env = "PANELBRIDGE_TOKEN", global = true, hide_env = true)]
    pub token: Option<String>,

    /// Output format
    #[arg(
        long,
        short = 'o',
        env = "PANELBRIDGE_OUTPUT",
        default_value = "table",
        global = true
    )]
    pub output: OutputFormat,

    /// When to use color output
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorMode,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
    JsonCompact,
    Plain,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum ColorMode {
    Auto,
    Always,
    Never,
}

// ── Commands ─────────────────────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show device status (battery, brightness)
    Status,

    /// Show the panel's app configuration and tab list
    Config,

    /// Control the panel display
    Display(DisplayArgs),

    /// List and act on the panel's tabs
    Tabs(TabsArgs),

    /// Control the floating (picture-in-picture) view
    Floating(FloatingArgs),

    /// Run the bridge, printing entities and state changes until interrupted
    Watch,

    /// Manage local panel profiles
    Profile(ProfileArgs),
}

#[derive(Debug, Args)]
pub struct DisplayArgs {
    #[command(subcommand)]
    pub action: DisplayAction,
}

#[derive(Debug, Subcommand)]
pub enum DisplayAction {
    /// Turn the display on
    On,
    /// Turn the display off
    Off,
    /// Set display brightness (0-100)
    Brightness { value: i64 },
}

#[derive(Debug, Args)]
pub struct TabsArgs {
    #[command(subcommand)]
    pub action: TabsAction,
}

#[derive(Debug, Subcommand)]
pub enum TabsAction {
    /// List the configured tabs
    List,
    /// Reload the tab at the given position
    Reload { index: usize },
    /// Float the tab at the given position
    Float { index: usize },
}

#[derive(Debug, Args)]
pub struct FloatingArgs {
    #[command(subcommand)]
    pub action: FloatingAction,
}

#[derive(Debug, Subcommand)]
pub enum FloatingAction {
    /// Close the floating view
    Close,
}

#[derive(Debug, Args)]
pub struct ProfileArgs {
    #[command(subcommand)]
    pub action: ProfileAction,
}

#[derive(Debug, Subcommand)]
pub enum ProfileAction {
    /// Create a profile from a pairing string or pairing URL
    Pair {
        /// Payload from the panel's pairing QR code
        payload: String,

        /// Profile name to create
        #[arg(long, default_value = "default")]
        name: String,
    },
    /// List configured profiles
    List,
    /// Print the config file path
    Path,
}
