//! `panelbridge profile` -- local profile management.

use panelbridge_config::{self as config_file, PairingInfo, Profile};
use tabled::Tabled;

use crate::cli::{GlobalOpts, ProfileAction, ProfileArgs};
use crate::error::CliError;
use crate::output;

#[derive(Tabled)]
struct ProfileRow {
    #[tabled(rename = "NAME")]
    name: String,
    #[tabled(rename = "HOST")]
    host: String,
    #[tabled(rename = "PORT")]
    port: u16,
}

pub fn handle(args: ProfileArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.action {
        ProfileAction::Pair { payload, name } => pair(&payload, name, global),
        ProfileAction::List => {
            list(global);
            Ok(())
        }
        ProfileAction::Path => {
            output::print_output(
                &config_file::config_path().display().to_string(),
                global.quiet,
            );
            Ok(())
        }
    }
}

fn pair(payload: &str, name: String, global: &GlobalOpts) -> Result<(), CliError> {
    // The QR payload is normally a bare query string; some firmware
    // versions embed the same keys in a URL.
    let pairing = if payload.contains("://") {
        PairingInfo::from_pairing_url(payload)?
    } else {
        PairingInfo::from_pairing_string(payload)?
    };

    let mut config = config_file::load_config_or_default();
    let host = pairing.host.clone();
    config.profiles.insert(name.clone(), Profile::from(pairing));
    if config.default_profile.is_none() {
        config.default_profile = Some(name.clone());
    }
    config_file::save_config(&config)?;

    output::print_output(
        &format!(
            "profile '{name}' paired with {host} (config: {})",
            config_file::config_path().display()
        ),
        global.quiet,
    );
    Ok(())
}

#[derive(serde::Serialize)]
struct ProfileSummary {
    name: String,
    host: String,
    port: u16,
}

fn list(global: &GlobalOpts) {
    let config = config_file::load_config_or_default();
    let mut summaries: Vec<ProfileSummary> = config
        .profiles
        .iter()
        .map(|(name, profile)| ProfileSummary {
            name: name.clone(),
            host: profile.host.clone(),
            port: profile.port,
        })
        .collect();
    summaries.sort_by(|a, b| a.name.cmp(&b.name));

    let rendered = output::render_list(
        &global.output,
        &summaries,
        |s| ProfileRow {
            name: s.name.clone(),
            host: s.host.clone(),
            port: s.port,
        },
        |s| s.name.clone(),
    );
    output::print_output(&rendered, global.quiet);
}
