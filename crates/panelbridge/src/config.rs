//! Profile resolution with CLI flag overrides.
//!
//! Core never sees profiles -- it receives a pre-built `BridgeConfig`.

use panelbridge_config::{self as config_file, Config, Profile};
use panelbridge_core::BridgeConfig;

use crate::cli::GlobalOpts;
use crate::error::CliError;

/// The profile name to use: `--profile`, then the config's
/// `default_profile`, then "default".
pub fn active_profile_name(global: &GlobalOpts, config: &Config) -> String {
    global
        .profile
        .clone()
        .or_else(|| config.default_profile.clone())
        .unwrap_or_else(|| "default".into())
}

/// Build a `BridgeConfig` from the config file, profile, and CLI overrides.
pub fn build_bridge_config(global: &GlobalOpts) -> Result<BridgeConfig, CliError> {
    let config = config_file::load_config_or_default();
    let profile_name = active_profile_name(global, &config);

    if let Some(profile) = config.profiles.get(&profile_name) {
        let mut overlay = Profile {
            host: global.host.clone().unwrap_or_else(|| profile.host.clone()),
            port: global.port.unwrap_or(profile.port),
            token: profile.token.clone(),
            token_env: profile.token_env.clone(),
            device_interval: profile.device_interval,
            config_interval: profile.config_interval,
            timeout: profile.timeout.or(Some(config.defaults.timeout)),
        };
        // An explicit --token beats every profile-level source.
        if let Some(ref token) = global.token {
            overlay.token = Some(token.clone());
            overlay.token_env = None;
        }
        return Ok(config_file::profile_to_bridge_config(
            &overlay,
            &profile_name,
        )?);
    }

    // The user asked for a profile that does not exist.
    if global.profile.is_some() {
        let mut available: Vec<&str> = config.profiles.keys().map(String::as_str).collect();
        available.sort_unstable();
        return Err(CliError::ProfileNotFound {
            name: profile_name,
            available: available.join(", "),
        });
    }

    // No profile -- build from CLI flags / env vars alone.
    let host = global.host.clone().ok_or_else(|| CliError::NoConfig {
        path: config_file::config_path().display().to_string(),
    })?;
    let mut profile = Profile {
        host,
        token: global.token.clone(),
        ..Profile::default()
    };
    if let Some(port) = global.port {
        profile.port = port;
    }
    Ok(config_file::profile_to_bridge_config(
        &profile,
        &profile_name,
    )?)
}
