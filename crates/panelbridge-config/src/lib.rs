//! Shared configuration for the panel bridge CLI.
//!
//! TOML profiles, token resolution (env + plaintext), pairing-string
//! parsing, and translation to `panelbridge_core::BridgeConfig`.

use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use panelbridge_core::BridgeConfig;

pub mod pairing;

pub use pairing::PairingInfo;

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("no token configured for profile '{profile}'")]
    NoToken { profile: String },

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── Poll intervals ──────────────────────────────────────────────────

/// How often each cache refreshes. The panel is a small tablet; the
/// floors keep misconfiguration from hammering it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollIntervals {
    pub device: Duration,
    pub config: Duration,
}

impl PollIntervals {
    pub const MIN_DEVICE: Duration = Duration::from_secs(5);
    pub const MIN_CONFIG: Duration = Duration::from_secs(60);

    pub fn new(device_secs: u64, config_secs: u64) -> Result<Self, ConfigError> {
        let intervals = Self {
            device: Duration::from_secs(device_secs),
            config: Duration::from_secs(config_secs),
        };
        if intervals.device < Self::MIN_DEVICE {
            return Err(ConfigError::Validation {
                field: "device_interval".into(),
                reason: format!("must be at least {}s", Self::MIN_DEVICE.as_secs()),
            });
        }
        if intervals.config < Self::MIN_CONFIG {
            return Err(ConfigError::Validation {
                field: "config_interval".into(),
                reason: format!("must be at least {}s", Self::MIN_CONFIG.as_secs()),
            });
        }
        Ok(intervals)
    }
}

impl Default for PollIntervals {
    fn default() -> Self {
        Self {
            device: panelbridge_core::config::DEFAULT_DEVICE_INTERVAL,
            config: panelbridge_core::config::DEFAULT_CONFIG_INTERVAL,
        }
    }
}

// ── TOML config structs ─────────────────────────────────────────────

/// Top-level TOML configuration.
#[derive(Debug, Deserialize, Serialize)]
pub struct Config {
    /// Default profile name.
    pub default_profile: Option<String>,

    /// Global defaults.
    #[serde(default)]
    pub defaults: Defaults,

    /// Named panel profiles.
    #[serde(default)]
    pub profiles: HashMap<String, Profile>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_profile: Some("default".into()),
            defaults: Defaults::default(),
            profiles: HashMap::new(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize)]
pub struct Defaults {
    #[serde(default = "default_output")]
    pub output: String,

    #[serde(default = "default_color")]
    pub color: String,

    #[serde(default = "default_timeout")]
    pub timeout: u64,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            output: default_output(),
            color: default_color(),
            timeout: default_timeout(),
        }
    }
}

fn default_output() -> String {
    "table".into()
}
fn default_color() -> String {
    "auto".into()
}
fn default_timeout() -> u64 {
    10
}

/// A named panel profile.
#[derive(Debug, Deserialize, Serialize)]
pub struct Profile {
    /// Panel host or IP (e.g., "10.0.0.5").
    pub host: String,

    /// Panel API port.
    #[serde(default = "default_port")]
    pub port: u16,

    /// API token (plaintext — prefer token_env).
    pub token: Option<String>,

    /// Environment variable name containing the API token.
    pub token_env: Option<String>,

    /// Device status poll interval override, in seconds.
    pub device_interval: Option<u64>,

    /// Panel config poll interval override, in seconds.
    pub config_interval: Option<u64>,

    /// Request timeout override, in seconds.
    pub timeout: Option<u64>,
}

fn default_port() -> u16 {
    8080
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            host: String::new(),
            port: default_port(),
            token: None,
            token_env: None,
            device_interval: None,
            config_interval: None,
            timeout: None,
        }
    }
}

impl From<PairingInfo> for Profile {
    fn from(pairing: PairingInfo) -> Self {
        use secrecy::ExposeSecret;
        Self {
            host: pairing.host,
            port: pairing.port,
            token: Some(pairing.token.expose_secret().to_owned()),
            ..Self::default()
        }
    }
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("com", "panelbridge", "panelbridge").map_or_else(
        || {
            let mut p = dirs_fallback();
            p.push("config.toml");
            p
        },
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

fn dirs_fallback() -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(".config");
    p.push("panelbridge");
    p
}

// ── Config loading ──────────────────────────────────────────────────

/// Load the full Config from file + environment.
pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(&config_path())
}

/// Load a Config from an explicit file path, still merging environment.
pub fn load_config_from(path: &std::path::Path) -> Result<Config, ConfigError> {
    let figment = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed("PANELBRIDGE_").split("_"));

    let config: Config = figment.extract()?;
    Ok(config)
}

/// Load config, returning a default if the file doesn't exist.
#[must_use]
pub fn load_config_or_default() -> Config {
    load_config().unwrap_or_default()
}

// ── Config saving ───────────────────────────────────────────────────

/// Serialize config to TOML and write to the canonical config path.
pub fn save_config(cfg: &Config) -> Result<(), ConfigError> {
    let path = config_path();
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let toml_str = toml::to_string_pretty(cfg)?;
    std::fs::write(&path, toml_str)?;
    Ok(())
}

// ── Token resolution ────────────────────────────────────────────────

/// Resolve the API token for a profile: named env var, then the
/// `PANELBRIDGE_TOKEN` env var, then plaintext in the config file.
pub fn resolve_token(profile: &Profile, profile_name: &str) -> Result<SecretString, ConfigError> {
    if let Some(ref env_name) = profile.token_env {
        if let Ok(val) = std::env::var(env_name) {
            return Ok(SecretString::from(val));
        }
    }

    if let Ok(val) = std::env::var("PANELBRIDGE_TOKEN") {
        return Ok(SecretString::from(val));
    }

    if let Some(ref token) = profile.token {
        return Ok(SecretString::from(token.clone()));
    }

    Err(ConfigError::NoToken {
        profile: profile_name.into(),
    })
}

// ── Profile → BridgeConfig ──────────────────────────────────────────

/// Build a `BridgeConfig` from a profile.
pub fn profile_to_bridge_config(
    profile: &Profile,
    profile_name: &str,
) -> Result<BridgeConfig, ConfigError> {
    if profile.host.is_empty() {
        return Err(ConfigError::Validation {
            field: "host".into(),
            reason: "must not be empty".into(),
        });
    }

    let token = resolve_token(profile, profile_name)?;
    let intervals = PollIntervals::new(
        profile
            .device_interval
            .unwrap_or(panelbridge_core::config::DEFAULT_DEVICE_INTERVAL.as_secs()),
        profile
            .config_interval
            .unwrap_or(panelbridge_core::config::DEFAULT_CONFIG_INTERVAL.as_secs()),
    )?;

    let mut config = BridgeConfig::new(profile.host.clone(), profile.port, token);
    config.device_interval = intervals.device;
    config.config_interval = intervals.config;
    if let Some(timeout) = profile.timeout {
        config.timeout = Duration::from_secs(timeout);
    }
    Ok(config)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use secrecy::ExposeSecret;

    use super::*;

    #[test]
    fn intervals_below_the_floor_are_rejected() {
        assert!(PollIntervals::new(5, 60).is_ok());
        assert!(matches!(
            PollIntervals::new(4, 300),
            Err(ConfigError::Validation { field, .. }) if field == "device_interval"
        ));
        assert!(matches!(
            PollIntervals::new(30, 59),
            Err(ConfigError::Validation { field, .. }) if field == "config_interval"
        ));
    }

    #[test]
    fn default_intervals_match_the_cache_defaults() {
        let intervals = PollIntervals::default();
        assert_eq!(intervals.device, Duration::from_secs(30));
        assert_eq!(intervals.config, Duration::from_secs(300));
    }

    #[test]
    fn profile_with_plaintext_token_resolves() {
        let profile = Profile {
            host: "10.0.0.5".into(),
            port: 8080,
            token: Some("xyz".into()),
            ..Profile::default()
        };
        let config = profile_to_bridge_config(&profile, "default").unwrap();
        assert_eq!(config.host, "10.0.0.5");
        assert_eq!(config.port, 8080);
        assert_eq!(config.instance_id, "panel_10.0.0.5");
    }

    #[test]
    fn profile_without_host_is_rejected() {
        let profile = Profile {
            token: Some("xyz".into()),
            ..Profile::default()
        };
        assert!(matches!(
            profile_to_bridge_config(&profile, "default"),
            Err(ConfigError::Validation { field, .. }) if field == "host"
        ));
    }

    #[test]
    fn profile_without_any_token_source_is_rejected() {
        figment::Jail::expect_with(|_jail| {
            let profile = Profile {
                host: "10.0.0.5".into(),
                ..Profile::default()
            };
            assert!(matches!(
                profile_to_bridge_config(&profile, "bedroom"),
                Err(ConfigError::NoToken { profile }) if profile == "bedroom"
            ));
            Ok(())
        });
    }

    #[test]
    fn token_env_takes_precedence_over_plaintext() {
        figment::Jail::expect_with(|jail| {
            jail.set_env("BEDROOM_PANEL_TOKEN", "from-env");
            let profile = Profile {
                host: "10.0.0.5".into(),
                token: Some("plaintext".into()),
                token_env: Some("BEDROOM_PANEL_TOKEN".into()),
                ..Profile::default()
            };
            let token = resolve_token(&profile, "bedroom").unwrap();
            assert_eq!(token.expose_secret(), "from-env");
            Ok(())
        });
    }

    #[test]
    fn toml_file_and_env_merge_into_profiles() {
        figment::Jail::expect_with(|jail| {
            jail.create_file(
                "config.toml",
                r#"
                default_profile = "bedroom"

                [profiles.bedroom]
                host = "10.0.0.5"
                token = "xyz"
                device_interval = 15
                "#,
            )?;
            let config = load_config_from(std::path::Path::new("config.toml")).unwrap();
            assert_eq!(config.default_profile.as_deref(), Some("bedroom"));
            let profile = &config.profiles["bedroom"];
            assert_eq!(profile.host, "10.0.0.5");
            assert_eq!(profile.port, 8080);
            assert_eq!(profile.device_interval, Some(15));
            Ok(())
        });
    }

    #[test]
    fn interval_overrides_flow_into_bridge_config() {
        let profile = Profile {
            host: "panel.local".into(),
            token: Some("xyz".into()),
            device_interval: Some(10),
            config_interval: Some(120),
            timeout: Some(5),
            ..Profile::default()
        };
        let config = profile_to_bridge_config(&profile, "default").unwrap();
        assert_eq!(config.device_interval, Duration::from_secs(10));
        assert_eq!(config.config_interval, Duration::from_secs(120));
        assert_eq!(config.timeout, Duration::from_secs(5));
    }
}
