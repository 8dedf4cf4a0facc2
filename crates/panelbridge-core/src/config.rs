use std::time::Duration;

use secrecy::SecretString;

/// Default polling interval for the device status cache.
pub const DEFAULT_DEVICE_INTERVAL: Duration = Duration::from_secs(30);
/// Default polling interval for the panel configuration cache.
pub const DEFAULT_CONFIG_INTERVAL: Duration = Duration::from_secs(300);
/// Default request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Everything the bridge needs to talk to one panel.
#[derive(Debug, Clone)]
pub struct BridgeConfig {
    pub host: String,
    pub port: u16,
    pub token: SecretString,
    /// Stable identity prefix for every entity unique id this bridge emits.
    pub instance_id: String,
    pub device_interval: Duration,
    pub config_interval: Duration,
    pub timeout: Duration,
}

impl BridgeConfig {
    /// Config with default intervals and an instance id derived from the host.
    pub fn new(host: impl Into<String>, port: u16, token: SecretString) -> Self {
        let host = host.into();
        Self {
            instance_id: format!("panel_{host}"),
            host,
            port,
            token,
            device_interval: DEFAULT_DEVICE_INTERVAL,
            config_interval: DEFAULT_CONFIG_INTERVAL,
            timeout: DEFAULT_TIMEOUT,
        }
    }
}
