use panelbridge_api::PanelConfig;

use crate::coordinator::Coordinator;
use crate::entity::Entity;

/// The boolean panel settings surfaced as binary sensors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFlag {
    KioskMode,
    Fullscreen,
    ReloadOnTabReselect,
    ReloadOnSwipe,
    ReloadOnWakeup,
    RunOnReboot,
    DeviceAdminLock,
    TabsSwipable,
    FloatingViewEnabled,
    PinProtectionEnabled,
}

impl ConfigFlag {
    pub const ALL: [ConfigFlag; 10] = [
        ConfigFlag::KioskMode,
        ConfigFlag::Fullscreen,
        ConfigFlag::ReloadOnTabReselect,
        ConfigFlag::ReloadOnSwipe,
        ConfigFlag::ReloadOnWakeup,
        ConfigFlag::RunOnReboot,
        ConfigFlag::DeviceAdminLock,
        ConfigFlag::TabsSwipable,
        ConfigFlag::FloatingViewEnabled,
        ConfigFlag::PinProtectionEnabled,
    ];

    /// The key used in the entity unique id, matching the panel's own
    /// configuration field name.
    #[must_use]
    pub fn key(self) -> &'static str {
        match self {
            Self::KioskMode => "kioskMode",
            Self::Fullscreen => "fullscreen",
            Self::ReloadOnTabReselect => "reloadOnTabReselect",
            Self::ReloadOnSwipe => "reloadOnSwipe",
            Self::ReloadOnWakeup => "reloadOnWakeup",
            Self::RunOnReboot => "runOnReboot",
            Self::DeviceAdminLock => "deviceAdminLock",
            Self::TabsSwipable => "tabsSwipable",
            Self::FloatingViewEnabled => "floatingView_enabled",
            Self::PinProtectionEnabled => "pinProtection_enabled",
        }
    }

    #[must_use]
    pub fn display_name(self) -> &'static str {
        match self {
            Self::KioskMode => "Kiosk Mode",
            Self::Fullscreen => "Fullscreen",
            Self::ReloadOnTabReselect => "Reload on Tab Reselect",
            Self::ReloadOnSwipe => "Reload on Swipe",
            Self::ReloadOnWakeup => "Reload on Wakeup",
            Self::RunOnReboot => "Run on Reboot",
            Self::DeviceAdminLock => "Device Admin Lock",
            Self::TabsSwipable => "Tabs Swipable",
            Self::FloatingViewEnabled => "Floating View Enabled",
            Self::PinProtectionEnabled => "PIN Protection Enabled",
        }
    }

    fn read(self, config: &PanelConfig) -> Option<bool> {
        match self {
            Self::KioskMode => config.kiosk_mode,
            Self::Fullscreen => config.fullscreen,
            Self::ReloadOnTabReselect => config.reload_on_tab_reselect,
            Self::ReloadOnSwipe => config.reload_on_swipe,
            Self::ReloadOnWakeup => config.reload_on_wakeup,
            Self::RunOnReboot => config.run_on_reboot,
            Self::DeviceAdminLock => config.device_admin_lock,
            Self::TabsSwipable => config.tabs_swipable,
            Self::FloatingViewEnabled => config.floating_view_enabled(),
            Self::PinProtectionEnabled => config.pin_protection_enabled(),
        }
    }
}

/// Read-only view of one boolean panel setting.
pub struct ConfigFlagSensor {
    coordinator: Coordinator<PanelConfig>,
    flag: ConfigFlag,
    unique_id: String,
}

impl ConfigFlagSensor {
    pub(crate) fn new(
        instance_id: &str,
        coordinator: Coordinator<PanelConfig>,
        flag: ConfigFlag,
    ) -> Self {
        Self {
            unique_id: format!("{instance_id}_config_{}", flag.key()),
            coordinator,
            flag,
        }
    }

    #[must_use]
    pub fn flag(&self) -> ConfigFlag {
        self.flag
    }

    /// `None` when the cache is empty or the setting is absent from the
    /// panel's configuration.
    #[must_use]
    pub fn is_on(&self) -> Option<bool> {
        self.coordinator.latest().and_then(|c| self.flag.read(&c))
    }
}

impl Entity for ConfigFlagSensor {
    fn unique_id(&self) -> &str {
        &self.unique_id
    }

    fn name(&self) -> &str {
        self.flag.display_name()
    }
}
