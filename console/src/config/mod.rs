// File: console/src/config/mod.rs
pub mod manager;
use serde::{Deserialize, Serialize};
use std::time::Duration;
pub use manager::ConfigManager;

use crate::constants::{notifications, targets};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub base_url: String,
    /// Absent means no client-side timeout; the transport settles on its own.
    pub request_timeout_seconds: Option<u64>,
    #[serde(default)]
    pub notifications: NotificationConfig,
    #[serde(default)]
    pub services: ServicesConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationConfig {
    #[serde(default = "default_display_seconds")]
    pub display_seconds: u64,
    pub max_visible: Option<usize>,
}

fn default_display_seconds() -> u64 {
    notifications::DISPLAY_DURATION.as_secs()
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            display_seconds: default_display_seconds(),
            max_visible: None,
        }
    }
}

impl NotificationConfig {
    pub fn display_duration(&self) -> Duration {
        Duration::from_secs(self.display_seconds)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServicesConfig {
    #[serde(default = "default_managed_services")]
    pub managed: Vec<String>,
}

fn default_managed_services() -> Vec<String> {
    vec![targets::DHCP.to_string(), targets::TFTP.to_string()]
}

impl Default for ServicesConfig {
    fn default() -> Self {
        Self {
            managed: default_managed_services(),
        }
    }
}

impl Config {
    /// Configuration pointing at `base_url` with every other field defaulted
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            request_timeout_seconds: None,
            notifications: NotificationConfig::default(),
            services: ServicesConfig::default(),
        }
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_seconds.map(Duration::from_secs)
    }
}
