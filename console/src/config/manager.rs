// File: console/src/config/manager.rs
use super::Config;
use crate::errors::ConfigError;
use anyhow::{anyhow, Result};
use std::sync::Arc;
use tokio::fs;
use tracing::{debug, info};

pub struct ConfigManager {
    current_config: Arc<Config>,
}

impl ConfigManager {
    pub async fn new(config_dir: String) -> Result<Self> {
        let config = Self::load_configuration(&config_dir).await?;
        Ok(Self {
            current_config: Arc::new(config),
        })
    }

    /// Wraps an already built configuration, validating it the same way
    pub fn from_config(config: Config) -> Result<Self> {
        Self::validate(&config)?;
        Ok(Self {
            current_config: Arc::new(config),
        })
    }

    pub fn get_current_config(&self) -> Arc<Config> {
        self.current_config.clone()
    }

    async fn load_configuration(config_dir: &str) -> Result<Config> {
        let main_config_path = format!("{}/main.toml", config_dir);
        debug!("Loading console config: {}", main_config_path);

        let main_config_content = fs::read_to_string(&main_config_path).await.map_err(|e| {
            anyhow!(ConfigError::LoadFailed {
                path: main_config_path.clone(),
                reason: e.to_string(),
            })
        })?;

        let config: Config = toml::from_str(&main_config_content).map_err(|e| {
            anyhow!(ConfigError::ParseError {
                reason: e.to_string(),
            })
        })?;

        Self::validate(&config)?;

        info!(
            "Configuration loaded: control plane {}, {} managed services",
            config.base_url,
            config.services.managed.len()
        );

        Ok(config)
    }

    fn validate(config: &Config) -> Result<()> {
        if config.base_url.trim().is_empty() {
            return Err(anyhow!(ConfigError::InvalidValue {
                field: "base_url".to_string(),
                reason: "must not be empty".to_string(),
            }));
        }

        let base_url = url::Url::parse(&config.base_url).map_err(|e| {
            anyhow!(ConfigError::InvalidValue {
                field: "base_url".to_string(),
                reason: e.to_string(),
            })
        })?;

        // Admin endpoints are absolute paths, so they replace any prefix here
        if base_url.path() != "/" {
            return Err(anyhow!(ConfigError::InvalidValue {
                field: "base_url".to_string(),
                reason: format!(
                    "must be an origin without a path, got '{}'",
                    base_url.path()
                ),
            }));
        }

        if config.notifications.display_seconds == 0 {
            return Err(anyhow!(ConfigError::InvalidValue {
                field: "notifications.display_seconds".to_string(),
                reason: "must be at least 1".to_string(),
            }));
        }

        if config.notifications.max_visible == Some(0) {
            return Err(anyhow!(ConfigError::InvalidValue {
                field: "notifications.max_visible".to_string(),
                reason: "must be at least 1 when set".to_string(),
            }));
        }

        if config.request_timeout_seconds == Some(0) {
            return Err(anyhow!(ConfigError::InvalidValue {
                field: "request_timeout_seconds".to_string(),
                reason: "must be at least 1 when set".to_string(),
            }));
        }

        Ok(())
    }
}
