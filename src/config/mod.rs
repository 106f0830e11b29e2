#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

use crate::core::referral::DEFAULT_SITE_URL;
use crate::core::{ConfigProvider, EnvironmentSignals};
use crate::utils::error::Result;
use crate::utils::validation::{validate_origin, validate_path, validate_socket_addr, Validate};
use serde::{Deserialize, Serialize};
use std::env;

pub use toml_config::TomlConfig;

pub const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:3000";
pub const DEFAULT_STORAGE_PATH: &str = "./.scribe/storage.json";

/// Only the exact string `"true"` turns a flag on.
pub fn parse_flag(value: Option<&str>) -> bool {
    value == Some("true")
}

impl EnvironmentSignals {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let flag = |key: &str| parse_flag(lookup(key).as_deref());

        Self {
            node_env: lookup("NODE_ENV").unwrap_or_default(),
            testing_mode_flag: flag("TESTING_MODE"),
            skip_payments_flag: flag("SKIP_PAYMENTS"),
            skip_order_creation_flag: flag("SKIP_ORDER_CREATION"),
            use_test_customers_flag: flag("USE_TEST_CUSTOMERS"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteConfig {
    pub site_url: String,
    pub bind_address: String,
    pub storage_path: String,
}

impl SiteConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let site_url = lookup("NEXT_PUBLIC_SITE_URL")
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| {
                tracing::debug!("NEXT_PUBLIC_SITE_URL not set, using default: {}", DEFAULT_SITE_URL);
                DEFAULT_SITE_URL.to_string()
            });

        Self {
            site_url: site_url.trim_end_matches('/').to_string(),
            bind_address: lookup("SCRIBE_BIND")
                .unwrap_or_else(|| DEFAULT_BIND_ADDRESS.to_string()),
            storage_path: lookup("SCRIBE_STORAGE_PATH")
                .unwrap_or_else(|| DEFAULT_STORAGE_PATH.to_string()),
        }
    }

    /// Environment defaults, overridden by whatever the TOML file sets.
    pub fn with_overrides(mut self, file: &TomlConfig) -> Self {
        if let Some(url) = &file.site.url {
            self.site_url = url.trim_end_matches('/').to_string();
        }
        if let Some(bind) = &file.server.bind_address {
            self.bind_address = bind.clone();
        }
        if let Some(path) = &file.storage.path {
            self.storage_path = path.clone();
        }
        self
    }

    /// Reads the environment, then layers the optional config file on top.
    pub fn load(config_path: Option<&str>) -> Result<Self> {
        let base = Self::from_env();
        let config = match config_path {
            Some(path) => {
                tracing::info!("Loading configuration from {}", path);
                base.with_overrides(&TomlConfig::from_file(path)?)
            }
            None => base,
        };
        config.validate()?;
        Ok(config)
    }
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}

impl ConfigProvider for SiteConfig {
    fn site_url(&self) -> &str {
        &self.site_url
    }

    fn bind_address(&self) -> &str {
        &self.bind_address
    }

    fn storage_path(&self) -> &str {
        &self.storage_path
    }
}

impl Validate for SiteConfig {
    fn validate(&self) -> Result<()> {
        validate_origin("site_url", &self.site_url)?;
        validate_socket_addr("bind_address", &self.bind_address)?;
        validate_path("storage_path", &self.storage_path)?;
        Ok(())
    }
}
