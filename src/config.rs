//! Configuration for the maintenance client.
//!
//! Configuration is stored in `.bantay/config.yaml` and includes:
//! - API base URL
//! - Bearer token for authenticated calls
//! - The signed-in account id
//!
//! Environment variables (`BANTAY_API_URL`, `BANTAY_API_TOKEN`,
//! `BANTAY_ACCOUNT_ID`) take precedence over the file.

use std::env;
use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::Result;

pub const CONFIG_DIR: &str = ".bantay";

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// API base URL (e.g. `https://ops.example.gov`)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,

    /// Signed-in account id
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account_id: Option<u64>,

    /// Authentication
    #[serde(default)]
    pub auth: AuthConfig,
}

/// Authentication configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AuthConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_token: Option<String>,
}

impl Config {
    /// Get the path to the config file
    pub fn config_path() -> PathBuf {
        PathBuf::from(CONFIG_DIR).join("config.yaml")
    }

    /// Load configuration from file, or return default if not found
    pub fn load() -> Result<Self> {
        let path = Self::config_path();
        if !path.exists() {
            return Ok(Config::default());
        }

        let content = fs::read_to_string(&path)?;
        let config: Config = serde_yaml_ng::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to file
    pub fn save(&self) -> Result<()> {
        let path = Self::config_path();

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let content = serde_yaml_ng::to_string(self)?;
        fs::write(&path, content)?;
        Ok(())
    }

    /// Get the API base URL from environment or config file
    pub fn base_url(&self) -> Option<String> {
        if let Ok(url) = env::var("BANTAY_API_URL")
            && !url.is_empty()
        {
            return Some(url);
        }

        self.base_url.clone()
    }

    /// Get the API token from environment or config file
    pub fn api_token(&self) -> Option<String> {
        if let Ok(token) = env::var("BANTAY_API_TOKEN")
            && !token.is_empty()
        {
            return Some(token);
        }

        self.auth.api_token.clone()
    }

    /// Get the signed-in account id from environment or config file
    pub fn account_id(&self) -> Option<u64> {
        if let Ok(raw) = env::var("BANTAY_ACCOUNT_ID")
            && let Ok(id) = raw.parse::<u64>()
        {
            return Some(id);
        }

        self.account_id
    }

    /// Set the API token
    pub fn set_api_token(&mut self, token: String) {
        self.auth.api_token = Some(token);
    }

    /// Set the base URL
    pub fn set_base_url(&mut self, url: String) {
        self.base_url = Some(url);
    }

    /// Set the signed-in account id
    pub fn set_account_id(&mut self, account_id: u64) {
        self.account_id = Some(account_id);
    }
}
