//! User settings for the expense tracker
//!
//! Manages user preferences: the HTTP listen address, whether reports must
//! name a known category, and the categories created on first run.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::paths::ExpensePaths;
use crate::error::ExpenseError;

/// User settings for the expense tracker
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Address the HTTP API binds to
    #[serde(default = "default_server_host")]
    pub server_host: String,

    /// Port the HTTP API listens on
    #[serde(default = "default_server_port")]
    pub server_port: u16,

    /// Reject category reports for categories that are neither configured
    /// nor used by any expense
    #[serde(default)]
    pub strict_categories: bool,

    /// Categories written on initialization
    #[serde(default = "default_categories")]
    pub default_categories: Vec<String>,

    /// Directory of web front-end files served by the HTTP API at `/`
    #[serde(default)]
    pub static_dir: Option<PathBuf>,
}

fn default_schema_version() -> u32 {
    1
}

fn default_server_host() -> String {
    "127.0.0.1".to_string()
}

fn default_server_port() -> u16 {
    8080
}

fn default_categories() -> Vec<String> {
    ["Food", "Clothing", "Transport", "Rent", "Other"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            server_host: default_server_host(),
            server_port: default_server_port(),
            strict_categories: false,
            default_categories: default_categories(),
            static_dir: None,
        }
    }
}

impl Settings {
    /// Load settings from disk, or create default settings if file doesn't exist
    pub fn load_or_create(paths: &ExpensePaths) -> Result<Self, ExpenseError> {
        let settings_path = paths.settings_file();

        if settings_path.exists() {
            let contents = std::fs::read_to_string(&settings_path).map_err(|e| {
                ExpenseError::Io(format!("Failed to read settings file: {}", e))
            })?;

            let settings: Settings = serde_json::from_str(&contents).map_err(|e| {
                ExpenseError::Config(format!("Failed to parse settings file: {}", e))
            })?;

            Ok(settings)
        } else {
            // Don't save yet - let caller decide when to persist
            Ok(Settings::default())
        }
    }

    /// Save settings to disk
    pub fn save(&self, paths: &ExpensePaths) -> Result<(), ExpenseError> {
        paths.ensure_directories()?;

        let settings_path = paths.settings_file();
        let contents = serde_json::to_string_pretty(self).map_err(|e| {
            ExpenseError::Config(format!("Failed to serialize settings: {}", e))
        })?;

        std::fs::write(&settings_path, contents).map_err(|e| {
            ExpenseError::Io(format!("Failed to write settings file: {}", e))
        })?;

        Ok(())
    }

    /// Listen address in `host:port` form
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }
}
