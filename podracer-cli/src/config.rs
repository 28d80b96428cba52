//! Configuration loading and parsing
//!
//! The CLI reads an optional TOML file with the server URL, lifecycle
//! timing, and display-name overrides. Every section is optional; an empty
//! file reproduces the stock client behavior.

use anyhow::{Context, Result};
use podracer_client::{NameTable, TimingConfig};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Main application configuration (loaded from a TOML file)
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub timing: TimingConfig,
    /// Display-name overrides, merged over the stock tables
    #[serde(default)]
    pub names: NameTable,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_server_url")]
    pub url: String,
}

fn default_server_url() -> String {
    "http://localhost:8000".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            url: default_server_url(),
        }
    }
}

impl AppConfig {
    /// The display-name table for this configuration: stock tables with the
    /// configured overrides on top
    pub fn name_table(&self) -> NameTable {
        let mut names = NameTable::new();
        names.merge(self.names.clone());
        names
    }
}

/// Load configuration from a TOML file
pub fn load_config(path: &Path) -> Result<AppConfig> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {:?}", path))?;

    let config: AppConfig = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {:?}", path))?;

    Ok(config)
}
