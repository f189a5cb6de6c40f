//! Runtime configuration
//!
//! Read from a TOML file. Every key is optional:
//!
//! ```toml
//! removal_delay_ms = 1000
//! spin_duration_ms = 900
//! window_width = 900.0
//! window_height = 640.0
//! dark_theme = false
//! show_diagnostics = false
//! ```

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV: &str = "RECTPAINT_CONFIG";

/// Looked up in the working directory when `RECTPAINT_CONFIG` is unset.
pub const DEFAULT_CONFIG_FILE: &str = "rectpaint.toml";

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    /// Debounce window for batched removals.
    pub removal_delay_ms: u64,
    /// Length of the removal spin.
    pub spin_duration_ms: u64,
    pub window_width: f64,
    pub window_height: f64,
    /// Initial state of the dark theme toggle.
    pub dark_theme: bool,
    /// Initial state of the diagnostics toggle.
    pub show_diagnostics: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            removal_delay_ms: 1000,
            spin_duration_ms: 900,
            window_width: 900.0,
            window_height: 640.0,
            dark_theme: false,
            show_diagnostics: false,
        }
    }
}

impl Config {
    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse config")
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        toml::from_str(&content).with_context(|| format!("Failed to parse {}", path.display()))
    }

    /// `$RECTPAINT_CONFIG`, then `./rectpaint.toml`, then defaults.
    ///
    /// A path given through the environment must exist.
    pub fn discover() -> Result<Self> {
        if let Some(path) = std::env::var_os(CONFIG_ENV) {
            return Self::load(&PathBuf::from(path));
        }
        let local = Path::new(DEFAULT_CONFIG_FILE);
        if local.exists() {
            return Self::load(local);
        }
        tracing::debug!("no {} found, using defaults", DEFAULT_CONFIG_FILE);
        Ok(Self::default())
    }

    pub fn removal_delay(&self) -> Duration {
        Duration::from_millis(self.removal_delay_ms)
    }

    pub fn spin_duration(&self) -> Duration {
        Duration::from_millis(self.spin_duration_ms)
    }
}
