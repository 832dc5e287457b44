use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::{Error, Result};
use crate::ui::blocks::DEFAULT_FILL_SYMBOL;

const DEFAULT_REFRESH_INTERVAL_MS: u64 = 30;

/// Display settings, stored as JSON in the user's config directory
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Delay between two redraws of the progress table
    #[serde(default = "default_refresh_interval_ms")]
    pub refresh_interval_ms: u64,
    /// Character used to fill progress bars
    #[serde(default = "default_fill_symbol")]
    pub fill_symbol: char,
}

fn default_refresh_interval_ms() -> u64 {
    DEFAULT_REFRESH_INTERVAL_MS
}

fn default_fill_symbol() -> char {
    DEFAULT_FILL_SYMBOL
}

impl Default for Config {
    fn default() -> Self {
        Self {
            refresh_interval_ms: DEFAULT_REFRESH_INTERVAL_MS,
            fill_symbol: DEFAULT_FILL_SYMBOL,
        }
    }
}

impl Config {
    /// Load from the default location, falling back to defaults when there is no usable file
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::get_config_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Config::default());
        }

        let data = fs::read(path)
            .map_err(|e| Error::config(format!("failed to read {:?}: {}", path, e)))?;

        if data.is_empty() {
            return Ok(Config::default());
        }

        // A file written by another version may not parse; start over with defaults.
        Ok(serde_json::from_slice(&data).unwrap_or_else(|e| {
            log::warn!("ignoring unreadable config {:?}: {}", path, e);
            Config::default()
        }))
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::get_config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                Error::config(format!("failed to create config directory {:?}: {}", parent, e))
            })?;
        }

        let data = serde_json::to_vec_pretty(self)
            .map_err(|e| Error::config(format!("failed to serialize config: {}", e)))?;

        fs::write(path, data)
            .map_err(|e| Error::config(format!("failed to write {:?}: {}", path, e)))?;

        Ok(())
    }

    pub fn get_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| Error::config("could not determine config directory"))?;

        Ok(config_dir.join("ptable").join("config.json"))
    }

    /// Redraw period, never shorter than one millisecond
    pub fn refresh_interval(&self) -> Duration {
        Duration::from_millis(self.refresh_interval_ms.max(1))
    }
}
