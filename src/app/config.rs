//! Configuration for the importer

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Import configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImportConfig {
    /// Width of the canvas ANSI streams are drawn on
    pub ansi_width: usize,
    /// Initial height of the ANSI canvas; it grows downward on demand
    pub ansi_height: usize,
    /// Rows past this limit are dropped instead of growing the canvas
    pub max_rows: usize,
    /// Format used when none is given on the command line ("" = autodetect)
    pub default_format: String,
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self {
            ansi_width: 80,
            ansi_height: 25,
            max_rows: 65536,
            default_format: String::new(),
        }
    }
}

impl ImportConfig {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config: ImportConfig = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to a file
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Load configuration from default location or return default config
    pub fn load_or_default() -> Self {
        // Try to load from ~/.config/mochi/import.json
        if let Some(config_dir) = dirs_config_path() {
            let config_path = config_dir.join("import.json");
            if config_path.exists() {
                match Self::load(&config_path) {
                    Ok(config) => return config,
                    Err(e) => tracing::warn!("Ignoring {}: {}", config_path.display(), e),
                }
            }
        }
        Self::default()
    }
}

/// Get the configuration directory path
fn dirs_config_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|home| PathBuf::from(home).join(".config").join("mochi"))
}

/// Configuration error
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
