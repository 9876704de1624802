use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::catalog::{self, Catalog, InstanceType};
use crate::error::ConfigError;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Instance type table used for recommendations
    ///
    /// Overrides the built-in table wholesale when present in the config
    /// file; there is no per-entry merging.
    #[serde(default = "catalog::default_entries")]
    pub catalog: Vec<InstanceType>,

    #[serde(default)]
    pub history: HistoryConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryConfig {
    /// Where analysis records are kept
    #[serde(default = "default_history_file")]
    pub file: PathBuf,
}

fn default_history_file() -> PathBuf {
    dirs::data_dir()
        .map(|d| d.join("examcost").join("history.json"))
        .unwrap_or_else(|| PathBuf::from("examcost-history.json"))
}

impl Default for Config {
    fn default() -> Self {
        Self {
            catalog: catalog::default_entries(),
            history: HistoryConfig::default(),
        }
    }
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            file: default_history_file(),
        }
    }
}

impl Config {
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config_path = if let Some(p) = path {
            p.to_path_buf()
        } else {
            // Try .examcost.toml in current dir, then ~/.config/examcost/config.toml
            let local = PathBuf::from(".examcost.toml");
            if local.exists() {
                local
            } else {
                dirs::config_dir()
                    .map(|d| d.join("examcost").join("config.toml"))
                    .unwrap_or_else(|| PathBuf::from(".examcost.toml"))
            }
        };

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)
                .with_context(|| format!("Failed to read config: {}", config_path.display()))?;
            let config: Config = toml::from_str(&content).with_context(|| {
                let mut err = format!("Failed to parse config: {}", config_path.display());
                err.push_str("\n  Common issues:");
                err.push_str("\n    - Invalid TOML syntax");
                err.push_str("\n    - Incorrect value types in [[catalog]] entries");
                err.push_str("\n  Tip: Run 'examcost init' to create a new config file");
                err
            })?;
            Ok(config)
        } else {
            // Use defaults but warn if user explicitly provided a path
            if path.is_some() {
                eprintln!("WARNING: Config file not found: {}", config_path.display());
                eprintln!(
                    "   Using default configuration. Run 'examcost init' to create a config file."
                );
            }
            Ok(Config::default())
        }
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config: {}", path.display()))?;
        Ok(())
    }

    /// Build the validated catalog from the configured entries
    ///
    /// An empty table or an entry with non-positive capacity/price is a
    /// configuration error.
    pub fn catalog(&self) -> std::result::Result<Catalog, ConfigError> {
        Catalog::new(self.catalog.clone())
    }
}

pub fn init_config(output: &Path) -> Result<()> {
    let config = Config::default();
    config.save(output)?;
    println!("Created config file: {}", output.display());
    Ok(())
}
