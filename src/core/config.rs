//! Configuration management with layered hierarchy

use serde::Deserialize;
use std::path::PathBuf;

/// Carteira configuration with layered hierarchy
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Default country for new registration drafts
    pub default_country: Option<String>,
}

impl Config {
    /// Load configuration from all sources, merging in priority order
    pub fn load() -> Self {
        let mut config = Config::default();

        // 1. Built-in defaults (already in Default impl)

        // 2. User config (<carteira home>/config.yaml)
        if let Some(home) = carteira_home() {
            let path = home.join("config.yaml");
            if path.exists() {
                if let Ok(contents) = std::fs::read_to_string(&path) {
                    if let Ok(file_config) = serde_yml::from_str::<Config>(&contents) {
                        config.merge(file_config);
                    }
                }
            }
        }

        // 3. Environment variables
        if let Ok(country) = std::env::var("CARTEIRA_COUNTRY") {
            config.default_country = Some(country);
        }

        config
    }

    /// Merge another config into this one (other takes precedence)
    fn merge(&mut self, other: Config) {
        if other.default_country.is_some() {
            self.default_country = other.default_country;
        }
    }

    /// The country preselected in new drafts. The wallet launched in Brazil,
    /// so BR is the shipped default.
    pub fn default_country(&self) -> String {
        self.default_country
            .clone()
            .unwrap_or_else(|| "BR".to_string())
    }
}

/// The directory holding session and config files: `$CARTEIRA_HOME` when
/// set, otherwise the platform config directory.
pub fn carteira_home() -> Option<PathBuf> {
    if let Ok(home) = std::env::var("CARTEIRA_HOME") {
        if !home.is_empty() {
            return Some(PathBuf::from(home));
        }
    }
    directories::ProjectDirs::from("", "", "carteira").map(|dirs| dirs.config_dir().to_path_buf())
}
