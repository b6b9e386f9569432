use crate::error::{IniError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILENAME: &str = "config.json";

/// Environment variable overriding the config directory.
pub const HOME_ENV: &str = "INIVAULT_HOME";

/// Configuration for inivault, stored in `<config dir>/config.json`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct VaultConfig {
    /// Save every store after each change
    #[serde(default)]
    pub auto_save: bool,

    /// Extra read sources (directories, tar or zip archives), searched after the working directory
    #[serde(default)]
    pub search_path: Vec<PathBuf>,

    /// Where writes go instead of the working directory
    #[serde(default)]
    pub write_dir: Option<PathBuf>,
}

impl VaultConfig {
    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path)?;
        let config: VaultConfig = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Save config to the given directory
    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_dir = config_dir.as_ref();

        if !config_dir.exists() {
            fs::create_dir_all(config_dir)?;
        }

        let config_path = config_dir.join(CONFIG_FILENAME);
        let content = serde_json::to_string_pretty(self)?;
        fs::write(config_path, content)?;
        Ok(())
    }

    /// `$INIVAULT_HOME`, or the platform config directory.
    pub fn default_dir() -> Result<PathBuf> {
        if let Some(home) = std::env::var_os(HOME_ENV) {
            return Ok(PathBuf::from(home));
        }
        directories::ProjectDirs::from("org", "inivault", "inivault")
            .map(|dirs| dirs.config_dir().to_path_buf())
            .ok_or_else(|| IniError::NotFound("Could not determine config dir".to_string()))
    }

    pub fn keys() -> &'static [&'static str] {
        &["auto-save", "search-path", "write-dir"]
    }

    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "auto-save" => Some(self.auto_save.to_string()),
            "search-path" => Some(
                self.search_path
                    .iter()
                    .map(|p| p.display().to_string())
                    .collect::<Vec<_>>()
                    .join(":"),
            ),
            "write-dir" => Some(
                self.write_dir
                    .as_ref()
                    .map(|p| p.display().to_string())
                    .unwrap_or_default(),
            ),
            _ => None,
        }
    }

    /// An empty value clears `search-path` and `write-dir`.
    pub fn set(&mut self, key: &str, value: &str) -> std::result::Result<(), String> {
        match key {
            "auto-save" => {
                self.auto_save = match value.trim().to_ascii_lowercase().as_str() {
                    "true" | "yes" | "on" | "1" => true,
                    "false" | "no" | "off" | "0" => false,
                    other => return Err(format!("Invalid boolean for auto-save: {}", other)),
                };
            }
            "search-path" => {
                self.search_path = value
                    .split(':')
                    .filter(|s| !s.trim().is_empty())
                    .map(PathBuf::from)
                    .collect();
            }
            "write-dir" => {
                self.write_dir = if value.trim().is_empty() {
                    None
                } else {
                    Some(PathBuf::from(value))
                };
            }
            _ => return Err(format!("Unknown config key: {}", key)),
        }
        Ok(())
    }
}
