use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::categorizer::MatchMode;
use crate::error::{Result, TallyError};

pub const CATEGORIES_FILE: &str = "categories.json";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    pub data_dir: String,
    /// chrono format string for the statement date column.
    #[serde(default = "default_date_format")]
    pub date_format: String,
    #[serde(default)]
    pub match_mode: MatchMode,
    /// Unit printed after amounts in reports.
    #[serde(default = "default_currency")]
    pub currency: String,
}

fn default_date_format() -> String {
    "%d %b %Y".to_string()
}

fn default_currency() -> String {
    "Rs.".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir().to_string_lossy().to_string(),
            date_format: default_date_format(),
            match_mode: MatchMode::default(),
            currency: default_currency(),
        }
    }
}

impl Settings {
    pub fn categories_path(&self) -> PathBuf {
        PathBuf::from(&self.data_dir).join(CATEGORIES_FILE)
    }
}

fn config_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config")
        .join("tally")
}

pub fn settings_path() -> PathBuf {
    config_dir().join("settings.json")
}

fn default_data_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("Documents")
        .join("tally")
}

pub fn load_settings() -> Settings {
    let path = settings_path();
    if !path.exists() {
        return Settings::default();
    }
    let content = std::fs::read_to_string(&path).unwrap_or_default();
    match serde_json::from_str(&content) {
        Ok(settings) => settings,
        Err(e) => {
            log::warn!("ignoring unreadable settings at {}: {e}", path.display());
            Settings::default()
        }
    }
}

pub fn save_settings(settings: &Settings) -> Result<()> {
    std::fs::create_dir_all(config_dir())?;
    let json = serde_json::to_string_pretty(settings)
        .map_err(|e| TallyError::Settings(e.to_string()))?;
    std::fs::write(settings_path(), format!("{json}\n"))?;
    Ok(())
}

pub fn shellexpand_path(path: &str) -> String {
    if path.starts_with('~') {
        if let Some(home) = dirs::home_dir() {
            return path.replacen('~', &home.to_string_lossy(), 1);
        }
    }
    std::fs::canonicalize(path)
        .unwrap_or_else(|_| PathBuf::from(path))
        .to_string_lossy()
        .to_string()
}
