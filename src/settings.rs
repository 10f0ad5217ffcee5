//! Browser settings
//!
//! Persisted in LocalStorage; any field missing from the stored JSON falls
//! back to its default, so old saves keep loading.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::favorites::StoreConfig;

/// Runtime configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Character list endpoint
    pub api_url: String,

    // === Favorites storage ===
    pub db_name: String,
    pub db_version: u32,
    pub store_name: String,

    // === Rendering ===
    /// Names never rendered as cards (case-insensitive, whole name)
    pub excluded_names: Vec<String>,

    /// Minimum log level ("error", "warn", "info", "debug", "trace")
    pub log_level: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_url: CHARACTER_API_URL.to_string(),

            db_name: FAVORITES_DB_NAME.to_string(),
            db_version: FAVORITES_DB_VERSION,
            store_name: FAVORITES_STORE_NAME.to_string(),

            excluded_names: EXCLUDED_NAMES.iter().map(|s| s.to_string()).collect(),

            log_level: "info".to_string(),
        }
    }
}

impl Settings {
    /// Favorites store location
    pub fn store_config(&self) -> StoreConfig {
        StoreConfig {
            db_name: self.db_name.clone(),
            db_version: self.db_version,
            store_name: self.store_name.clone(),
        }
    }

    /// Parsed log level, `Info` when unrecognised
    pub fn log_level(&self) -> log::Level {
        self.log_level.parse().unwrap_or(log::Level::Info)
    }

    /// Parse stored JSON, falling back to defaults when unreadable
    pub fn from_json(json: &str) -> Self {
        match serde_json::from_str(json) {
            Ok(settings) => settings,
            Err(e) => {
                log::warn!("Ignoring unreadable settings: {}", e);
                Self::default()
            }
        }
    }

    /// LocalStorage key
    #[cfg(target_arch = "wasm32")]
    const STORAGE_KEY: &'static str = "character_browser_settings";

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                log::info!("Loaded settings from LocalStorage");
                return Self::from_json(&json);
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Native stub
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let s = Settings::default();
        assert_eq!(s.api_url, "https://api.disneyapi.dev/character");
        assert_eq!(s.store_config(), StoreConfig::default());
        assert_eq!(s.excluded_names, vec!["arabella", "amelia duckworth"]);
        assert_eq!(s.log_level(), log::Level::Info);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let s = Settings::from_json(r#"{"api_url": "http://localhost:8080/character", "excluded_names": []}"#);
        assert_eq!(s.api_url, "http://localhost:8080/character");
        assert!(s.excluded_names.is_empty());
        assert_eq!(s.db_name, FAVORITES_DB_NAME);
        assert_eq!(s.db_version, 1);
    }

    #[test]
    fn test_unreadable_json_falls_back() {
        assert_eq!(Settings::from_json("{not json"), Settings::default());
    }

    #[test]
    fn test_log_level_parsing() {
        let mut s = Settings::default();
        s.log_level = "DEBUG".to_string();
        assert_eq!(s.log_level(), log::Level::Debug);
        s.log_level = "chatty".to_string();
        assert_eq!(s.log_level(), log::Level::Info);
    }
}
