use serde::{Deserialize, Serialize};

const SETTINGS_KEY: &str = "settings";

/// Backend origin baked in at build time; empty means same origin.
pub const DEFAULT_API_BASE_URL: &str = match option_env!("FINCONTROL_API_URL") {
    Some(url) => url,
    None => "",
};

pub const LOG_LEVELS: [&str; 5] = ["error", "warn", "info", "debug", "trace"];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppSettings {
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_api_base_url() -> String {
    DEFAULT_API_BASE_URL.to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            api_base_url: default_api_base_url(),
            log_level: default_log_level(),
        }
    }
}

impl AppSettings {
    pub fn from_json(raw: &str) -> Option<Self> {
        serde_json::from_str::<AppSettings>(raw).ok()
    }

    pub fn level(&self) -> tracing::Level {
        self.log_level
            .parse::<tracing::Level>()
            .unwrap_or(tracing::Level::INFO)
    }
}

fn storage() -> Option<web_sys::Storage> {
    web_sys::window()?.local_storage().ok()?
}

pub fn load_settings() -> AppSettings {
    if let Some(storage) = storage() {
        if let Ok(Some(raw)) = storage.get_item(SETTINGS_KEY) {
            if let Some(settings) = AppSettings::from_json(&raw) {
                return settings;
            }
            tracing::warn!("stored settings unreadable, using defaults");
        }
    }
    AppSettings::default()
}

pub fn save_settings(settings: &AppSettings) {
    if let Some(storage) = storage() {
        if let Ok(raw) = serde_json::to_string(settings) {
            if storage.set_item(SETTINGS_KEY, &raw).is_err() {
                tracing::warn!("could not persist settings");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let settings = AppSettings::from_json(r#"{"api_base_url": "http://api.local"}"#).unwrap();
        assert_eq!(settings.api_base_url, "http://api.local");
        assert_eq!(settings.level(), tracing::Level::INFO);
        assert!(AppSettings::from_json("not json").is_none());
    }

    #[test]
    fn unknown_level_means_info() {
        let settings = AppSettings {
            log_level: "loud".to_string(),
            ..AppSettings::default()
        };
        assert_eq!(settings.level(), tracing::Level::INFO);
        let settings = AppSettings {
            log_level: "debug".to_string(),
            ..AppSettings::default()
        };
        assert_eq!(settings.level(), tracing::Level::DEBUG);
    }
}
