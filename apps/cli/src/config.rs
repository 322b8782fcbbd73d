use std::{collections::HashMap, fs};

pub const SETTINGS_FILE: &str = "detect.toml";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub server_url: String,
    pub log_filter: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server_url: "http://127.0.0.1:8000".into(),
            log_filter: "warn".into(),
        }
    }
}

pub fn load_settings() -> Settings {
    let file_contents = fs::read_to_string(SETTINGS_FILE).ok();
    load_settings_from(file_contents.as_deref(), |key| std::env::var(key).ok())
}

/// Defaults, then the flat `detect.toml` map, then environment overrides.
pub fn load_settings_from(
    file_contents: Option<&str>,
    env: impl Fn(&str) -> Option<String>,
) -> Settings {
    let mut settings = Settings::default();

    if let Some(raw) = file_contents {
        // Loaded before logging is installed, so a malformed file is skipped silently.
        if let Ok(file_cfg) = toml::from_str::<HashMap<String, String>>(raw) {
            if let Some(v) = file_cfg.get("server_url") {
                settings.server_url = v.clone();
            }
            if let Some(v) = file_cfg.get("log_filter") {
                settings.log_filter = v.clone();
            }
        }
    }

    if let Some(v) = env("PREDICT_SERVER_URL") {
        settings.server_url = v;
    }
    if let Some(v) = env("APP__SERVER_URL") {
        settings.server_url = v;
    }

    if let Some(v) = env("APP__LOG_FILTER") {
        settings.log_filter = v;
    }

    settings
}
