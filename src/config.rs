use std::fs;
use std::path::PathBuf;

use log::warn;
use serde::Deserialize;
use serde_json::{json, Value};

pub const CONFIG_FILE: &str = "vitrine.toml";

/// Site configuration, read once at startup from `vitrine.toml` and
/// shared with routes via Rocket managed state. Every field has a
/// default so a missing or partial file still boots the site.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub site_name: String,
    pub site_caption: String,
    pub site_url: String,
    /// Local directory or http(s) base holding the project data files.
    pub data_source: String,
    pub locales_dir: String,
    pub templates_dir: String,
    pub default_lang: String,
    pub languages: Vec<String>,
    pub date_format: String,
    /// When false, projects render in data-file order.
    pub sort_by_date: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            site_name: "Vitrine".to_string(),
            site_caption: String::new(),
            site_url: "http://localhost:8000".to_string(),
            data_source: "site/data".to_string(),
            locales_dir: "site/locales".to_string(),
            templates_dir: "site/templates".to_string(),
            default_lang: "en".to_string(),
            languages: vec!["en".to_string(), "fr".to_string()],
            date_format: "%B %d, %Y".to_string(),
            sort_by_date: true,
        }
    }
}

impl AppConfig {
    pub fn load(path: &str) -> AppConfig {
        match fs::read_to_string(path) {
            Ok(body) => match toml::from_str(&body) {
                Ok(cfg) => cfg,
                Err(e) => {
                    warn!("{} is invalid ({}) — using default config", path, e);
                    AppConfig::default()
                }
            },
            Err(_) => {
                warn!("{} not found — using default config", path);
                AppConfig::default()
            }
        }
    }

    pub fn locales_path(&self) -> PathBuf {
        PathBuf::from(&self.locales_dir)
    }

    /// The settings object handed to render contexts.
    pub fn settings(&self) -> Value {
        json!({
            "site_name": self.site_name,
            "site_caption": self.site_caption,
            "site_url": self.site_url,
            "date_format": self.date_format,
        })
    }
}
