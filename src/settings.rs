use crate::hass::Preferences;
use crate::plugins::home_assistant::DEFAULT_KEYWORD;
use crate::resolver::DEFAULT_MAX_RESULTS;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const ENV_HASS_URL: &str = "HASS_URL";
pub const ENV_HASS_KEY: &str = "HASS_KEY";

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Settings {
    /// Base URL of the Home Assistant server, e.g. `http://hass.local:8123`.
    #[serde(default)]
    pub hass_url: String,
    /// Long-lived access token sent as a bearer token.
    #[serde(default)]
    pub hass_key: String,
    /// Keyword that routes a launcher query to the plugin.
    #[serde(default = "default_keyword")]
    pub keyword: String,
    /// Maximum number of entities listed per query.
    #[serde(default = "default_max_results")]
    pub max_results: usize,
    /// Timeout in seconds for each request to the server.
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
    /// When enabled the application initialises the logger at debug level.
    #[serde(default)]
    pub debug_logging: bool,
    /// Write logs to this file instead of stderr.
    #[serde(default)]
    pub log_file: Option<String>,
}

fn default_keyword() -> String {
    DEFAULT_KEYWORD.into()
}

fn default_max_results() -> usize {
    DEFAULT_MAX_RESULTS
}

fn default_request_timeout() -> u64 {
    10
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            hass_url: String::new(),
            hass_key: String::new(),
            keyword: default_keyword(),
            max_results: default_max_results(),
            request_timeout_secs: default_request_timeout(),
            debug_logging: false,
            log_file: None,
        }
    }
}

impl Settings {
    pub fn load(path: &str) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path).unwrap_or_default();
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_json::from_str(&content)?)
    }

    pub fn save(&self, path: &str) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// `<config dir>/hass_launcher/settings.json`, or `settings.json` in the
    /// working directory when the platform has no config dir.
    pub fn default_path() -> PathBuf {
        dirs_next::config_dir()
            .map(|d| d.join("hass_launcher").join("settings.json"))
            .unwrap_or_else(|| PathBuf::from("settings.json"))
    }

    /// Replace the server URL and key with `HASS_URL` / `HASS_KEY` when set.
    pub fn apply_env_overrides(&mut self) {
        if let Some(url) = non_empty_env(ENV_HASS_URL) {
            self.hass_url = url;
        }
        if let Some(key) = non_empty_env(ENV_HASS_KEY) {
            self.hass_key = key;
        }
    }

    pub fn preferences(&self) -> Preferences {
        Preferences::new(self.hass_url.clone(), self.hass_key.clone())
    }
}

fn non_empty_env(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}
