use adapters::Endpoints;
use conversation::RetentionPolicy;
use proto::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;

/// Top-level application configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Backend URLs, one per feature endpoint.
    pub endpoints: Endpoints,
    /// HTTP client settings.
    pub http: HttpConfig,
    /// Session lifecycle settings.
    pub session: SessionConfig,
    /// Host environment settings.
    pub host: HostConfig,
}

/// HTTP client settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    /// Per-request transport timeout in seconds. Unset means no timeout.
    pub timeout_secs: Option<u64>,
}

impl HttpConfig {
    /// Timeout as a [`Duration`]; zero is treated as unset.
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs)
    }
}

/// Session lifecycle settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Whether sessions survive a return to the menu.
    pub retention: RetentionPolicy,
}

/// Host environment settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HostConfig {
    /// URL reported as the active tab to the webpage feature.
    pub tab_url: Option<String>,
}

impl Config {
    /// Loads configuration from explicit path, fallback locations, and env overrides.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let config_path = path.map(|p| p.to_path_buf()).or_else(|| {
            // Look in current dir, then home dir
            let cwd = std::env::current_dir().ok()?.join("config.toml");
            if cwd.exists() {
                return Some(cwd);
            }
            let home_config = Self::home_dir()?.join("config.toml");
            if home_config.exists() {
                return Some(home_config);
            }
            None
        });
        debug!(path = ?config_path, "Config file resolved");

        let mut config = if let Some(path) = config_path {
            let content = std::fs::read_to_string(&path).map_err(ConfigError::Io)?;
            toml::from_str(&content).map_err(|e| ConfigError::Toml(e.to_string()))?
        } else {
            Config::default()
        };

        config.apply_env_overrides()?;

        debug!(
            webpage = %config.endpoints.webpage_ask,
            chatbot = %config.endpoints.chatbot,
            retention = ?config.session.retention,
            timeout = ?config.http.timeout(),
            "Config loaded"
        );
        Ok(config)
    }

    /// `~/.wizora`, when `HOME` is set.
    pub fn home_dir() -> Option<PathBuf> {
        let home = std::env::var("HOME").ok()?;
        Some(PathBuf::from(home).join(".wizora"))
    }

    fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        let endpoints = &mut self.endpoints;
        let url_overrides: [(&str, &mut String); 6] = [
            ("WIZORA_WEBPAGE_URL", &mut endpoints.webpage_ask),
            ("WIZORA_UPLOAD_URL", &mut endpoints.document_upload),
            ("WIZORA_QUESTION_URL", &mut endpoints.document_question),
            ("WIZORA_ANALYZE_URL", &mut endpoints.data_analyze),
            ("WIZORA_CHATBOT_URL", &mut endpoints.chatbot),
            ("WIZORA_IMAGE_URL", &mut endpoints.image_generate),
        ];
        for (var, slot) in url_overrides {
            if let Ok(url) = std::env::var(var) {
                *slot = url;
            }
        }

        if let Ok(url) = std::env::var("WIZORA_TAB_URL") {
            self.host.tab_url = Some(url);
        }
        if let Ok(secs) = std::env::var("WIZORA_HTTP_TIMEOUT") {
            let parsed = secs.parse::<u64>().map_err(|e| ConfigError::InvalidValue {
                field: "WIZORA_HTTP_TIMEOUT".to_string(),
                reason: e.to_string(),
            })?;
            self.http.timeout_secs = Some(parsed);
        }
        Ok(())
    }
}
