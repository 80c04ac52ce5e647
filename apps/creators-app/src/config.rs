use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::time::Duration;

const DEFAULT_BACKEND_URL: &str = "https://abbosxons-bot.xazratqulov.uz";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default = "default_backend_url")]
    pub backend_url: String,
    #[serde(default = "default_listen_port")]
    pub listen_port: u16,
    #[serde(default = "default_session_ttl_secs")]
    pub session_ttl_secs: u64,
    #[serde(default = "default_max_upload_bytes")]
    pub max_upload_bytes: usize,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

fn default_backend_url() -> String {
    DEFAULT_BACKEND_URL.to_string()
}

fn default_listen_port() -> u16 {
    8080
}

fn default_session_ttl_secs() -> u64 {
    30 * 60
}

fn default_max_upload_bytes() -> usize {
    10 * 1024 * 1024
}

fn default_request_timeout_secs() -> u64 {
    10
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            backend_url: default_backend_url(),
            listen_port: default_listen_port(),
            session_ttl_secs: default_session_ttl_secs(),
            max_upload_bytes: default_max_upload_bytes(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

impl AppConfig {
    pub fn load() -> Result<Self> {
        // Try to load from /etc/creators/app.toml first
        let config_paths = vec!["/etc/creators/app.toml", "./app.toml"];

        for path in config_paths {
            if let Ok(contents) = fs::read_to_string(path) {
                tracing::info!("Loading config from {}", path);
                return Self::from_toml(&contents);
            }
        }

        // Fallback to environment variables
        tracing::info!("Loading config from environment");
        dotenvy::dotenv().ok();
        Ok(Self::from_lookup(|key| std::env::var(key).ok()).normalized())
    }

    pub fn from_toml(contents: &str) -> Result<Self> {
        let config: Self = toml::from_str(contents)?;
        Ok(config.normalized())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            backend_url: lookup("BACKEND_URL").unwrap_or(defaults.backend_url),
            listen_port: lookup("LISTEN_PORT")
                .and_then(|p| p.parse().ok())
                .unwrap_or(defaults.listen_port),
            session_ttl_secs: lookup("SESSION_TTL_SECS")
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.session_ttl_secs),
            max_upload_bytes: lookup("MAX_UPLOAD_BYTES")
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.max_upload_bytes),
            request_timeout_secs: lookup("REQUEST_TIMEOUT_SECS")
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.request_timeout_secs),
        }
    }

    fn normalized(mut self) -> Self {
        let trimmed = self.backend_url.trim().trim_end_matches('/').to_string();
        self.backend_url = trimmed;
        self
    }

    pub fn session_ttl(&self) -> Duration {
        Duration::from_secs(self.session_ttl_secs)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}
