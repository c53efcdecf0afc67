use crate::model::ConfigError;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_VENDOR_URL: &str = "https://www.mietubl.com/Compatible/modelsearch/";
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";
pub const DEFAULT_PANEL: &str = "HD clear glass";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub vendor_url: String,
    pub user_agent: String,
    pub timeout_seconds: u64,
    pub default_panel: String,
    pub host: String,
    pub port: u16,
    pub static_dir: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            vendor_url: DEFAULT_VENDOR_URL.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout_seconds: 10,
            default_panel: DEFAULT_PANEL.to_string(),
            host: "0.0.0.0".to_string(),
            port: 3000,
            static_dir: None,
        }
    }
}

impl AppConfig {
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Applies a `PORT` value on top of whatever the file said.
    pub fn with_port_override(mut self, port: Option<&str>) -> Result<Self, ConfigError> {
        if let Some(raw) = port.map(str::trim).filter(|p| !p.is_empty()) {
            self.port = raw.parse().map_err(|_| ConfigError::Port(raw.to_string()))?;
        }
        Ok(self)
    }
}

/// Reads the JSON config at `path`; a missing file yields the defaults.
pub fn load_config(path: &Path) -> Result<AppConfig, ConfigError> {
    if !path.exists() {
        return Ok(AppConfig::default());
    }
    let content = fs::read_to_string(path)?;
    let config: AppConfig = serde_json::from_str(&content)?;
    Ok(config)
}

/// Config file path from `MIETUBL_CONFIG`, then `PORT` applied on top.
pub fn load_from_env() -> Result<AppConfig, ConfigError> {
    let path = std::env::var("MIETUBL_CONFIG").unwrap_or_else(|_| "config.json".to_string());
    let port = std::env::var("PORT").ok();
    load_config(Path::new(&path))?.with_port_override(port.as_deref())
}
