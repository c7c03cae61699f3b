use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::url_codec::DEFAULT_BASE_URL;

pub const DEFAULT_API_DOMAIN: &str = "https://api.pixelbin.io";

/// Global configuration loaded from `~/.config/pixelbin/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PixelbinSettings {
    /// Platform API origin.
    pub domain: String,
    /// CDN origin used when building delivery URLs.
    pub cdn_base_url: String,
    /// API token; requests to the platform fail without it.
    #[serde(default)]
    pub api_secret: Option<String>,
    /// Seconds allowed for the TCP/TLS connect phase.
    pub connect_timeout_secs: u64,
    /// Seconds allowed for a whole API request.
    pub request_timeout_secs: u64,
}

impl Default for PixelbinSettings {
    fn default() -> Self {
        Self {
            domain: DEFAULT_API_DOMAIN.to_string(),
            cdn_base_url: DEFAULT_BASE_URL.to_string(),
            api_secret: None,
            connect_timeout_secs: 15,
            request_timeout_secs: 60,
        }
    }
}

impl PixelbinSettings {
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("pixelbin")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<PixelbinSettings> {
    let path = config_path()?;
    load_from(&path)
}

/// Like [`load_or_init`] for an explicit path.
pub fn load_from(path: &Path) -> Result<PixelbinSettings> {
    if !path.exists() {
        let default_cfg = PixelbinSettings::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(path)?;
    let cfg: PixelbinSettings = toml::from_str(&data)?;
    Ok(cfg)
}
