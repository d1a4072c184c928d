use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use crate::submit::SubmitTimeouts;

fn default_server_url() -> String {
    "http://127.0.0.1:8000".to_string()
}

fn default_connect_timeout_secs() -> u64 {
    15
}

fn default_request_timeout_secs() -> u64 {
    // The server retrieves payslips synchronously; allow minutes.
    900
}

/// Global configuration loaded from `~/.config/psd/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PsdConfig {
    /// Base URL of the payslip server; the client POSTs to `<server_url>/run`.
    #[serde(default = "default_server_url")]
    pub server_url: String,
    /// Directory downloads are saved into (default: current directory).
    #[serde(default)]
    pub download_dir: Option<PathBuf>,
    /// Connect timeout in seconds.
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,
    /// Total request timeout in seconds.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

impl Default for PsdConfig {
    fn default() -> Self {
        Self {
            server_url: default_server_url(),
            download_dir: None,
            connect_timeout_secs: default_connect_timeout_secs(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

impl PsdConfig {
    pub fn timeouts(&self) -> SubmitTimeouts {
        SubmitTimeouts {
            connect: Duration::from_secs(self.connect_timeout_secs),
            total: Duration::from_secs(self.request_timeout_secs),
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("psd")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<PsdConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = PsdConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(&path)?;
    let cfg: PsdConfig = toml::from_str(&data)?;
    Ok(cfg)
}
