use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::fetch::FetchOptions;
use crate::installer::DEFAULT_URL_PREFIX;

/// Global configuration loaded from `~/.config/sysroot/config.toml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SysrootConfig {
    /// Artifact store base URL.
    #[serde(default = "default_url_prefix")]
    pub url_prefix: String,
    /// Directory holding the per-arch sysroot directories (None = current directory).
    #[serde(default)]
    pub install_root: Option<PathBuf>,
    /// Declared cross-compile target token (`x64`, `ia32`, `arm`, `arm64`, `mipsel`).
    #[serde(default)]
    pub target_arch: Option<String>,
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,
    /// Whole-download timeout.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_url_prefix() -> String {
    DEFAULT_URL_PREFIX.to_string()
}

fn default_connect_timeout_secs() -> u64 {
    30
}

fn default_timeout_secs() -> u64 {
    3600
}

impl Default for SysrootConfig {
    fn default() -> Self {
        Self {
            url_prefix: default_url_prefix(),
            install_root: None,
            target_arch: None,
            connect_timeout_secs: default_connect_timeout_secs(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl SysrootConfig {
    pub fn fetch_options(&self) -> FetchOptions {
        FetchOptions {
            connect_timeout: Duration::from_secs(self.connect_timeout_secs),
            timeout: Duration::from_secs(self.timeout_secs),
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("sysroot")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<SysrootConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = SysrootConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }
    load_from(&path)
}

pub fn load_from(path: &Path) -> Result<SysrootConfig> {
    let data = fs::read_to_string(path)?;
    let cfg: SysrootConfig = toml::from_str(&data)?;
    Ok(cfg)
}
