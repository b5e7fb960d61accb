use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Browser-like User-Agent; some shorteners reject library defaults.
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) Chrome/91.0.4472.124 Safari/537.36";

/// Per-request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Redirect cap per request.
pub const DEFAULT_MAX_REDIRECTS: u32 = 30;

/// Global configuration loaded from `~/.config/unshort/config.toml`.
///
/// Every field has a default, so a partial file is valid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UnshortConfig {
    /// Worker threads per batch. `None` = min(32, available parallelism + 4).
    pub workers: Option<usize>,
    /// Whole-request timeout in seconds (connect, TLS, redirects, response).
    pub timeout_secs: u64,
    /// Optional separate connect timeout in seconds.
    pub connect_timeout_secs: Option<u64>,
    /// Maximum number of redirects followed per URL.
    pub max_redirects: u32,
    /// User-Agent header sent with every request.
    pub user_agent: String,
    /// Re-issue the request as GET when a server answers HEAD with 405/501.
    pub get_fallback: bool,
    /// Default proxy URL (http, https, socks4, socks4a, socks5, socks5h).
    pub proxy: Option<String>,
}

impl Default for UnshortConfig {
    fn default() -> Self {
        Self {
            workers: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            connect_timeout_secs: None,
            max_redirects: DEFAULT_MAX_REDIRECTS,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            get_fallback: true,
            proxy: None,
        }
    }
}

impl UnshortConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.max(1))
    }

    pub fn connect_timeout(&self) -> Option<Duration> {
        self.connect_timeout_secs.map(Duration::from_secs)
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("unshort")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<UnshortConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = UnshortConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    load_from_path(&path)
}

/// Load configuration from an explicit file.
pub fn load_from_path(path: &Path) -> Result<UnshortConfig> {
    let data = fs::read_to_string(path)?;
    let cfg: UnshortConfig = toml::from_str(&data)?;
    Ok(cfg)
}
