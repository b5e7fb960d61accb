//! URL list input: normalization, file loading, and input errors.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Problems with the caller's input, reported before any resolution starts.
#[derive(Debug, Error)]
pub enum InputError {
    #[error("File not found: {}", .0.display())]
    FileNotFound(PathBuf),
    #[error("Error reading file: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Unsupported proxy scheme '{0}' (expected http, https, socks4, socks4a, socks5 or socks5h)")]
    UnsupportedProxy(String),
    #[error("Invalid proxy URL '{0}'")]
    InvalidProxy(String),
}

/// Trim every entry and drop blank ones, keeping input order.
pub fn normalize_urls<I, S>(urls: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    urls.into_iter()
        .map(|u| u.as_ref().trim().to_string())
        .filter(|u| !u.is_empty())
        .collect()
}

/// Read one URL per line from `path` (UTF-8), trimmed, blank lines dropped.
pub fn read_url_file(path: &Path) -> Result<Vec<String>, InputError> {
    if !path.exists() {
        return Err(InputError::FileNotFound(path.to_path_buf()));
    }
    let data = fs::read_to_string(path).map_err(|source| InputError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(normalize_urls(data.lines()))
}
