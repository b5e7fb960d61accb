//! Proxy endpoint parsing.
//!
//! One endpoint serves both `http` and `https` targets. libcurl picks the
//! proxy protocol from the endpoint's scheme prefix.

use crate::input::InputError;
use url::Url;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProxyScheme {
    Http,
    Https,
    Socks4,
    Socks4a,
    Socks5,
    Socks5h,
}

impl ProxyScheme {
    fn from_scheme(s: &str) -> Option<Self> {
        match s {
            "http" => Some(Self::Http),
            "https" => Some(Self::Https),
            "socks4" => Some(Self::Socks4),
            "socks4a" => Some(Self::Socks4a),
            "socks5" => Some(Self::Socks5),
            "socks5h" => Some(Self::Socks5h),
            _ => None,
        }
    }

    pub fn is_socks(self) -> bool {
        matches!(
            self,
            Self::Socks4 | Self::Socks4a | Self::Socks5 | Self::Socks5h
        )
    }
}

/// Validated proxy endpoint used for every request of a batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProxyConfig {
    scheme: ProxyScheme,
    url: String,
}

impl ProxyConfig {
    /// Parse `scheme://[user:pass@]host[:port]`. The scheme is matched case-insensitively.
    pub fn parse(raw: &str) -> Result<Self, InputError> {
        let raw = raw.trim();
        let parsed = Url::parse(raw).map_err(|_| InputError::InvalidProxy(raw.to_string()))?;
        let scheme = ProxyScheme::from_scheme(parsed.scheme())
            .ok_or_else(|| InputError::UnsupportedProxy(parsed.scheme().to_string()))?;
        if parsed.host_str().map_or(true, str::is_empty) {
            return Err(InputError::InvalidProxy(raw.to_string()));
        }
        Ok(Self {
            scheme,
            url: raw.to_string(),
        })
    }

    pub fn scheme(&self) -> ProxyScheme {
        self.scheme
    }

    pub fn is_socks(&self) -> bool {
        self.scheme.is_socks()
    }

    /// Endpoint as given, passed to libcurl verbatim.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Endpoint for a target URL's scheme; `None` for schemes that are not proxied.
    pub fn endpoint_for(&self, target_scheme: &str) -> Option<&str> {
        if target_scheme.eq_ignore_ascii_case("http") || target_scheme.eq_ignore_ascii_case("https")
        {
            Some(&self.url)
        } else {
            None
        }
    }
}
