//! libcurl-backed resolver: HEAD with redirect following, GET fallback.

use curl::easy::Easy;
use std::time::Duration;

use super::classify::classify_curl_error;
use super::{Resolution, ResolutionOutcome, ResolveError, Resolver};
use crate::config::UnshortConfig;
use crate::proxy::ProxyConfig;

/// Immutable request settings shared by every worker of a batch.
#[derive(Debug, Clone)]
pub struct ResolveOptions {
    pub timeout: Duration,
    pub connect_timeout: Option<Duration>,
    pub max_redirects: u32,
    pub user_agent: String,
    pub proxy: Option<ProxyConfig>,
    /// Re-issue as GET when HEAD is answered with 405 or 501.
    pub get_fallback: bool,
}

impl ResolveOptions {
    pub fn from_config(cfg: &UnshortConfig, proxy: Option<ProxyConfig>) -> Self {
        Self {
            timeout: cfg.timeout(),
            connect_timeout: cfg.connect_timeout(),
            max_redirects: cfg.max_redirects,
            user_agent: cfg.user_agent.clone(),
            proxy,
            get_fallback: cfg.get_fallback,
        }
    }
}

impl Default for ResolveOptions {
    fn default() -> Self {
        Self::from_config(&UnshortConfig::default(), None)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Method {
    Head,
    Get,
}

/// Resolves URLs with blocking libcurl easy handles, one handle per call.
/// Safe to share across worker threads.
#[derive(Debug, Clone, Default)]
pub struct CurlResolver {
    options: ResolveOptions,
}

impl CurlResolver {
    pub fn new(options: ResolveOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &ResolveOptions {
        &self.options
    }

    fn configure(&self, easy: &mut Easy, url: &str, method: Method) -> Result<(), curl::Error> {
        easy.url(url)?;
        match method {
            Method::Head => easy.nobody(true)?,
            Method::Get => easy.get(true)?,
        }
        easy.follow_location(true)?;
        easy.max_redirections(self.options.max_redirects)?;
        easy.timeout(self.options.timeout)?;
        if let Some(connect) = self.options.connect_timeout {
            easy.connect_timeout(connect)?;
        }
        easy.useragent(&self.options.user_agent)?;
        if let Some(proxy) = &self.options.proxy {
            // libcurl treats scheme-less URLs as http.
            let scheme = url.split_once("://").map_or("http", |(s, _)| s);
            if let Some(endpoint) = proxy.endpoint_for(scheme) {
                easy.proxy(endpoint)?;
            }
        }
        Ok(())
    }

    fn perform(&self, url: &str, method: Method) -> ResolutionOutcome {
        let mut easy = Easy::new();
        self.configure(&mut easy, url, method)
            .map_err(|e| ResolveError::Unexpected(format!("curl setup: {}", e)))?;

        {
            let mut transfer = easy.transfer();
            // Body is irrelevant; only the final URL and status matter.
            transfer
                .write_function(|data| Ok(data.len()))
                .map_err(|e| ResolveError::Unexpected(format!("curl setup: {}", e)))?;
            transfer.perform().map_err(|e| classify_curl_error(&e))?;
        }

        let status = easy
            .response_code()
            .map_err(|e| ResolveError::Unexpected(format!("no response code: {}", e)))?;
        let final_url = match easy.effective_url() {
            Ok(Some(u)) => u.to_string(),
            Ok(None) => url.to_string(),
            Err(e) => {
                return Err(ResolveError::Unexpected(format!(
                    "unreadable effective URL: {}",
                    e
                )))
            }
        };
        Ok(Resolution { final_url, status })
    }
}

impl Resolver for CurlResolver {
    fn resolve(&self, url: &str) -> ResolutionOutcome {
        let head = self.perform(url, Method::Head)?;
        if self.options.get_fallback && matches!(head.status, 405 | 501) {
            tracing::debug!(url, status = head.status, "HEAD rejected, retrying as GET");
            return self.perform(url, Method::Get);
        }
        Ok(head)
    }
}
