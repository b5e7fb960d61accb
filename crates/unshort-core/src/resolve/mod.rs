//! Redirect resolution of a single URL.
//!
//! The dispatcher only depends on the [`Resolver`] trait; [`CurlResolver`]
//! is the libcurl-backed implementation used by the CLI.

mod classify;
mod error;
mod http;

pub use classify::classify_curl_error;
pub use error::{ErrorKind, ResolveError};
pub use http::{CurlResolver, ResolveOptions};

/// Where a URL ended up after following its redirect chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    /// Final URL after all redirects.
    pub final_url: String,
    /// Status code of the terminal response (any code counts as resolved).
    pub status: u32,
}

/// Result of resolving one URL: a [`Resolution`] or a classified failure.
pub type ResolutionOutcome = Result<Resolution, ResolveError>;

/// Resolves one URL with a single attempt. Implementations must not panic
/// on network failures; every failure is returned as a [`ResolveError`].
pub trait Resolver: Send + Sync {
    fn resolve(&self, url: &str) -> ResolutionOutcome;
}

impl<R: Resolver + ?Sized> Resolver for std::sync::Arc<R> {
    fn resolve(&self, url: &str) -> ResolutionOutcome {
        (**self).resolve(url)
    }
}
