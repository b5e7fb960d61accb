//! Failure taxonomy for a single resolution.

use thiserror::Error;

/// Discriminant of a [`ResolveError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Timeout,
    TooManyRedirects,
    RequestError,
    ExecutionError,
    Unexpected,
}

/// Why a URL could not be resolved. The `Display` form is what the report
/// prints inside `ERROR (...)`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    /// The request exceeded its timeout budget.
    #[error("Timeout")]
    Timeout,
    /// The redirect chain exceeded the configured cap.
    #[error("Too many redirects")]
    TooManyRedirects,
    /// Any other network or protocol failure (DNS, connect, TLS, proxy, malformed URL).
    #[error("Request error: {0}")]
    Request(String),
    /// The execution unit itself failed (e.g. the resolver panicked).
    #[error("Exec error: {0}")]
    Execution(String),
    /// Anything not attributable to the network exchange.
    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

impl ResolveError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ResolveError::Timeout => ErrorKind::Timeout,
            ResolveError::TooManyRedirects => ErrorKind::TooManyRedirects,
            ResolveError::Request(_) => ErrorKind::RequestError,
            ResolveError::Execution(_) => ErrorKind::ExecutionError,
            ResolveError::Unexpected(_) => ErrorKind::Unexpected,
        }
    }

    /// Placeholder for a URL whose outcome was never recorded.
    pub fn unknown() -> Self {
        ResolveError::Unexpected("Unknown".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_strings() {
        assert_eq!(ResolveError::Timeout.to_string(), "Timeout");
        assert_eq!(
            ResolveError::TooManyRedirects.to_string(),
            "Too many redirects"
        );
        assert_eq!(
            ResolveError::Request("connection refused".into()).to_string(),
            "Request error: connection refused"
        );
        assert_eq!(
            ResolveError::Execution("boom".into()).to_string(),
            "Exec error: boom"
        );
        assert_eq!(ResolveError::unknown().to_string(), "Unexpected error: Unknown");
    }

    #[test]
    fn kinds_match_variants() {
        assert_eq!(ResolveError::Timeout.kind(), ErrorKind::Timeout);
        assert_eq!(
            ResolveError::TooManyRedirects.kind(),
            ErrorKind::TooManyRedirects
        );
        assert_eq!(
            ResolveError::Request(String::new()).kind(),
            ErrorKind::RequestError
        );
        assert_eq!(
            ResolveError::Execution(String::new()).kind(),
            ErrorKind::ExecutionError
        );
        assert_eq!(ResolveError::unknown().kind(), ErrorKind::Unexpected);
    }
}
