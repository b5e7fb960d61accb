//! Classify curl errors into resolution failures.

use super::error::ResolveError;

/// libcurl's `CURLE_NOT_BUILT_IN` (code 4); `curl-sys` does not export it.
pub(crate) const CURLE_NOT_BUILT_IN: curl_sys::CURLcode = 4;

/// Classify a libcurl error from `perform()`.
///
/// Timeouts and redirect-cap overruns get their own kinds; errors that come
/// from libcurl itself rather than the exchange are `Unexpected`; everything
/// else is a request error carrying curl's message.
pub fn classify_curl_error(e: &curl::Error) -> ResolveError {
    if e.is_operation_timedout() {
        return ResolveError::Timeout;
    }
    if e.is_too_many_redirects() {
        return ResolveError::TooManyRedirects;
    }
    if e.is_out_of_memory()
        || e.is_failed_init()
        || e.is_bad_function_argument()
        || e.is_unknown_option()
        || e.code() == CURLE_NOT_BUILT_IN
    {
        return ResolveError::Unexpected(e.to_string());
    }
    ResolveError::Request(e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolve::ErrorKind;

    use curl_sys::{
        CURLcode, CURLE_BAD_FUNCTION_ARGUMENT, CURLE_COULDNT_CONNECT, CURLE_COULDNT_RESOLVE_HOST,
        CURLE_OPERATION_TIMEDOUT, CURLE_OUT_OF_MEMORY,
        CURLE_PEER_FAILED_VERIFICATION, CURLE_TOO_MANY_REDIRECTS,
    };

    fn kind_of(code: CURLcode) -> ErrorKind {
        classify_curl_error(&curl::Error::new(code)).kind()
    }

    #[test]
    fn timeout() {
        assert_eq!(kind_of(CURLE_OPERATION_TIMEDOUT), ErrorKind::Timeout);
    }

    #[test]
    fn too_many_redirects() {
        assert_eq!(
            kind_of(CURLE_TOO_MANY_REDIRECTS),
            ErrorKind::TooManyRedirects
        );
    }

    #[test]
    fn network_failures_are_request_errors() {
        assert_eq!(kind_of(CURLE_COULDNT_RESOLVE_HOST), ErrorKind::RequestError);
        assert_eq!(kind_of(CURLE_COULDNT_CONNECT), ErrorKind::RequestError);
        assert_eq!(
            kind_of(CURLE_PEER_FAILED_VERIFICATION),
            ErrorKind::RequestError
        );
    }

    #[test]
    fn libcurl_internal_failures_are_unexpected() {
        assert_eq!(kind_of(CURLE_OUT_OF_MEMORY), ErrorKind::Unexpected);
        assert_eq!(kind_of(CURLE_BAD_FUNCTION_ARGUMENT), ErrorKind::Unexpected);
        assert_eq!(kind_of(CURLE_NOT_BUILT_IN), ErrorKind::Unexpected);
    }

    #[test]
    fn request_error_detail_is_curl_message() {
        let e = curl::Error::new(CURLE_COULDNT_CONNECT);
        match classify_curl_error(&e) {
            ResolveError::Request(detail) => {
                assert!(!detail.is_empty());
                assert_eq!(detail, e.to_string());
            }
            other => panic!("expected request error, got {:?}", other),
        }
    }
}
