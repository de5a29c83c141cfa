use may_minihttp::Request;
use tracing::debug;

/// Request line data the dispatcher needs from a `may_minihttp::Request`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedRequest {
    /// HTTP method exactly as sent (`GET`, `POST`, ...)
    pub method: String,
    /// Request path without the query string
    pub path: String,
    /// Raw query string after the first `?`, if any
    pub query: Option<String>,
}

impl ParsedRequest {
    /// Split a request target into path and raw query string.
    #[must_use]
    pub fn from_parts(method: &str, target: &str) -> Self {
        let (path, query) = match target.split_once('?') {
            Some((path, query)) => (path, Some(query.to_string())),
            None => (target, None),
        };
        Self {
            method: method.to_string(),
            path: if path.is_empty() { "/" } else { path }.to_string(),
            query,
        }
    }
}

/// Extract method, path and query from the raw HTTP request.
///
/// Headers and body are ignored: only GET is served and it carries no body.
#[must_use]
pub fn parse_request(req: &Request) -> ParsedRequest {
    let parsed = ParsedRequest::from_parts(req.method(), req.path());
    debug!(
        method = %parsed.method,
        path = %parsed.path,
        query = ?parsed.query,
        "HTTP request parsed"
    );
    parsed
}
