use http::StatusCode;
use std::io;

/// One HTTP request/response pair as seen by the dispatcher.
///
/// The transport owns connection handling and request-line parsing; the
/// dispatcher only reads the method, path and query and writes exactly one
/// response.
pub trait HttpExchange {
    /// Request method exactly as received.
    fn method(&self) -> &str;

    /// Request path without the query string.
    fn path(&self) -> &str;

    /// Raw query string (text after `?`), if the target had one.
    fn query(&self) -> Option<&str>;

    /// Write the status, content type and body.
    ///
    /// # Errors
    ///
    /// Transport write failures.
    fn respond(&mut self, status: StatusCode, content_type: &'static str, body: String)
        -> io::Result<()>;
}
