use http::StatusCode;
use may_minihttp::Response;

pub const JSON_CONTENT_TYPE: &str = "application/json";
pub const TEXT_CONTENT_TYPE: &str = "text/plain";

fn status_reason(status: StatusCode) -> &'static str {
    status.canonical_reason().unwrap_or("Unknown")
}

fn content_type_header(content_type: &str) -> &'static str {
    match content_type {
        JSON_CONTENT_TYPE => "Content-Type: application/json",
        _ => "Content-Type: text/plain",
    }
}

/// Write status line, content type and body.
pub fn write_response(res: &mut Response, status: StatusCode, content_type: &str, body: String) {
    res.status_code(usize::from(status.as_u16()), status_reason(status));
    res.header(content_type_header(content_type));
    res.body_vec(body.into_bytes());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_reason() {
        assert_eq!(status_reason(StatusCode::OK), "OK");
        assert_eq!(status_reason(StatusCode::NOT_FOUND), "Not Found");
        assert_eq!(
            status_reason(StatusCode::METHOD_NOT_ALLOWED),
            "Method Not Allowed"
        );
    }

    #[test]
    fn test_content_type_header() {
        assert_eq!(
            content_type_header(JSON_CONTENT_TYPE),
            "Content-Type: application/json"
        );
        assert_eq!(
            content_type_header(TEXT_CONTENT_TYPE),
            "Content-Type: text/plain"
        );
    }
}
