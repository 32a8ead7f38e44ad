//! HTTP response building module
//!
//! Builders for the response shapes the server emits. Every text or JSON
//! response sets Content-Type with an explicit charset. Builders never
//! panic; a build error degrades to an empty response with an error log.

use http_body_util::Full;
use hyper::body::{Body, Bytes};
use hyper::{Response, Version};
use serde::Serialize;

/// Build 200 HTML response for the fixed bootstrap page
pub fn build_html_response(content: &'static str) -> Response<Full<Bytes>> {
    Response::builder()
        .status(200)
        .header("Content-Type", "text/html; charset=utf-8")
        .header("Content-Length", content.len())
        .body(Full::new(Bytes::from_static(content.as_bytes())))
        .unwrap_or_else(|e| {
            log_build_error("HTML", &e);
            Response::new(Full::new(Bytes::new()))
        })
}

/// Build 200 JSON response from any serializable value
pub fn build_json_response<T: Serialize>(value: &T) -> Response<Full<Bytes>> {
    let json = match serde_json::to_vec(value) {
        Ok(j) => j,
        Err(e) => {
            crate::logger::log_error(&format!("Failed to serialize response: {e}"));
            return build_500_response();
        }
    };

    Response::builder()
        .status(200)
        .header("Content-Type", "application/json; charset=utf-8")
        .header("Content-Length", json.len())
        .body(Full::new(Bytes::from(json)))
        .unwrap_or_else(|e| {
            log_build_error("JSON", &e);
            Response::new(Full::new(Bytes::new()))
        })
}

/// Build 200 response for static file content
pub fn build_file_response(content: Vec<u8>, content_type: &'static str) -> Response<Full<Bytes>> {
    Response::builder()
        .status(200)
        .header("Content-Type", content_type)
        .header("Content-Length", content.len())
        .body(Full::new(Bytes::from(content)))
        .unwrap_or_else(|e| {
            log_build_error("200", &e);
            Response::new(Full::new(Bytes::new()))
        })
}

/// Build 404 Not Found response
pub fn build_404_response() -> Response<Full<Bytes>> {
    Response::builder()
        .status(404)
        .header("Content-Type", "text/plain; charset=utf-8")
        .body(Full::new(Bytes::from("404 Not Found")))
        .unwrap_or_else(|e| {
            log_build_error("404", &e);
            Response::new(Full::new(Bytes::from("404 Not Found")))
        })
}

/// Build 413 Payload Too Large response
pub fn build_413_response() -> Response<Full<Bytes>> {
    Response::builder()
        .status(413)
        .header("Content-Type", "text/plain; charset=utf-8")
        .body(Full::new(Bytes::from("413 Payload Too Large")))
        .unwrap_or_else(|e| {
            log_build_error("413", &e);
            Response::new(Full::new(Bytes::from("413 Payload Too Large")))
        })
}

/// Build 500 Internal Server Error response
pub fn build_500_response() -> Response<Full<Bytes>> {
    Response::builder()
        .status(500)
        .header("Content-Type", "text/plain; charset=utf-8")
        .body(Full::new(Bytes::from("500 Internal Server Error")))
        .unwrap_or_else(|e| {
            log_build_error("500", &e);
            Response::new(Full::new(Bytes::from("500 Internal Server Error")))
        })
}

/// Build 501 Not Implemented response
pub fn build_501_response() -> Response<Full<Bytes>> {
    Response::builder()
        .status(501)
        .header("Content-Type", "text/plain; charset=utf-8")
        .header("Allow", "GET, POST")
        .body(Full::new(Bytes::from("501 Not Implemented")))
        .unwrap_or_else(|e| {
            log_build_error("501", &e);
            Response::new(Full::new(Bytes::from("501 Not Implemented")))
        })
}

/// Exact body length of a buffered response
pub fn body_len(response: &Response<Full<Bytes>>) -> u64 {
    response.body().size_hint().exact().unwrap_or(0)
}

/// HTTP version as it appears in a request line
pub fn version_str(version: Version) -> &'static str {
    match version {
        Version::HTTP_10 => "1.0",
        Version::HTTP_2 => "2",
        _ => "1.1",
    }
}

/// Log response build error
fn log_build_error(status: &str, error: &hyper::http::Error) {
    crate::logger::log_error(&format!("Failed to build {status} response: {error}"));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_html_response_sets_charset() {
        let response = build_html_response("<html></html>");
        assert_eq!(response.status(), 200);
        let content_type = response
            .headers()
            .get("Content-Type")
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default();
        assert_eq!(content_type, "text/html; charset=utf-8");
        assert_eq!(body_len(&response), 13);
    }

    #[test]
    fn test_json_response() {
        let response = build_json_response(&vec!["a.txt", "sub/b.txt"]);
        assert_eq!(response.status(), 200);
        let content_type = response
            .headers()
            .get("Content-Type")
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default();
        assert_eq!(content_type, "application/json; charset=utf-8");
    }

    #[test]
    fn test_error_statuses() {
        assert_eq!(build_404_response().status(), 404);
        assert_eq!(build_413_response().status(), 413);
        assert_eq!(build_500_response().status(), 500);
        assert_eq!(build_501_response().status(), 501);
    }

    #[test]
    fn test_501_advertises_supported_methods() {
        let response = build_501_response();
        let allow = response
            .headers()
            .get("Allow")
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default();
        assert_eq!(allow, "GET, POST");
    }

    #[test]
    fn test_version_str() {
        assert_eq!(version_str(Version::HTTP_11), "1.1");
        assert_eq!(version_str(Version::HTTP_10), "1.0");
        assert_eq!(version_str(Version::HTTP_2), "2");
    }
}
