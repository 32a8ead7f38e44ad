//! Request routing dispatch module
//!
//! Entry point for HTTP request processing: decides per request whether to
//! serve the bootstrap page, delegate to static file serving, or run a
//! registered JSON operation.

use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Method, Request, Response};

use crate::api::{self, ApiOperation, DispatchTable};
use crate::config::AppState;
use crate::handler::static_files;
use crate::http;
use crate::logger::{self, AccessLogEntry};

/// Fixed HTML document served at `/`. References the client bootstrap
/// script; no filesystem lookup involved.
const HOME_PAGE: &str = r#"<!DOCTYPE html>
<html>
<head>
    <script type="module" src="main.js"></script>
</head>
</html>
"#;

/// Routing decision for a single request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteDecision {
    /// GET `/`: the synthetic bootstrap page, bypassing the filesystem.
    Home,
    /// Any other GET path: static file serving under the working directory.
    StaticFile,
    /// POST to a registered API path.
    Api(ApiOperation),
    /// POST to an unregistered path, or a method other than GET/POST.
    Unsupported,
}

/// Decide how to handle a request. Pure function of method, path and the
/// dispatch table; the URI path never includes query or fragment, so only
/// the exact path `/` selects the bootstrap page.
pub fn decide_route(method: &Method, path: &str, dispatch: &DispatchTable) -> RouteDecision {
    match *method {
        Method::GET => {
            if path == "/" {
                RouteDecision::Home
            } else {
                RouteDecision::StaticFile
            }
        }
        Method::POST => dispatch
            .lookup(path)
            .map_or(RouteDecision::Unsupported, RouteDecision::Api),
        _ => RouteDecision::Unsupported,
    }
}

/// Validate the Content-Length header and return 413 if it exceeds the
/// configured limit. A missing or unparsable header skips the check;
/// hyper still enforces the declared framing.
fn check_body_size<B>(req: &Request<B>, max_body_size: u64) -> Option<Response<Full<Bytes>>> {
    let content_length = req.headers().get("content-length")?;
    let size = content_length.to_str().ok()?.parse::<u64>().ok()?;
    if size > max_body_size {
        logger::log_warning(&format!(
            "Request body too large: {size} bytes (max: {max_body_size})"
        ));
        return Some(http::build_413_response());
    }
    None
}

/// Main entry point for HTTP request handling. Produces exactly one
/// response per request; handler failures are mapped to 500-class
/// responses here rather than propagated.
pub async fn handle_request<B>(
    req: Request<B>,
    state: Arc<AppState>,
    peer_addr: SocketAddr,
) -> Result<Response<Full<Bytes>>, Infallible>
where
    B: hyper::body::Body,
    B::Error: std::error::Error + Send + Sync + 'static,
{
    let method = req.method().clone();
    let path = req.uri().path().to_string();
    let query = req.uri().query().map(ToString::to_string);
    let version = req.version();

    let access_log = state
        .cached_access_log
        .load(std::sync::atomic::Ordering::Relaxed);
    let started = Instant::now();

    if let Some(resp) = check_body_size(&req, state.config.http.max_body_size) {
        return Ok(resp);
    }

    let response = match decide_route(&method, &path, &state.dispatch) {
        RouteDecision::Home => http::build_html_response(HOME_PAGE),
        RouteDecision::StaticFile => static_files::serve(&state.root, &path).await,
        RouteDecision::Api(op) => match api::handle_api_request(op, req, &state).await {
            Ok(resp) => resp,
            Err(e) => {
                logger::log_error(&format!("API request to {path} failed: {e}"));
                http::build_500_response()
            }
        },
        RouteDecision::Unsupported => http::build_501_response(),
    };

    if access_log {
        let mut entry = AccessLogEntry::new(peer_addr.ip().to_string(), method.to_string(), path);
        entry.query = query;
        entry.http_version = http::version_str(version).to_string();
        entry.status = response.status().as_u16();
        entry.body_bytes = http::body_len(&response);
        entry.request_time_us =
            u64::try_from(started.elapsed().as_micros()).unwrap_or(u64::MAX);
        logger::log_access(&entry);
    }

    Ok(response)
}
