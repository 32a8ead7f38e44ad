//! JSON API module
//!
//! POST endpoints are dispatched through an immutable path -> operation
//! mapping built once at startup. Operations form a closed enum with typed
//! input/output contracts rather than dynamically-registered handler
//! functions.

pub mod find;

use std::collections::HashMap;
use std::sync::Arc;

use http_body_util::{BodyExt, Full};
use hyper::body::Bytes;
use hyper::{Request, Response};

use crate::config::AppState;
use crate::http;

/// Supported API operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiOperation {
    /// Recursively list regular files under a directory (`POST /find`).
    Find,
}

/// Immutable mapping from request path to API operation.
///
/// Built once at startup, owned by [`AppState`] and read-only for the
/// server lifetime.
pub struct DispatchTable {
    routes: HashMap<&'static str, ApiOperation>,
}

impl DispatchTable {
    pub fn new() -> Self {
        let mut routes = HashMap::new();
        routes.insert("/find", ApiOperation::Find);
        Self { routes }
    }

    /// Exact, case-sensitive path lookup. No trailing-slash normalization.
    pub fn lookup(&self, path: &str) -> Option<ApiOperation> {
        self.routes.get(path).copied()
    }
}

impl Default for DispatchTable {
    fn default() -> Self {
        Self::new()
    }
}

/// Failure while processing a request to a registered API path.
///
/// These are not recovered into a well-formed result; the router maps them
/// to a 500-class response.
#[derive(Debug)]
pub enum ApiError {
    /// The request body could not be read in full (e.g. shorter than the
    /// declared Content-Length).
    Body(Box<dyn std::error::Error + Send + Sync>),
    /// The request body is not valid JSON for the operation's input type.
    Json(serde_json::Error),
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Body(e) => write!(f, "failed to read request body: {e}"),
            Self::Json(e) => write!(f, "invalid JSON payload: {e}"),
        }
    }
}

impl std::error::Error for ApiError {}

/// Run a dispatched operation against the request body.
///
/// Reads the whole body (hyper enforces Content-Length framing), parses it
/// as JSON and executes the operation. Successful responses are always
/// `application/json; charset=utf-8`.
pub async fn handle_api_request<B>(
    op: ApiOperation,
    req: Request<B>,
    state: &Arc<AppState>,
) -> Result<Response<Full<Bytes>>, ApiError>
where
    B: hyper::body::Body,
    B::Error: std::error::Error + Send + Sync + 'static,
{
    let body = req
        .collect()
        .await
        .map_err(|e| ApiError::Body(Box::new(e)))?
        .to_bytes();

    match op {
        ApiOperation::Find => {
            let dir: String = serde_json::from_slice(&body).map_err(ApiError::Json)?;
            let files = find::list_files(&state.root, &dir);
            Ok(http::build_json_response(&files))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_registered_path() {
        let table = DispatchTable::new();
        assert_eq!(table.lookup("/find"), Some(ApiOperation::Find));
    }

    #[test]
    fn test_lookup_is_exact_and_case_sensitive() {
        let table = DispatchTable::new();
        assert_eq!(table.lookup("/find/"), None);
        assert_eq!(table.lookup("/Find"), None);
        assert_eq!(table.lookup("/unknown"), None);
        assert_eq!(table.lookup("find"), None);
    }
}
