//! Static file serving module
//!
//! Maps GET paths onto the working directory tree and serves file contents
//! with an extension-inferred content type.

use std::path::Path;

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::Response;
use tokio::fs;

use crate::http::{self, mime};
use crate::logger;

const INDEX_FILES: &[&str] = &["index.html", "index.htm"];

/// Serve `path` from the tree rooted at `root`. Missing files, unreadable
/// files and traversal attempts all come back as 404.
pub async fn serve(root: &Path, path: &str) -> Response<Full<Bytes>> {
    match resolve(root, path).await {
        Some((content, content_type)) => http::build_file_response(content, content_type),
        None => http::build_404_response(),
    }
}

/// Resolve a request path to file bytes and a content type.
///
/// `root` must be canonical; the resolved file is canonicalized and must
/// stay under it. Directory requests fall back to an index file.
pub async fn resolve(root: &Path, path: &str) -> Option<(Vec<u8>, &'static str)> {
    let relative = path.trim_start_matches('/');
    let mut file_path = root.join(relative);

    if file_path.is_dir() {
        for index in INDEX_FILES {
            let candidate = file_path.join(index);
            if candidate.is_file() {
                file_path = candidate;
                break;
            }
        }
    }

    // File not found is common (404), no need to log
    let canonical = file_path.canonicalize().ok()?;
    if !canonical.starts_with(root) {
        logger::log_warning(&format!(
            "Path traversal attempt blocked: {path} -> {}",
            canonical.display()
        ));
        return None;
    }
    if !canonical.is_file() {
        return None;
    }

    let content = match fs::read(&canonical).await {
        Ok(c) => c,
        Err(e) => {
            logger::log_error(&format!(
                "Failed to read file '{}': {e}",
                canonical.display()
            ));
            return None;
        }
    };

    let content_type = mime::get_content_type(canonical.extension().and_then(|e| e.to_str()));
    Some((content, content_type))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs as std_fs;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn scratch_root() -> (TempDir, PathBuf) {
        let dir = TempDir::new().expect("create temp dir");
        let root = dir.path().canonicalize().expect("canonicalize temp dir");
        (dir, root)
    }

    #[tokio::test]
    async fn test_resolve_file_with_content_type() {
        let (_guard, root) = scratch_root();
        std_fs::write(root.join("page.html"), "<html></html>").expect("write file");

        let (content, content_type) = resolve(&root, "/page.html").await.expect("file resolves");
        assert_eq!(content, b"<html></html>");
        assert_eq!(content_type, "text/html; charset=utf-8");
    }

    #[tokio::test]
    async fn test_resolve_nested_path() {
        let (_guard, root) = scratch_root();
        std_fs::create_dir_all(root.join("assets/js")).expect("create dirs");
        std_fs::write(root.join("assets/js/main.js"), "export {}").expect("write file");

        let (_, content_type) = resolve(&root, "/assets/js/main.js")
            .await
            .expect("file resolves");
        assert_eq!(content_type, "application/javascript");
    }

    #[tokio::test]
    async fn test_resolve_missing_file() {
        let (_guard, root) = scratch_root();
        assert!(resolve(&root, "/missing.txt").await.is_none());
    }

    #[tokio::test]
    async fn test_directory_falls_back_to_index() {
        let (_guard, root) = scratch_root();
        std_fs::create_dir(root.join("docs")).expect("create dir");
        std_fs::write(root.join("docs/index.html"), "docs home").expect("write file");

        let (content, content_type) = resolve(&root, "/docs").await.expect("index resolves");
        assert_eq!(content, b"docs home");
        assert_eq!(content_type, "text/html; charset=utf-8");
    }

    #[tokio::test]
    async fn test_directory_without_index_is_not_found() {
        let (_guard, root) = scratch_root();
        std_fs::create_dir(root.join("bare")).expect("create dir");

        assert!(resolve(&root, "/bare").await.is_none());
    }

    #[tokio::test]
    async fn test_traversal_outside_root_is_blocked() {
        let (_guard, outer) = scratch_root();
        std_fs::write(outer.join("secret.txt"), "secret").expect("write file");
        let root = outer.join("public");
        std_fs::create_dir(&root).expect("create serving root");

        assert!(resolve(&root, "/../secret.txt").await.is_none());
    }
}
