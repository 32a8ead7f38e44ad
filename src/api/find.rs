//! Recursive file enumeration backing `POST /find`.

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::logger;

/// List every regular file under `root.join(dir)`, recursively.
///
/// `root` must be canonical. Returned paths are relative to `root` and use
/// forward slashes on every platform. A target that does not exist, is not
/// a directory, or resolves outside `root` yields an empty list rather than
/// an error, matching glob-style "no matches" semantics.
pub fn list_files(root: &Path, dir: &str) -> Vec<String> {
    let Some(target) = resolve_target(root, dir) else {
        return Vec::new();
    };

    let mut files = Vec::new();
    for entry in WalkDir::new(&target).into_iter().filter_map(Result::ok) {
        if !entry.file_type().is_file() {
            continue;
        }
        let Ok(rel) = entry.path().strip_prefix(root) else {
            continue;
        };
        files.push(to_forward_slashes(rel));
    }
    files
}

/// Canonicalize `root.join(dir)` and require that it is a directory that
/// stays under `root`. An input escaping the root via `..` (or a symlinked
/// parent) is sandboxed: the caller gets `None` and the request produces an
/// empty result.
fn resolve_target(root: &Path, dir: &str) -> Option<PathBuf> {
    let target = root.join(dir).canonicalize().ok()?;
    if !target.starts_with(root) {
        logger::log_warning(&format!(
            "Enumeration target escapes the working directory: {dir}"
        ));
        return None;
    }
    if !target.is_dir() {
        return None;
    }
    Some(target)
}

fn to_forward_slashes(path: &Path) -> String {
    path.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn scratch_root() -> (TempDir, PathBuf) {
        let dir = TempDir::new().expect("create temp dir");
        // TempDir may live under a symlinked parent (e.g. /tmp on macOS)
        let root = dir.path().canonicalize().expect("canonicalize temp dir");
        (dir, root)
    }

    fn touch(path: &Path) {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("create parent dirs");
        }
        fs::write(path, b"x").expect("write file");
    }

    #[test]
    fn test_lists_files_recursively() {
        let (_guard, root) = scratch_root();
        touch(&root.join("a.txt"));
        touch(&root.join("sub/b.txt"));

        let mut files = list_files(&root, ".");
        files.sort();
        assert_eq!(files, ["a.txt", "sub/b.txt"]);
    }

    #[test]
    fn test_subdirectory_target() {
        let (_guard, root) = scratch_root();
        touch(&root.join("a.txt"));
        touch(&root.join("sub/b.txt"));
        touch(&root.join("sub/deep/c.txt"));

        let mut files = list_files(&root, "sub");
        files.sort();
        assert_eq!(files, ["sub/b.txt", "sub/deep/c.txt"]);
    }

    #[test]
    fn test_missing_directory_is_empty() {
        let (_guard, root) = scratch_root();
        touch(&root.join("a.txt"));

        assert!(list_files(&root, "nonexistent_dir").is_empty());
    }

    #[test]
    fn test_directories_without_files_is_empty() {
        let (_guard, root) = scratch_root();
        fs::create_dir_all(root.join("only/dirs/here")).expect("create dirs");

        assert!(list_files(&root, "only").is_empty());
    }

    #[test]
    fn test_regular_file_target_is_empty() {
        let (_guard, root) = scratch_root();
        touch(&root.join("a.txt"));

        assert!(list_files(&root, "a.txt").is_empty());
    }

    #[test]
    fn test_escape_outside_root_is_empty() {
        let (_guard, parent) = scratch_root();
        touch(&parent.join("outside.txt"));
        let root = parent.join("inner");
        fs::create_dir(&root).expect("create inner root");
        touch(&root.join("inside.txt"));

        assert!(list_files(&root, "..").is_empty());
        assert!(list_files(&root, "../").is_empty());
        assert_eq!(list_files(&root, "."), ["inside.txt"]);
    }

    #[test]
    fn test_returned_paths_are_regular_files() {
        let (_guard, root) = scratch_root();
        touch(&root.join("a.txt"));
        touch(&root.join("sub/b.txt"));
        fs::create_dir_all(root.join("sub/empty")).expect("create dirs");

        for rel in list_files(&root, ".") {
            assert!(root.join(&rel).is_file(), "{rel} should be a regular file");
        }
    }
}
