// Application state module
// Shared read-only state, constructed once at startup

use std::path::PathBuf;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use super::types::Config;
use crate::api::DispatchTable;

/// Application state shared by all connection tasks.
///
/// Everything here is immutable after startup, so request handlers need no
/// cross-request locking.
pub struct AppState {
    pub config: Config,
    /// Canonical working directory; root for all relative path resolution.
    pub root: PathBuf,
    /// Fixed path -> API operation mapping.
    pub dispatch: DispatchTable,

    // Cached config value for lock-free access on the request path
    pub cached_access_log: Arc<AtomicBool>,
}

impl AppState {
    /// Resolve the working directory and build the dispatch table.
    pub fn new(config: Config) -> std::io::Result<Self> {
        let root = std::env::current_dir()?.canonicalize()?;
        Ok(Self::with_root(config, root))
    }

    /// Build state rooted at an explicit directory.
    ///
    /// `root` must already be canonical; path containment checks compare
    /// against it with a plain prefix test.
    pub fn with_root(config: Config, root: PathBuf) -> Self {
        let cached_access_log = Arc::new(AtomicBool::new(config.logging.access_log));
        Self {
            config,
            root,
            dispatch: DispatchTable::new(),
            cached_access_log,
        }
    }
}
