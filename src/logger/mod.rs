//! Logger module
//!
//! Lifecycle, access and error logging for the server. Request bodies are
//! never logged.

mod format;

pub use format::AccessLogEntry;

use std::net::SocketAddr;
use std::path::Path;

use crate::config::Config;

pub fn log_server_start(addr: &SocketAddr, config: &Config, root: &Path) {
    println!("======================================");
    println!("serving from http://localhost:{}/", addr.port());
    println!("Listening on: http://{addr}");
    println!("Serving directory: {}", root.display());
    if let Some(workers) = config.server.workers {
        println!("Worker threads: {workers}");
    }
    println!("Using Tokio runtime for concurrency");
    println!("======================================\n");
}

pub fn log_connection_accepted(peer_addr: &SocketAddr) {
    println!("[Connection] Accepted from: {peer_addr}");
}

pub fn log_connection_error(err: &impl std::fmt::Debug) {
    eprintln!("[ERROR] Failed to serve connection: {err:?}");
}

pub fn log_error(message: &str) {
    eprintln!("[ERROR] {message}");
}

pub fn log_warning(message: &str) {
    eprintln!("[WARN] {message}");
}

/// Write one access log line
pub fn log_access(entry: &AccessLogEntry) {
    println!("{}", entry.to_common_log());
}
