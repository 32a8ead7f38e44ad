//! HTTP protocol layer module
//!
//! Response builders and MIME detection, decoupled from routing logic.

pub mod mime;
pub mod response;

// Re-export commonly used builders
pub use response::{
    body_len, build_404_response, build_413_response, build_500_response, build_501_response,
    build_file_response, build_html_response, build_json_response, version_str,
};
