//! HTTP protocol layer module
//!
//! Content types, cache validation, CORS headers and response builders,
//! independent of how requests are routed.

pub mod cache;
pub mod cors;
pub mod mime;
pub mod response;

// Re-export commonly used items
pub use cors::apply_cors_headers;
pub use response::{
    build_301_response, build_304_response, build_error_response, build_file_response,
    build_listing_response,
};
