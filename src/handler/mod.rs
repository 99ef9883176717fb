//! Request handler module
//!
//! Routes requests to one of the serving roots and answers them with the
//! static-file responder.

pub mod router;
pub mod static_files;

// Re-export main entry point
pub use router::handle_request;
