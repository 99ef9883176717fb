//! Logger module
//!
//! Line-oriented logging for the test server:
//! - Startup banner and shutdown notice on stdout
//! - Access log lines on stderr
//! - Warnings and errors on stderr

mod format;

pub use format::AccessLogEntry;

use crate::config::ServerConfig;
use std::net::SocketAddr;

/// Write to info log
fn write_info(message: &str) {
    println!("{message}");
}

/// Write to error log
fn write_error(message: &str) {
    eprintln!("{message}");
}

pub fn log_server_start(config: &ServerConfig) {
    let port = config.port;
    write_info(&format!("Starting test server on port {port}"));
    write_info(&format!("Project root: {}", config.project_root.display()));
    write_info(&format!("Test pages: {}", config.test_pages_dir.display()));
    write_info(&format!("Widget files: {}", config.dist_widget_dir.display()));
    write_info("");
    write_info("Available test pages:");
    write_info(&format!(
        "  - Dynamic Test: http://localhost:{port}/test-pages/dynamic-test.html"
    ));
    write_info(&format!("  - Widget Files: http://localhost:{port}/dist-widget/"));
    write_info("");
    write_info("Press Ctrl+C to stop the server");
}

pub fn log_server_stopped() {
    write_info("\nServer stopped.");
}

/// Message shown when another process already holds the port
pub fn port_in_use_message(port: u16) -> String {
    format!(
        "Port {port} is already in use. Please stop the existing server or use a different port."
    )
}

pub fn log_port_in_use(port: u16) {
    write_info(&port_in_use_message(port));
}

pub fn log_access(entry: &AccessLogEntry) {
    write_error(&entry.format());
}

/// Log the status and message of an error response
pub fn log_http_error(status: u16, message: &str) {
    write_error(&format!("code {status}, message {message}"));
}

pub fn log_connection_error(peer_addr: &SocketAddr, err: &impl std::fmt::Debug) {
    write_error(&format!(
        "[ERROR] Failed to serve connection from {peer_addr}: {err:?}"
    ));
}

pub fn log_error(message: &str) {
    write_error(&format!("[ERROR] {message}"));
}

pub fn log_warning(message: &str) {
    write_error(&format!("[WARN] {message}"));
}
