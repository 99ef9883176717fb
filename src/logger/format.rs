//! Access log line format
//!
//! One line per request in the classic simple-server layout:
//! `127.0.0.1 - - [16/Oct/2026 10:04:05] "GET /dist-widget/widget.js HTTP/1.1" 200 1532`

use chrono::Local;

/// Access log entry containing request/response information
#[derive(Debug, Clone)]
pub struct AccessLogEntry {
    /// Client IP address
    pub remote_addr: String,
    pub time: chrono::DateTime<Local>,
    pub method: String,
    /// Request target as sent, query included
    pub uri: String,
    /// e.g. `HTTP/1.1`
    pub http_version: String,
    pub status: u16,
    /// Declared body size, `-` in the log when unknown
    pub body_bytes: Option<usize>,
}

impl AccessLogEntry {
    /// Create a new access log entry with current timestamp
    pub fn new(remote_addr: String, method: String, uri: String) -> Self {
        Self {
            remote_addr,
            time: Local::now(),
            method,
            uri,
            http_version: "HTTP/1.1".to_string(),
            status: 200,
            body_bytes: None,
        }
    }

    pub fn format(&self) -> String {
        format!(
            "{} - - [{}] \"{} {} {}\" {} {}",
            self.remote_addr,
            self.time.format("%d/%b/%Y %H:%M:%S"),
            self.method,
            self.uri,
            self.http_version,
            self.status,
            self.body_bytes
                .map_or_else(|| "-".to_string(), |n| n.to_string()),
        )
    }
}
