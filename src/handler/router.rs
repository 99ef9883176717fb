//! Request routing dispatch module
//!
//! Entry point for HTTP request processing: method check, prefix rewrite,
//! delegation to the static-file responder and response finalization.

use crate::config::{Mount, ServerConfig};
use crate::handler::static_files;
use crate::http;
use crate::logger::{self, AccessLogEntry};
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::header::{HeaderValue, CONTENT_LENGTH, IF_MODIFIED_SINCE, IF_NONE_MATCH, SERVER};
use hyper::{Method, Request, Response, StatusCode};
use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;

pub const TEST_PAGES_PREFIX: &str = "/test-pages/";
pub const DIST_WIDGET_PREFIX: &str = "/dist-widget/";

/// Request context encapsulating information needed for request processing
pub struct RequestContext<'a> {
    /// Path as sent by the client, before any prefix rewrite
    pub path: &'a str,
    pub query: Option<&'a str>,
    pub is_head: bool,
    pub if_none_match: Option<&'a str>,
    pub if_modified_since: Option<&'a str>,
}

/// Main entry point for HTTP request handling
pub async fn handle_request<B>(
    req: Request<B>,
    config: Arc<ServerConfig>,
    peer_addr: SocketAddr,
) -> Result<Response<Full<Bytes>>, Infallible> {
    let method = req.method();
    let is_head = *method == Method::HEAD;

    let mut response = if *method == Method::GET || is_head {
        let ctx = RequestContext {
            path: req.uri().path(),
            query: req.uri().query(),
            is_head,
            if_none_match: header_str(&req, IF_NONE_MATCH.as_str()),
            if_modified_since: header_str(&req, IF_MODIFIED_SINCE.as_str()),
        };
        let (mount, relative_path) = route(ctx.path);
        static_files::serve(
            &ctx,
            config.mount_dir(mount),
            relative_path,
            &config.index_files,
        )
        .await
    } else {
        let message = format!("Unsupported method ('{method}')");
        http::build_error_response(StatusCode::NOT_IMPLEMENTED, Some(message.as_str()), false)
    };

    finalize_headers(&mut response, &config.server_name);

    let mut entry = AccessLogEntry::new(
        peer_addr.ip().to_string(),
        method.to_string(),
        req.uri().to_string(),
    );
    entry.http_version = format!("{:?}", req.version());
    entry.status = response.status().as_u16();
    entry.body_bytes = response
        .headers()
        .get(CONTENT_LENGTH)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse().ok());
    logger::log_access(&entry);

    Ok(response)
}

/// Select the serving root for a request path and strip its prefix.
///
/// `/test-pages/` and `/dist-widget/` are removed whole; any other path is
/// served from the project root unchanged.
pub fn route(path: &str) -> (Mount, &str) {
    if let Some(rest) = path.strip_prefix(TEST_PAGES_PREFIX) {
        (Mount::TestPages, rest)
    } else if let Some(rest) = path.strip_prefix(DIST_WIDGET_PREFIX) {
        (Mount::DistWidget, rest)
    } else {
        (Mount::ProjectRoot, path)
    }
}

/// Last step before a response leaves the handler, applied to every response
fn finalize_headers(response: &mut Response<Full<Bytes>>, server_name: &str) {
    if let Ok(value) = HeaderValue::from_str(server_name) {
        response.headers_mut().insert(SERVER, value);
    }
    http::apply_cors_headers(response);
}

fn header_str<'a, B>(req: &'a Request<B>, name: &str) -> Option<&'a str> {
    req.headers().get(name).and_then(|v| v.to_str().ok())
}
