// Connection handling module
// Serves one accepted TCP connection to completion

use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper_util::rt::TokioIo;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpStream;

use crate::config::ServerConfig;
use crate::handler;
use crate::logger;

/// Serve a single connection.
///
/// Keep-alive is disabled so the connection closes after one response and
/// the loop can move on to the next client. The whole exchange is bounded by
/// the configured connection timeout.
pub async fn serve_connection(stream: TcpStream, peer_addr: SocketAddr, config: Arc<ServerConfig>) {
    let io = TokioIo::new(stream);
    let timeout_duration = config.connection_timeout;

    let mut builder = http1::Builder::new();
    builder.keep_alive(false);

    let conn = builder.serve_connection(
        io,
        service_fn(move |req| {
            let config = Arc::clone(&config);
            async move { handler::handle_request(req, config, peer_addr).await }
        }),
    );

    match tokio::time::timeout(timeout_duration, conn).await {
        Ok(Ok(())) => {}
        Ok(Err(err)) => logger::log_connection_error(&peer_addr, &err),
        Err(_) => {
            logger::log_warning(&format!(
                "Connection from {peer_addr} timed out after {} seconds",
                timeout_duration.as_secs()
            ));
        }
    }
}
