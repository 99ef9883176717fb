// Server loop module
// Sequential accept-serve loop that runs until shutdown is requested

use std::sync::Arc;
use tokio::net::TcpListener;

use super::connection::serve_connection;
use super::signal::Shutdown;
use crate::config::ServerConfig;
use crate::logger;

/// Accept and serve connections one at a time until `shutdown` fires.
///
/// A shutdown request also interrupts the connection currently being
/// served. The listener is owned by this function and released when it
/// returns.
pub async fn run_server_loop(listener: TcpListener, config: Arc<ServerConfig>, shutdown: Shutdown) {
    loop {
        tokio::select! {
            () = shutdown.wait() => break,

            accept_result = listener.accept() => {
                match accept_result {
                    Ok((stream, peer_addr)) => {
                        tokio::select! {
                            () = shutdown.wait() => break,
                            () = serve_connection(stream, peer_addr, Arc::clone(&config)) => {}
                        }
                    }
                    Err(e) => logger::log_error(&format!("Failed to accept connection: {e}")),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::SocketAddr;
    use std::time::Duration;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpStream;

    async fn raw_request(addr: SocketAddr, method: &str, path: &str) -> String {
        let mut stream = TcpStream::connect(addr).await.unwrap();
        let request = format!("{method} {path} HTTP/1.1\r\nHost: localhost\r\n\r\n");
        stream.write_all(request.as_bytes()).await.unwrap();
        let mut response = Vec::new();
        stream.read_to_end(&mut response).await.unwrap();
        String::from_utf8(response).unwrap()
    }

    fn project() -> (tempfile::TempDir, Arc<ServerConfig>) {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("dist-widget")).unwrap();
        std::fs::write(dir.path().join("dist-widget/widget.js"), "window.widget = 1;").unwrap();
        let config = Arc::new(ServerConfig::for_project_root(dir.path()));
        (dir, config)
    }

    #[tokio::test]
    async fn test_serves_sequentially_until_shutdown() {
        let (_dir, config) = project();
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let shutdown = Shutdown::new();

        let server = run_server_loop(listener, config, shutdown.clone());
        let client = async {
            let ok = raw_request(addr, "GET", "/dist-widget/widget.js").await;
            let missing = raw_request(addr, "GET", "/dist-widget/missing.js").await;
            let post = raw_request(addr, "POST", "/dist-widget/widget.js").await;
            shutdown.trigger();
            (ok, missing, post)
        };

        let ((), (ok, missing, post)) =
            tokio::time::timeout(Duration::from_secs(10), async { tokio::join!(server, client) })
                .await
                .unwrap();

        assert!(ok.starts_with("HTTP/1.1 200 OK"), "{ok}");
        assert!(ok.ends_with("window.widget = 1;"));
        assert!(missing.starts_with("HTTP/1.1 404 Not Found"), "{missing}");
        assert!(post.starts_with("HTTP/1.1 501 Not Implemented"), "{post}");
        for response in [&ok, &missing, &post] {
            let lower = response.to_lowercase();
            assert!(lower.contains("access-control-allow-origin: *"));
            assert!(lower.contains("access-control-allow-methods: get, post, options"));
            assert!(lower.contains("access-control-allow-headers: content-type"));
        }
    }

    #[tokio::test]
    async fn test_shutdown_interrupts_idle_connection() {
        let (_dir, config) = project();
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let shutdown = Shutdown::new();

        let server = run_server_loop(listener, config, shutdown.clone());
        let client = async {
            // connected but never sends a request
            let stream = TcpStream::connect(addr).await.unwrap();
            tokio::time::sleep(Duration::from_millis(50)).await;
            shutdown.trigger();
            stream
        };

        let ((), _stream) =
            tokio::time::timeout(Duration::from_secs(5), async { tokio::join!(server, client) })
                .await
                .unwrap();
        assert!(TcpStream::connect(addr).await.is_err());
    }
}
