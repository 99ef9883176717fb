// Listener module
// Binds the server socket and classifies bind failures

use socket2::{Domain, Protocol, Socket, Type};
use std::fmt;
use std::io;
use std::net::SocketAddr;
use tokio::net::TcpListener;

/// Fatal error raised before the server starts accepting connections
#[derive(Debug)]
pub enum StartupError {
    /// Another process is already listening on the port
    PortInUse { port: u16 },
    /// Any other failure to create or bind the socket
    Bind { addr: SocketAddr, source: io::Error },
}

impl fmt::Display for StartupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PortInUse { port } => write!(f, "port {port} is already in use"),
            Self::Bind { addr, source } => write!(f, "failed to bind {addr}: {source}"),
        }
    }
}

impl std::error::Error for StartupError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::PortInUse { .. } => None,
            Self::Bind { source, .. } => Some(source),
        }
    }
}

/// Create the server's `TcpListener`.
///
/// `SO_REUSEADDR` is set on unix so a restarted server can rebind while old
/// connections sit in `TIME_WAIT`. `SO_REUSEPORT` is never set: a second
/// instance must fail with [`StartupError::PortInUse`].
pub fn create_listener(addr: SocketAddr) -> Result<TcpListener, StartupError> {
    bind_socket(addr).map_err(|e| classify_bind_error(addr, e))
}

fn bind_socket(addr: SocketAddr) -> io::Result<TcpListener> {
    let domain = if addr.is_ipv4() {
        Domain::IPV4
    } else {
        Domain::IPV6
    };

    let socket = Socket::new(domain, Type::STREAM, Some(Protocol::TCP))?;

    #[cfg(unix)]
    socket.set_reuse_address(true)?;

    // Set non-blocking mode for async compatibility
    socket.set_nonblocking(true)?;
    socket.bind(&addr.into())?;
    socket.listen(128)?;

    let std_listener: std::net::TcpListener = socket.into();
    TcpListener::from_std(std_listener)
}

fn classify_bind_error(addr: SocketAddr, err: io::Error) -> StartupError {
    if err.kind() == io::ErrorKind::AddrInUse {
        StartupError::PortInUse { port: addr.port() }
    } else {
        StartupError::Bind { addr, source: err }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_binds_free_port() {
        let listener = create_listener("127.0.0.1:0".parse().unwrap()).unwrap();
        assert_ne!(listener.local_addr().unwrap().port(), 0);
    }

    #[tokio::test]
    async fn test_second_bind_reports_port_in_use() {
        let first = create_listener("127.0.0.1:0".parse().unwrap()).unwrap();
        let addr = first.local_addr().unwrap();

        match create_listener(addr) {
            Err(StartupError::PortInUse { port }) => assert_eq!(port, addr.port()),
            other => panic!("expected PortInUse, got {other:?}"),
        }
    }

    #[test]
    fn test_classify_other_errors() {
        let addr: SocketAddr = "127.0.0.1:8086".parse().unwrap();
        let err = classify_bind_error(
            addr,
            io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        );
        assert!(matches!(err, StartupError::Bind { .. }));
        assert_eq!(err.to_string(), "failed to bind 127.0.0.1:8086: denied");
    }

    #[test]
    fn test_classify_addr_in_use() {
        let addr: SocketAddr = "0.0.0.0:8086".parse().unwrap();
        let err = classify_bind_error(addr, io::Error::from(io::ErrorKind::AddrInUse));
        assert!(matches!(err, StartupError::PortInUse { port: 8086 }));
    }
}
