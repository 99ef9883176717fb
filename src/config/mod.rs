// Configuration module entry point
// Fixed server configuration, resolved once at startup and shared read-only

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_PORT: u16 = 8086;
pub const TEST_PAGES_DIR_NAME: &str = "test-pages";
pub const DIST_WIDGET_DIR_NAME: &str = "dist-widget";

/// Seconds a single connection may take before it is dropped
const CONNECTION_TIMEOUT_SECS: u64 = 30;

/// Serving root selected by the request path prefix
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mount {
    TestPages,
    DistWidget,
    ProjectRoot,
}

/// Immutable server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: IpAddr,
    pub port: u16,
    pub project_root: PathBuf,
    pub test_pages_dir: PathBuf,
    pub dist_widget_dir: PathBuf,
    pub index_files: Vec<String>,
    pub connection_timeout: Duration,
    pub server_name: String,
}

impl ServerConfig {
    /// Build the configuration for a given project root
    pub fn for_project_root(project_root: impl Into<PathBuf>) -> Self {
        let project_root = project_root.into();
        Self {
            host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: DEFAULT_PORT,
            test_pages_dir: project_root.join(TEST_PAGES_DIR_NAME),
            dist_widget_dir: project_root.join(DIST_WIDGET_DIR_NAME),
            project_root,
            index_files: vec!["index.html".to_string(), "index.htm".to_string()],
            connection_timeout: Duration::from_secs(CONNECTION_TIMEOUT_SECS),
            server_name: format!("{}/{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION")),
        }
    }

    /// Resolve the configuration relative to where the server program lives.
    ///
    /// The server package sits one level below the project it serves, so the
    /// project root is the parent of the package directory.
    pub fn discover() -> Self {
        Self::for_project_root(project_root_from(Path::new(env!("CARGO_MANIFEST_DIR"))))
    }

    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Directory backing a mount
    pub fn mount_dir(&self, mount: Mount) -> &Path {
        match mount {
            Mount::TestPages => &self.test_pages_dir,
            Mount::DistWidget => &self.dist_widget_dir,
            Mount::ProjectRoot => &self.project_root,
        }
    }
}

fn project_root_from(package_dir: &Path) -> PathBuf {
    package_dir
        .parent()
        .map_or_else(|| package_dir.to_path_buf(), Path::to_path_buf)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_under_project_root() {
        let cfg = ServerConfig::for_project_root("/work/widget");
        assert_eq!(cfg.project_root, Path::new("/work/widget"));
        assert_eq!(cfg.test_pages_dir, Path::new("/work/widget/test-pages"));
        assert_eq!(cfg.dist_widget_dir, Path::new("/work/widget/dist-widget"));
    }

    #[test]
    fn test_fixed_listen_address() {
        let cfg = ServerConfig::for_project_root("/tmp");
        assert_eq!(cfg.socket_addr(), "0.0.0.0:8086".parse::<SocketAddr>().unwrap());
    }

    #[test]
    fn test_mount_dir() {
        let cfg = ServerConfig::for_project_root("/p");
        assert_eq!(cfg.mount_dir(Mount::TestPages), Path::new("/p/test-pages"));
        assert_eq!(cfg.mount_dir(Mount::DistWidget), Path::new("/p/dist-widget"));
        assert_eq!(cfg.mount_dir(Mount::ProjectRoot), Path::new("/p"));
    }

    #[test]
    fn test_project_root_is_parent_of_package() {
        assert_eq!(
            project_root_from(Path::new("/work/widget/test-server")),
            Path::new("/work/widget")
        );
        assert_eq!(project_root_from(Path::new("/")), Path::new("/"));
    }
}
