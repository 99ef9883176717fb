// Server module entry point
// Listener setup, signal handling, the accept loop and per-connection serving

pub mod connection;
pub mod listener;
pub mod signal;

// `loop` is a keyword, so the file is mounted as `server_loop`
#[path = "loop.rs"]
pub mod server_loop;

// Re-export commonly used items
pub use listener::{create_listener, StartupError};
pub use server_loop::run_server_loop;
pub use signal::{start_signal_handler, Shutdown};
