use std::process::ExitCode;
use std::sync::Arc;

mod config;
mod handler;
mod http;
mod logger;
mod server;

use server::StartupError;

/// Exit status when the listening port is taken by another process
const EXIT_PORT_IN_USE: u8 = 1;

fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    let cfg = config::ServerConfig::discover();

    // One request at a time, so a single-threaded runtime is enough
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    runtime.block_on(async_main(cfg))
}

async fn async_main(cfg: config::ServerConfig) -> Result<ExitCode, Box<dyn std::error::Error>> {
    let shutdown = server::Shutdown::new();
    server::start_signal_handler(shutdown.clone())?;
    run(cfg, shutdown).await
}

/// Bind, serve until `shutdown` fires, and map the outcome to an exit status
async fn run(
    cfg: config::ServerConfig,
    shutdown: server::Shutdown,
) -> Result<ExitCode, Box<dyn std::error::Error>> {
    logger::log_server_start(&cfg);

    let listener = match server::create_listener(cfg.socket_addr()) {
        Ok(listener) => listener,
        Err(StartupError::PortInUse { port }) => {
            logger::log_port_in_use(port);
            return Ok(ExitCode::from(EXIT_PORT_IN_USE));
        }
        Err(e) => {
            logger::log_error(&e.to_string());
            return Err(e.into());
        }
    };

    server::run_server_loop(listener, Arc::new(cfg), shutdown).await;

    logger::log_server_stopped();
    Ok(ExitCode::SUCCESS)
}
