// remotod - HTTP control server for the local desktop

use anyhow::Result;
use clap::{Parser, ValueEnum};
use tracing_subscriber::prelude::*;

use remoto::driver::{DesktopDriver, SimulatedDriver, XdotoolDriver};
use remoto::exec::DEFAULT_EXEC_TIMEOUT;
use remoto::server::{ControlServer, ServerConfig};

#[derive(Debug, Parser)]
#[command(
    name = "remotod",
    about = "HTTP control server for the local desktop",
    version
)]
struct Args {
    /// Bind address
    #[arg(long, default_value = "127.0.0.1:8080")]
    bind: String,

    /// Automation backend
    #[arg(long, value_enum, default_value_t = DriverChoice::Auto)]
    driver: DriverChoice,

    /// Shell command timeout in seconds
    #[arg(long, default_value_t = DEFAULT_EXEC_TIMEOUT.as_secs())]
    exec_timeout: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum DriverChoice {
    /// Use the desktop backend when available, otherwise simulate
    Auto,
    /// Drive the real desktop through xdotool
    Desktop,
    /// Record actions without touching the desktop
    Simulated,
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    let args = Args::parse();

    let driver = select_driver(args.driver)?;
    let server_config = ServerConfig {
        bind_address: args.bind.clone(),
        exec_timeout_secs: args.exec_timeout,
    };
    let server = ControlServer::new(server_config, driver)?;

    print_banner(&args.bind, server.driver_name());

    // Set up graceful shutdown handling
    let server_handle = tokio::spawn(async move { server.serve().await });

    // Wait for shutdown signal (Ctrl+C)
    tokio::select! {
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Received SIGINT, shutting down gracefully");
        }
        result = server_handle => {
            match result {
                Ok(Ok(())) => {
                    tracing::info!("Server exited normally");
                }
                Ok(Err(e)) => {
                    tracing::error!(error = %e, "Server exited with error");
                    anyhow::bail!("server error: {e}");
                }
                Err(e) => {
                    tracing::error!(error = %e, "Server task panicked");
                    anyhow::bail!("server task panicked: {e}");
                }
            }
        }
    }

    tracing::info!("Shutdown complete");

    Ok(())
}

fn select_driver(choice: DriverChoice) -> Result<Box<dyn DesktopDriver>> {
    match choice {
        DriverChoice::Desktop => Ok(Box::new(XdotoolDriver::new()?)),
        DriverChoice::Simulated => Ok(Box::new(SimulatedDriver::new())),
        DriverChoice::Auto => {
            if XdotoolDriver::is_available() {
                Ok(Box::new(XdotoolDriver::new()?))
            } else {
                tracing::warn!("xdotool not found, falling back to the simulated driver");
                Ok(Box::new(SimulatedDriver::new()))
            }
        }
    }
}

fn init_tracing() {
    // Default: INFO level, can be overridden with RUST_LOG env var
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Bridge log crate -> tracing (for dependencies using log crate)
    tracing_log::LogTracer::init().ok();
}

fn print_banner(bind: &str, driver: &str) {
    println!("================================================================");
    println!("remotod v{} - remote desktop control server", env!("CARGO_PKG_VERSION"));
    println!("================================================================");
    println!("Listening on http://{bind} (driver: {driver})");
    println!();
    println!("Endpoints:");
    println!("  GET  /api/status           - Server status");
    println!("  GET  /api/screen/read      - Screen dimensions");
    println!("  POST /api/mouse/move       - Move mouse (x, y)");
    println!("  POST /api/mouse/click      - Click mouse (x, y, button)");
    println!("  POST /api/keyboard/type    - Type text (text, interval)");
    println!("  POST /api/keyboard/press   - Press key (key)");
    println!("  POST /api/browser/open     - Open URL (url)");
    println!("  POST /api/command/execute  - Run shell command (command)");
    println!("================================================================");
}
