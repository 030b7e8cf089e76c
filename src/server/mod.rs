// Remoto - Control Server Module
// HTTP surface over the desktop automation driver

mod handlers;

pub use handlers::create_router;

use anyhow::{Context, Result};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tower_http::trace::TraceLayer;

use crate::driver::DesktopDriver;
use crate::exec::DEFAULT_EXEC_TIMEOUT;

/// Configuration for the HTTP server
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (e.g., "127.0.0.1:8080")
    pub bind_address: String,
    /// Upper bound for one shell command, in seconds
    pub exec_timeout_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: "127.0.0.1:8080".to_string(),
            exec_timeout_secs: DEFAULT_EXEC_TIMEOUT.as_secs(),
        }
    }
}

/// Main control server structure
pub struct ControlServer {
    /// Automation driver; one lock because the desktop is one resource
    driver: Mutex<Box<dyn DesktopDriver>>,
    /// Backend name, copied out so status reports need no lock
    driver_name: &'static str,
    /// Parsed bind address
    addr: SocketAddr,
    /// Upper bound for one shell command
    exec_timeout: Duration,
}

impl ControlServer {
    /// Create a new control server
    pub fn new(config: ServerConfig, driver: Box<dyn DesktopDriver>) -> Result<Self> {
        let addr: SocketAddr = config
            .bind_address
            .parse()
            .with_context(|| format!("invalid bind address: {}", config.bind_address))?;

        let driver_name = driver.name();

        Ok(Self {
            driver: Mutex::new(driver),
            driver_name,
            addr,
            exec_timeout: Duration::from_secs(config.exec_timeout_secs),
        })
    }

    /// Start the HTTP server
    pub async fn serve(self) -> Result<()> {
        let addr = self.addr;

        // Create application state
        let app_state = Arc::new(self);

        // Build router
        let app = create_router(app_state).layer(TraceLayer::new_for_http());

        tracing::info!("Starting remoto control server on {}", addr);

        // Start server
        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .with_context(|| format!("failed to bind {addr}"))?;
        axum::serve(listener, app).await?;

        Ok(())
    }

    /// Get reference to the automation driver
    pub fn driver(&self) -> &Mutex<Box<dyn DesktopDriver>> {
        &self.driver
    }

    /// Get the active backend name
    pub fn driver_name(&self) -> &'static str {
        self.driver_name
    }

    /// Get the port the server binds to
    pub fn port(&self) -> u16 {
        self.addr.port()
    }

    /// Get the shell command timeout
    pub fn exec_timeout(&self) -> Duration {
        self.exec_timeout
    }
}
