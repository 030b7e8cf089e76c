// Remoto - Remote desktop control over HTTP
// Library exports

pub mod cli;
pub mod client; // HTTP client used by the CLI
pub mod driver; // Desktop automation backends
pub mod exec; // Bounded shell execution
pub mod protocol; // Wire types shared by client and server
pub mod server; // HTTP control server
