// HTTP client for the control server
//
// Provides RemoteClient for the CLI to reach the automation API. Every
// method returns the protocol envelope, including on transport failure.

mod remote_client;

pub use remote_client::{RemoteClient, DEFAULT_BASE_URL, SERVER_UNREACHABLE};
