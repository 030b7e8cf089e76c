// Remote client implementation
//
// HTTP client that talks to the control server. Transport failures are
// folded into the envelope shape, so callers always get an envelope back
// and never have to branch on a second error type.

use anyhow::{Context, Result};
use reqwest::Client;
use serde::Serialize;
use std::time::Duration;
use tracing::debug;

use crate::protocol::{
    paths, Envelope, ExecuteCommandRequest, MouseClickRequest, MouseMoveRequest,
    OpenBrowserRequest, PressKeyRequest, TypeTextRequest,
};

/// Base URL used when none is supplied
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8080";

/// Fixed message carried by the envelope synthesized when the server
/// cannot be reached
pub const SERVER_UNREACHABLE: &str =
    "Cannot connect to the control server. Make sure it is running.";

/// Request timeout in seconds
const TIMEOUT_SECONDS: u64 = 5;

/// HTTP client for communicating with the control server
pub struct RemoteClient {
    base_url: String,
    client: Client,
}

impl RemoteClient {
    /// Create a client pointed at the default local server
    pub fn new() -> Result<Self> {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    /// Create a client pointed at an explicit base URL
    pub fn with_base_url(base_url: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(TIMEOUT_SECONDS))
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client,
        })
    }

    /// GET /api/status
    pub async fn status(&self) -> Envelope {
        self.get(paths::STATUS).await
    }

    /// GET /api/screen/read
    pub async fn read_screen(&self) -> Envelope {
        self.get(paths::SCREEN_READ).await
    }

    /// POST /api/mouse/move
    pub async fn move_mouse(&self, x: i32, y: i32) -> Envelope {
        self.post(paths::MOUSE_MOVE, &MouseMoveRequest { x, y }).await
    }

    /// POST /api/mouse/click
    pub async fn click(&self, position: Option<(i32, i32)>, button: Option<String>) -> Envelope {
        let (x, y) = match position {
            Some((x, y)) => (Some(x), Some(y)),
            None => (None, None),
        };
        self.post(paths::MOUSE_CLICK, &MouseClickRequest { x, y, button })
            .await
    }

    /// POST /api/keyboard/type
    pub async fn type_text(&self, text: &str, interval: Option<f64>) -> Envelope {
        self.post(
            paths::KEYBOARD_TYPE,
            &TypeTextRequest {
                text: text.to_string(),
                interval,
            },
        )
        .await
    }

    /// POST /api/keyboard/press
    pub async fn press_key(&self, key: &str) -> Envelope {
        self.post(
            paths::KEYBOARD_PRESS,
            &PressKeyRequest {
                key: key.to_string(),
            },
        )
        .await
    }

    /// POST /api/browser/open
    pub async fn open_browser(&self, url: &str) -> Envelope {
        self.post(
            paths::BROWSER_OPEN,
            &OpenBrowserRequest {
                url: url.to_string(),
            },
        )
        .await
    }

    /// POST /api/command/execute
    pub async fn execute_command(&self, command: &str) -> Envelope {
        self.post(
            paths::COMMAND_EXECUTE,
            &ExecuteCommandRequest {
                command: command.to_string(),
            },
        )
        .await
    }

    /// Get base URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn get(&self, path: &str) -> Envelope {
        let url = format!("{}{}", self.base_url, path);
        debug!(url = %url, "GET");
        self.finish(self.client.get(&url).send().await).await
    }

    async fn post<T: Serialize>(&self, path: &str, request: &T) -> Envelope {
        let url = format!("{}{}", self.base_url, path);
        debug!(url = %url, "POST");
        self.finish(self.client.post(&url).json(request).send().await)
            .await
    }

    /// Fold transport and decoding failures into the envelope shape.
    ///
    /// The HTTP status is deliberately ignored: the server reports errors
    /// through the body (including its 404 envelopes), and those pass
    /// through unchanged.
    async fn finish(&self, sent: reqwest::Result<reqwest::Response>) -> Envelope {
        let response = match sent {
            Ok(response) => response,
            Err(error) if error.is_connect() => {
                debug!("connection failed: {error}");
                return Envelope::failure(SERVER_UNREACHABLE);
            }
            Err(error) => return Envelope::failure(format!("Request failed: {error}")),
        };

        match response.json::<Envelope>().await {
            Ok(envelope) => envelope,
            Err(error) => Envelope::failure(format!("Invalid response from server: {error}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_base_url() {
        let client = RemoteClient::new().unwrap();
        assert_eq!(client.base_url(), "http://127.0.0.1:8080");
    }

    #[test]
    fn test_trailing_slash_is_trimmed() {
        let client = RemoteClient::with_base_url("http://10.0.0.5:9000/").unwrap();
        assert_eq!(client.base_url(), "http://10.0.0.5:9000");
    }
}
