// Wire protocol shared by the client and the server
//
// Every endpoint, on every outcome, answers with the same envelope shape.
// Request bodies are small typed structs so both sides agree on field names
// and the server can validate at the routing boundary.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Route table shared by the server router and the client.
pub mod paths {
    pub const STATUS: &str = "/api/status";
    pub const SCREEN_READ: &str = "/api/screen/read";
    pub const MOUSE_MOVE: &str = "/api/mouse/move";
    pub const MOUSE_CLICK: &str = "/api/mouse/click";
    pub const KEYBOARD_TYPE: &str = "/api/keyboard/type";
    pub const KEYBOARD_PRESS: &str = "/api/keyboard/press";
    pub const BROWSER_OPEN: &str = "/api/browser/open";
    pub const COMMAND_EXECUTE: &str = "/api/command/execute";
}

/// Per-character delay applied when a type request omits `interval`.
pub const DEFAULT_TYPE_INTERVAL: f64 = 0.05;

/// Uniform response body for every endpoint.
///
/// Failures are reported through `success=false`, not through HTTP status
/// codes, so callers only ever deal with this one shape. `data` and
/// `timestamp` default on deserialization to tolerate terse peers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Envelope {
    /// Whether the operation succeeded
    pub success: bool,
    /// Human-readable description of the outcome; never empty
    pub message: String,
    /// Operation payload; serialized as `{}` when there is none
    #[serde(default)]
    pub data: Map<String, Value>,
    /// Seconds since the Unix epoch, taken at construction
    #[serde(default)]
    pub timestamp: f64,
}

impl Envelope {
    pub fn success(message: impl Into<String>) -> Self {
        Self::build(true, message)
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self::build(false, message)
    }

    fn build(success: bool, message: impl Into<String>) -> Self {
        Self {
            success,
            message: message.into(),
            data: Map::new(),
            timestamp: epoch_seconds(),
        }
    }

    /// Attach one `data` entry, builder-style.
    pub fn with_data(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.data.insert(key.to_string(), value.into());
        self
    }
}

fn epoch_seconds() -> f64 {
    Utc::now().timestamp_micros() as f64 / 1_000_000.0
}

/// Body for POST /api/mouse/move; both coordinates are required.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MouseMoveRequest {
    pub x: i32,
    pub y: i32,
}

/// Body for POST /api/mouse/click.
///
/// A position is honored only when both `x` and `y` are present; otherwise
/// the click lands at the current pointer position. `button` defaults to
/// "left" server-side.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MouseClickRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y: Option<i32>,
    /// "left", "right" or "middle" (case-insensitive)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub button: Option<String>,
}

/// Body for POST /api/keyboard/type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeTextRequest {
    pub text: String,
    /// Per-character delay in seconds; defaults to [`DEFAULT_TYPE_INTERVAL`]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interval: Option<f64>,
}

/// Body for POST /api/keyboard/press.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PressKeyRequest {
    pub key: String,
}

/// Body for POST /api/browser/open.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OpenBrowserRequest {
    pub url: String,
}

/// Body for POST /api/command/execute.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExecuteCommandRequest {
    pub command: String,
}
