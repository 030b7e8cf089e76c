// Desktop automation backends
//
// Mouse, keyboard, screen and browser control sit behind the DesktopDriver
// trait so the server does not care whether a real desktop is attached.
// Button and key names are parsed once, before any backend call, so every
// backend receives validated values and failure messages stay uniform.

mod desktop;
mod keymap;
mod simulated;

pub use desktop::XdotoolDriver;
pub use keymap::{Key, MouseButton};
pub use simulated::{RecordedAction, SimulatedDriver};

use async_trait::async_trait;
use std::fmt;
use std::time::Duration;
use thiserror::Error;

/// Errors surfaced by automation backends.
#[derive(Debug, Error)]
pub enum DriverError {
    #[error("unsupported mouse button: {0:?} (expected left, right or middle)")]
    UnsupportedButton(String),

    #[error("unsupported key: {0:?}")]
    UnsupportedKey(String),

    #[error("automation backend unavailable: {0}")]
    Unavailable(String),

    #[error("{tool} failed: {detail}")]
    Backend { tool: &'static str, detail: String },

    #[error("failed to invoke automation backend: {0}")]
    Io(#[from] std::io::Error),
}

/// Screen dimensions reported by a driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenSize {
    pub width: u32,
    pub height: u32,
}

impl fmt::Display for ScreenSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// One attached desktop, drivable from the server.
///
/// Implementations must be safe to share behind a lock; the server
/// serializes all calls because the desktop is a single shared resource.
#[async_trait]
pub trait DesktopDriver: Send + Sync {
    /// Short backend name for status reporting
    fn name(&self) -> &'static str;

    async fn screen_size(&self) -> Result<ScreenSize, DriverError>;

    async fn move_mouse(&self, x: i32, y: i32) -> Result<(), DriverError>;

    /// Click at `position`, or at the current pointer position when `None`.
    async fn click(
        &self,
        position: Option<(i32, i32)>,
        button: MouseButton,
    ) -> Result<(), DriverError>;

    /// Type `text` with a fixed delay between characters.
    async fn type_text(&self, text: &str, interval: Duration) -> Result<(), DriverError>;

    async fn press_key(&self, key: Key) -> Result<(), DriverError>;

    /// Open `url` in the platform's default browser.
    async fn open_url(&self, url: &str) -> Result<(), DriverError>;
}
