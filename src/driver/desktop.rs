// X11 desktop backend
//
// Drives the pointer and keyboard through the xdotool utility, which keeps
// this crate free of display-server bindings. URLs are handed to the
// platform opener. Construction probes for the binary so the server can
// fall back to the simulated driver on hosts without it.

use async_trait::async_trait;
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;
use tracing::debug;

use super::{DesktopDriver, DriverError, Key, MouseButton, ScreenSize};

const XDOTOOL: &str = "xdotool";

pub struct XdotoolDriver;

impl XdotoolDriver {
    pub fn new() -> Result<Self, DriverError> {
        if Self::is_available() {
            Ok(Self)
        } else {
            Err(DriverError::Unavailable(format!(
                "{XDOTOOL} not found on PATH"
            )))
        }
    }

    /// Whether the xdotool binary answers on this host.
    pub fn is_available() -> bool {
        std::process::Command::new(XDOTOOL)
            .arg("--version")
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .map(|status| status.success())
            .unwrap_or(false)
    }

    async fn run(&self, args: &[String]) -> Result<String, DriverError> {
        debug!(?args, "invoking {XDOTOOL}");
        let output = Command::new(XDOTOOL).args(args).output().await?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            let detail = if stderr.is_empty() {
                format!("exit status {}", output.status)
            } else {
                stderr
            };
            return Err(DriverError::Backend {
                tool: XDOTOOL,
                detail,
            });
        }
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

#[async_trait]
impl DesktopDriver for XdotoolDriver {
    fn name(&self) -> &'static str {
        "xdotool"
    }

    async fn screen_size(&self) -> Result<ScreenSize, DriverError> {
        let output = self.run(&["getdisplaygeometry".to_string()]).await?;
        parse_geometry(&output).ok_or_else(|| DriverError::Backend {
            tool: XDOTOOL,
            detail: format!("unexpected geometry output: {output:?}"),
        })
    }

    async fn move_mouse(&self, x: i32, y: i32) -> Result<(), DriverError> {
        self.run(&mousemove_args(x, y)).await?;
        Ok(())
    }

    async fn click(
        &self,
        position: Option<(i32, i32)>,
        button: MouseButton,
    ) -> Result<(), DriverError> {
        if let Some((x, y)) = position {
            self.run(&mousemove_args(x, y)).await?;
        }
        self.run(&["click".to_string(), button_number(button).to_string()])
            .await?;
        Ok(())
    }

    async fn type_text(&self, text: &str, interval: Duration) -> Result<(), DriverError> {
        self.run(&[
            "type".to_string(),
            "--delay".to_string(),
            interval.as_millis().to_string(),
            "--".to_string(),
            text.to_string(),
        ])
        .await?;
        Ok(())
    }

    async fn press_key(&self, key: Key) -> Result<(), DriverError> {
        self.run(&["key".to_string(), keysym(key)]).await?;
        Ok(())
    }

    async fn open_url(&self, url: &str) -> Result<(), DriverError> {
        let (program, args) = opener_command(url);
        debug!(program, ?args, "opening URL");
        Command::new(program)
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()?;
        Ok(())
    }
}

// --sync so the pointer has actually arrived before a follow-up click;
// "--" so negative coordinates are not read as options.
fn mousemove_args(x: i32, y: i32) -> Vec<String> {
    vec![
        "mousemove".to_string(),
        "--sync".to_string(),
        "--".to_string(),
        x.to_string(),
        y.to_string(),
    ]
}

fn parse_geometry(output: &str) -> Option<ScreenSize> {
    let mut parts = output.split_whitespace();
    let width = parts.next()?.parse().ok()?;
    let height = parts.next()?.parse().ok()?;
    Some(ScreenSize { width, height })
}

fn button_number(button: MouseButton) -> &'static str {
    match button {
        MouseButton::Left => "1",
        MouseButton::Middle => "2",
        MouseButton::Right => "3",
    }
}

fn keysym(key: Key) -> String {
    match key {
        Key::Return => "Return".to_string(),
        Key::Tab => "Tab".to_string(),
        Key::Escape => "Escape".to_string(),
        Key::Space => "space".to_string(),
        Key::Backspace => "BackSpace".to_string(),
        Key::Delete => "Delete".to_string(),
        Key::Up => "Up".to_string(),
        Key::Down => "Down".to_string(),
        Key::Left => "Left".to_string(),
        Key::Right => "Right".to_string(),
        Key::Home => "Home".to_string(),
        Key::End => "End".to_string(),
        Key::PageUp => "Prior".to_string(),
        Key::PageDown => "Next".to_string(),
        Key::Char(c) => c.to_string(),
    }
}

#[cfg(not(any(target_os = "macos", target_os = "windows")))]
fn opener_command(url: &str) -> (&'static str, Vec<String>) {
    ("xdg-open", vec![url.to_string()])
}

#[cfg(target_os = "macos")]
fn opener_command(url: &str) -> (&'static str, Vec<String>) {
    ("open", vec![url.to_string()])
}

#[cfg(target_os = "windows")]
fn opener_command(url: &str) -> (&'static str, Vec<String>) {
    (
        "cmd",
        vec![
            "/C".to_string(),
            "start".to_string(),
            String::new(),
            url.to_string(),
        ],
    )
}
