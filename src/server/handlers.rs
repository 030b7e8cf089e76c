// HTTP request handlers
//
// Every endpoint answers with the protocol envelope. Operation failures
// (bad request bodies, driver errors, shell errors) stay at HTTP 200 with
// success=false; the only non-200 status is the 404 envelope for a
// (method, path) pair outside the routing table.

use axum::{
    body::Bytes,
    extract::State,
    http::{StatusCode, Uri},
    response::Json,
    routing::{get, post},
    Router,
};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::time::Duration;
use tower_http::cors::CorsLayer;

use super::ControlServer;
use crate::driver::{Key, MouseButton};
use crate::exec;
use crate::protocol::{
    paths, Envelope, ExecuteCommandRequest, MouseClickRequest, MouseMoveRequest,
    OpenBrowserRequest, PressKeyRequest, TypeTextRequest, DEFAULT_TYPE_INTERVAL,
};

type ServerState = Arc<ControlServer>;

/// Create the main application router
///
/// Each method router carries the not-found fallback too, so a wrong method
/// on a known path reports "endpoint not found" instead of a bare 405.
pub fn create_router(server: ServerState) -> Router {
    Router::new()
        // Read-only endpoints
        .route(paths::STATUS, get(get_status).fallback(endpoint_not_found))
        .route(
            paths::SCREEN_READ,
            get(read_screen).fallback(endpoint_not_found),
        )
        // Automation endpoints
        .route(
            paths::MOUSE_MOVE,
            post(move_mouse).fallback(endpoint_not_found),
        )
        .route(
            paths::MOUSE_CLICK,
            post(click_mouse).fallback(endpoint_not_found),
        )
        .route(
            paths::KEYBOARD_TYPE,
            post(type_text).fallback(endpoint_not_found),
        )
        .route(
            paths::KEYBOARD_PRESS,
            post(press_key).fallback(endpoint_not_found),
        )
        .route(
            paths::BROWSER_OPEN,
            post(open_browser).fallback(endpoint_not_found),
        )
        // Shell endpoint
        .route(
            paths::COMMAND_EXECUTE,
            post(execute_command).fallback(endpoint_not_found),
        )
        .fallback(endpoint_not_found)
        // Browser-based callers need the CORS headers the reference server sent
        .layer(CorsLayer::permissive())
        .with_state(server)
}

/// Boundary mapping from operation results to the envelope
///
/// Handlers never build failure JSON themselves; every error funnels
/// through here.
fn respond(outcome: anyhow::Result<Envelope>) -> Json<Envelope> {
    match outcome {
        Ok(envelope) => Json(envelope),
        Err(error) => {
            tracing::warn!("operation failed: {error}");
            Json(Envelope::failure(error.to_string()))
        }
    }
}

/// Deserialize a request body, reading an empty body as `{}` so bodyless
/// POSTs (a plain click) stay valid
fn parse_body<T: DeserializeOwned>(body: &Bytes) -> anyhow::Result<T> {
    let raw: &[u8] = if body.is_empty() { b"{}" } else { body };
    serde_json::from_slice(raw).map_err(|e| anyhow::anyhow!("invalid request body: {e}"))
}

/// Fallback for every unmatched (method, path) pair
async fn endpoint_not_found(uri: Uri) -> (StatusCode, Json<Envelope>) {
    (
        StatusCode::NOT_FOUND,
        Json(Envelope::failure(format!(
            "Endpoint not found: {}",
            uri.path()
        ))),
    )
}

/// Handle GET /api/status - Server liveness and identity
async fn get_status(State(server): State<ServerState>) -> Json<Envelope> {
    Json(
        Envelope::success("Control server is running")
            .with_data("status", "running")
            .with_data("port", server.port())
            .with_data("version", env!("CARGO_PKG_VERSION"))
            .with_data("driver", server.driver_name()),
    )
}

/// Handle GET /api/screen/read - Report screen dimensions
async fn read_screen(State(server): State<ServerState>) -> Json<Envelope> {
    let outcome = async {
        let driver = server.driver().lock().await;
        let size = driver.screen_size().await?;
        Ok(Envelope::success("Screen read successfully").with_data("screen_size", size.to_string()))
    }
    .await;
    respond(outcome)
}

/// Handle POST /api/mouse/move - Move the pointer to absolute coordinates
async fn move_mouse(State(server): State<ServerState>, body: Bytes) -> Json<Envelope> {
    let outcome = async {
        let request: MouseMoveRequest = parse_body(&body)?;

        let driver = server.driver().lock().await;
        driver.move_mouse(request.x, request.y).await?;
        Ok(Envelope::success(format!(
            "Mouse moved to ({}, {})",
            request.x, request.y
        )))
    }
    .await;
    respond(outcome)
}

/// Handle POST /api/mouse/click - Click at a position or in place
async fn click_mouse(State(server): State<ServerState>, body: Bytes) -> Json<Envelope> {
    let outcome = async {
        let request: MouseClickRequest = parse_body(&body)?;
        let button = MouseButton::parse(request.button.as_deref().unwrap_or("left"))?;
        // A position only counts when both coordinates arrived
        let position = match (request.x, request.y) {
            (Some(x), Some(y)) => Some((x, y)),
            _ => None,
        };

        let driver = server.driver().lock().await;
        driver.click(position, button).await?;

        let message = match position {
            Some((x, y)) => format!("Clicked at ({x}, {y}) with {button} button"),
            None => format!("Clicked with {button} button"),
        };
        Ok(Envelope::success(message))
    }
    .await;
    respond(outcome)
}

/// Handle POST /api/keyboard/type - Type text with a per-character delay
async fn type_text(State(server): State<ServerState>, body: Bytes) -> Json<Envelope> {
    let outcome = async {
        let request: TypeTextRequest = parse_body(&body)?;
        let seconds = request.interval.unwrap_or(DEFAULT_TYPE_INTERVAL);
        let interval = Duration::try_from_secs_f64(seconds)
            .map_err(|_| anyhow::anyhow!("invalid typing interval: {seconds}"))?;

        let driver = server.driver().lock().await;
        driver.type_text(&request.text, interval).await?;
        Ok(Envelope::success(format!("Typed: {}", request.text)))
    }
    .await;
    respond(outcome)
}

/// Handle POST /api/keyboard/press - Press one named key
async fn press_key(State(server): State<ServerState>, body: Bytes) -> Json<Envelope> {
    let outcome = async {
        let request: PressKeyRequest = parse_body(&body)?;
        let key = Key::parse(&request.key)?;

        let driver = server.driver().lock().await;
        driver.press_key(key).await?;
        Ok(Envelope::success(format!("Pressed key: {}", request.key)))
    }
    .await;
    respond(outcome)
}

/// Handle POST /api/browser/open - Open a URL in the default browser
async fn open_browser(State(server): State<ServerState>, body: Bytes) -> Json<Envelope> {
    let outcome = async {
        let request: OpenBrowserRequest = parse_body(&body)?;

        let driver = server.driver().lock().await;
        driver.open_url(&request.url).await?;
        Ok(Envelope::success(format!("Browser opened: {}", request.url)))
    }
    .await;
    respond(outcome)
}

/// Handle POST /api/command/execute - Run a shell command with a timeout
///
/// Does not take the driver lock; the shell touches the filesystem, not the
/// shared input devices.
async fn execute_command(State(server): State<ServerState>, body: Bytes) -> Json<Envelope> {
    let outcome = async {
        let request: ExecuteCommandRequest = parse_body(&body)?;
        tracing::info!(command = %request.command, "executing shell command");

        let output = exec::run_shell(&request.command, server.exec_timeout()).await?;

        // The command ran to completion; its exit code is payload, not an
        // error. Callers read data.returncode.
        Ok(Envelope::success("Command executed")
            .with_data("stdout", output.stdout)
            .with_data("stderr", output.stderr)
            .with_data("returncode", output.returncode))
    }
    .await;
    respond(outcome)
}
