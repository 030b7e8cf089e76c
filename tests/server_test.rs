// Integration tests for the HTTP control server
//
// Drives the real router in-process with a simulated driver and verifies
// the envelope contract on every endpoint: failures stay at HTTP 200,
// unmatched routes get 404 envelopes, and automation calls reach the
// driver exactly as requested.

use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use remoto::driver::{MouseButton, RecordedAction, SimulatedDriver};
use remoto::protocol::Envelope;
use remoto::server::{create_router, ControlServer, ServerConfig};

/// Build a router over a simulated driver, keeping a handle on the
/// recording.
fn test_router() -> (Router, SimulatedDriver) {
    let driver = SimulatedDriver::new();
    let server = ControlServer::new(ServerConfig::default(), Box::new(driver.clone()))
        .expect("server should build");
    (create_router(Arc::new(server)), driver)
}

async fn send(
    router: Router,
    method: Method,
    path: &str,
    body: Option<Value>,
) -> (StatusCode, Envelope) {
    let builder = Request::builder().method(method).uri(path);
    let request = match body {
        Some(value) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(value.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = router.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let envelope: Envelope =
        serde_json::from_slice(&bytes).expect("every response body is an envelope");
    (status, envelope)
}

#[tokio::test]
async fn test_status_reports_identity() {
    let (router, _) = test_router();
    let (status, envelope) = send(router, Method::GET, "/api/status", None).await;

    assert_eq!(status, StatusCode::OK);
    assert!(envelope.success);
    assert_eq!(envelope.data["status"], json!("running"));
    assert_eq!(envelope.data["port"], json!(8080));
    assert_eq!(envelope.data["driver"], json!("simulated"));
    assert!(envelope.data["version"].is_string());
    assert!(envelope.timestamp > 0.0);
}

#[tokio::test]
async fn test_screen_read_reports_dimensions() {
    let (router, _) = test_router();
    let (status, envelope) = send(router, Method::GET, "/api/screen/read", None).await;

    assert_eq!(status, StatusCode::OK);
    assert!(envelope.success);
    assert_eq!(envelope.message, "Screen read successfully");
    assert_eq!(envelope.data["screen_size"], json!("1920x1080"));
}

#[tokio::test]
async fn test_mouse_move_round_trip() {
    let (router, driver) = test_router();
    let (status, envelope) = send(
        router,
        Method::POST,
        "/api/mouse/move",
        Some(json!({"x": 500, "y": 300})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert!(envelope.success);
    assert_eq!(envelope.message, "Mouse moved to (500, 300)");
    assert_eq!(
        driver.actions(),
        vec![RecordedAction::MouseMove { x: 500, y: 300 }]
    );
}

#[tokio::test]
async fn test_mouse_move_missing_field_fails_without_driver_call() {
    let (router, driver) = test_router();
    let (status, envelope) = send(
        router,
        Method::POST,
        "/api/mouse/move",
        Some(json!({"x": 500})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert!(!envelope.success);
    assert!(envelope.message.contains("invalid request body"));
    assert!(driver.actions().is_empty());
}

#[tokio::test]
async fn test_malformed_json_is_a_failure_envelope() {
    let (router, driver) = test_router();
    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/mouse/move")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("not json at all"))
        .unwrap();

    let response = router.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let envelope: Envelope = serde_json::from_slice(&bytes).unwrap();
    assert!(!envelope.success);
    assert!(driver.actions().is_empty());
}

#[tokio::test]
async fn test_click_with_empty_body_defaults_to_left_in_place() {
    let (router, driver) = test_router();
    let (status, envelope) = send(router, Method::POST, "/api/mouse/click", None).await;

    assert_eq!(status, StatusCode::OK);
    assert!(envelope.success);
    assert_eq!(envelope.message, "Clicked with left button");
    assert_eq!(
        driver.actions(),
        vec![RecordedAction::Click {
            position: None,
            button: MouseButton::Left
        }]
    );
}

#[tokio::test]
async fn test_click_at_origin_is_a_positioned_click() {
    // x=0/y=0 are real coordinates, not "absent"
    let (router, driver) = test_router();
    let (_, envelope) = send(
        router,
        Method::POST,
        "/api/mouse/click",
        Some(json!({"x": 0, "y": 0})),
    )
    .await;

    assert!(envelope.success);
    assert_eq!(envelope.message, "Clicked at (0, 0) with left button");
    assert_eq!(
        driver.actions(),
        vec![RecordedAction::Click {
            position: Some((0, 0)),
            button: MouseButton::Left
        }]
    );
}

#[tokio::test]
async fn test_click_with_position_and_button() {
    let (router, driver) = test_router();
    let (_, envelope) = send(
        router,
        Method::POST,
        "/api/mouse/click",
        Some(json!({"x": 10, "y": 20, "button": "Right"})),
    )
    .await;

    assert!(envelope.success);
    assert_eq!(envelope.message, "Clicked at (10, 20) with right button");
    assert_eq!(
        driver.actions(),
        vec![RecordedAction::Click {
            position: Some((10, 20)),
            button: MouseButton::Right
        }]
    );
}

#[tokio::test]
async fn test_click_with_half_a_position_clicks_in_place() {
    let (router, driver) = test_router();
    let (_, envelope) = send(
        router,
        Method::POST,
        "/api/mouse/click",
        Some(json!({"x": 10})),
    )
    .await;

    assert!(envelope.success);
    assert_eq!(envelope.message, "Clicked with left button");
    assert_eq!(
        driver.actions(),
        vec![RecordedAction::Click {
            position: None,
            button: MouseButton::Left
        }]
    );
}

#[tokio::test]
async fn test_click_rejects_unknown_button() {
    let (router, driver) = test_router();
    let (status, envelope) = send(
        router,
        Method::POST,
        "/api/mouse/click",
        Some(json!({"button": "fourth"})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert!(!envelope.success);
    assert!(envelope.message.contains("unsupported mouse button"));
    assert!(driver.actions().is_empty());
}

#[tokio::test]
async fn test_type_applies_default_interval() {
    let (router, driver) = test_router();
    let (_, envelope) = send(
        router,
        Method::POST,
        "/api/keyboard/type",
        Some(json!({"text": "Hello World"})),
    )
    .await;

    assert!(envelope.success);
    assert_eq!(envelope.message, "Typed: Hello World");
    assert_eq!(
        driver.actions(),
        vec![RecordedAction::TypeText {
            text: "Hello World".to_string(),
            interval: Duration::from_millis(50)
        }]
    );
}

#[tokio::test]
async fn test_type_honors_explicit_interval() {
    let (router, driver) = test_router();
    let (_, envelope) = send(
        router,
        Method::POST,
        "/api/keyboard/type",
        Some(json!({"text": "hi", "interval": 0.2})),
    )
    .await;

    assert!(envelope.success);
    assert_eq!(
        driver.actions(),
        vec![RecordedAction::TypeText {
            text: "hi".to_string(),
            interval: Duration::from_millis(200)
        }]
    );
}

#[tokio::test]
async fn test_type_rejects_negative_interval() {
    let (router, driver) = test_router();
    let (status, envelope) = send(
        router,
        Method::POST,
        "/api/keyboard/type",
        Some(json!({"text": "hi", "interval": -1.0})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert!(!envelope.success);
    assert!(driver.actions().is_empty());
}

#[tokio::test]
async fn test_press_key_round_trip() {
    let (router, driver) = test_router();
    let (_, envelope) = send(
        router,
        Method::POST,
        "/api/keyboard/press",
        Some(json!({"key": "enter"})),
    )
    .await;

    assert!(envelope.success);
    assert_eq!(envelope.message, "Pressed key: enter");
    assert_eq!(driver.actions().len(), 1);
}

#[tokio::test]
async fn test_press_rejects_unknown_key() {
    let (router, driver) = test_router();
    let (status, envelope) = send(
        router,
        Method::POST,
        "/api/keyboard/press",
        Some(json!({"key": "definitely-not-a-key"})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert!(!envelope.success);
    assert!(envelope.message.contains("unsupported key"));
    assert!(driver.actions().is_empty());
}

#[tokio::test]
async fn test_browser_open_round_trip() {
    let (router, driver) = test_router();
    let (_, envelope) = send(
        router,
        Method::POST,
        "/api/browser/open",
        Some(json!({"url": "https://example.com"})),
    )
    .await;

    assert!(envelope.success);
    assert_eq!(envelope.message, "Browser opened: https://example.com");
    assert_eq!(
        driver.actions(),
        vec![RecordedAction::OpenUrl {
            url: "https://example.com".to_string()
        }]
    );
}

#[tokio::test]
async fn test_execute_captures_output() {
    let (router, _) = test_router();
    let (status, envelope) = send(
        router,
        Method::POST,
        "/api/command/execute",
        Some(json!({"command": "echo hello"})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert!(envelope.success);
    assert_eq!(envelope.message, "Command executed");
    assert_eq!(envelope.data["returncode"], json!(0));
    assert!(envelope.data["stdout"].as_str().unwrap().contains("hello"));
}

#[tokio::test]
async fn test_execute_reports_child_failure_as_success() {
    // The command ran; its exit code is payload, not an error
    let (router, _) = test_router();
    let (status, envelope) = send(
        router,
        Method::POST,
        "/api/command/execute",
        Some(json!({"command": "exit 7"})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert!(envelope.success);
    assert_eq!(envelope.data["returncode"], json!(7));
}

#[tokio::test]
async fn test_execute_timeout_is_a_failure_envelope() {
    let driver = SimulatedDriver::new();
    let config = ServerConfig {
        bind_address: "127.0.0.1:8080".to_string(),
        exec_timeout_secs: 1,
    };
    let server = ControlServer::new(config, Box::new(driver)).unwrap();
    let router = create_router(Arc::new(server));

    let (status, envelope) = send(
        router,
        Method::POST,
        "/api/command/execute",
        Some(json!({"command": "sleep 5"})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert!(!envelope.success);
    assert!(envelope.message.contains("timed out"));
}

#[tokio::test]
async fn test_unknown_path_gets_404_envelope() {
    let (router, _) = test_router();
    let (status, envelope) = send(router, Method::GET, "/api/nonexistent", None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(!envelope.success);
    assert_eq!(envelope.message, "Endpoint not found: /api/nonexistent");
    assert!(envelope.timestamp > 0.0);
}

#[tokio::test]
async fn test_wrong_method_gets_404_envelope() {
    let (router, _) = test_router();
    let (status, envelope) = send(router, Method::GET, "/api/mouse/move", None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(!envelope.success);
    assert_eq!(envelope.message, "Endpoint not found: /api/mouse/move");
}

#[tokio::test]
async fn test_post_to_get_endpoint_gets_404_envelope() {
    let (router, _) = test_router();
    let (status, envelope) = send(router, Method::POST, "/api/status", None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(!envelope.success);
    assert_eq!(envelope.message, "Endpoint not found: /api/status");
}

#[tokio::test]
async fn test_every_endpoint_answers_with_an_envelope() {
    let (router, _) = test_router();
    let calls = [
        (Method::GET, "/api/status", None),
        (Method::GET, "/api/screen/read", None),
        (
            Method::POST,
            "/api/mouse/move",
            Some(json!({"x": 1, "y": 2})),
        ),
        (Method::POST, "/api/mouse/click", None),
        (
            Method::POST,
            "/api/keyboard/type",
            Some(json!({"text": "x"})),
        ),
        (
            Method::POST,
            "/api/keyboard/press",
            Some(json!({"key": "tab"})),
        ),
        (
            Method::POST,
            "/api/browser/open",
            Some(json!({"url": "https://example.com"})),
        ),
        (
            Method::POST,
            "/api/command/execute",
            Some(json!({"command": "true"})),
        ),
    ];

    for (method, path, body) in calls {
        // send() parses the body as an envelope or panics
        let (status, envelope) = send(router.clone(), method, path, body).await;
        assert_eq!(status, StatusCode::OK, "{path}");
        assert!(!envelope.message.is_empty(), "{path}");
        assert!(envelope.timestamp > 0.0, "{path}");
    }
}

#[tokio::test]
async fn test_responses_carry_cors_headers() {
    let (router, _) = test_router();
    let request = Request::builder()
        .method(Method::GET)
        .uri("/api/status")
        .header(header::ORIGIN, "http://localhost:3000")
        .body(Body::empty())
        .unwrap();

    let response = router.oneshot(request).await.unwrap();
    assert!(response
        .headers()
        .contains_key(header::ACCESS_CONTROL_ALLOW_ORIGIN));
}
