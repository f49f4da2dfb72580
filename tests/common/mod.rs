//! Common Test Utilities
//!
//! Shared helpers, fixtures, and test infrastructure.

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use voice_watch::config::Settings;
use voice_watch::startup::{build_router, AppState};

pub const TEST_GUILD: &str = "1";
pub const ALERT_CHANNEL: i64 = 555;

/// Test application builder
pub struct TestApp {
    pub router: Router,
    pub state: AppState,
}

impl TestApp {
    /// Create a test application watching the given handles
    pub fn new(handles: &[&str]) -> Self {
        let config = Settings::builder("test")
            .unwrap()
            .set_override("alert.channel_id", ALERT_CHANNEL)
            .unwrap()
            .set_override(
                "watch.handles",
                handles.iter().map(|h| h.to_string()).collect::<Vec<_>>(),
            )
            .unwrap()
            .build()
            .unwrap();
        let settings = Settings::from_config(config).unwrap();

        let state = AppState::new(settings);
        Self {
            router: build_router(state.clone()),
            state,
        }
    }

    /// Make a GET request to the application
    pub async fn get(&self, uri: &str) -> axum::response::Response {
        self.router
            .clone()
            .oneshot(
                Request::builder()
                    .method("GET")
                    .uri(uri)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap()
    }

    /// Make a POST request with JSON body
    pub async fn post_json(&self, uri: &str, body: &str) -> axum::response::Response {
        self.router
            .clone()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri(uri)
                    .header("Content-Type", "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap()
    }

    /// Post a gateway event and return the acknowledgement body
    pub async fn send_event(&self, event: Value) -> Value {
        let response = self.post_json("/api/v1/events", &event.to_string()).await;
        assert_eq!(response.status(), StatusCode::OK);
        body_json(response).await
    }
}

/// Read a response body as JSON
pub async fn body_json(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

/// Guild with three members: two watched candidates and a stranger
pub fn guild_create() -> Value {
    json!({
        "t": "GUILD_CREATE",
        "d": {
            "id": TEST_GUILD,
            "members": [
                {"user": {"id": "10", "username": "leon", "global_name": "Leon3To"}},
                {"user": {"id": "20", "username": "cl4upy"}},
                {"user": {"id": "30", "username": "someone"}, "nick": "@LuigiNeto"},
                {"user": {"id": "40", "username": "stranger"}}
            ]
        }
    })
}

/// Voice state update for a member of the test guild
pub fn voice_update(user_id: &str, channel_id: Option<&str>) -> Value {
    json!({
        "t": "VOICE_STATE_UPDATE",
        "d": {"guild_id": TEST_GUILD, "user_id": user_id, "channel_id": channel_id}
    })
}
