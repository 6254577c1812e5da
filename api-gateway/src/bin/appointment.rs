//! Appointment availability Lambda - Handles the /appointment endpoint.
//!
//! Holds the process-wide "appointments enabled" flag. GET reads it, POST
//! flips it. The flag is advisory and non-durable: it resets to `false` on
//! cold start, and each running instance keeps its own copy.

use lambda_http::{run, service_fn, Body, Error, Request, Response};
use serde_json::json;
use shared::http::{json_response, method_not_allowed_with_hint};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Application state shared across requests.
struct AppState {
    enabled: AtomicBool,
}

impl AppState {
    fn new() -> Self {
        Self {
            enabled: AtomicBool::new(false),
        }
    }
}

async fn handler(state: Arc<AppState>, event: Request) -> Result<Response<Body>, Error> {
    let method = event.method().as_str();

    match method {
        "GET" => {
            let enabled = state.enabled.load(Ordering::Relaxed);
            json_response(200, &json!({ "enabled": enabled }))
        }
        "POST" => {
            // Pure toggle, not set-to-value; last write wins under races
            let previous = state.enabled.fetch_xor(true, Ordering::Relaxed);
            let enabled = !previous;
            info!("Appointments toggled to {}", enabled);
            json_response(200, &json!({ "enabled": enabled }))
        }
        other => method_not_allowed_with_hint("GET, POST", other),
    }
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .init();

    let state = Arc::new(AppState::new());

    run(service_fn(move |event| {
        let state = Arc::clone(&state);
        async move { handler(state, event).await }
    }))
    .await
}
