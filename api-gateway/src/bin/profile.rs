//! Admin profile Lambda - Handles GET /admin/profile.
//!
//! Returns the admin profile for the authenticated caller, or 401 when no
//! caller identity is present. The role and permission set are a static
//! payload keyed only by presence of identity; there is no profile store.

use lambda_http::{run, service_fn, Body, Error, Request, Response};
use serde::Serialize;
use shared::auth::caller_identity;
use shared::http::{error_response, json_response, method_not_allowed_with_hint};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Profile payload for an authenticated admin.
#[derive(Debug, Serialize)]
struct AdminProfile {
    id: String,
    name: &'static str,
    role: &'static str,
    permissions: [&'static str; 3],
}

fn admin_profile(identity: &str) -> AdminProfile {
    AdminProfile {
        id: identity.to_string(),
        name: "Admin",
        role: "admin",
        permissions: ["manage_appointments", "manage_services", "manage_gallery"],
    }
}

async fn handler(event: Request) -> Result<Response<Body>, Error> {
    let method = event.method().as_str();
    if method != "GET" {
        return method_not_allowed_with_hint("GET", method);
    }

    match caller_identity(&event) {
        Some(identity) => {
            info!("Profile lookup for {}", identity);
            json_response(200, &admin_profile(&identity))
        }
        None => error_response(401, "Unauthorized"),
    }
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .init();

    run(service_fn(handler)).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_profile_payload() {
        let profile = admin_profile("u1");
        assert_eq!(
            serde_json::to_value(&profile).unwrap(),
            json!({
                "id": "u1",
                "name": "Admin",
                "role": "admin",
                "permissions": ["manage_appointments", "manage_services", "manage_gallery"],
            })
        );
    }

    #[tokio::test]
    async fn test_unauthenticated_rejected() {
        let event = lambda_http::http::Request::builder()
            .method("GET")
            .uri("/admin/profile")
            .body(Body::Empty)
            .unwrap();

        let response = handler(event).await.unwrap();
        assert_eq!(response.status(), 401);
        let body: serde_json::Value = serde_json::from_slice(response.body().as_ref()).unwrap();
        assert_eq!(body, json!({ "error": "Unauthorized" }));
    }

    #[tokio::test]
    async fn test_non_get_rejected() {
        let event = lambda_http::http::Request::builder()
            .method("POST")
            .uri("/admin/profile")
            .body(Body::Empty)
            .unwrap();

        let response = handler(event).await.unwrap();
        assert_eq!(response.status(), 405);
        assert_eq!(response.headers()["allow"], "GET");
    }
}
