//! Staff media Lambda - Proxies staff-photo operations to the media host.
//!
//! Endpoints:
//! - GET /media/staffs/list - List photos under the staffs/ namespace
//! - POST /media/staffs/upload - Upload a photo into the staffs folder
//! - DELETE /media/staffs/delete - Delete a photo by its public id

use lambda_http::{run, service_fn, Body, Error, Request, Response};
use serde::Deserialize;
use serde_json::json;
use shared::http::{error_response, json_response, method_not_allowed};
use shared::media::{CloudinaryClient, MediaStore};
use shared::MediaConfig;
use std::sync::Arc;
use tracing::error;
use tracing_subscriber::EnvFilter;

const STAFF_PREFIX: &str = "staffs/";
const STAFF_FOLDER: &str = "staffs";
const LIST_MAX_RESULTS: u32 = 100;

/// Application state shared across requests.
struct AppState<M> {
    media: M,
}

#[derive(Debug, Deserialize)]
struct UploadRequest {
    file: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DeleteRequest {
    public_id: Option<String>,
}

/// File payload for an upload: a JSON body's `file` field, or the raw body
/// itself when it is not of that shape.
fn file_payload(body: &Body) -> String {
    let raw = std::str::from_utf8(body.as_ref()).unwrap_or("");
    match serde_json::from_str::<UploadRequest>(raw) {
        Ok(request) => request.file,
        Err(_) => raw.to_string(),
    }
}

async fn handler<M: MediaStore>(
    state: Arc<AppState<M>>,
    event: Request,
) -> Result<Response<Body>, Error> {
    let method = event.method().as_str();
    let path = event.uri().path();

    match (method, path) {
        ("GET", "/media/staffs/list") => match state.media.list(STAFF_PREFIX, LIST_MAX_RESULTS).await {
            Ok(listing) => json_response(200, &listing),
            Err(e) => {
                error!("Staff photo listing failed: {}", e);
                error_response(500, "List failed")
            }
        },

        ("POST", "/media/staffs/upload") => {
            let file = file_payload(event.body());
            match state.media.upload(STAFF_FOLDER, &file).await {
                Ok(asset) => json_response(
                    200,
                    &json!({ "url": asset.secure_url, "publicId": asset.public_id }),
                ),
                Err(e) => {
                    error!("Staff photo upload failed: {}", e);
                    error_response(500, "Upload failed")
                }
            }
        }

        ("DELETE", "/media/staffs/delete") => {
            let public_id = serde_json::from_slice::<DeleteRequest>(event.body().as_ref())
                .ok()
                .and_then(|request| request.public_id)
                .filter(|id| !id.is_empty());

            let Some(public_id) = public_id else {
                return error_response(400, "publicId required");
            };

            match state.media.destroy(&public_id).await {
                Ok(()) => json_response(200, &json!({ "deleted": true })),
                Err(e) => {
                    error!("Staff photo delete failed: {}", e);
                    error_response(500, "Delete failed")
                }
            }
        }

        (_, "/media/staffs/list" | "/media/staffs/upload" | "/media/staffs/delete") => {
            method_not_allowed()
        }

        _ => error_response(404, "Not found"),
    }
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .init();

    let config = MediaConfig::from_env()?;
    let state = Arc::new(AppState {
        media: CloudinaryClient::new(config),
    });

    run(service_fn(move |event| {
        let state = Arc::clone(&state);
        async move { handler(state, event).await }
    }))
    .await
}
