//! Media host client.
//!
//! REST client for the Cloudinary-style media host holding staff photos.
//! Listing goes through the admin API with basic auth; upload and destroy go
//! through the upload API with SHA-1 signed parameters.

use chrono::Utc;
use serde::Deserialize;
use serde_json::Value;
use sha1::{Digest, Sha1};

use crate::config::MediaConfig;
use crate::{Error, Result};

const API_BASE: &str = "https://api.cloudinary.com/v1_1";

/// Operations against the media host. The seam for test doubles.
#[allow(async_fn_in_trait)]
pub trait MediaStore {
    /// List uploaded assets under `prefix`, at most `max_results`, with
    /// per-asset context metadata. Returns the host's raw listing payload.
    async fn list(&self, prefix: &str, max_results: u32) -> Result<Value>;

    /// Upload a file payload (data URI, remote URL, or host-accepted
    /// reference) into `folder`.
    async fn upload(&self, folder: &str, file: &str) -> Result<UploadedAsset>;

    /// Destroy an asset by its host-assigned identifier.
    async fn destroy(&self, public_id: &str) -> Result<()>;
}

/// Host-assigned identity of an uploaded asset.
#[derive(Debug, Clone, Deserialize)]
pub struct UploadedAsset {
    pub secure_url: String,
    pub public_id: String,
}

/// REST client for the media host.
pub struct CloudinaryClient {
    http: reqwest::Client,
    config: MediaConfig,
}

impl CloudinaryClient {
    pub fn new(config: MediaConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
        }
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}/{}", API_BASE, self.config.cloud_name, path)
    }

    /// Signed form fields for an upload-API call: the signable parameters
    /// plus `api_key` and `signature`.
    fn signed_form(&self, params: &[(&str, String)]) -> Vec<(String, String)> {
        let signature = sign_params(params, &self.config.api_secret);

        let mut form: Vec<(String, String)> = params
            .iter()
            .map(|(k, v)| ((*k).to_string(), v.clone()))
            .collect();
        form.push(("api_key".to_string(), self.config.api_key.clone()));
        form.push(("signature".to_string(), signature));
        form
    }
}

impl MediaStore for CloudinaryClient {
    async fn list(&self, prefix: &str, max_results: u32) -> Result<Value> {
        let response = self
            .http
            .get(self.endpoint("resources/image/upload"))
            .basic_auth(&self.config.api_key, Some(&self.config.api_secret))
            .query(&[
                ("prefix", prefix),
                ("max_results", &max_results.to_string()),
                ("context", "true"),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Upstream(format!(
                "Listing failed ({}): {}",
                status,
                body.trim()
            )));
        }

        Ok(response.json().await?)
    }

    async fn upload(&self, folder: &str, file: &str) -> Result<UploadedAsset> {
        let timestamp = Utc::now().timestamp().to_string();
        let mut form = self.signed_form(&[
            ("folder", folder.to_string()),
            ("timestamp", timestamp),
        ]);
        // The file payload itself is never part of the signature
        form.push(("file".to_string(), file.to_string()));

        let response = self
            .http
            .post(self.endpoint("image/upload"))
            .form(&form)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Upstream(format!(
                "Upload failed ({}): {}",
                status,
                body.trim()
            )));
        }

        Ok(response.json().await?)
    }

    async fn destroy(&self, public_id: &str) -> Result<()> {
        let timestamp = Utc::now().timestamp().to_string();
        let form = self.signed_form(&[
            ("public_id", public_id.to_string()),
            ("timestamp", timestamp),
        ]);

        let response = self
            .http
            .post(self.endpoint("image/destroy"))
            .form(&form)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Upstream(format!(
                "Destroy failed ({}): {}",
                status,
                body.trim()
            )));
        }

        let result: Value = response.json().await?;
        match result.get("result").and_then(|v| v.as_str()) {
            Some("ok") => Ok(()),
            outcome => Err(Error::Upstream(format!(
                "Destroy rejected: {}",
                outcome.unwrap_or("unknown")
            ))),
        }
    }
}

/// Host request signature: SHA-1 hex of the signable parameters sorted by
/// name, joined as `k=v&...`, with the API secret appended.
fn sign_params(params: &[(&str, String)], api_secret: &str) -> String {
    let mut sorted: Vec<(&str, &str)> = params
        .iter()
        .map(|(name, value)| (*name, value.as_str()))
        .collect();
    sorted.sort_unstable();

    let joined = sorted
        .iter()
        .map(|(name, value)| format!("{}={}", name, value))
        .collect::<Vec<_>>()
        .join("&");

    let mut hasher = Sha1::new();
    hasher.update(joined.as_bytes());
    hasher.update(api_secret.as_bytes());
    hex::encode(hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upload_signature() {
        let signature = sign_params(
            &[
                ("folder", "staffs".to_string()),
                ("timestamp", "1700000000".to_string()),
            ],
            "shhh",
        );
        assert_eq!(signature, "92381a7b504acddd859bc9b382c37bcb81412186");
    }

    #[test]
    fn test_destroy_signature() {
        let signature = sign_params(
            &[
                ("public_id", "staffs/abc123".to_string()),
                ("timestamp", "1700000000".to_string()),
            ],
            "shhh",
        );
        assert_eq!(signature, "fedf4fc3ab0149e22b49b14339a8c5f192f3f684");
    }

    #[test]
    fn test_signature_sorts_params() {
        let forward = sign_params(
            &[
                ("folder", "staffs".to_string()),
                ("timestamp", "1700000000".to_string()),
            ],
            "shhh",
        );
        let reversed = sign_params(
            &[
                ("timestamp", "1700000000".to_string()),
                ("folder", "staffs".to_string()),
            ],
            "shhh",
        );
        assert_eq!(forward, reversed);
    }

    #[test]
    fn test_uploaded_asset_parses_host_response() {
        let asset: UploadedAsset = serde_json::from_str(
            r#"{"secure_url":"https://x/y.png","public_id":"staffs/y","bytes":1024}"#,
        )
        .unwrap();
        assert_eq!(asset.secure_url, "https://x/y.png");
        assert_eq!(asset.public_id, "staffs/y");
    }
}
