//! Document store adapter.
//!
//! Talks to the managed document database over its REST API, authenticating
//! with a service-account assertion exchanged for a short-lived bearer token.
//! The token is cached per process and refreshed shortly before expiry.

use chrono::{DateTime, Utc};
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use tokio::sync::RwLock;

use crate::config::StoreConfig;
use crate::{Error, Result};

const TOKEN_URI: &str = "https://oauth2.googleapis.com/token";
const SCOPE: &str = "https://www.googleapis.com/auth/datastore";

/// Refresh the cached token this many seconds before it expires.
const TOKEN_REFRESH_MARGIN: i64 = 60;

/// Sink for new documents. The seam between business helpers and the store,
/// so tests can substitute a double.
#[allow(async_fn_in_trait)]
pub trait DocumentSink {
    /// Insert a flat JSON object as a new document in `collection`.
    async fn insert(&self, collection: &str, fields: Value) -> Result<()>;
}

/// Service-account assertion claims.
#[derive(Debug, Serialize)]
struct AssertionClaims<'a> {
    iss: &'a str,
    scope: &'a str,
    aud: &'a str,
    iat: i64,
    exp: i64,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    expires_in: i64,
}

#[derive(Debug, Clone)]
struct CachedToken {
    token: String,
    expires_at: i64,
}

impl CachedToken {
    fn is_fresh(&self, now: i64) -> bool {
        now < self.expires_at - TOKEN_REFRESH_MARGIN
    }
}

/// REST client for the document store.
pub struct FirestoreClient {
    http: reqwest::Client,
    config: StoreConfig,
    token: RwLock<Option<CachedToken>>,
}

impl FirestoreClient {
    pub fn new(config: StoreConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
            token: RwLock::new(None),
        }
    }

    /// Bearer token for the store API, from cache when still fresh.
    async fn access_token(&self) -> Result<String> {
        let now = Utc::now().timestamp();

        {
            let cached = self.token.read().await;
            if let Some(token) = cached.as_ref() {
                if token.is_fresh(now) {
                    return Ok(token.token.clone());
                }
            }
        }

        let key = EncodingKey::from_rsa_pem(self.config.private_key.as_bytes())
            .map_err(|e| Error::Config(format!("Invalid service-account key: {}", e)))?;

        let claims = AssertionClaims {
            iss: &self.config.client_email,
            scope: SCOPE,
            aud: TOKEN_URI,
            iat: now,
            exp: now + 3600,
        };

        let assertion = encode(&Header::new(Algorithm::RS256), &claims, &key)
            .map_err(|e| Error::Upstream(format!("Failed to sign assertion: {}", e)))?;

        let response = self
            .http
            .post(TOKEN_URI)
            .form(&[
                ("grant_type", "urn:ietf:params:oauth:grant-type:jwt-bearer"),
                ("assertion", assertion.as_str()),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Upstream(format!(
                "Token exchange failed ({}): {}",
                status,
                body.trim()
            )));
        }

        let token: TokenResponse = response.json().await?;

        let cached = CachedToken {
            token: token.access_token.clone(),
            expires_at: now + token.expires_in,
        };
        *self.token.write().await = Some(cached);

        Ok(token.access_token)
    }

    fn documents_url(&self, collection: &str) -> String {
        format!(
            "https://firestore.googleapis.com/v1/projects/{}/databases/(default)/documents/{}",
            self.config.project_id, collection
        )
    }
}

impl DocumentSink for FirestoreClient {
    async fn insert(&self, collection: &str, fields: Value) -> Result<()> {
        let token = self.access_token().await?;

        let body = json!({ "fields": to_document_fields(&fields)? });

        let response = self
            .http
            .post(self.documents_url(collection))
            .bearer_auth(token)
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Upstream(format!(
                "Document insert failed ({}): {}",
                status,
                body.trim()
            )));
        }

        Ok(())
    }
}

/// Convert a flat JSON object to the store's typed-field encoding.
///
/// Strings that parse as RFC 3339 instants become timestamp values; nested
/// objects and arrays are rejected (activity records are flat).
pub fn to_document_fields(value: &Value) -> Result<Value> {
    let object = value
        .as_object()
        .ok_or_else(|| Error::Validation("Document must be a JSON object".to_string()))?;

    let mut fields = Map::new();
    for (name, value) in object {
        let typed = match value {
            Value::Null => json!({ "nullValue": null }),
            Value::Bool(b) => json!({ "booleanValue": b }),
            Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    json!({ "integerValue": i.to_string() })
                } else {
                    json!({ "doubleValue": n.as_f64() })
                }
            }
            Value::String(s) => {
                if DateTime::parse_from_rfc3339(s).is_ok() {
                    json!({ "timestampValue": s })
                } else {
                    json!({ "stringValue": s })
                }
            }
            _ => {
                return Err(Error::Validation(format!(
                    "Unsupported field type for '{}'",
                    name
                )))
            }
        };
        fields.insert(name.clone(), typed);
    }

    Ok(Value::Object(fields))
}
