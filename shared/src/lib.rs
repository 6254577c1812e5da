//! Shared library for the salon API Lambda functions.
//!
//! This crate provides the clients, config, and helpers used across all
//! Lambda functions: the identity-provider adapter, the document-store and
//! media-host clients, the activity logger, and HTTP response helpers.

pub mod activity;
pub mod auth;
pub mod config;
pub mod error;
pub mod http;
pub mod icons;
pub mod media;
pub mod store;

pub use activity::{ActivityLogger, ActivityRecord, ActivityStatus, ActivityType};
pub use auth::{caller_identity, decode_session_token, identity_from_claims, SessionClaims};
pub use config::{Config, MediaConfig, StoreConfig};
pub use error::{Error, Result};
pub use media::{CloudinaryClient, MediaStore, UploadedAsset};
pub use store::{DocumentSink, FirestoreClient};
