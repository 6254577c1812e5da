//! Activity logging.
//!
//! Business actions record what happened (appointment toggled, service
//! edited, photo uploaded) to the activity collection. Logging is
//! fire-and-forget: a store failure is reported to the operational log and
//! downgraded to a `false` return, never raised to the caller.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::warn;

use crate::store::DocumentSink;

/// Category of the business action being recorded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivityType {
    #[default]
    Appointment,
    Service,
    Gallery,
    Settings,
}

/// Outcome of the business action.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivityStatus {
    #[default]
    Success,
    Warning,
    Error,
}

/// One activity entry. Immutable once written.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityRecord {
    pub message: String,
    #[serde(rename = "type")]
    pub activity_type: ActivityType,
    pub status: ActivityStatus,
    pub timestamp: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actor_id: Option<String>,
}

/// Writes activity records to the document store.
pub struct ActivityLogger<S> {
    store: S,
    collection: String,
}

impl<S: DocumentSink> ActivityLogger<S> {
    pub fn new(store: S, collection: impl Into<String>) -> Self {
        Self {
            store,
            collection: collection.into(),
        }
    }

    /// Record an activity entry with a server-assigned timestamp.
    ///
    /// Returns `true` when the record was written, `false` when the store
    /// rejected it. Never errors: logging must not abort the business
    /// operation that triggered it.
    pub async fn log(
        &self,
        message: &str,
        activity_type: ActivityType,
        status: ActivityStatus,
        actor_id: Option<&str>,
    ) -> bool {
        let record = ActivityRecord {
            message: message.to_string(),
            activity_type,
            status,
            timestamp: Utc::now(),
            actor_id: actor_id.map(String::from),
        };

        let fields = match serde_json::to_value(&record) {
            Ok(fields) => fields,
            Err(e) => {
                warn!("Failed to serialize activity record: {}", e);
                return false;
            }
        };

        match self.store.insert(&self.collection, fields).await {
            Ok(()) => true,
            Err(e) => {
                warn!("Failed to write activity record: {}", e);
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Error, Result};
    use serde_json::Value;
    use std::sync::Mutex;

    struct RecordingSink {
        docs: Mutex<Vec<(String, Value)>>,
    }

    impl RecordingSink {
        fn new() -> Self {
            Self {
                docs: Mutex::new(Vec::new()),
            }
        }
    }

    impl DocumentSink for &RecordingSink {
        async fn insert(&self, collection: &str, fields: Value) -> Result<()> {
            self.docs
                .lock()
                .unwrap()
                .push((collection.to_string(), fields));
            Ok(())
        }
    }

    struct FailingSink;

    impl DocumentSink for FailingSink {
        async fn insert(&self, _collection: &str, _fields: Value) -> Result<()> {
            Err(Error::Upstream("store unavailable".to_string()))
        }
    }

    #[tokio::test]
    async fn test_log_writes_record() {
        let sink = RecordingSink::new();
        let logger = ActivityLogger::new(&sink, "activity");

        let ok = logger
            .log(
                "Staff photo uploaded",
                ActivityType::Gallery,
                ActivityStatus::Success,
                Some("u1"),
            )
            .await;
        assert!(ok);

        let docs = sink.docs.lock().unwrap();
        let (collection, fields) = &docs[0];
        assert_eq!(collection, "activity");
        assert_eq!(fields["message"], "Staff photo uploaded");
        assert_eq!(fields["type"], "gallery");
        assert_eq!(fields["status"], "success");
        assert_eq!(fields["actorId"], "u1");
        assert!(fields["timestamp"].is_string());
    }

    #[tokio::test]
    async fn test_log_omits_missing_actor() {
        let sink = RecordingSink::new();
        let logger = ActivityLogger::new(&sink, "activity");

        assert!(
            logger
                .log(
                    "Appointments enabled",
                    ActivityType::default(),
                    ActivityStatus::default(),
                    None,
                )
                .await
        );

        let docs = sink.docs.lock().unwrap();
        let (_, fields) = &docs[0];
        assert_eq!(fields["type"], "appointment");
        assert_eq!(fields["status"], "success");
        assert!(fields.get("actorId").is_none());
    }

    #[tokio::test]
    async fn test_store_failure_returns_false() {
        let logger = ActivityLogger::new(FailingSink, "activity");

        let ok = logger
            .log(
                "Service updated",
                ActivityType::Service,
                ActivityStatus::Error,
                None,
            )
            .await;
        assert!(!ok);
    }
}
