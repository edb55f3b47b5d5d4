use chrono::NaiveDateTime;
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;

/// Identifier assigned by the store on create.
pub type DocumentId = i64;

pub type SubscriptionId = u64;

/// Receives the full collection snapshot after each change.
pub type SnapshotListener = Arc<dyn Fn(&[StoredDocument]) + Send + Sync>;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredDocument {
    pub id: DocumentId,
    pub collection: String,
    pub body: Value,
    pub created_at: NaiveDateTime,
}

// Row as read from SQLite, before the body is decoded
#[derive(Debug, Clone)]
pub(crate) struct DocumentRow {
    pub id: DocumentId,
    pub collection: String,
    pub body: String,
    pub created_at: NaiveDateTime,
}
