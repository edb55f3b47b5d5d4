use anyhow::{anyhow, Context, Result};
use chrono::Utc;
use rusqlite::params;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard};

use super::connection::{get_connection, DbPool};
use super::models::{DocumentId, DocumentRow, SnapshotListener, StoredDocument, SubscriptionId};
use crate::errors::with_store_context;

/// Collection-oriented document storage consumed by the services.
pub trait DocumentStore: Send + Sync {
    fn create(&self, collection: &str, body: &Value) -> Result<DocumentId>;

    /// Documents of one collection in insertion order.
    fn list(&self, collection: &str) -> Result<Vec<StoredDocument>>;

    /// Registers a listener that gets the current snapshot right away and a
    /// fresh one after every create in `collection`. Snapshots reach a listener
    /// in the order they were taken; listeners must not write to the store.
    fn subscribe(&self, collection: &str, listener: SnapshotListener) -> Result<SubscriptionId>;

    fn unsubscribe(&self, collection: &str, id: SubscriptionId) -> Result<bool>;
}

type ListenerRegistry = HashMap<String, Vec<(SubscriptionId, SnapshotListener)>>;

pub struct SqliteDocumentStore {
    pool: DbPool,
    listeners: Mutex<ListenerRegistry>,
    /// Held while a snapshot is read and handed out.
    delivery: Mutex<()>,
    next_subscription: AtomicU64,
}

impl SqliteDocumentStore {
    pub fn new(pool: DbPool) -> Self {
        Self {
            pool,
            listeners: Mutex::new(HashMap::new()),
            delivery: Mutex::new(()),
            next_subscription: AtomicU64::new(1),
        }
    }

    fn insert_document(&self, collection: &str, body: &Value) -> Result<DocumentId> {
        let body_text = serde_json::to_string(body).context("Failed to serialize document")?;
        let created_at = Utc::now().naive_utc();
        let sql = "INSERT INTO documents (collection, body, created_at) \
                   VALUES (?1, ?2, ?3) RETURNING id";

        let conn = get_connection(&self.pool)?;
        with_store_context(
            conn.query_row(sql, params![collection, body_text, created_at], |row| row.get(0)),
            "insert",
            collection,
        )
    }

    fn query_rows(&self, collection: &str) -> Result<Vec<DocumentRow>> {
        let sql = "SELECT id, collection, body, created_at FROM documents \
                   WHERE collection = ?1 ORDER BY id";

        let conn = get_connection(&self.pool)?;
        let mut stmt = conn.prepare(sql)?;
        let rows = stmt
            .query_map(params![collection], parse_document_row)?
            .collect::<rusqlite::Result<Vec<_>>>();

        with_store_context(rows, "list", collection)
    }

    fn listeners_for(&self, collection: &str) -> Result<Vec<SnapshotListener>> {
        let registry = self
            .listeners
            .lock()
            .map_err(|_| anyhow!("Listener registry lock poisoned"))?;

        Ok(registry
            .get(collection)
            .map(|entries| entries.iter().map(|(_, listener)| listener.clone()).collect())
            .unwrap_or_default())
    }

    fn lock_delivery(&self) -> Result<MutexGuard<'_, ()>> {
        self.delivery
            .lock()
            .map_err(|_| anyhow!("Snapshot delivery lock poisoned"))
    }

    fn notify(&self, collection: &str) -> Result<()> {
        let _delivery = self.lock_delivery()?;
        let listeners = self.listeners_for(collection)?;
        if listeners.is_empty() {
            return Ok(());
        }

        let snapshot = self.list(collection)?;
        for listener in listeners {
            listener(snapshot.as_slice());
        }
        Ok(())
    }
}

impl DocumentStore for SqliteDocumentStore {
    fn create(&self, collection: &str, body: &Value) -> Result<DocumentId> {
        let id = self.insert_document(collection, body)?;
        log::debug!("Stored document {} in {}", id, collection);

        // Already persisted, so notification failures are only logged
        if let Err(e) = self.notify(collection) {
            log::error!("Failed to notify {} subscribers: {:?}", collection, e);
        }
        Ok(id)
    }

    fn list(&self, collection: &str) -> Result<Vec<StoredDocument>> {
        let rows = self.query_rows(collection)?;
        Ok(rows.into_iter().map(decode_document).collect())
    }

    fn subscribe(&self, collection: &str, listener: SnapshotListener) -> Result<SubscriptionId> {
        let id = self.next_subscription.fetch_add(1, Ordering::Relaxed);
        let _delivery = self.lock_delivery()?;
        {
            let mut registry = self
                .listeners
                .lock()
                .map_err(|_| anyhow!("Listener registry lock poisoned"))?;
            registry
                .entry(collection.to_string())
                .or_default()
                .push((id, listener.clone()));
        }

        let snapshot = self.list(collection)?;
        listener(snapshot.as_slice());
        Ok(id)
    }

    fn unsubscribe(&self, collection: &str, id: SubscriptionId) -> Result<bool> {
        let mut registry = self
            .listeners
            .lock()
            .map_err(|_| anyhow!("Listener registry lock poisoned"))?;

        let Some(entries) = registry.get_mut(collection) else {
            return Ok(false);
        };
        let before = entries.len();
        entries.retain(|(existing, _)| *existing != id);
        Ok(entries.len() != before)
    }
}

fn parse_document_row(row: &rusqlite::Row) -> rusqlite::Result<DocumentRow> {
    Ok(DocumentRow {
        id: row.get(0)?,
        collection: row.get(1)?,
        body: row.get(2)?,
        created_at: row.get(3)?,
    })
}

fn decode_document(row: DocumentRow) -> StoredDocument {
    let body = serde_json::from_str(&row.body).unwrap_or_else(|e| {
        log::warn!("Document {} in {} has an unreadable body: {}", row.id, row.collection, e);
        Value::Null
    });

    StoredDocument {
        id: row.id,
        collection: row.collection,
        body,
        created_at: row.created_at,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::connection::create_memory_pool;
    use crate::database::setup::prepare_database;
    use serde_json::json;
    use std::sync::Arc;

    fn store() -> SqliteDocumentStore {
        let pool = create_memory_pool().unwrap();
        let mut conn = get_connection(&pool).unwrap();
        prepare_database(&mut conn).unwrap();
        drop(conn);
        SqliteDocumentStore::new(pool)
    }

    #[test]
    fn test_create_and_list_in_insertion_order() {
        let store = store();
        let first = store.create("masterStats", &json!({"name": "Magno"})).unwrap();
        let second = store.create("masterStats", &json!({"name": "Bare"})).unwrap();
        store.create("players", &json!({"name": "Plaza"})).unwrap();

        let docs = store.list("masterStats").unwrap();
        assert_eq!(docs.len(), 2);
        assert_eq!(docs[0].id, first);
        assert_eq!(docs[1].id, second);
        assert_eq!(docs[1].body, json!({"name": "Bare"}));
        assert!(docs.iter().all(|d| d.collection == "masterStats"));
    }

    #[test]
    fn test_list_unknown_collection_is_empty() {
        assert!(store().list("nothing").unwrap().is_empty());
    }

    #[test]
    fn test_unreadable_body_decodes_to_null() {
        let store = store();
        {
            let conn = get_connection(&store.pool).unwrap();
            conn.execute(
                "INSERT INTO documents (collection, body, created_at) \
                 VALUES ('masterStats', '{broken', ?1)",
                params![Utc::now().naive_utc()],
            )
            .unwrap();
        }

        let docs = store.list("masterStats").unwrap();
        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0].body, Value::Null);
    }

    #[test]
    fn test_subscribers_receive_snapshots() {
        let store = store();
        store.create("masterStats", &json!({"name": "Fulgar"})).unwrap();

        let sizes = Arc::new(Mutex::new(Vec::new()));
        let seen = sizes.clone();
        let id = store
            .subscribe(
                "masterStats",
                Arc::new(move |docs: &[StoredDocument]| seen.lock().unwrap().push(docs.len())),
            )
            .unwrap();

        store.create("masterStats", &json!({"name": "Aguilar"})).unwrap();
        store.create("players", &json!({"name": "Bongala"})).unwrap();
        assert_eq!(*sizes.lock().unwrap(), vec![1, 2]);

        assert!(store.unsubscribe("masterStats", id).unwrap());
        assert!(!store.unsubscribe("masterStats", id).unwrap());
        store.create("masterStats", &json!({"name": "Madriano"})).unwrap();
        assert_eq!(*sizes.lock().unwrap(), vec![1, 2]);
    }

    #[test]
    fn test_concurrent_creates_deliver_growing_snapshots() {
        let store = store();
        let sizes = Arc::new(Mutex::new(Vec::new()));
        let seen = sizes.clone();
        store
            .subscribe(
                "masterStats",
                Arc::new(move |docs: &[StoredDocument]| seen.lock().unwrap().push(docs.len())),
            )
            .unwrap();

        std::thread::scope(|scope| {
            for worker in 0..4 {
                let store = &store;
                scope.spawn(move || {
                    for game in 0..5 {
                        let body = json!({"name": format!("Player {worker}-{game}")});
                        store.create("masterStats", &body).unwrap();
                    }
                });
            }
        });

        let sizes = sizes.lock().unwrap();
        assert_eq!(sizes.len(), 21);
        assert_eq!(sizes.first(), Some(&0));
        assert_eq!(sizes.last(), Some(&20));
        assert!(sizes.windows(2).all(|pair| pair[0] <= pair[1]));
    }
}
