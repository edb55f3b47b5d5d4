use anyhow::{Context, Result};
use log::{info, warn};
use serde::Serialize;
use std::io::Write;
use std::sync::Arc;

use crate::config::CollectionSettings;
use crate::database::{DocumentId, DocumentStore, StoredDocument, SubscriptionId};
use crate::export;
use crate::stats::{self, PlayerStatRecord, RawStatLine, StatRow};

/// A projected row together with the id of the document it came from.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ListedRow {
    pub id: DocumentId,
    #[serde(flatten)]
    pub row: StatRow,
}

#[derive(Clone)]
pub struct StatsService {
    store: Arc<dyn DocumentStore>,
    collection: String,
}

impl StatsService {
    pub fn new(store: Arc<dyn DocumentStore>, collections: &CollectionSettings) -> Self {
        Self {
            store,
            collection: collections.stats.clone(),
        }
    }

    /// Validates, derives and stores one stat line. A `ValidationError` is
    /// returned inside the `anyhow::Error` and nothing is written.
    pub fn record(&self, raw: &RawStatLine) -> Result<(DocumentId, PlayerStatRecord)> {
        let record = stats::validate_and_derive(raw)?;
        let body = serde_json::to_value(&record).context("Failed to serialize stat record")?;
        let id = self.store.create(&self.collection, &body)?;

        info!("Recorded stats for {} as document {}", record.player_name, id);
        Ok((id, record))
    }

    pub fn rows(&self, query: &str) -> Result<Vec<ListedRow>> {
        let documents = self.store.list(&self.collection)?;
        Ok(project_snapshot(&documents, query))
    }

    pub fn export_csv<W: Write>(&self, query: &str, writer: W) -> Result<usize> {
        let rows: Vec<StatRow> = self.rows(query)?.into_iter().map(|r| r.row).collect();
        export::write_rows_csv(&rows, writer)
    }

    /// Calls `on_update` with the filtered rows now and after every new stat line.
    pub fn watch_rows<F>(&self, query: &str, on_update: F) -> Result<SubscriptionId>
    where
        F: Fn(Vec<ListedRow>) + Send + Sync + 'static,
    {
        let query = query.to_string();
        self.store.subscribe(
            &self.collection,
            Arc::new(move |documents: &[StoredDocument]| {
                on_update(project_snapshot(documents, &query))
            }),
        )
    }

    pub fn unwatch(&self, id: SubscriptionId) -> Result<bool> {
        self.store.unsubscribe(&self.collection, id)
    }
}

fn project_snapshot(documents: &[StoredDocument], query: &str) -> Vec<ListedRow> {
    documents
        .iter()
        .map(project_stored)
        .filter(|listed| stats::matches(&listed.row, query))
        .collect()
}

fn project_stored(document: &StoredDocument) -> ListedRow {
    let (row, warnings) = stats::project_document(&document.body);
    for warning in &warnings {
        warn!("Stat document {} has a malformed field {}", document.id, warning);
    }
    ListedRow {
        id: document.id,
        row,
    }
}
