use anyhow::{Context, Result};
use log::info;
use serde::Serialize;
use std::sync::Arc;

use crate::config::CollectionSettings;
use crate::database::{DocumentId, DocumentStore};
use crate::roster::{player_matches, NewPlayer, Player};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ListedPlayer {
    pub id: DocumentId,
    #[serde(flatten)]
    pub player: Player,
}

#[derive(Clone)]
pub struct RosterService {
    store: Arc<dyn DocumentStore>,
    collection: String,
}

impl RosterService {
    pub fn new(store: Arc<dyn DocumentStore>, collections: &CollectionSettings) -> Self {
        Self {
            store,
            collection: collections.players.clone(),
        }
    }

    pub fn add(&self, new_player: NewPlayer) -> Result<(DocumentId, Player)> {
        let player = new_player.validate()?;
        let body = serde_json::to_value(&player).context("Failed to serialize player")?;
        let id = self.store.create(&self.collection, &body)?;

        info!("Added {} (#{}) to the roster as document {}", player.name, player.jersey_number, id);
        Ok((id, player))
    }

    pub fn search(&self, query: &str) -> Result<Vec<ListedPlayer>> {
        let documents = self.store.list(&self.collection)?;
        Ok(documents
            .iter()
            .map(|document| ListedPlayer {
                id: document.id,
                player: Player::from_document(&document.body),
            })
            .filter(|listed| player_matches(&listed.player, query))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::{create_memory_pool, get_connection, setup, SqliteDocumentStore};
    use crate::errors::RosterError;
    use serde_json::json;

    fn service() -> (RosterService, Arc<SqliteDocumentStore>) {
        let pool = create_memory_pool().unwrap();
        setup::prepare_database(&mut get_connection(&pool).unwrap()).unwrap();
        let store = Arc::new(SqliteDocumentStore::new(pool));
        (RosterService::new(store.clone(), &CollectionSettings::default()), store)
    }

    fn new_player(name: &str, jersey_number: u32) -> NewPlayer {
        NewPlayer {
            name: name.to_string(),
            position: "Guard".to_string(),
            jersey_number,
            ..Default::default()
        }
    }

    #[test]
    fn test_add_and_search() {
        let (service, _) = service();
        service.add(new_player("Abrasaldo", 10)).unwrap();
        service.add(new_player("Monay", 14)).unwrap();

        assert_eq!(service.search("").unwrap().len(), 2);
        let found = service.search("14").unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].player.name, "Monay");
    }

    #[test]
    fn test_add_rejects_blank_name() {
        let (service, store) = service();
        let err = service.add(new_player("  ", 4)).unwrap_err();

        assert_eq!(err.downcast_ref::<RosterError>(), Some(&RosterError::MissingName));
        assert!(store.list("players").unwrap().is_empty());
    }

    #[test]
    fn test_search_reads_legacy_documents() {
        let (service, store) = service();
        store.create("players", &json!({"name": "Bare", "number": 29})).unwrap();

        let found = service.search("29").unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].player.jersey_number, 29);
    }
}
