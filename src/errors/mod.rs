use anyhow::Context as _;
use thiserror::Error;

use crate::stats::ShotCategory;

/// Rejection of a stat line before anything is derived or stored.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{category} made ({made}) cannot exceed {category} attempts ({attempts})")]
    MadeExceedsAttempts {
        category: ShotCategory,
        made: u32,
        attempts: u32,
    },
    #[error("player name is required")]
    MissingPlayerName,
    #[error("{field} count {value} is out of range")]
    CountOutOfRange { field: &'static str, value: String },
}

impl ValidationError {
    pub fn category(&self) -> Option<ShotCategory> {
        match self {
            ValidationError::MadeExceedsAttempts { category, .. } => Some(*category),
            ValidationError::MissingPlayerName | ValidationError::CountOutOfRange { .. } => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RosterError {
    #[error("player name is required")]
    MissingName,
    #[error("jersey number {0} is out of range")]
    JerseyNumberOutOfRange(String),
}

/// Add context to document store errors
pub fn store_context(operation: &str, collection: &str) -> String {
    format!("Failed to {} documents in collection: {}", operation, collection)
}

/// Wrap result with document store context
pub fn with_store_context<T, E>(
    result: Result<T, E>,
    operation: &str,
    collection: &str,
) -> anyhow::Result<T>
where
    E: std::error::Error + Send + Sync + 'static,
{
    result.with_context(|| store_context(operation, collection))
}
