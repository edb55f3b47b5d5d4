use serde::Serialize;

use crate::database::DocumentId;
use crate::roster::Player;
use crate::stats::{PlayerStatRecord, ShotCategory};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedStats {
    pub id: DocumentId,
    pub record: PlayerStatRecord,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedPlayer {
    pub id: DocumentId,
    pub player: Player,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<ShotCategory>,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            category: None,
        }
    }
}
