use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::Deserialize;

use crate::api::models::ErrorResponse;
use crate::services::{RosterService, StatsService};

pub mod players;
pub mod stats;

pub struct AppState {
    pub stats: StatsService,
    pub roster: RosterService,
}

#[derive(Deserialize)]
pub struct SearchParams {
    pub q: Option<String>,
}

impl SearchParams {
    pub fn query(&self) -> &str {
        self.q.as_deref().unwrap_or("")
    }
}

pub async fn health() -> &'static str {
    "ok"
}

pub(crate) fn internal_error(context: &str, error: anyhow::Error) -> Response {
    log::error!("{}: {:?}", context, error);
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse::new(format!("{}: {}", context, error))),
    )
        .into_response()
}
