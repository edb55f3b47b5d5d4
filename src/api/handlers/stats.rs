use axum::{
    extract::{Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Json},
};
use std::sync::Arc;

use super::{internal_error, AppState, SearchParams};
use crate::api::models::{CreatedStats, ErrorResponse};
use crate::errors::ValidationError;
use crate::stats::StatForm;

pub async fn list_stats(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SearchParams>,
) -> impl IntoResponse {
    match state.stats.rows(params.query()) {
        Ok(rows) => Json(rows).into_response(),
        Err(e) => internal_error("Failed to list stats", e),
    }
}

pub async fn create_stats(
    State(state): State<Arc<AppState>>,
    Json(form): Json<StatForm>,
) -> impl IntoResponse {
    let raw = match form.coerce() {
        Ok(raw) => raw,
        Err(validation) => return validation_error(&validation).into_response(),
    };

    let (id, record) = match state.stats.record(&raw) {
        Ok(created) => created,
        Err(e) => {
            return match e.downcast_ref::<ValidationError>() {
                Some(validation) => validation_error(validation).into_response(),
                None => internal_error("Failed to record stats", e),
            };
        }
    };

    (StatusCode::CREATED, Json(CreatedStats { id, record })).into_response()
}

pub async fn export_stats(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SearchParams>,
) -> impl IntoResponse {
    let mut buffer = Vec::new();
    if let Err(e) = state.stats.export_csv(params.query(), &mut buffer) {
        return internal_error("Failed to export stats", e);
    }

    (
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8"),
            (header::CONTENT_DISPOSITION, "attachment; filename=\"master-stats.csv\""),
        ],
        buffer,
    )
        .into_response()
}

fn validation_error(error: &ValidationError) -> (StatusCode, Json<ErrorResponse>) {
    (
        StatusCode::UNPROCESSABLE_ENTITY,
        Json(ErrorResponse {
            error: error.to_string(),
            category: error.category(),
        }),
    )
}
