use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use std::sync::Arc;

use super::{internal_error, AppState, SearchParams};
use crate::api::models::{CreatedPlayer, ErrorResponse};
use crate::errors::RosterError;
use crate::roster::PlayerForm;

pub async fn list_players(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SearchParams>,
) -> impl IntoResponse {
    match state.roster.search(params.query()) {
        Ok(players) => Json(players).into_response(),
        Err(e) => internal_error("Failed to list players", e),
    }
}

pub async fn create_player(
    State(state): State<Arc<AppState>>,
    Json(form): Json<PlayerForm>,
) -> impl IntoResponse {
    let new_player = match form.coerce() {
        Ok(new_player) => new_player,
        Err(roster_error) => return roster_rejection(&roster_error).into_response(),
    };

    match state.roster.add(new_player) {
        Ok((id, player)) => {
            (StatusCode::CREATED, Json(CreatedPlayer { id, player })).into_response()
        }
        Err(e) => match e.downcast_ref::<RosterError>() {
            Some(roster_error) => roster_rejection(roster_error).into_response(),
            None => internal_error("Failed to add player", e),
        },
    }
}

fn roster_rejection(error: &RosterError) -> (StatusCode, Json<ErrorResponse>) {
    (
        StatusCode::UNPROCESSABLE_ENTITY,
        Json(ErrorResponse::new(error.to_string())),
    )
}
