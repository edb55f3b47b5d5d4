use axum::{routing::get, Router};
use std::sync::Arc;

use crate::api::handlers::{
    health,
    players::{create_player, list_players},
    stats::{create_stats, export_stats, list_stats},
    AppState,
};

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/health", get(health))
        .route("/api/stats", get(list_stats).post(create_stats))
        .route("/api/stats/export", get(export_stats))
        .route("/api/players", get(list_players).post(create_player))
        .with_state(state)
}
