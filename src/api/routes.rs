use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use crate::api::handlers::{
    analytics::get_analytics,
    games::{complete_game, create_game, delete_game, finish_rack, get_game, list_games, log_shot},
    AppState,
};

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/games", get(list_games).post(create_game))
        .route("/api/games/:id", get(get_game).delete(delete_game))
        .route("/api/games/:id/shots", post(log_shot))
        .route("/api/games/:id/racks", post(finish_rack))
        .route("/api/games/:id/complete", post(complete_game))
        .route("/api/analytics", get(get_analytics))
        .with_state(state)
}
