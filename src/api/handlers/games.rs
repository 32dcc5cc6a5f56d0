use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
};
use std::sync::Arc;

use super::{AppState, CurrentUser};
use crate::api::models::{RackResult, RecentGamesParams};
use crate::domain::{Game, GameId, Shot, ShotDraft};
use crate::errors::GameResult;
use crate::services::games::{GameDetail, GameSetup};

pub async fn list_games(
    State(state): State<Arc<AppState>>,
    CurrentUser(user_id): CurrentUser,
    Query(params): Query<RecentGamesParams>,
) -> GameResult<Json<Vec<Game>>> {
    let limit = params
        .limit
        .unwrap_or(state.config.analytics.recent_games_limit)
        .clamp(1, 100);
    Ok(Json(state.games.recent_games(&user_id, limit)?))
}

pub async fn create_game(
    State(state): State<Arc<AppState>>,
    CurrentUser(user_id): CurrentUser,
    Json(setup): Json<GameSetup>,
) -> GameResult<(StatusCode, Json<Game>)> {
    let game = state.games.start_game(&user_id, &setup)?;
    Ok((StatusCode::CREATED, Json(game)))
}

pub async fn get_game(
    State(state): State<Arc<AppState>>,
    CurrentUser(user_id): CurrentUser,
    Path(game_id): Path<GameId>,
) -> GameResult<Json<GameDetail>> {
    Ok(Json(state.games.game_detail(&user_id, game_id)?))
}

pub async fn delete_game(
    State(state): State<Arc<AppState>>,
    CurrentUser(user_id): CurrentUser,
    Path(game_id): Path<GameId>,
) -> GameResult<StatusCode> {
    state.games.delete_game(&user_id, game_id)?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn log_shot(
    State(state): State<Arc<AppState>>,
    CurrentUser(user_id): CurrentUser,
    Path(game_id): Path<GameId>,
    Json(draft): Json<ShotDraft>,
) -> GameResult<(StatusCode, Json<Shot>)> {
    let shot = state.games.log_shot(&user_id, game_id, &draft)?;
    Ok((StatusCode::CREATED, Json(shot)))
}

pub async fn finish_rack(
    State(state): State<Arc<AppState>>,
    CurrentUser(user_id): CurrentUser,
    Path(game_id): Path<GameId>,
    Json(result): Json<RackResult>,
) -> GameResult<Json<Game>> {
    Ok(Json(state.games.finish_rack(&user_id, game_id, result.won)?))
}

pub async fn complete_game(
    State(state): State<Arc<AppState>>,
    CurrentUser(user_id): CurrentUser,
    Path(game_id): Path<GameId>,
) -> GameResult<Json<Game>> {
    Ok(Json(state.games.finish_game(&user_id, game_id)?))
}
