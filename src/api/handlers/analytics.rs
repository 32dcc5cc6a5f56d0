use axum::{extract::State, response::Json};
use std::sync::Arc;

use super::{AppState, CurrentUser};
use crate::analytics::AnalyticsReport;
use crate::errors::GameResult;

pub async fn get_analytics(
    State(state): State<Arc<AppState>>,
    CurrentUser(user_id): CurrentUser,
) -> GameResult<Json<AnalyticsReport>> {
    let report = state.analytics.report(&user_id)?;
    Ok(Json(report))
}
