use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{request::Parts, StatusCode},
};

use crate::config::settings::AppConfig;
use crate::domain::UserId;
use crate::services::analytics::AnalyticsService;
use crate::services::games::GameService;

pub mod analytics;
pub mod games;

/// Header carrying the authenticated user's id, set by the auth proxy in front of the API
pub const USER_HEADER: &str = "x-user-id";

pub struct AppState {
    pub games: GameService,
    pub analytics: AnalyticsService,
    pub config: AppConfig,
}

/// Identity of the caller, required by every endpoint
pub struct CurrentUser(pub UserId);

#[async_trait]
impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = (StatusCode, &'static str);

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .headers
            .get(USER_HEADER)
            .and_then(|value| value.to_str().ok())
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .map(|value| CurrentUser(UserId::new(value)))
            .ok_or((StatusCode::UNAUTHORIZED, "Missing X-User-Id header"))
    }
}
