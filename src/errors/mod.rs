use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::domain::{GameId, ShotValidationError};

#[derive(Error, Debug)]
pub enum GameError {
    #[error("Game {0} not found")]
    NotFound(GameId),

    #[error("Game {0} is already completed")]
    AlreadyCompleted(GameId),

    #[error("Game {0} does not track racks")]
    RacksNotTracked(GameId),

    #[error("Invalid shot: {0}")]
    InvalidShot(#[from] ShotValidationError),

    #[error("Storage error: {0:#}")]
    Storage(#[from] anyhow::Error),
}

pub type GameResult<T> = std::result::Result<T, GameError>;

impl GameError {
    pub fn status(&self) -> StatusCode {
        match self {
            GameError::NotFound(_) => StatusCode::NOT_FOUND,
            GameError::AlreadyCompleted(_) | GameError::RacksNotTracked(_) => StatusCode::CONFLICT,
            GameError::InvalidShot(_) => StatusCode::BAD_REQUEST,
            GameError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for GameError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            log::error!("{}", self);
        }
        (status, self.to_string()).into_response()
    }
}
