use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::enums::{
    CueBallControl, CutAngle, Distance, ErrorType, GameType, HorizontalSpin, PlayerMode,
    ShotOutcome, ShotType, Spin, StrategicIntent, TablePosition, VerticalSpin,
};

pub type GameId = i32;
pub type PlayerId = i32;
pub type ShotId = i32;

/// Opaque identity of the signed-in user, supplied by the caller
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Player entry owned by a user
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Player {
    pub id: PlayerId,
    pub user_id: UserId,
    pub name: String,
    pub created_at: Option<NaiveDateTime>,
}

/// A game or free-training session
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Game {
    pub id: GameId,
    pub user_id: UserId,
    pub game_type: GameType,
    pub player_mode: PlayerMode,
    pub player_a_id: Option<PlayerId>,
    pub player_b_id: Option<PlayerId>,
    pub player_a_name: Option<String>,
    pub player_b_name: Option<String>,
    pub team_a_score: i32,
    pub team_b_score: i32,
    pub current_rack: i32,
    pub started_at: NaiveDateTime,
    pub completed_at: Option<NaiveDateTime>,
}

impl Game {
    pub fn is_completed(&self) -> bool {
        self.completed_at.is_some()
    }

    /// Side A wins a completed game by strictly outscoring side B; ties count as not won
    pub fn is_won(&self) -> bool {
        self.is_completed() && self.team_a_score > self.team_b_score
    }
}

/// A logged shot. Attributes are optional because stored rows may omit them.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Shot {
    pub id: ShotId,
    pub game_id: GameId,
    pub player_id: Option<PlayerId>,
    pub shot_number: i32,
    pub rack: i32,
    pub shot_type: Option<ShotType>,
    pub ball_number: Option<i32>,
    pub cut_angle: Option<CutAngle>,
    pub distance: Option<Distance>,
    pub table_position: Option<TablePosition>,
    pub spin: Option<Spin>,
    pub power_level: Option<i32>,
    pub outcome: Option<ShotOutcome>,
    pub cue_ball_control: Option<CueBallControl>,
    pub error_type: Option<ErrorType>,
    pub confidence_rating: Option<i32>,
    pub strategic_intent: Option<StrategicIntent>,
    pub notes: Option<String>,
    pub is_break_shot: bool,
    pub balls_pocketed_on_break: Option<i32>,
    pub break_spread_quality: Option<i32>,
    pub created_at: Option<NaiveDateTime>,
}

impl Shot {
    pub fn is_pocketed(&self) -> bool {
        self.outcome == Some(ShotOutcome::Pocketed)
    }
}

/// Shot as submitted by the logger form, before numbering and validation
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ShotDraft {
    pub shot_type: ShotType,
    pub ball_number: Option<i32>,
    pub cut_angle: Option<CutAngle>,
    pub distance: Distance,
    pub table_position: TablePosition,
    pub horizontal_spin: HorizontalSpin,
    pub vertical_spin: VerticalSpin,
    pub power_level: i32,
    pub outcome: ShotOutcome,
    pub cue_ball_control: CueBallControl,
    pub error_type: ErrorType,
    pub confidence_rating: i32,
    pub strategic_intent: Option<StrategicIntent>,
    pub notes: Option<String>,
    /// Defaults to `true` for the first shot of a game when omitted
    pub is_break_shot: Option<bool>,
    pub balls_pocketed_on_break: i32,
    pub break_spread_quality: i32,
}

impl Default for ShotDraft {
    fn default() -> Self {
        Self {
            shot_type: ShotType::Attack,
            ball_number: None,
            cut_angle: None,
            distance: Distance::Short,
            table_position: TablePosition::Open,
            horizontal_spin: HorizontalSpin::None,
            vertical_spin: VerticalSpin::None,
            power_level: 3,
            outcome: ShotOutcome::Pocketed,
            cue_ball_control: CueBallControl::OnTarget,
            error_type: ErrorType::None,
            confidence_rating: 10,
            strategic_intent: None,
            notes: None,
            is_break_shot: None,
            balls_pocketed_on_break: 0,
            break_spread_quality: 5,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShotValidationError {
    #[error("power level must be between 1 and 5, got {0}")]
    PowerLevel(i32),
    #[error("confidence rating must be between 1 and 10, got {0}")]
    ConfidenceRating(i32),
    #[error("ball number {number} is not on the table in {game_type}")]
    BallNumber { number: i32, game_type: GameType },
    #[error("balls pocketed on break must be between 0 and 15, got {0}")]
    BallsPocketedOnBreak(i32),
    #[error("break spread quality must be between 1 and 10, got {0}")]
    BreakSpreadQuality(i32),
}

impl ShotDraft {
    pub fn spin(&self) -> Spin {
        Spin::compose(self.horizontal_spin, self.vertical_spin)
    }

    pub fn resolve_break_shot(&self, shot_number: i32) -> bool {
        self.is_break_shot.unwrap_or(shot_number == 1)
    }

    pub fn validate(&self, game_type: GameType, is_break_shot: bool) -> Result<(), ShotValidationError> {
        if !(1..=5).contains(&self.power_level) {
            return Err(ShotValidationError::PowerLevel(self.power_level));
        }
        if !(1..=10).contains(&self.confidence_rating) {
            return Err(ShotValidationError::ConfidenceRating(self.confidence_rating));
        }
        if let Some(number) = self.ball_number {
            let on_table = game_type
                .max_ball_number()
                .is_some_and(|max| (1..=max).contains(&number));
            if !on_table {
                return Err(ShotValidationError::BallNumber { number, game_type });
            }
        }
        if is_break_shot {
            if !(0..=15).contains(&self.balls_pocketed_on_break) {
                return Err(ShotValidationError::BallsPocketedOnBreak(
                    self.balls_pocketed_on_break,
                ));
            }
            if !(1..=10).contains(&self.break_spread_quality) {
                return Err(ShotValidationError::BreakSpreadQuality(
                    self.break_spread_quality,
                ));
            }
        }
        Ok(())
    }
}
