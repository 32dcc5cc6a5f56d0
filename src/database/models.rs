use std::str::FromStr;

use rusqlite::types::{FromSql, Type};

use crate::domain::{
    CueBallControl, CutAngle, Distance, ErrorType, GameId, PlayerId, ShotOutcome, ShotType,
    Spin, StrategicIntent, TablePosition, UnknownVariant,
};

/// Shot row ready for insertion
#[derive(Debug, Clone)]
pub struct NewShot {
    pub game_id: GameId,
    pub player_id: Option<PlayerId>,
    pub shot_number: i32,
    pub rack: i32,
    pub shot_type: ShotType,
    pub ball_number: Option<i32>,
    pub cut_angle: Option<CutAngle>,
    pub distance: Distance,
    pub table_position: TablePosition,
    pub spin: Spin,
    pub power_level: i32,
    pub outcome: ShotOutcome,
    pub cue_ball_control: CueBallControl,
    pub error_type: ErrorType,
    pub confidence_rating: i32,
    pub strategic_intent: Option<StrategicIntent>,
    pub notes: Option<String>,
    pub is_break_shot: bool,
    pub balls_pocketed_on_break: i32,
    pub break_spread_quality: Option<i32>,
}

/// Reads an optional attribute column. Values of the wrong type are logged and read as absent.
pub(crate) fn optional_column<T: FromSql>(row: &rusqlite::Row, idx: usize) -> rusqlite::Result<Option<T>> {
    match row.get::<_, Option<T>>(idx) {
        Ok(value) => Ok(value),
        Err(
            e @ (rusqlite::Error::InvalidColumnType(..)
            | rusqlite::Error::FromSqlConversionFailure(..)
            | rusqlite::Error::IntegralValueOutOfRange(..)),
        ) => {
            log::warn!("Ignoring stored value: {}", e);
            Ok(None)
        }
        Err(e) => Err(e),
    }
}

/// Reads an optional taxonomy column. Values outside the taxonomy are logged and read as absent.
pub(crate) fn optional_taxonomy<T>(row: &rusqlite::Row, idx: usize) -> rusqlite::Result<Option<T>>
where
    T: FromStr<Err = UnknownVariant>,
{
    let raw: Option<String> = optional_column(row, idx)?;
    Ok(raw.and_then(|value| match value.parse() {
        Ok(parsed) => Some(parsed),
        Err(e) => {
            log::warn!("Ignoring stored value: {}", e);
            None
        }
    }))
}

/// Reads a mandatory taxonomy column, failing the row on unknown values
pub(crate) fn required_taxonomy<T>(row: &rusqlite::Row, idx: usize) -> rusqlite::Result<T>
where
    T: FromStr<Err = UnknownVariant>,
{
    let raw: String = row.get(idx)?;
    raw.parse()
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}
