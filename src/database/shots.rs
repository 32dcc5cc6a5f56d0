use anyhow::{Context, Result};
use rusqlite::{params, params_from_iter, Connection};

use super::models::{optional_column, optional_taxonomy, NewShot};
use crate::domain::{GameId, Shot};

const SHOT_COLUMNS: &str = "id, game_id, player_id, shot_number, rack, shot_type, ball_number, cut_angle, distance, table_position, spin, power_level, outcome, cue_ball_control, error_type, confidence_rating, strategic_intent, notes, is_break_shot, balls_pocketed_on_break, break_spread_quality, created_at";

pub fn insert_shot(conn: &Connection, shot: &NewShot) -> Result<Shot> {
    let sql = format!(
        "INSERT INTO shots (game_id, player_id, shot_number, rack, shot_type, ball_number, cut_angle, distance, table_position, spin, power_level, outcome, cue_ball_control, error_type, confidence_rating, strategic_intent, notes, is_break_shot, balls_pocketed_on_break, break_spread_quality) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16, ?17, ?18, ?19, ?20) RETURNING {SHOT_COLUMNS}"
    );

    conn.query_row(
        &sql,
        params![
            shot.game_id,
            shot.player_id,
            shot.shot_number,
            shot.rack,
            shot.shot_type.as_str(),
            shot.ball_number,
            shot.cut_angle.map(|v| v.as_str()),
            shot.distance.as_str(),
            shot.table_position.as_str(),
            shot.spin.as_str(),
            shot.power_level,
            shot.outcome.as_str(),
            shot.cue_ball_control.as_str(),
            shot.error_type.as_str(),
            shot.confidence_rating,
            shot.strategic_intent.map(|v| v.as_str()),
            shot.notes,
            shot.is_break_shot,
            shot.balls_pocketed_on_break,
            shot.break_spread_quality,
        ],
        parse_shot_row,
    )
    .with_context(|| format!("Failed to insert shot #{} for game {}", shot.shot_number, shot.game_id))
}

fn parse_shot_row(row: &rusqlite::Row) -> rusqlite::Result<Shot> {
    Ok(Shot {
        id: row.get(0)?,
        game_id: row.get(1)?,
        player_id: row.get(2)?,
        shot_number: row.get(3)?,
        rack: row.get(4)?,
        shot_type: optional_taxonomy(row, 5)?,
        ball_number: optional_column(row, 6)?,
        cut_angle: optional_taxonomy(row, 7)?,
        distance: optional_taxonomy(row, 8)?,
        table_position: optional_taxonomy(row, 9)?,
        spin: optional_taxonomy(row, 10)?,
        power_level: optional_column(row, 11)?,
        outcome: optional_taxonomy(row, 12)?,
        cue_ball_control: optional_taxonomy(row, 13)?,
        error_type: optional_taxonomy(row, 14)?,
        confidence_rating: optional_column(row, 15)?,
        strategic_intent: optional_taxonomy(row, 16)?,
        notes: optional_column(row, 17)?,
        is_break_shot: optional_column(row, 18)?.unwrap_or(false),
        balls_pocketed_on_break: optional_column(row, 19)?,
        break_spread_quality: optional_column(row, 20)?,
        created_at: optional_column(row, 21)?,
    })
}

/// Shots of one game in logging order
pub fn list_by_game(conn: &Connection, game_id: GameId) -> Result<Vec<Shot>> {
    let sql = format!("SELECT {SHOT_COLUMNS} FROM shots WHERE game_id = ?1 ORDER BY shot_number");

    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt
        .query_map(params![game_id], parse_shot_row)?
        .collect::<rusqlite::Result<Vec<_>>>()
        .context("Failed to list shots for game")?;

    Ok(rows)
}

/// Shots belonging to any of the given games
pub fn list_by_game_ids(conn: &Connection, game_ids: &[GameId]) -> Result<Vec<Shot>> {
    if game_ids.is_empty() {
        return Ok(Vec::new());
    }

    let placeholders = vec!["?"; game_ids.len()].join(", ");
    let sql = format!(
        "SELECT {SHOT_COLUMNS} FROM shots WHERE game_id IN ({placeholders}) ORDER BY game_id, shot_number"
    );

    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt
        .query_map(params_from_iter(game_ids.iter()), parse_shot_row)?
        .collect::<rusqlite::Result<Vec<_>>>()
        .context("Failed to list shots for games")?;

    Ok(rows)
}

/// Number the next shot of a game will get
pub fn next_shot_number(conn: &Connection, game_id: GameId) -> Result<i32> {
    let sql = "SELECT COALESCE(MAX(shot_number), 0) + 1 FROM shots WHERE game_id = ?1";
    conn.query_row(sql, params![game_id], |row| row.get(0))
        .context("Failed to number shot for game")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::{create_memory_pool, games, get_connection, setup, DbConn};
    use crate::domain::{
        CueBallControl, Distance, ErrorType, GameType, PlayerMode, ShotOutcome, ShotType, Spin,
        TablePosition, UserId,
    };
    use chrono::Utc;

    fn setup_conn() -> DbConn {
        let pool = create_memory_pool().unwrap();
        let mut conn = get_connection(&pool).unwrap();
        setup::reset_database(&mut conn).unwrap();
        conn
    }

    fn new_shot(game_id: GameId, shot_number: i32) -> NewShot {
        NewShot {
            game_id,
            player_id: None,
            shot_number,
            rack: 1,
            shot_type: ShotType::Attack,
            ball_number: Some(3),
            cut_angle: None,
            distance: Distance::Long,
            table_position: TablePosition::Rail,
            spin: Spin::BottomRight,
            power_level: 4,
            outcome: ShotOutcome::Pocketed,
            cue_ball_control: CueBallControl::SafeZone,
            error_type: ErrorType::None,
            confidence_rating: 7,
            strategic_intent: None,
            notes: Some("stun follow".to_string()),
            is_break_shot: false,
            balls_pocketed_on_break: 0,
            break_spread_quality: None,
        }
    }

    fn insert_game(conn: &Connection, user: &str) -> GameId {
        games::insert_game(
            conn,
            &UserId::new(user),
            GameType::EightBall,
            PlayerMode::Single,
            None,
            None,
            Utc::now().naive_utc(),
        )
        .unwrap()
        .id
    }

    #[test]
    fn test_insert_round_trips_attributes() {
        let mut conn = setup_conn();
        let game_id = insert_game(&mut conn, "u1");

        let shot = insert_shot(&mut conn, &new_shot(game_id, 1)).unwrap();

        assert_eq!(shot.game_id, game_id);
        assert_eq!(shot.spin, Some(Spin::BottomRight));
        assert_eq!(shot.cue_ball_control, Some(CueBallControl::SafeZone));
        assert_eq!(shot.cut_angle, None);
        assert_eq!(shot.notes.as_deref(), Some("stun follow"));
        assert!(shot.is_pocketed());
        assert!(!shot.is_break_shot);
    }

    #[test]
    fn test_duplicate_shot_number_is_rejected() {
        let mut conn = setup_conn();
        let game_id = insert_game(&mut conn, "u1");

        insert_shot(&mut conn, &new_shot(game_id, 1)).unwrap();
        assert!(insert_shot(&mut conn, &new_shot(game_id, 1)).is_err());
    }

    #[test]
    fn test_list_by_game_ids_filters_and_orders() {
        let mut conn = setup_conn();
        let first = insert_game(&mut conn, "u1");
        let second = insert_game(&mut conn, "u1");
        let other = insert_game(&mut conn, "u2");
        for (game_id, number) in [(second, 2), (first, 1), (other, 1), (second, 1)] {
            insert_shot(&mut conn, &new_shot(game_id, number)).unwrap();
        }

        let shots = list_by_game_ids(&mut conn, &[first, second]).unwrap();
        let keys: Vec<(GameId, i32)> = shots.iter().map(|s| (s.game_id, s.shot_number)).collect();
        assert_eq!(keys, vec![(first, 1), (second, 1), (second, 2)]);

        assert!(list_by_game_ids(&mut conn, &[]).unwrap().is_empty());
        assert_eq!(next_shot_number(&mut conn, second).unwrap(), 3);
        assert_eq!(next_shot_number(&mut conn, other).unwrap(), 2);
        assert_eq!(list_by_game(&mut conn, second).unwrap().len(), 2);
    }

    #[test]
    fn test_unknown_stored_values_read_as_absent() {
        let mut conn = setup_conn();
        let game_id = insert_game(&mut conn, "u1");
        conn.execute(
            "INSERT INTO shots (game_id, shot_number, rack, outcome, spin) VALUES (?1, 1, 1, 'wobbled', NULL)",
            params![game_id],
        )
        .unwrap();

        let shots = list_by_game(&mut conn, game_id).unwrap();

        assert_eq!(shots.len(), 1);
        assert_eq!(shots[0].outcome, None);
        assert_eq!(shots[0].spin, None);
        assert_eq!(shots[0].power_level, None);
    }

    #[test]
    fn test_mistyped_stored_values_read_as_absent() {
        let mut conn = setup_conn();
        let game_id = insert_game(&mut conn, "u1");
        insert_shot(&mut conn, &new_shot(game_id, 1)).unwrap();
        conn.execute(
            "INSERT INTO shots (game_id, shot_number, rack, ball_number, power_level, outcome, confidence_rating, is_break_shot) VALUES (?1, 2, 1, 'cue', 'hard', 'miss', 2.5, 'yes')",
            params![game_id],
        )
        .unwrap();

        let shots = list_by_game_ids(&mut conn, &[game_id]).unwrap();

        assert_eq!(shots.len(), 2);
        let odd = &shots[1];
        assert_eq!(odd.ball_number, None);
        assert_eq!(odd.power_level, None);
        assert_eq!(odd.confidence_rating, None);
        assert!(!odd.is_break_shot);
        assert_eq!(odd.outcome, Some(ShotOutcome::Miss));
        assert_eq!(shots[0].power_level, Some(4));
    }

    #[test]
    fn test_deleting_game_removes_its_shots() {
        let mut conn = setup_conn();
        let game_id = insert_game(&mut conn, "u1");
        insert_shot(&mut conn, &new_shot(game_id, 1)).unwrap();

        assert!(games::delete_game(&mut conn, &UserId::new("u1"), game_id).unwrap());

        assert!(list_by_game(&mut conn, game_id).unwrap().is_empty());
    }
}
