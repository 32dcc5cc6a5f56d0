use anyhow::{Context, Result};
use chrono::NaiveDateTime;
use rusqlite::{params, Connection, OptionalExtension};

use super::models::required_taxonomy;
use crate::domain::{Game, GameId, GameType, PlayerId, PlayerMode, UserId};

const SELECT_GAME: &str = "
    SELECT g.id, g.user_id, g.game_type, g.player_mode, g.player_a_id, g.player_b_id,
           pa.name, pb.name, g.team_a_score, g.team_b_score, g.current_rack,
           g.started_at, g.completed_at
    FROM games g
    LEFT JOIN players pa ON pa.id = g.player_a_id
    LEFT JOIN players pb ON pb.id = g.player_b_id";

#[allow(clippy::too_many_arguments)]
pub fn insert_game(
    conn: &Connection,
    user_id: &UserId,
    game_type: GameType,
    player_mode: PlayerMode,
    player_a_id: Option<PlayerId>,
    player_b_id: Option<PlayerId>,
    started_at: NaiveDateTime,
) -> Result<Game> {
    let sql = "INSERT INTO games (user_id, game_type, player_mode, player_a_id, player_b_id, started_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6) RETURNING id";

    let id: GameId = conn
        .query_row(
            sql,
            params![
                user_id.as_str(),
                game_type.as_str(),
                player_mode.as_str(),
                player_a_id,
                player_b_id,
                started_at
            ],
            |row| row.get(0),
        )
        .context("Failed to insert game")?;

    find_by_id(conn, user_id, id)?
        .ok_or_else(|| anyhow::anyhow!("Inserted game {} could not be read back", id))
}

fn parse_game_row(row: &rusqlite::Row) -> rusqlite::Result<Game> {
    Ok(Game {
        id: row.get(0)?,
        user_id: UserId::new(row.get::<_, String>(1)?),
        game_type: required_taxonomy(row, 2)?,
        player_mode: required_taxonomy(row, 3)?,
        player_a_id: row.get(4)?,
        player_b_id: row.get(5)?,
        player_a_name: row.get(6)?,
        player_b_name: row.get(7)?,
        team_a_score: row.get(8)?,
        team_b_score: row.get(9)?,
        current_rack: row.get(10)?,
        started_at: row.get(11)?,
        completed_at: row.get(12)?,
    })
}

pub fn find_by_id(conn: &Connection, user_id: &UserId, id: GameId) -> Result<Option<Game>> {
    let sql = format!("{SELECT_GAME} WHERE g.id = ?1 AND g.user_id = ?2");

    conn.query_row(&sql, params![id, user_id.as_str()], parse_game_row)
        .optional()
        .context("Failed to query game by id")
}

pub fn list_by_user(conn: &Connection, user_id: &UserId) -> Result<Vec<Game>> {
    let sql = format!("{SELECT_GAME} WHERE g.user_id = ?1 ORDER BY g.started_at, g.id");

    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(params![user_id.as_str()], parse_game_row)?;

    skip_malformed(rows).context("Failed to list games for user")
}

/// Newest games first
pub fn list_recent(conn: &Connection, user_id: &UserId, limit: usize) -> Result<Vec<Game>> {
    let sql = format!("{SELECT_GAME} WHERE g.user_id = ?1 ORDER BY g.started_at DESC, g.id DESC LIMIT ?2");

    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(params![user_id.as_str(), limit as i64], parse_game_row)?;

    skip_malformed(rows).context("Failed to list recent games")
}

/// Drops rows whose stored values cannot be decoded; any other error aborts the listing
fn skip_malformed(
    rows: impl Iterator<Item = rusqlite::Result<Game>>,
) -> rusqlite::Result<Vec<Game>> {
    let mut games = Vec::new();
    for row in rows {
        match row {
            Ok(game) => games.push(game),
            Err(e @ rusqlite::Error::FromSqlConversionFailure(..)) => {
                log::warn!("Skipping malformed game row: {}", e);
            }
            Err(e) => return Err(e),
        }
    }
    Ok(games)
}

/// Credits the rack to one side and advances to the next rack.
/// Returns `false` when no in-progress game of this user matched.
pub fn record_rack_result(conn: &Connection, user_id: &UserId, id: GameId, won: bool) -> Result<bool> {
    let sql = "UPDATE games SET team_a_score = team_a_score + ?1, team_b_score = team_b_score + ?2, current_rack = current_rack + 1 WHERE id = ?3 AND user_id = ?4 AND completed_at IS NULL";
    let (team_a_points, team_b_points) = if won { (1, 0) } else { (0, 1) };

    let changed = conn
        .execute(
            sql,
            params![team_a_points, team_b_points, id, user_id.as_str()],
        )
        .context("Failed to update game score")?;

    Ok(changed > 0)
}

/// Returns `false` when no in-progress game of this user matched
pub fn mark_completed(
    conn: &Connection,
    user_id: &UserId,
    id: GameId,
    completed_at: NaiveDateTime,
) -> Result<bool> {
    let sql = "UPDATE games SET completed_at = ?1 WHERE id = ?2 AND user_id = ?3 AND completed_at IS NULL";

    let changed = conn
        .execute(sql, params![completed_at, id, user_id.as_str()])
        .context("Failed to mark game as completed")?;

    Ok(changed > 0)
}

/// Shots of the game go with it
pub fn delete_game(conn: &Connection, user_id: &UserId, id: GameId) -> Result<bool> {
    let sql = "DELETE FROM games WHERE id = ?1 AND user_id = ?2";

    let changed = conn
        .execute(sql, params![id, user_id.as_str()])
        .context("Failed to delete game")?;

    Ok(changed > 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::{create_memory_pool, get_connection, players, setup, DbConn};
    use chrono::NaiveDate;

    fn day(d: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 6, d)
            .unwrap()
            .and_hms_opt(20, 0, 0)
            .unwrap()
    }

    fn setup_conn() -> DbConn {
        let pool = create_memory_pool().unwrap();
        let mut conn = get_connection(&pool).unwrap();
        setup::reset_database(&mut conn).unwrap();
        conn
    }

    #[test]
    fn test_insert_reads_back_player_names() {
        let mut conn = setup_conn();
        let user = UserId::new("u1");
        let a = players::insert_player(&mut conn, &user, "Alex").unwrap();
        let b = players::insert_player(&mut conn, &user, "Jess").unwrap();

        let game = insert_game(
            &mut conn,
            &user,
            GameType::NineBall,
            PlayerMode::Double,
            Some(a.id),
            Some(b.id),
            day(1),
        )
        .unwrap();

        assert_eq!(game.game_type, GameType::NineBall);
        assert_eq!(game.player_a_name.as_deref(), Some("Alex"));
        assert_eq!(game.player_b_name.as_deref(), Some("Jess"));
        assert_eq!((game.team_a_score, game.team_b_score, game.current_rack), (0, 0, 1));
        assert_eq!(game.started_at, day(1));
        assert!(game.completed_at.is_none());
    }

    #[test]
    fn test_recent_games_are_newest_first_and_limited() {
        let mut conn = setup_conn();
        let user = UserId::new("u1");
        for d in [3, 1, 5, 2] {
            insert_game(&mut conn, &user, GameType::EightBall, PlayerMode::Single, None, None, day(d)).unwrap();
        }
        insert_game(&mut conn, &UserId::new("u2"), GameType::EightBall, PlayerMode::Single, None, None, day(9)).unwrap();

        let recent = list_recent(&mut conn, &user, 3).unwrap();
        let days: Vec<NaiveDateTime> = recent.iter().map(|g| g.started_at).collect();
        assert_eq!(days, vec![day(5), day(3), day(2)]);

        assert_eq!(list_by_user(&mut conn, &user).unwrap().len(), 4);
    }

    #[test]
    fn test_updates_are_scoped_to_owner() {
        let mut conn = setup_conn();
        let owner = UserId::new("owner");
        let stranger = UserId::new("stranger");
        let game = insert_game(&mut conn, &owner, GameType::TenBall, PlayerMode::Single, None, None, day(1)).unwrap();

        assert!(!record_rack_result(&mut conn, &stranger, game.id, true).unwrap());
        assert!(record_rack_result(&mut conn, &owner, game.id, true).unwrap());
        assert!(record_rack_result(&mut conn, &owner, game.id, false).unwrap());
        assert!(record_rack_result(&mut conn, &owner, game.id, true).unwrap());
        assert!(!mark_completed(&mut conn, &stranger, game.id, day(2)).unwrap());
        assert!(mark_completed(&mut conn, &owner, game.id, day(2)).unwrap());

        let stored = find_by_id(&mut conn, &owner, game.id).unwrap().unwrap();
        assert_eq!((stored.team_a_score, stored.team_b_score, stored.current_rack), (2, 1, 4));
        assert_eq!(stored.completed_at, Some(day(2)));
        assert!(stored.is_won());

        assert!(!record_rack_result(&mut conn, &owner, game.id, true).unwrap());
        assert!(!mark_completed(&mut conn, &owner, game.id, day(3)).unwrap());
        let frozen = find_by_id(&mut conn, &owner, game.id).unwrap().unwrap();
        assert_eq!((frozen.team_a_score, frozen.current_rack), (2, 4));
        assert_eq!(frozen.completed_at, Some(day(2)));

        assert!(find_by_id(&mut conn, &stranger, game.id).unwrap().is_none());
        assert!(!delete_game(&mut conn, &stranger, game.id).unwrap());
        assert!(delete_game(&mut conn, &owner, game.id).unwrap());
        assert!(find_by_id(&mut conn, &owner, game.id).unwrap().is_none());
    }

    #[test]
    fn test_malformed_game_rows_are_skipped() {
        let mut conn = setup_conn();
        let user = UserId::new("u1");
        conn.execute(
            "INSERT INTO games (user_id, game_type, player_mode) VALUES ('u1', 'snooker', 'single')",
            [],
        )
        .unwrap();
        let good = insert_game(&mut conn, &user, GameType::NineBall, PlayerMode::Single, None, None, day(1)).unwrap();

        let games = list_by_user(&mut conn, &user).unwrap();

        assert_eq!(games.len(), 1);
        assert_eq!(games[0].id, good.id);
    }
}
