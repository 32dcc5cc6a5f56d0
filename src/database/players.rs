use anyhow::{Context, Result};
use rusqlite::params;

use super::connection::DbConn;
use crate::domain::{Player, UserId};

pub fn insert_player(conn: &mut DbConn, user_id: &UserId, name: &str) -> Result<Player> {
    let sql = "INSERT INTO players (user_id, name) VALUES (?1, ?2) RETURNING id, user_id, name, created_at";

    conn.query_row(sql, params![user_id.as_str(), name], parse_player_row)
        .context("Failed to insert new player")
}

fn parse_player_row(row: &rusqlite::Row) -> rusqlite::Result<Player> {
    Ok(Player {
        id: row.get(0)?,
        user_id: UserId::new(row.get::<_, String>(1)?),
        name: row.get(2)?,
        created_at: row.get(3)?,
    })
}
