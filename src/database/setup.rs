use anyhow::{Context, Result};
use rusqlite::params;

use super::connection::DbConn;

/// Dependents first so foreign keys never point at a dropped table
const TABLES_IN_DROP_ORDER: [&str; 3] = ["shots", "games", "players"];

/// Drops every table and recreates an empty schema
pub fn reset_database(conn: &mut DbConn) -> Result<()> {
    for table in TABLES_IN_DROP_ORDER {
        execute_sql(conn, &format!("DROP TABLE IF EXISTS {table}"))
            .with_context(|| format!("Failed to drop table {}", table))?;
    }
    create_schema(conn)?;

    log::info!("Database schema reset successfully");
    Ok(())
}

/// Creates whatever tables are missing, leaving existing ones and their rows untouched
pub fn ensure_schema(conn: &mut DbConn) -> Result<()> {
    let mut missing = Vec::new();
    for table in TABLES_IN_DROP_ORDER {
        if !table_exists(conn, table)? {
            missing.push(table);
        }
    }
    if missing.is_empty() {
        return Ok(());
    }

    log::info!("Creating missing tables: {}", missing.join(", "));
    create_schema(conn)
}

fn create_schema(conn: &mut DbConn) -> Result<()> {
    let schema_sql = include_str!("schema.sql");
    let statements = split_sql_statements(schema_sql);

    for (idx, statement) in statements.iter().enumerate() {
        execute_sql(conn, statement)
            .with_context(|| format!("Failed to execute statement {}", idx + 1))?;
    }
    Ok(())
}

fn table_exists(conn: &mut DbConn, table: &str) -> Result<bool> {
    let sql = "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = ?1";
    let count: i64 = conn
        .query_row(sql, params![table], |row| row.get(0))
        .context("Failed to inspect database schema")?;
    Ok(count > 0)
}

fn split_sql_statements(sql: &str) -> Vec<String> {
    sql.split(';')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

fn execute_sql(conn: &mut DbConn, sql: &str) -> Result<()> {
    conn.execute(sql, [])
        .context("Failed to execute SQL statement")
        .map(|_| ())
}
