use anyhow::{Context, Result};
use rusqlite::Connection;

const SCHEMA_SQL: &str = include_str!("schema.sql");

// Children before parents so foreign keys never block the drop.
const TABLES: [&str; 10] = [
    "transactions",
    "gameweek_scores",
    "rosters",
    "fantasy_teams",
    "real_matches",
    "gameweeks",
    "leagues",
    "players",
    "teams",
    "users",
];

/// Creates any missing tables and indexes, keeping existing data.
pub fn init_database(conn: &Connection) -> Result<()> {
    apply_schema(conn)?;
    log::info!("Database schema initialized");
    Ok(())
}

pub fn reset_database(conn: &Connection) -> Result<()> {
    for table in TABLES {
        execute_sql(conn, &format!("DROP TABLE IF EXISTS {}", table))
            .with_context(|| format!("Failed to drop table {}", table))?;
    }

    apply_schema(conn)?;
    log::info!("Database schema reset successfully");
    Ok(())
}

fn apply_schema(conn: &Connection) -> Result<()> {
    let statements = split_sql_statements(SCHEMA_SQL);

    for (idx, statement) in statements.iter().enumerate() {
        execute_sql(conn, statement)
            .with_context(|| format!("Failed to execute statement {}", idx + 1))?;
    }

    Ok(())
}

fn split_sql_statements(sql: &str) -> Vec<String> {
    sql.split(';')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

fn execute_sql(conn: &Connection, sql: &str) -> Result<()> {
    conn.execute(sql, [])
        .context("Failed to execute SQL statement")
        .map(|_| ())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table_count(conn: &Connection) -> i64 {
        conn.query_row(
            "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name NOT LIKE 'sqlite_%'",
            [],
            |row| row.get(0),
        )
        .unwrap()
    }

    #[test]
    fn test_init_creates_every_table() {
        let conn = Connection::open_in_memory().unwrap();
        init_database(&conn).unwrap();
        assert_eq!(table_count(&conn), TABLES.len() as i64);
    }

    #[test]
    fn test_init_is_repeatable_and_keeps_rows() {
        let conn = Connection::open_in_memory().unwrap();
        init_database(&conn).unwrap();
        conn.execute("INSERT INTO gameweeks (number) VALUES (1)", []).unwrap();

        init_database(&conn).unwrap();

        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM gameweeks", [], |row| row.get(0))
            .unwrap();
        assert_eq!(count, 1);
    }

    #[test]
    fn test_reset_clears_rows() {
        let conn = Connection::open_in_memory().unwrap();
        init_database(&conn).unwrap();
        conn.execute("INSERT INTO gameweeks (number) VALUES (1)", []).unwrap();

        reset_database(&conn).unwrap();

        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM gameweeks", [], |row| row.get(0))
            .unwrap();
        assert_eq!(count, 0);
    }

    #[test]
    fn test_split_ignores_trailing_whitespace() {
        let statements = split_sql_statements("SELECT 1;\n  SELECT 2;\n\n");
        assert_eq!(statements, vec!["SELECT 1", "SELECT 2"]);
    }
}
