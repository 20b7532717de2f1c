use anyhow::{Context, Result};
use rusqlite::{params, Connection, OptionalExtension};

use super::models::{FantasyTeam, StandingRow};
use crate::auth::UserId;
use crate::rules::FantasyTeamId;

const TEAM_COLUMNS: &str = "id, user_id, league_id, name, total_points, rank, gameweek_points";

pub fn insert_fantasy_team(
    conn: &Connection,
    user_id: UserId,
    league_id: Option<i64>,
    name: &str,
) -> Result<FantasyTeam> {
    let sql = format!(
        "INSERT INTO fantasy_teams (user_id, league_id, name) VALUES (?1, ?2, ?3) RETURNING {}",
        TEAM_COLUMNS
    );

    conn.query_row(&sql, params![user_id, league_id, name], parse_fantasy_team_row)
        .context("Failed to insert fantasy team")
}

fn parse_fantasy_team_row(row: &rusqlite::Row) -> rusqlite::Result<FantasyTeam> {
    Ok(FantasyTeam {
        id: row.get(0)?,
        user_id: row.get(1)?,
        league_id: row.get(2)?,
        name: row.get(3)?,
        total_points: row.get(4)?,
        rank: row.get(5)?,
        gameweek_points: row.get(6)?,
    })
}

pub fn find_by_id(conn: &Connection, id: FantasyTeamId) -> Result<Option<FantasyTeam>> {
    let sql = format!("SELECT {} FROM fantasy_teams WHERE id = ?1", TEAM_COLUMNS);

    conn.query_row(&sql, params![id], parse_fantasy_team_row)
        .optional()
        .context("Failed to query fantasy team by id")
}

/// Stores externally computed standing figures for a team.
pub fn update_standing(
    conn: &Connection,
    id: FantasyTeamId,
    total_points: i32,
    rank: Option<i32>,
    gameweek_points: i32,
) -> Result<()> {
    conn.execute(
        "UPDATE fantasy_teams SET total_points = ?1, rank = ?2, gameweek_points = ?3, updated_at = CURRENT_TIMESTAMP WHERE id = ?4",
        params![total_points, rank, gameweek_points, id],
    )
    .context("Failed to update fantasy team standing")
    .map(|_| ())
}

/// Teams of a league with their owners, by ascending rank; unranked teams last.
pub fn league_standings(conn: &Connection, league_id: i64) -> Result<Vec<StandingRow>> {
    let sql = "SELECT ft.id, ft.name, u.username, ft.total_points, ft.rank, ft.gameweek_points
               FROM fantasy_teams ft
               JOIN users u ON u.id = ft.user_id
               WHERE ft.league_id = ?1
               ORDER BY ft.rank IS NULL, ft.rank ASC, ft.id ASC";

    let mut stmt = conn.prepare(sql)?;
    let rows = stmt
        .query_map(params![league_id], |row| {
            Ok(StandingRow {
                fantasy_team_id: row.get(0)?,
                team_name: row.get(1)?,
                username: row.get(2)?,
                total_points: row.get(3)?,
                rank: row.get(4)?,
                gameweek_points: row.get(5)?,
            })
        })?
        .collect::<rusqlite::Result<Vec<_>>>()
        .context("Failed to query league standings")?;

    Ok(rows)
}
