use std::collections::HashSet;

use anyhow::Context;
use log::info;
use rusqlite::Connection;
use rust_decimal::Decimal;
use serde::Serialize;

use super::gameweeks::transfer_window;
use crate::auth::{authorize, Action, Identity, Resource};
use crate::config::FormationRules;
use crate::database::{self, DbPool, FantasyTeam, StandingRow, TransferRecord};
use crate::errors::{AppError, AppResult};
use crate::rules::{team_value, FantasyTeamId, Formation, PlayerId};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormationReport {
    pub formation: String,
    pub counts: Formation,
    pub starters: u32,
    pub valid: bool,
}

impl FormationReport {
    fn new(counts: Formation, rules: &FormationRules) -> Self {
        Self {
            formation: counts.render(),
            counts,
            starters: counts.total(),
            valid: counts.is_valid(rules),
        }
    }
}

pub struct TeamService {
    pool: DbPool,
    rules: FormationRules,
}

impl TeamService {
    pub fn new(pool: DbPool, rules: FormationRules) -> Self {
        Self { pool, rules }
    }

    /// Sum of the prices of every rostered player, bench included.
    pub fn team_value(&self, identity: &Identity, team_id: FantasyTeamId) -> AppResult<Decimal> {
        let conn = database::get_connection(&self.pool)?;
        owned_team(&conn, identity, team_id, Action::Read)?;

        let roster = database::rosters::list_players(&conn, team_id)?;
        Ok(team_value(roster.iter().map(|entry| entry.price)))
    }

    pub fn team_formation(&self, identity: &Identity, team_id: FantasyTeamId) -> AppResult<String> {
        Ok(self.formation_report(identity, team_id)?.formation)
    }

    /// Advisory: an invalid lineup is reported as `false`, never as an error.
    pub fn validate_formation(&self, identity: &Identity, team_id: FantasyTeamId) -> AppResult<bool> {
        Ok(self.formation_report(identity, team_id)?.valid)
    }

    pub fn formation_report(&self, identity: &Identity, team_id: FantasyTeamId) -> AppResult<FormationReport> {
        let conn = database::get_connection(&self.pool)?;
        owned_team(&conn, identity, team_id, Action::Read)?;

        let counts = starter_formation(&conn, team_id)?;
        Ok(FormationReport::new(counts, &self.rules))
    }

    pub fn league_standings(&self, identity: &Identity, league_id: i64) -> AppResult<Vec<StandingRow>> {
        authorize(identity, Action::Read, Resource::Reference)?;
        let conn = database::get_connection(&self.pool)?;

        if database::leagues::find_by_id(&conn, league_id)?.is_none() {
            return Err(AppError::NotFound(format!("league {}", league_id)));
        }
        Ok(database::fantasy_teams::league_standings(&conn, league_id)?)
    }

    /// Replaces the starting eleven. Nothing is kept unless the new lineup is valid.
    pub fn submit_lineup(
        &self,
        identity: &Identity,
        team_id: FantasyTeamId,
        starters: &[PlayerId],
    ) -> AppResult<FormationReport> {
        let mut seen = HashSet::new();
        if let Some(duplicate) = starters.iter().find(|id| !seen.insert(**id)) {
            return Err(AppError::InvalidInput(format!("player {} is listed twice", duplicate)));
        }

        let mut conn = database::get_connection(&self.pool)?;
        owned_team(&conn, identity, team_id, Action::Write)?;

        let tx = conn.transaction().context("Failed to begin lineup transaction")?;
        database::rosters::clear_starters(&tx, team_id)?;
        for player_id in starters {
            if database::rosters::mark_starter(&tx, team_id, *player_id)? == 0 {
                return Err(AppError::InvalidInput(format!(
                    "player {} is not on the roster of team {}",
                    player_id, team_id
                )));
            }
        }

        let report = FormationReport::new(starter_formation(&tx, team_id)?, &self.rules);
        if !report.valid {
            return Err(AppError::InvalidFormation(format!(
                "{} with {} starters",
                report.formation, report.starters
            )));
        }

        tx.commit().context("Failed to commit lineup transaction")?;
        info!("Team {} submitted a {} lineup", team_id, report.formation);
        Ok(report)
    }

    /// Swaps one rostered player for another while the transfer window is open.
    pub fn make_transfer(
        &self,
        identity: &Identity,
        team_id: FantasyTeamId,
        player_out: PlayerId,
        player_in: PlayerId,
    ) -> AppResult<TransferRecord> {
        if player_out == player_in {
            return Err(AppError::InvalidInput(format!(
                "player {} cannot be transferred for themselves",
                player_in
            )));
        }

        let mut conn = database::get_connection(&self.pool)?;
        owned_team(&conn, identity, team_id, Action::Write)?;

        let tx = conn.transaction().context("Failed to begin transfer transaction")?;
        let window = transfer_window(&tx)?;
        if !window.allowed {
            return Err(AppError::TransfersClosed);
        }
        if database::players::find_by_id(&tx, player_in)?.is_none() {
            return Err(AppError::NotFound(format!("player {}", player_in)));
        }

        if database::rosters::delete_entry(&tx, team_id, player_out)? == 0 {
            return Err(AppError::InvalidInput(format!(
                "player {} is not on the roster of team {}",
                player_out, team_id
            )));
        }
        database::rosters::insert_entry(&tx, team_id, player_in, false).map_err(|err| {
            if is_constraint_violation(&err) {
                AppError::InvalidInput(format!("player {} is already on team {}", player_in, team_id))
            } else {
                AppError::Internal(err)
            }
        })?;
        let record = database::transfers::insert_transfer(&tx, team_id, player_in, player_out, window.gameweek)?;

        tx.commit().context("Failed to commit transfer transaction")?;
        info!("Team {} transferred out {} for {}", team_id, player_out, player_in);
        Ok(record)
    }

    pub fn transfer_history(&self, identity: &Identity, team_id: FantasyTeamId) -> AppResult<Vec<TransferRecord>> {
        let conn = database::get_connection(&self.pool)?;
        owned_team(&conn, identity, team_id, Action::Read)?;
        Ok(database::transfers::list_for_team(&conn, team_id)?)
    }
}

/// Loads the team and checks the caller may act on it as its owner.
/// Another user's team reads as missing, so ids cannot be probed.
fn owned_team(
    conn: &Connection,
    identity: &Identity,
    team_id: FantasyTeamId,
    action: Action,
) -> AppResult<FantasyTeam> {
    authorize(identity, Action::Read, Resource::Reference)?;

    let not_found = || AppError::NotFound(format!("fantasy team {}", team_id));
    let team = database::fantasy_teams::find_by_id(conn, team_id)?.ok_or_else(not_found)?;

    match authorize(identity, action, Resource::Owned { owner_id: team.user_id }) {
        Ok(()) => Ok(team),
        Err(AppError::Forbidden(_)) => Err(not_found()),
        Err(err) => Err(err),
    }
}

fn starter_formation(conn: &Connection, team_id: FantasyTeamId) -> AppResult<Formation> {
    let positions = database::rosters::starter_positions(conn, team_id)?;
    Ok(Formation::from_positions(positions))
}

fn is_constraint_violation(err: &anyhow::Error) -> bool {
    matches!(
        err.downcast_ref::<rusqlite::Error>(),
        Some(rusqlite::Error::SqliteFailure(failure, _))
            if failure.code == rusqlite::ErrorCode::ConstraintViolation
    )
}
