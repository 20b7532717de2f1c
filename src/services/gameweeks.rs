use anyhow::{Context, Result};
use log::info;
use rusqlite::Connection;

use crate::auth::{authorize, Action, Identity, Resource};
use crate::database::{self, DbPool};
use crate::errors::AppResult;
use crate::rules::gameweek::{self, GameweekState, StatusTransition};
use crate::rules::GameweekNumber;

/// Whether transfers are open, and the gameweek they would count against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransferWindow {
    pub allowed: bool,
    pub gameweek: Option<GameweekNumber>,
}

pub(crate) fn transfer_window(conn: &Connection) -> Result<TransferWindow> {
    let states: Vec<GameweekState> = database::gameweeks::list_open(conn)?
        .iter()
        .map(|gw| gw.state())
        .collect();

    Ok(TransferWindow {
        allowed: gameweek::transfers_allowed(&states),
        gameweek: gameweek::current_open_gameweek(&states).map(|gw| gw.number),
    })
}

pub struct GameweekService {
    pool: DbPool,
}

impl GameweekService {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub fn transfers_allowed(&self, identity: &Identity) -> AppResult<bool> {
        authorize(identity, Action::Read, Resource::Reference)?;
        let conn = database::get_connection(&self.pool)?;
        Ok(transfer_window(&conn)?.allowed)
    }

    /// Reconciles every non-finalized gameweek with its match results and
    /// returns the transitions that were applied.
    pub fn advance_statuses(&self, identity: &Identity) -> AppResult<Vec<StatusTransition>> {
        authorize(identity, Action::Write, Resource::Reference)?;

        let mut conn = database::get_connection(&self.pool)?;
        let tx = conn.transaction().context("Failed to begin gameweek transaction")?;

        let mut transitions = Vec::new();
        for gw in database::gameweeks::list_unfinalized(&tx)? {
            let tally = database::matches::tally_for_gameweek(&tx, gw.number)?;
            if let Some(change) = gameweek::transition(gw.state(), tally) {
                database::gameweeks::update_status(&tx, change.gameweek, change.to)?;
                info!("Gameweek {}: {} -> {}", change.gameweek, change.from, change.to);
                transitions.push(change);
            }
        }

        tx.commit().context("Failed to commit gameweek transaction")?;
        Ok(transitions)
    }
}
