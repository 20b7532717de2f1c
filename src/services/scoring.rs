use anyhow::Context;
use chrono::Utc;
use log::info;

use super::hooks::ScoreWriter;
use crate::auth::{authorize, Action, Identity, Resource};
use crate::database::{self, DbPool, GameweekScore, NewGameweekScore};
use crate::errors::{AppError, AppResult};
use crate::rules::{aggregate_scores, GameweekNumber, GameweekStats, PlayerId};

pub struct ScoringService {
    pool: DbPool,
    writer: ScoreWriter,
}

impl ScoringService {
    pub fn new(pool: DbPool) -> Self {
        Self::with_writer(pool, ScoreWriter::new())
    }

    pub fn with_writer(pool: DbPool, writer: ScoreWriter) -> Self {
        Self { pool, writer }
    }

    /// Stats of one player in one gameweek; zeroes when nothing was recorded.
    pub fn player_gameweek_stats(
        &self,
        identity: &Identity,
        player_id: PlayerId,
        gameweek: GameweekNumber,
    ) -> AppResult<GameweekStats> {
        authorize(identity, Action::Read, Resource::Reference)?;
        let conn = database::get_connection(&self.pool)?;

        let stats = database::scores::find(&conn, player_id, gameweek)?
            .map(|score| score.stats)
            .unwrap_or_default();
        Ok(stats)
    }

    pub fn record_score(&self, identity: &Identity, score: &NewGameweekScore) -> AppResult<GameweekScore> {
        authorize(identity, Action::Write, Resource::Reference)?;
        validate_score(score)?;

        let mut conn = database::get_connection(&self.pool)?;
        if database::players::find_by_id(&conn, score.player_id)?.is_none() {
            return Err(AppError::NotFound(format!("player {}", score.player_id)));
        }

        let stored = self.writer.record(&mut conn, score)?;
        info!(
            "Recorded {} points for player {} in gameweek {}",
            stored.stats.total_points, stored.player_id, stored.gameweek
        );
        Ok(stored)
    }

    /// Full recomputation of every player's aggregates in one transaction.
    /// Returns the number of players refreshed.
    pub fn refresh_all_player_stats(&self, identity: &Identity) -> AppResult<usize> {
        authorize(identity, Action::Write, Resource::Reference)?;

        let mut conn = database::get_connection(&self.pool)?;
        let tx = conn.transaction().context("Failed to begin refresh transaction")?;
        let now = Utc::now().naive_utc();

        let player_ids = database::players::list_ids(&tx)?;
        for player_id in &player_ids {
            let history = database::scores::list_for_player(&tx, *player_id)?;
            let totals = aggregate_scores(history.iter().map(|row| &row.stats));
            database::players::update_aggregates(&tx, *player_id, &totals, now)?;
        }

        tx.commit().context("Failed to commit refresh transaction")?;
        info!("Refreshed aggregate stats for {} players", player_ids.len());
        Ok(player_ids.len())
    }
}

fn validate_score(score: &NewGameweekScore) -> AppResult<()> {
    let stats = &score.stats;
    if score.gameweek < 1 {
        return Err(AppError::InvalidInput(format!("gameweek {} is out of range", score.gameweek)));
    }

    // Inclusive bounds for one gameweek. Minutes allow for extra time,
    // points allow for deductions.
    let fields = [
        ("minutesPlayed", stats.minutes_played, 0, 130),
        ("goals", stats.goals, 0, 20),
        ("assists", stats.assists, 0, 20),
        ("yellowCards", stats.yellow_cards, 0, 2),
        ("redCards", stats.red_cards, 0, 1),
        ("saves", stats.saves, 0, 50),
        ("bonusPoints", stats.bonus_points, 0, 3),
        ("totalPoints", stats.total_points, -50, 250),
    ];
    for (name, value, min, max) in fields {
        if !(min..=max).contains(&value) {
            return Err(AppError::InvalidInput(format!(
                "{} = {} is outside {}..={}",
                name, value, min, max
            )));
        }
    }
    Ok(())
}
