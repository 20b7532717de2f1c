use serde::Serialize;

use super::types::{GameweekNumber, GameweekStatus};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameweekState {
    pub number: GameweekNumber,
    pub status: GameweekStatus,
}

/// Match counts of one gameweek.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MatchTally {
    pub total: u32,
    pub completed: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusTransition {
    pub gameweek: GameweekNumber,
    pub from: GameweekStatus,
    pub to: GameweekStatus,
}

/// Transfers are open while the earliest open gameweek has not started.
/// With no open gameweek at all the window counts as open.
pub fn transfers_allowed(gameweeks: &[GameweekState]) -> bool {
    current_open_gameweek(gameweeks)
        .map(|gw| gw.status == GameweekStatus::Upcoming)
        .unwrap_or(true)
}

/// Earliest gameweek (by number) that is still upcoming or active.
pub fn current_open_gameweek(gameweeks: &[GameweekState]) -> Option<&GameweekState> {
    gameweeks
        .iter()
        .filter(|gw| gw.status.is_open())
        .min_by_key(|gw| gw.number)
}

pub fn next_status(current: GameweekStatus, tally: MatchTally) -> GameweekStatus {
    if current == GameweekStatus::Finalized {
        return current;
    }

    if tally.total > 0 && tally.completed == tally.total {
        GameweekStatus::Locked
    } else if tally.completed > 0 && current == GameweekStatus::Upcoming {
        GameweekStatus::Active
    } else {
        current
    }
}

pub fn transition(state: GameweekState, tally: MatchTally) -> Option<StatusTransition> {
    let to = next_status(state.status, tally);
    (to != state.status).then_some(StatusTransition {
        gameweek: state.number,
        from: state.status,
        to,
    })
}
