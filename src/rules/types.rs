use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

pub type PlayerId = i64;
pub type FantasyTeamId = i64;
pub type GameweekNumber = i32;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Position {
    #[serde(rename = "GK")]
    Goalkeeper,
    #[serde(rename = "DEF")]
    Defender,
    #[serde(rename = "MID")]
    Midfielder,
    #[serde(rename = "FWD")]
    Forward,
}

impl Position {
    pub fn as_str(&self) -> &'static str {
        match self {
            Position::Goalkeeper => "GK",
            Position::Defender => "DEF",
            Position::Midfielder => "MID",
            Position::Forward => "FWD",
        }
    }
}

impl FromStr for Position {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "GK" => Ok(Position::Goalkeeper),
            "DEF" => Ok(Position::Defender),
            "MID" => Ok(Position::Midfielder),
            "FWD" => Ok(Position::Forward),
            other => Err(format!("unknown position: {}", other)),
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lifecycle of a gameweek. `Finalized` is terminal and only ever set from outside.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameweekStatus {
    Upcoming,
    Active,
    Locked,
    Finalized,
}

impl GameweekStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            GameweekStatus::Upcoming => "upcoming",
            GameweekStatus::Active => "active",
            GameweekStatus::Locked => "locked",
            GameweekStatus::Finalized => "finalized",
        }
    }

    pub fn is_open(&self) -> bool {
        matches!(self, GameweekStatus::Upcoming | GameweekStatus::Active)
    }
}

impl FromStr for GameweekStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "upcoming" => Ok(GameweekStatus::Upcoming),
            "active" => Ok(GameweekStatus::Active),
            "locked" => Ok(GameweekStatus::Locked),
            "finalized" => Ok(GameweekStatus::Finalized),
            other => Err(format!("unknown gameweek status: {}", other)),
        }
    }
}

impl fmt::Display for GameweekStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchStatus {
    Scheduled,
    Live,
    Completed,
    Postponed,
}

impl MatchStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            MatchStatus::Scheduled => "scheduled",
            MatchStatus::Live => "live",
            MatchStatus::Completed => "completed",
            MatchStatus::Postponed => "postponed",
        }
    }
}

impl FromStr for MatchStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "scheduled" => Ok(MatchStatus::Scheduled),
            "live" => Ok(MatchStatus::Live),
            "completed" => Ok(MatchStatus::Completed),
            "postponed" => Ok(MatchStatus::Postponed),
            other => Err(format!("unknown match status: {}", other)),
        }
    }
}

/// Per-gameweek statistics of one player. Absent records read as `default()`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GameweekStats {
    pub minutes_played: i32,
    pub goals: i32,
    pub assists: i32,
    pub clean_sheet: bool,
    pub yellow_cards: i32,
    pub red_cards: i32,
    pub saves: i32,
    pub bonus_points: i32,
    pub total_points: i32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerAggregates {
    pub total_points: i32,
    pub games_played: i32,
    pub goals_scored: i32,
    pub assists: i32,
    pub clean_sheets: i32,
    pub yellow_cards: i32,
    pub red_cards: i32,
}
