pub mod aggregation;
pub mod formation;
pub mod gameweek;
pub mod types;
pub mod value;

pub use aggregation::aggregate_scores;
pub use formation::Formation;
pub use gameweek::{transfers_allowed, GameweekState, MatchTally, StatusTransition};
pub use types::{
    FantasyTeamId, GameweekNumber, GameweekStats, GameweekStatus, MatchStatus, PlayerAggregates,
    PlayerId, Position,
};
pub use value::team_value;
