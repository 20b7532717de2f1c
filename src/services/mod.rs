pub mod gameweeks;
pub mod hooks;
pub mod scoring;
pub mod server;
pub mod teams;

pub use gameweeks::{GameweekService, TransferWindow};
pub use hooks::{PlayerTotalsHook, ScoreWriteHook, ScoreWriter};
pub use scoring::ScoringService;
pub use teams::{FormationReport, TeamService};
