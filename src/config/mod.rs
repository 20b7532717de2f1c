pub mod settings;

pub use settings::{AppConfig, DatabaseSettings, FormationRules, PositionLimit, ServerSettings};
