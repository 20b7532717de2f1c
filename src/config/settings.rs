use std::env;

#[derive(Debug, Clone, Copy)]
pub struct PositionLimit {
    pub min: u32,
    pub max: u32,
}

impl PositionLimit {
    pub const fn new(min: u32, max: u32) -> Self {
        Self { min, max }
    }
}

#[derive(Debug, Clone)]
pub struct FormationRules {
    pub starters: u32,
    pub goalkeepers: PositionLimit,
    pub defenders: PositionLimit,
    pub midfielders: PositionLimit,
    pub forwards: PositionLimit,
}

impl Default for FormationRules {
    fn default() -> Self {
        Self {
            starters: 11,
            goalkeepers: PositionLimit::new(1, 1),
            defenders: PositionLimit::new(3, 5),
            midfielders: PositionLimit::new(2, 5),
            forwards: PositionLimit::new(1, 3),
        }
    }
}

#[derive(Debug, Clone)]
pub struct DatabaseSettings {
    pub path: String,
}

impl Default for DatabaseSettings {
    fn default() -> Self {
        Self {
            path: env::var("DATABASE_PATH").unwrap_or_else(|_| "fantasy_rules.db".to_string()),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ServerSettings {
    /// Bearer token that authenticates the unrestricted batch identity.
    pub service_token: Option<String>,
}

impl ServerSettings {
    pub fn from_env() -> Self {
        Self {
            service_token: env::var("FANTASY_SERVICE_TOKEN")
                .ok()
                .filter(|token| !token.is_empty()),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database: DatabaseSettings,
    pub server: ServerSettings,
    pub formation: FormationRules,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl AppConfig {
    pub fn new() -> Self {
        Self {
            database: DatabaseSettings::default(),
            server: ServerSettings::from_env(),
            formation: FormationRules::default(),
        }
    }
}
