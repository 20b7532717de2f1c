//! Role and ownership checks run before every store operation.
//!
//! Users read reference data (clubs, players, leagues, matches, scores) and
//! only their own fantasy teams, rosters and transfers. Admins may also write
//! reference data. The service identity used by batch jobs is unrestricted.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::{AppError, AppResult};

pub type UserId = i64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Admin => "admin",
        }
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "user" => Ok(Role::User),
            "admin" => Ok(Role::Admin),
            other => Err(format!("unknown role: {}", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Identity {
    Anonymous,
    User { user_id: UserId, role: Role },
    Service,
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Identity::Anonymous => f.write_str("anonymous"),
            Identity::User { user_id, role } => write!(f, "{} {}", role.as_str(), user_id),
            Identity::Service => f.write_str("service"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Read,
    Write,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    /// Shared data: clubs, players, leagues, gameweeks, matches, scores.
    Reference,
    /// Fantasy team, roster or transfer belonging to `owner_id`.
    Owned { owner_id: UserId },
}

pub fn authorize(identity: &Identity, action: Action, resource: Resource) -> AppResult<()> {
    if is_allowed(identity, action, resource)? {
        return Ok(());
    }

    log::warn!("Denied {:?} on {:?} for {}", action, resource, identity);
    Err(AppError::Forbidden(format!(
        "{} may not {} this resource",
        identity,
        match action {
            Action::Read => "read",
            Action::Write => "write",
        }
    )))
}

fn is_allowed(identity: &Identity, action: Action, resource: Resource) -> AppResult<bool> {
    match identity {
        Identity::Anonymous => Err(AppError::Unauthorized),
        Identity::Service => Ok(true),
        Identity::User { user_id, role } => Ok(match resource {
            Resource::Reference => action == Action::Read || *role == Role::Admin,
            Resource::Owned { owner_id } => owner_id == *user_id,
        }),
    }
}
