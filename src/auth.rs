//! Bearer-token roles.
//!
//! Roles are parsed into a typed enum once at the HTTP boundary and
//! passed down as data. Tokens are opaque random hex with no expiry;
//! this is demo-grade auth, not a hardened scheme.

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// Caller roles, ordered Viewer < Staff < Admin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Viewer,
    Staff,
    Admin,
}

impl Role {
    /// Whether this role meets the given requirement.
    pub fn allows(self, required: Role) -> bool {
        self >= required
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Viewer => write!(f, "viewer"),
            Self::Staff => write!(f, "staff"),
            Self::Admin => write!(f, "admin"),
        }
    }
}

impl FromStr for Role {
    type Err = AuthError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "viewer" => Ok(Self::Viewer),
            "staff" => Ok(Self::Staff),
            "admin" => Ok(Self::Admin),
            other => Err(AuthError::UnknownRole(other.to_string())),
        }
    }
}

/// Authorization errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    MissingToken,
    InvalidToken,
    UnknownRole(String),
    Forbidden { held: Role, required: Role },
}

impl fmt::Display for AuthError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingToken => write!(f, "Missing bearer token"),
            Self::InvalidToken => write!(f, "Invalid bearer token"),
            Self::UnknownRole(r) => write!(f, "Unknown role '{}'", r),
            Self::Forbidden { held, required } => {
                write!(f, "Role '{}' cannot perform this action (requires '{}')", held, required)
            }
        }
    }
}

impl std::error::Error for AuthError {}

/// Token → role map.
#[derive(Debug, Default)]
pub struct TokenStore {
    tokens: HashMap<String, Role>,
}

impl TokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue a fresh token for a role.
    pub fn issue(&mut self, role: Role) -> String {
        let mut rng = rand::thread_rng();
        let bytes: [u8; 16] = rng.gen();
        let token: String = bytes.iter().map(|b| format!("{:02x}", b)).collect();
        self.tokens.insert(token.clone(), role);
        token
    }

    /// Insert a fixed token (for tests and scripted deployments).
    pub fn insert(&mut self, token: impl Into<String>, role: Role) {
        self.tokens.insert(token.into(), role);
    }

    /// Resolve an `Authorization` header value to a role.
    /// Accepts `Bearer <token>` or a bare token.
    pub fn authorize(&self, header: Option<&str>) -> Result<Role, AuthError> {
        let raw = header.ok_or(AuthError::MissingToken)?.trim();
        if raw.is_empty() {
            return Err(AuthError::MissingToken);
        }
        let token = raw.strip_prefix("Bearer ").unwrap_or(raw).trim();
        self.tokens.get(token).copied().ok_or(AuthError::InvalidToken)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_ordering() {
        assert!(Role::Admin.allows(Role::Staff));
        assert!(Role::Admin.allows(Role::Admin));
        assert!(Role::Staff.allows(Role::Viewer));
        assert!(!Role::Viewer.allows(Role::Staff));
        assert!(!Role::Staff.allows(Role::Admin));
    }

    #[test]
    fn test_role_from_str() {
        assert_eq!("admin".parse::<Role>().unwrap(), Role::Admin);
        assert_eq!("STAFF".parse::<Role>().unwrap(), Role::Staff);
        assert!(matches!("superuser".parse::<Role>(), Err(AuthError::UnknownRole(_))));
    }

    #[test]
    fn test_issue_and_authorize() {
        let mut store = TokenStore::new();
        let token = store.issue(Role::Staff);
        assert_eq!(token.len(), 32);

        let header = format!("Bearer {}", token);
        assert_eq!(store.authorize(Some(&header)).unwrap(), Role::Staff);
        // Bare token works too.
        assert_eq!(store.authorize(Some(&token)).unwrap(), Role::Staff);
    }

    #[test]
    fn test_authorize_failures() {
        let mut store = TokenStore::new();
        store.insert("goodtoken", Role::Viewer);

        assert_eq!(store.authorize(None).unwrap_err(), AuthError::MissingToken);
        assert_eq!(store.authorize(Some("")).unwrap_err(), AuthError::MissingToken);
        assert_eq!(store.authorize(Some("Bearer nope")).unwrap_err(), AuthError::InvalidToken);
        assert_eq!(store.authorize(Some("Bearer goodtoken")).unwrap(), Role::Viewer);
    }

    #[test]
    fn test_tokens_are_unique() {
        let mut store = TokenStore::new();
        let a = store.issue(Role::Admin);
        let b = store.issue(Role::Admin);
        assert_ne!(a, b);
    }
}
