//! Actor identity supplied by the identity collaborator
//!
//! The front-desk core does not issue sessions. Every call arrives with a
//! `{user_id, role}` tuple established upstream; this module defines that
//! tuple and the role set the transition guards are keyed on.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Role of the acting user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Admin,
    Receptionist,
    Cleaner,
    Guest,
}

impl Role {
    /// Staff roles may drive the booking lifecycle (check-in/check-out)
    pub fn is_staff(&self) -> bool {
        matches!(self, Role::Admin | Role::Receptionist)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Receptionist => "receptionist",
            Role::Cleaner => "cleaner",
            Role::Guest => "guest",
        }
    }
}

impl std::str::FromStr for Role {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(Role::Admin),
            "receptionist" => Ok(Role::Receptionist),
            "cleaner" => Ok(Role::Cleaner),
            "guest" => Ok(Role::Guest),
            _ => Err(()),
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The identity tuple trusted from the upstream identity service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    pub user_id: Uuid,
    pub role: Role,
}

impl Actor {
    pub fn new(user_id: Uuid, role: Role) -> Self {
        Self { user_id, role }
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    pub fn is_staff(&self) -> bool {
        self.role.is_staff()
    }

    pub fn is_guest(&self) -> bool {
        self.role == Role::Guest
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_parse_round_trip() {
        for role in [Role::Admin, Role::Receptionist, Role::Cleaner, Role::Guest] {
            let parsed: Role = role.as_str().parse().unwrap();
            assert_eq!(parsed, role);
        }
        assert!("manager".parse::<Role>().is_err());
    }

    #[test]
    fn test_staff_roles() {
        assert!(Role::Admin.is_staff());
        assert!(Role::Receptionist.is_staff());
        assert!(!Role::Cleaner.is_staff());
        assert!(!Role::Guest.is_staff());
    }

    #[test]
    fn test_role_serialize_snake_case() {
        let json = serde_json::to_string(&Role::Receptionist).unwrap();
        assert_eq!(json, "\"receptionist\"");
        let role: Role = serde_json::from_str("\"cleaner\"").unwrap();
        assert_eq!(role, Role::Cleaner);
    }
}
