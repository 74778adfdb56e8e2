//! Principal and role domain models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Role of an authenticated principal.
///
/// Admin is a superset of teacher wherever "teacher or admin" is
/// required; course deletion additionally requires admin itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Participant,
    Teacher,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Participant => "participant",
            Role::Teacher => "teacher",
            Role::Admin => "admin",
        }
    }

    /// Whether this role may manage courses and registrations.
    pub fn is_staff(&self) -> bool {
        matches!(self, Role::Teacher | Role::Admin)
    }

    pub fn is_admin(&self) -> bool {
        matches!(self, Role::Admin)
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "participant" => Ok(Role::Participant),
            "teacher" => Ok(Role::Teacher),
            "admin" => Ok(Role::Admin),
            _ => Err(format!("Invalid role: {}", s)),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// An authenticated identity with an associated role.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Principal {
    pub id: Uuid,
    pub email: String,
    #[serde(skip_serializing)] // Never serialize password hashes to API responses
    pub password_hash: String,
    pub first_name: String,
    pub last_name: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_round_trip() {
        for role in [Role::Participant, Role::Teacher, Role::Admin] {
            assert_eq!(Role::from_str(role.as_str()).unwrap(), role);
        }
        assert!(Role::from_str("superuser").is_err());
    }

    #[test]
    fn test_admin_is_superset_of_teacher() {
        assert!(Role::Admin.is_staff());
        assert!(Role::Teacher.is_staff());
        assert!(!Role::Participant.is_staff());

        assert!(Role::Admin.is_admin());
        assert!(!Role::Teacher.is_admin());
    }

    #[test]
    fn test_principal_password_hash_not_serialized() {
        let principal = Principal {
            id: Uuid::new_v4(),
            email: "lehrer@schule.ch".to_string(),
            password_hash: "secret_hash".to_string(),
            first_name: "Martin".to_string(),
            last_name: "Schneider".to_string(),
            role: Role::Teacher,
            created_at: Utc::now(),
        };

        let json = serde_json::to_string(&principal).unwrap();
        assert!(!json.contains("secret_hash"));
        assert!(!json.contains("passwordHash"));
        assert!(json.contains("\"role\":\"teacher\""));
    }
}
