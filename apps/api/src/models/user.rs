use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Access role stored as text on the user row. Drives the admin guard and
/// the rate-limit tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Student,
    Faculty,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Student => "student",
            Role::Faculty => "faculty",
            Role::Admin => "admin",
        }
    }

    /// Parses the stored text form. Unknown values fall back to the least
    /// privileged role rather than failing the request.
    pub fn parse(s: &str) -> Role {
        match s {
            "admin" => Role::Admin,
            "faculty" => Role::Faculty,
            _ => Role::Student,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub full_name: String,
    pub role: String,
    pub created_at: DateTime<Utc>,
}

impl User {
    pub fn role(&self) -> Role {
        Role::parse(&self.role)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_round_trips_through_text() {
        for role in [Role::Student, Role::Faculty, Role::Admin] {
            assert_eq!(Role::parse(role.as_str()), role);
        }
    }

    #[test]
    fn test_unknown_role_falls_back_to_student() {
        assert_eq!(Role::parse("superuser"), Role::Student);
        assert_eq!(Role::parse(""), Role::Student);
    }

    #[test]
    fn test_role_serde_is_lowercase() {
        assert_eq!(serde_json::to_string(&Role::Admin).unwrap(), r#""admin""#);
        let role: Role = serde_json::from_str(r#""student""#).unwrap();
        assert_eq!(role, Role::Student);
    }
}
