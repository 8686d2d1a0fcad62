use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UserRole {
    Seeker,
    Employer,
    Admin,
}

impl UserRole {
    /// Next role in the demo cycle: SEEKER → EMPLOYER → ADMIN → SEEKER.
    pub fn next(self) -> Self {
        match self {
            UserRole::Seeker => UserRole::Employer,
            UserRole::Employer => UserRole::Admin,
            UserRole::Admin => UserRole::Seeker,
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            UserRole::Seeker => "SEEKER",
            UserRole::Employer => "EMPLOYER",
            UserRole::Admin => "ADMIN",
        };
        f.write_str(label)
    }
}

/// A portal account. Role is fixed once the user exists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: UserRole,
    #[serde(default)]
    pub skills: Vec<String>,
    pub bio: Option<String>,
    /// Only meaningful for employers.
    pub company_id: Option<String>,
    #[serde(default)]
    pub saved_job_ids: Vec<String>,
    #[serde(default)]
    pub is_verified: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_cycle_has_length_three() {
        let start = UserRole::Seeker;
        assert_eq!(start.next(), UserRole::Employer);
        assert_eq!(start.next().next(), UserRole::Admin);
        assert_eq!(start.next().next().next(), UserRole::Seeker);
    }

    #[test]
    fn test_role_serializes_screaming_case() {
        let json = serde_json::to_string(&UserRole::Employer).unwrap();
        assert_eq!(json, "\"EMPLOYER\"");
        assert_eq!(UserRole::Admin.to_string(), "ADMIN");
    }
}
