//! Role Model

use serde::{Deserialize, Serialize};

/// User role as reported by the auth service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    /// Files maintenance requests
    #[default]
    Resident,
    /// Triages and assigns all requests
    Admin,
    /// Resolves assigned requests
    Technician,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Resident => "RESIDENT",
            Role::Admin => "ADMIN",
            Role::Technician => "TECHNICIAN",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
