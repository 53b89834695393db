//! User role definitions.

use serde::{Deserialize, Serialize};

/// Platform role of a user.
///
/// Admins moderate users and swaps; everything they do lands in the
/// audit log. Everybody else is a plain user.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    /// Regular marketplace participant.
    #[default]
    User,

    /// Platform administrator with moderation powers.
    Admin,
}

impl UserRole {
    /// Returns true for administrators.
    pub fn is_admin(&self) -> bool {
        matches!(self, UserRole::Admin)
    }

    /// Returns the storage form of the role.
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::User => "user",
            UserRole::Admin => "admin",
        }
    }

    /// Parses the storage form. Older rows carry a capitalised "Admin";
    /// unknown values fall back to `User`.
    pub fn parse_str(s: &str) -> Self {
        match s {
            "admin" | "Admin" => UserRole::Admin,
            _ => UserRole::User,
        }
    }
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
