//! Strongly-typed identifier value objects.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use super::ValidationError;

/// Unique identifier for a swap request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SwapId(Uuid);

impl SwapId {
    /// Creates a new random SwapId.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a SwapId from an existing UUID.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the inner UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for SwapId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SwapId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for SwapId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

/// Unique identifier for a moderation audit log entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LogEntryId(Uuid);

impl LogEntryId {
    /// Creates a new random LogEntryId.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a LogEntryId from an existing UUID.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the inner UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for LogEntryId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for LogEntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for LogEntryId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

/// Unique identifier for a stored broadcast message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BroadcastId(Uuid);

impl BroadcastId {
    /// Creates a new random BroadcastId.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a BroadcastId from an existing UUID.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the inner UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for BroadcastId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for BroadcastId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for BroadcastId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

/// Opaque external identity of a user (from the identity provider).
///
/// This is the one canonical key for participants, profile owners, and
/// administrators. Legacy swap rows sometimes hold a store-internal row
/// key instead; store adapters normalize those to this form before any
/// domain code compares identities.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Identity(String);

impl Identity {
    /// Creates a new Identity, returning error if empty.
    pub fn new(id: impl Into<String>) -> Result<Self, ValidationError> {
        let id = id.into();
        if id.is_empty() {
            return Err(ValidationError::empty_field("identity"));
        }
        Ok(Self(id))
    }

    /// Returns the inner string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the Identity, returning the inner string.
    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn swap_id_generates_unique_values() {
        let id1 = SwapId::new();
        let id2 = SwapId::new();
        assert_ne!(id1, id2);
    }

    #[test]
    fn swap_id_parses_from_valid_string() {
        let uuid_str = "550e8400-e29b-41d4-a716-446655440000";
        let id: SwapId = uuid_str.parse().unwrap();
        assert_eq!(id.to_string(), uuid_str);
    }

    #[test]
    fn swap_id_from_uuid_preserves_value() {
        let uuid = Uuid::new_v4();
        let id = SwapId::from_uuid(uuid);
        assert_eq!(id.as_uuid(), &uuid);
    }

    #[test]
    fn swap_id_serializes_to_json() {
        let uuid_str = "550e8400-e29b-41d4-a716-446655440000";
        let id: SwapId = uuid_str.parse().unwrap();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, format!("\"{}\"", uuid_str));
    }

    #[test]
    fn swap_id_rejects_malformed_string() {
        let result = "not-a-uuid".parse::<SwapId>();
        assert!(result.is_err());
    }

    #[test]
    fn log_entry_id_generates_unique_values() {
        let id1 = LogEntryId::new();
        let id2 = LogEntryId::new();
        assert_ne!(id1, id2);
    }

    #[test]
    fn broadcast_id_generates_unique_values() {
        let id1 = BroadcastId::new();
        let id2 = BroadcastId::new();
        assert_ne!(id1, id2);
    }

    #[test]
    fn identity_accepts_non_empty_string() {
        let id = Identity::new("user_2abc").unwrap();
        assert_eq!(id.as_str(), "user_2abc");
    }

    #[test]
    fn identity_rejects_empty_string() {
        let result = Identity::new("");
        assert!(result.is_err());
        match result {
            Err(ValidationError::EmptyField { field }) => assert_eq!(field, "identity"),
            _ => panic!("Expected EmptyField error"),
        }
    }

    #[test]
    fn identity_displays_inner_value() {
        let id = Identity::new("user_2def").unwrap();
        assert_eq!(format!("{}", id), "user_2def");
    }

    #[test]
    fn identity_into_string_returns_inner() {
        let id = Identity::new("user_2ghi").unwrap();
        assert_eq!(id.into_string(), "user_2ghi");
    }

    #[test]
    fn identity_equality_is_exact() {
        let a = Identity::new("abc").unwrap();
        let b = Identity::new("abc").unwrap();
        let c = Identity::new("ABC").unwrap();
        assert_eq!(a, b);
        assert_ne!(a, c);
    }
}
