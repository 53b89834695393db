//! Audit log entries for administrative moderation.
//!
//! Every moderation action an admin takes is appended here. The log is
//! append-only; nothing ever updates or removes an entry.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{DomainError, Identity, LogEntryId, Timestamp, ValidationError};

/// What a moderation entry targeted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TargetKind {
    User,
    Swap,
}

impl TargetKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TargetKind::User => "user",
            TargetKind::Swap => "swap",
        }
    }
}

/// Moderation action an admin can take.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdminAction {
    VerifyUser,
    SuspendUser,
    BanUser,
    DeleteUser,
    ApproveSwap,
    RejectSwap,
    DeleteSwap,
}

impl AdminAction {
    /// Returns the storage form of the action.
    pub fn as_str(&self) -> &'static str {
        match self {
            AdminAction::VerifyUser => "verify_user",
            AdminAction::SuspendUser => "suspend_user",
            AdminAction::BanUser => "ban_user",
            AdminAction::DeleteUser => "delete_user",
            AdminAction::ApproveSwap => "approve_swap",
            AdminAction::RejectSwap => "reject_swap",
            AdminAction::DeleteSwap => "delete_swap",
        }
    }

    /// Parses the storage form.
    pub fn parse_str(s: &str) -> Option<Self> {
        match s {
            "verify_user" => Some(AdminAction::VerifyUser),
            "suspend_user" => Some(AdminAction::SuspendUser),
            "ban_user" => Some(AdminAction::BanUser),
            "delete_user" => Some(AdminAction::DeleteUser),
            "approve_swap" => Some(AdminAction::ApproveSwap),
            "reject_swap" => Some(AdminAction::RejectSwap),
            "delete_swap" => Some(AdminAction::DeleteSwap),
            _ => None,
        }
    }

    /// The kind of record this action targets.
    pub fn target_kind(&self) -> TargetKind {
        match self {
            AdminAction::VerifyUser
            | AdminAction::SuspendUser
            | AdminAction::BanUser
            | AdminAction::DeleteUser => TargetKind::User,
            AdminAction::ApproveSwap | AdminAction::RejectSwap | AdminAction::DeleteSwap => {
                TargetKind::Swap
            }
        }
    }
}

impl std::fmt::Display for AdminAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One audit log entry.
#[derive(Debug, Clone, PartialEq)]
pub struct AdminLogEntry {
    /// Unique identifier for the entry.
    id: LogEntryId,

    /// The admin who acted.
    admin: Identity,

    /// What they did.
    action: AdminAction,

    /// Identity or swap ID the action targeted, in string form.
    target_id: String,

    /// Optional reason supplied with the action.
    reason: Option<String>,

    /// When the action happened.
    created_at: Timestamp,
}

impl AdminLogEntry {
    /// Create a new log entry stamped now.
    ///
    /// # Errors
    ///
    /// - `EmptyField` if `target_id` is empty
    pub fn new(
        id: LogEntryId,
        admin: Identity,
        action: AdminAction,
        target_id: String,
        reason: Option<String>,
    ) -> Result<Self, DomainError> {
        if target_id.trim().is_empty() {
            return Err(ValidationError::empty_field("target_id").into());
        }
        Ok(Self {
            id,
            admin,
            action,
            target_id,
            reason,
            created_at: Timestamp::now(),
        })
    }

    /// Reconstitute an entry from persistence.
    pub fn reconstitute(
        id: LogEntryId,
        admin: Identity,
        action: AdminAction,
        target_id: String,
        reason: Option<String>,
        created_at: Timestamp,
    ) -> Self {
        Self {
            id,
            admin,
            action,
            target_id,
            reason,
            created_at,
        }
    }

    pub fn id(&self) -> &LogEntryId {
        &self.id
    }

    pub fn admin(&self) -> &Identity {
        &self.admin
    }

    pub fn action(&self) -> AdminAction {
        self.action
    }

    pub fn target_kind(&self) -> TargetKind {
        self.action.target_kind()
    }

    pub fn target_id(&self) -> &str {
        &self.target_id
    }

    pub fn reason(&self) -> Option<&str> {
        self.reason.as_deref()
    }

    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }
}
