//! ModerateUserHandler - Admin command for acting on a member account.

use std::sync::Arc;

use crate::domain::admin::{AdminAction, AdminError, AdminLogEntry};
use crate::domain::foundation::{Identity, LogEntryId};
use crate::ports::{AdminLogStore, UserDirectory};

use super::guard::ensure_admin;

/// The moderation action to apply to a user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserModeration {
    Verify,
    Suspend,
    Ban,
    Delete,
}

impl UserModeration {
    fn audit_action(self) -> AdminAction {
        match self {
            UserModeration::Verify => AdminAction::VerifyUser,
            UserModeration::Suspend => AdminAction::SuspendUser,
            UserModeration::Ban => AdminAction::BanUser,
            UserModeration::Delete => AdminAction::DeleteUser,
        }
    }
}

/// Command to moderate one member account.
#[derive(Debug, Clone)]
pub struct ModerateUserCommand {
    pub caller: Identity,
    pub target: Identity,
    pub action: UserModeration,
    pub reason: Option<String>,
}

/// Result carrying the audit entry that was written.
#[derive(Debug, Clone)]
pub struct ModerateUserResult {
    pub entry: AdminLogEntry,
}

/// Handler for user moderation.
pub struct ModerateUserHandler {
    directory: Arc<dyn UserDirectory>,
    audit_log: Arc<dyn AdminLogStore>,
}

impl ModerateUserHandler {
    pub fn new(directory: Arc<dyn UserDirectory>, audit_log: Arc<dyn AdminLogStore>) -> Self {
        Self {
            directory,
            audit_log,
        }
    }

    pub async fn handle(&self, cmd: ModerateUserCommand) -> Result<ModerateUserResult, AdminError> {
        // 1. Admins only
        ensure_admin(self.directory.as_ref(), &cmd.caller).await?;

        // 2. The target must exist
        if self
            .directory
            .find_by_identity(&cmd.target)
            .await
            .map_err(AdminError::from)?
            .is_none()
        {
            return Err(AdminError::user_not_found(cmd.target));
        }

        // 3. Apply the action
        match cmd.action {
            UserModeration::Verify => {
                self.directory
                    .set_verified(&cmd.target, true)
                    .await
                    .map_err(AdminError::from)?;
            }
            // Suspend and ban both land on the single banned flag.
            UserModeration::Suspend | UserModeration::Ban => {
                self.directory
                    .set_banned(&cmd.target, true, cmd.reason.as_deref())
                    .await
                    .map_err(AdminError::from)?;
            }
            UserModeration::Delete => {
                self.directory
                    .delete(&cmd.target)
                    .await
                    .map_err(AdminError::from)?;
            }
        }

        // 4. Every moderation action is audited
        let entry = AdminLogEntry::new(
            LogEntryId::new(),
            cmd.caller,
            cmd.action.audit_action(),
            cmd.target.to_string(),
            cmd.reason,
        )
        .map_err(AdminError::from)?;
        self.audit_log
            .append(&entry)
            .await
            .map_err(AdminError::from)?;

        Ok(ModerateUserResult { entry })
    }
}
