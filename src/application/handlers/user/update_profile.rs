//! UpdateProfileHandler - Command handler for editing one's own profile.

use std::sync::Arc;

use crate::domain::foundation::Identity;
use crate::domain::user::{ProfileUpdate, User, UserError};
use crate::ports::UserDirectory;

/// Command to apply a partial profile update.
#[derive(Debug, Clone)]
pub struct UpdateProfileCommand {
    pub caller: Identity,
    pub subject: Identity,
    pub update: ProfileUpdate,
}

/// Result of a successful update.
#[derive(Debug, Clone)]
pub struct UpdateProfileResult {
    pub user: User,
}

/// Handler for profile updates.
pub struct UpdateProfileHandler {
    directory: Arc<dyn UserDirectory>,
}

impl UpdateProfileHandler {
    pub fn new(directory: Arc<dyn UserDirectory>) -> Self {
        Self { directory }
    }

    pub async fn handle(&self, cmd: UpdateProfileCommand) -> Result<UpdateProfileResult, UserError> {
        // 1. Profiles are self-service only
        if cmd.caller != cmd.subject {
            return Err(UserError::forbidden("You can only update your own profile"));
        }

        // 2. An update that names no fields is a caller mistake
        if cmd.update.is_empty() {
            return Err(UserError::validation("update", "No fields to update"));
        }

        // 3. Load and mutate the aggregate; all fields validate before any write
        let mut user = self
            .directory
            .find_by_identity(&cmd.subject)
            .await?
            .ok_or(UserError::NotFound(cmd.subject))?;
        user.apply_update(cmd.update)?;

        // 4. Persist the profile fields
        self.directory.update(&user).await?;

        Ok(UpdateProfileResult { user })
    }
}
