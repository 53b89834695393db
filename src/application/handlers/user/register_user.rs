//! RegisterUserHandler - Command handler for creating marketplace profiles.

use std::sync::Arc;

use crate::domain::foundation::Identity;
use crate::domain::user::{User, UserError};
use crate::ports::UserDirectory;

/// Command to register a new profile.
#[derive(Debug, Clone)]
pub struct RegisterUserCommand {
    pub identity: Identity,
    pub username: String,
    pub full_name: String,
    pub email: String,
    pub location: Option<String>,
    pub availability: Option<String>,
    pub skills_offered: Vec<String>,
    pub skills_wanted: Vec<String>,
    pub is_public: bool,
}

/// Result of successful registration.
#[derive(Debug, Clone)]
pub struct RegisterUserResult {
    pub user: User,
}

/// Handler for registering users.
pub struct RegisterUserHandler {
    directory: Arc<dyn UserDirectory>,
}

impl RegisterUserHandler {
    pub fn new(directory: Arc<dyn UserDirectory>) -> Self {
        Self { directory }
    }

    pub async fn handle(&self, cmd: RegisterUserCommand) -> Result<RegisterUserResult, UserError> {
        // 1. Build the aggregate; validation happens before any I/O
        let user = User::new(
            cmd.identity,
            cmd.username,
            cmd.full_name,
            cmd.email,
            cmd.location,
            cmd.availability,
            cmd.skills_offered,
            cmd.skills_wanted,
            cmd.is_public,
        )?;

        // 2. Insert; the directory enforces identity and email uniqueness
        self.directory.insert(&user).await?;

        Ok(RegisterUserResult { user })
    }
}
