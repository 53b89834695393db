//! DeleteAccountHandler - Command handler for removing one's own profile.

use std::sync::Arc;

use crate::domain::foundation::Identity;
use crate::domain::user::UserError;
use crate::ports::UserDirectory;

/// Command to delete the caller's own profile.
#[derive(Debug, Clone)]
pub struct DeleteAccountCommand {
    pub caller: Identity,
    pub subject: Identity,
}

/// Handler for account deletion.
pub struct DeleteAccountHandler {
    directory: Arc<dyn UserDirectory>,
}

impl DeleteAccountHandler {
    pub fn new(directory: Arc<dyn UserDirectory>) -> Self {
        Self { directory }
    }

    pub async fn handle(&self, cmd: DeleteAccountCommand) -> Result<(), UserError> {
        // 1. Accounts are self-service only
        if cmd.caller != cmd.subject {
            return Err(UserError::forbidden("You can only delete your own account"));
        }

        // 2. Delete; a miss is reported as not found
        if self
            .directory
            .find_by_identity(&cmd.subject)
            .await?
            .is_none()
        {
            return Err(UserError::NotFound(cmd.subject));
        }
        self.directory.delete(&cmd.subject).await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryUserDirectory;
    use crate::domain::user::User;

    fn identity(s: &str) -> Identity {
        Identity::new(s).unwrap()
    }

    async fn seed(directory: &InMemoryUserDirectory) {
        let user = User::new(
            identity("user_alice"),
            "alice_chen".to_string(),
            "Alice Chen".to_string(),
            "alice@example.com".to_string(),
            None,
            None,
            vec![],
            vec![],
            true,
        )
        .unwrap();
        directory.insert(&user).await.unwrap();
    }

    #[tokio::test]
    async fn deletes_the_callers_account() {
        let directory = Arc::new(InMemoryUserDirectory::new());
        seed(&directory).await;
        let handler = DeleteAccountHandler::new(directory.clone());

        handler
            .handle(DeleteAccountCommand {
                caller: identity("user_alice"),
                subject: identity("user_alice"),
            })
            .await
            .unwrap();

        assert_eq!(directory.count_all().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn other_accounts_are_off_limits() {
        let directory = Arc::new(InMemoryUserDirectory::new());
        seed(&directory).await;
        let handler = DeleteAccountHandler::new(directory.clone());

        let result = handler
            .handle(DeleteAccountCommand {
                caller: identity("user_bob"),
                subject: identity("user_alice"),
            })
            .await;

        assert!(matches!(result, Err(UserError::Forbidden(_))));
        assert_eq!(directory.count_all().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn missing_account_is_not_found() {
        let directory = Arc::new(InMemoryUserDirectory::new());
        let handler = DeleteAccountHandler::new(directory);

        let result = handler
            .handle(DeleteAccountCommand {
                caller: identity("user_ghost"),
                subject: identity("user_ghost"),
            })
            .await;
        assert!(matches!(result, Err(UserError::NotFound(_))));
    }
}
