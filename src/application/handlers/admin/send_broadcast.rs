//! SendBroadcastHandler - Admin command for platform-wide announcements.

use std::sync::Arc;

use crate::domain::admin::{AdminError, Broadcast};
use crate::domain::foundation::{BroadcastId, Identity};
use crate::ports::{BroadcastStore, UserDirectory};

use super::guard::ensure_admin;

/// Command to publish an announcement to all members.
#[derive(Debug, Clone)]
pub struct SendBroadcastCommand {
    pub caller: Identity,
    pub title: String,
    pub message: String,
}

/// Result of a stored broadcast.
#[derive(Debug, Clone)]
pub struct SendBroadcastResult {
    pub broadcast: Broadcast,
}

/// Handler for sending broadcasts.
pub struct SendBroadcastHandler {
    directory: Arc<dyn UserDirectory>,
    broadcasts: Arc<dyn BroadcastStore>,
}

impl SendBroadcastHandler {
    pub fn new(directory: Arc<dyn UserDirectory>, broadcasts: Arc<dyn BroadcastStore>) -> Self {
        Self {
            directory,
            broadcasts,
        }
    }

    pub async fn handle(&self, cmd: SendBroadcastCommand) -> Result<SendBroadcastResult, AdminError> {
        // 1. Admins only
        ensure_admin(self.directory.as_ref(), &cmd.caller).await?;

        // 2. Validate and store
        let broadcast = Broadcast::new(BroadcastId::new(), cmd.title, cmd.message, cmd.caller)
            .map_err(AdminError::from)?;
        self.broadcasts
            .append(&broadcast)
            .await
            .map_err(AdminError::from)?;

        Ok(SendBroadcastResult { broadcast })
    }
}
