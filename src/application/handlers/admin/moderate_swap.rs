//! ModerateSwapHandler - Admin command for acting on a swap.

use std::sync::Arc;

use crate::domain::admin::{AdminAction, AdminError, AdminLogEntry};
use crate::domain::foundation::{Identity, LogEntryId, SwapId};
use crate::domain::swap::{Swap, SwapStatus};
use crate::ports::{AdminLogStore, SwapStore, UserDirectory};

use super::guard::ensure_admin;

/// The moderation action to apply to a swap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwapModeration {
    Approve,
    Reject,
    Delete,
}

impl SwapModeration {
    fn audit_action(self) -> AdminAction {
        match self {
            SwapModeration::Approve => AdminAction::ApproveSwap,
            SwapModeration::Reject => AdminAction::RejectSwap,
            SwapModeration::Delete => AdminAction::DeleteSwap,
        }
    }
}

/// Command to moderate one swap.
#[derive(Debug, Clone)]
pub struct ModerateSwapCommand {
    pub caller: Identity,
    pub swap_id: SwapId,
    pub action: SwapModeration,
    pub reason: Option<String>,
}

/// Result carrying the audit entry and, unless deleted, the swap.
#[derive(Debug, Clone)]
pub struct ModerateSwapResult {
    pub swap: Option<Swap>,
    pub entry: AdminLogEntry,
}

/// Handler for swap moderation.
pub struct ModerateSwapHandler {
    swaps: Arc<dyn SwapStore>,
    directory: Arc<dyn UserDirectory>,
    audit_log: Arc<dyn AdminLogStore>,
}

impl ModerateSwapHandler {
    pub fn new(
        swaps: Arc<dyn SwapStore>,
        directory: Arc<dyn UserDirectory>,
        audit_log: Arc<dyn AdminLogStore>,
    ) -> Self {
        Self {
            swaps,
            directory,
            audit_log,
        }
    }

    pub async fn handle(&self, cmd: ModerateSwapCommand) -> Result<ModerateSwapResult, AdminError> {
        // 1. Admins only
        ensure_admin(self.directory.as_ref(), &cmd.caller).await?;

        // 2. Load the swap
        let mut swap = self
            .swaps
            .find_by_id(&cmd.swap_id)
            .await
            .map_err(AdminError::from)?
            .ok_or_else(|| AdminError::swap_not_found(cmd.swap_id))?;

        // 3. Apply the action; approve and reject honour the state machine
        let swap = match cmd.action {
            SwapModeration::Approve => {
                self.transition(&mut swap, SwapStatus::Accepted).await?;
                Some(swap)
            }
            SwapModeration::Reject => {
                self.transition(&mut swap, SwapStatus::Rejected).await?;
                Some(swap)
            }
            SwapModeration::Delete => {
                self.swaps
                    .delete(&cmd.swap_id)
                    .await
                    .map_err(AdminError::from)?;
                None
            }
        };

        // 4. Every moderation action is audited
        let entry = AdminLogEntry::new(
            LogEntryId::new(),
            cmd.caller,
            cmd.action.audit_action(),
            cmd.swap_id.to_string(),
            cmd.reason,
        )
        .map_err(AdminError::from)?;
        self.audit_log
            .append(&entry)
            .await
            .map_err(AdminError::from)?;

        Ok(ModerateSwapResult { swap, entry })
    }

    /// Local transition for the precise error, then the conditional write.
    async fn transition(&self, swap: &mut Swap, target: SwapStatus) -> Result<(), AdminError> {
        swap.transition(target).map_err(AdminError::from)?;

        let applied = self
            .swaps
            .transition(swap.id(), SwapStatus::Pending, target, *swap.updated_at())
            .await
            .map_err(AdminError::from)?;
        if !applied {
            let current = self
                .swaps
                .find_by_id(swap.id())
                .await
                .map_err(AdminError::from)?
                .ok_or_else(|| AdminError::swap_not_found(*swap.id()))?;
            return Err(AdminError::invalid_state(format!(
                "Swap is not pending (currently {})",
                current.status().as_str()
            )));
        }
        Ok(())
    }
}
