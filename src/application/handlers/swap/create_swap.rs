//! CreateSwapHandler - Command handler for opening swap requests.

use std::sync::Arc;

use crate::domain::foundation::{Identity, SwapId};
use crate::domain::swap::{Swap, SwapError};
use crate::ports::{SwapStore, UserDirectory};

/// Command to open a swap request against another user.
#[derive(Debug, Clone)]
pub struct CreateSwapCommand {
    pub requester: Identity,
    pub receiver: Identity,
    pub message: Option<String>,
}

/// Result of successful swap creation.
#[derive(Debug, Clone)]
pub struct CreateSwapResult {
    pub swap: Swap,
}

/// Handler for creating swap requests.
pub struct CreateSwapHandler {
    swaps: Arc<dyn SwapStore>,
    directory: Arc<dyn UserDirectory>,
}

impl CreateSwapHandler {
    pub fn new(swaps: Arc<dyn SwapStore>, directory: Arc<dyn UserDirectory>) -> Self {
        Self { swaps, directory }
    }

    pub async fn handle(&self, cmd: CreateSwapCommand) -> Result<CreateSwapResult, SwapError> {
        // 1. Build the aggregate; self-swaps are rejected before any I/O
        let swap = Swap::new(
            SwapId::new(),
            cmd.requester,
            cmd.receiver.clone(),
            cmd.message,
        )?;

        // 2. The receiver must be known to the directory
        if self
            .directory
            .find_by_identity(&cmd.receiver)
            .await?
            .is_none()
        {
            return Err(SwapError::user_not_found(cmd.receiver));
        }

        // 3. One open request per ordered pair
        if self
            .swaps
            .pending_exists(swap.requester(), swap.receiver())
            .await?
        {
            return Err(SwapError::duplicate_request());
        }

        // 4. Insert; the store enforces the pair constraint against races
        self.swaps.insert(&swap).await?;

        Ok(CreateSwapResult { swap })
    }
}
