//! RespondToSwapHandler - Command handler for accepting or rejecting requests.

use std::sync::Arc;

use crate::domain::foundation::{Identity, SwapId};
use crate::domain::swap::{Swap, SwapError, SwapStatus};
use crate::ports::SwapStore;

/// The receiver's decision on a pending request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwapDecision {
    Accept,
    Reject,
}

impl SwapDecision {
    fn target(self) -> SwapStatus {
        match self {
            SwapDecision::Accept => SwapStatus::Accepted,
            SwapDecision::Reject => SwapStatus::Rejected,
        }
    }
}

/// Command to answer a pending swap request.
#[derive(Debug, Clone)]
pub struct RespondToSwapCommand {
    pub swap_id: SwapId,
    pub caller: Identity,
    pub decision: SwapDecision,
}

/// Result of a successful response.
#[derive(Debug, Clone)]
pub struct RespondToSwapResult {
    pub swap: Swap,
}

/// Handler for accepting or rejecting swap requests.
pub struct RespondToSwapHandler {
    swaps: Arc<dyn SwapStore>,
}

impl RespondToSwapHandler {
    pub fn new(swaps: Arc<dyn SwapStore>) -> Self {
        Self { swaps }
    }

    pub async fn handle(&self, cmd: RespondToSwapCommand) -> Result<RespondToSwapResult, SwapError> {
        // 1. Load the swap
        let mut swap = self
            .swaps
            .find_by_id(&cmd.swap_id)
            .await?
            .ok_or_else(|| SwapError::not_found(cmd.swap_id))?;

        // 2. Apply the decision locally; receiver-only, pending-only
        match cmd.decision {
            SwapDecision::Accept => swap.accept(&cmd.caller)?,
            SwapDecision::Reject => swap.reject(&cmd.caller)?,
        }

        // 3. Conditional store update; a concurrent writer may have won
        let applied = self
            .swaps
            .transition(
                &cmd.swap_id,
                SwapStatus::Pending,
                cmd.decision.target(),
                *swap.updated_at(),
            )
            .await?;

        // 4. On a lost race, report the state that actually won
        if !applied {
            let current = self
                .swaps
                .find_by_id(&cmd.swap_id)
                .await?
                .ok_or_else(|| SwapError::not_found(cmd.swap_id))?;
            return Err(SwapError::invalid_state(format!(
                "Swap is not pending (currently {})",
                current.status().as_str()
            )));
        }

        Ok(RespondToSwapResult { swap })
    }
}
