//! CancelSwapHandler - Command handler for withdrawing pending requests.

use std::sync::Arc;

use crate::domain::foundation::{Identity, SwapId};
use crate::domain::swap::{Swap, SwapError, SwapStatus};
use crate::ports::SwapStore;

/// Command to withdraw a pending swap request.
#[derive(Debug, Clone)]
pub struct CancelSwapCommand {
    pub swap_id: SwapId,
    pub caller: Identity,
}

/// Result of a successful cancellation.
#[derive(Debug, Clone)]
pub struct CancelSwapResult {
    pub swap: Swap,
}

/// Handler for cancelling swap requests.
pub struct CancelSwapHandler {
    swaps: Arc<dyn SwapStore>,
}

impl CancelSwapHandler {
    pub fn new(swaps: Arc<dyn SwapStore>) -> Self {
        Self { swaps }
    }

    pub async fn handle(&self, cmd: CancelSwapCommand) -> Result<CancelSwapResult, SwapError> {
        // 1. Load the swap
        let mut swap = self
            .swaps
            .find_by_id(&cmd.swap_id)
            .await?
            .ok_or_else(|| SwapError::not_found(cmd.swap_id))?;

        // 2. Apply locally; requester-only, pending-only
        swap.cancel(&cmd.caller)?;

        // 3. Conditional store update
        let applied = self
            .swaps
            .transition(
                &cmd.swap_id,
                SwapStatus::Pending,
                SwapStatus::Cancelled,
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

        Ok(CancelSwapResult { swap })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemorySwapStore;

    fn identity(s: &str) -> Identity {
        Identity::new(s).unwrap()
    }

    fn pending_swap() -> Swap {
        Swap::new(
            SwapId::new(),
            identity("user_alice"),
            identity("user_bob"),
            None,
        )
        .unwrap()
    }

    #[tokio::test]
    async fn requester_cancels_their_pending_request() {
        let swap = pending_swap();
        let store = Arc::new(InMemorySwapStore::new());
        store.insert(&swap).await.unwrap();
        let handler = CancelSwapHandler::new(store.clone());

        let result = handler
            .handle(CancelSwapCommand {
                swap_id: *swap.id(),
                caller: identity("user_alice"),
            })
            .await
            .unwrap();

        assert_eq!(result.swap.status(), SwapStatus::Cancelled);
        let stored = store.find_by_id(swap.id()).await.unwrap().unwrap();
        assert_eq!(stored.status(), SwapStatus::Cancelled);
    }

    #[tokio::test]
    async fn receiver_cannot_cancel() {
        let swap = pending_swap();
        let store = Arc::new(InMemorySwapStore::new());
        store.insert(&swap).await.unwrap();
        let handler = CancelSwapHandler::new(store);

        let result = handler
            .handle(CancelSwapCommand {
                swap_id: *swap.id(),
                caller: identity("user_bob"),
            })
            .await;

        assert!(matches!(
            result,
            Err(SwapError::Forbidden(ref msg)) if msg == "Only the requester can cancel a swap request"
        ));
    }

    #[tokio::test]
    async fn accepted_requests_cannot_be_cancelled() {
        let swap = pending_swap();
        let store = Arc::new(InMemorySwapStore::new());
        store.insert(&swap).await.unwrap();
        store
            .transition(
                swap.id(),
                SwapStatus::Pending,
                SwapStatus::Accepted,
                crate::domain::foundation::Timestamp::now(),
            )
            .await
            .unwrap();
        let handler = CancelSwapHandler::new(store);

        let result = handler
            .handle(CancelSwapCommand {
                swap_id: *swap.id(),
                caller: identity("user_alice"),
            })
            .await;

        assert!(matches!(
            result,
            Err(SwapError::InvalidState(ref msg)) if msg == "Swap is not pending"
        ));
    }

    #[tokio::test]
    async fn missing_swap_is_not_found() {
        let store = Arc::new(InMemorySwapStore::new());
        let handler = CancelSwapHandler::new(store);

        let result = handler
            .handle(CancelSwapCommand {
                swap_id: SwapId::new(),
                caller: identity("user_alice"),
            })
            .await;

        assert!(matches!(result, Err(SwapError::NotFound(_))));
    }
}
