//! CompleteSwapHandler - Command handler for marking accepted swaps done.

use std::sync::Arc;

use crate::domain::foundation::{Identity, SwapId};
use crate::domain::swap::{Swap, SwapError, SwapStatus};
use crate::ports::SwapStore;

/// Command to mark an accepted swap as carried out.
#[derive(Debug, Clone)]
pub struct CompleteSwapCommand {
    pub swap_id: SwapId,
    pub caller: Identity,
}

/// Result of a successful completion.
#[derive(Debug, Clone)]
pub struct CompleteSwapResult {
    pub swap: Swap,
}

/// Handler for completing swaps.
pub struct CompleteSwapHandler {
    swaps: Arc<dyn SwapStore>,
}

impl CompleteSwapHandler {
    pub fn new(swaps: Arc<dyn SwapStore>) -> Self {
        Self { swaps }
    }

    pub async fn handle(&self, cmd: CompleteSwapCommand) -> Result<CompleteSwapResult, SwapError> {
        // 1. Load the swap
        let mut swap = self
            .swaps
            .find_by_id(&cmd.swap_id)
            .await?
            .ok_or_else(|| SwapError::not_found(cmd.swap_id))?;

        // 2. Apply locally; either participant, accepted-only
        swap.complete(&cmd.caller)?;

        // 3. Conditional store update
        let applied = self
            .swaps
            .transition(
                &cmd.swap_id,
                SwapStatus::Accepted,
                SwapStatus::Completed,
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
                "Swap is not accepted (currently {})",
                current.status().as_str()
            )));
        }

        Ok(CompleteSwapResult { swap })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemorySwapStore;
    use crate::domain::foundation::Timestamp;

    fn identity(s: &str) -> Identity {
        Identity::new(s).unwrap()
    }

    async fn accepted_swap(store: &InMemorySwapStore) -> Swap {
        let swap = Swap::new(
            SwapId::new(),
            identity("user_alice"),
            identity("user_bob"),
            None,
        )
        .unwrap();
        store.insert(&swap).await.unwrap();
        store
            .transition(
                swap.id(),
                SwapStatus::Pending,
                SwapStatus::Accepted,
                Timestamp::now(),
            )
            .await
            .unwrap();
        store.find_by_id(swap.id()).await.unwrap().unwrap()
    }

    #[tokio::test]
    async fn either_participant_can_complete() {
        let store = Arc::new(InMemorySwapStore::new());
        let handler = CompleteSwapHandler::new(store.clone());

        let first = accepted_swap(&store).await;
        let result = handler
            .handle(CompleteSwapCommand {
                swap_id: *first.id(),
                caller: identity("user_alice"),
            })
            .await
            .unwrap();
        assert_eq!(result.swap.status(), SwapStatus::Completed);

        let second = {
            let swap = Swap::new(
                SwapId::new(),
                identity("user_carol"),
                identity("user_bob"),
                None,
            )
            .unwrap();
            store.insert(&swap).await.unwrap();
            store
                .transition(
                    swap.id(),
                    SwapStatus::Pending,
                    SwapStatus::Accepted,
                    Timestamp::now(),
                )
                .await
                .unwrap();
            swap
        };
        let result = handler
            .handle(CompleteSwapCommand {
                swap_id: *second.id(),
                caller: identity("user_bob"),
            })
            .await
            .unwrap();
        assert_eq!(result.swap.status(), SwapStatus::Completed);
    }

    #[tokio::test]
    async fn outsiders_cannot_complete() {
        let store = Arc::new(InMemorySwapStore::new());
        let handler = CompleteSwapHandler::new(store.clone());
        let swap = accepted_swap(&store).await;

        let result = handler
            .handle(CompleteSwapCommand {
                swap_id: *swap.id(),
                caller: identity("user_mallory"),
            })
            .await;

        assert!(matches!(
            result,
            Err(SwapError::Forbidden(ref msg)) if msg == "User is not a participant in this swap"
        ));
    }

    #[tokio::test]
    async fn pending_swaps_cannot_be_completed() {
        let store = Arc::new(InMemorySwapStore::new());
        let handler = CompleteSwapHandler::new(store.clone());

        let swap = Swap::new(
            SwapId::new(),
            identity("user_alice"),
            identity("user_bob"),
            None,
        )
        .unwrap();
        store.insert(&swap).await.unwrap();

        let result = handler
            .handle(CompleteSwapCommand {
                swap_id: *swap.id(),
                caller: identity("user_alice"),
            })
            .await;

        assert!(matches!(
            result,
            Err(SwapError::InvalidState(ref msg)) if msg == "Swap is not accepted"
        ));
    }

    #[tokio::test]
    async fn completing_twice_reports_the_current_state() {
        let store = Arc::new(InMemorySwapStore::new());
        let handler = CompleteSwapHandler::new(store.clone());
        let swap = accepted_swap(&store).await;

        let cmd = CompleteSwapCommand {
            swap_id: *swap.id(),
            caller: identity("user_bob"),
        };
        handler.handle(cmd.clone()).await.unwrap();

        let result = handler.handle(cmd).await;
        assert!(matches!(result, Err(SwapError::InvalidState(_))));
    }
}
