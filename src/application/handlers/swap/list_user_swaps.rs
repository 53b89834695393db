//! ListUserSwapsHandler - Query handler for a user's swap history.

use std::collections::HashMap;
use std::sync::Arc;

use crate::domain::foundation::Identity;
use crate::domain::swap::{Swap, SwapError};
use crate::ports::{SwapStore, UserDirectory};

/// Query to list every swap a user takes part in.
#[derive(Debug, Clone)]
pub struct ListUserSwapsQuery {
    pub identity: Identity,
}

/// One swap joined with the participants' display names.
#[derive(Debug, Clone)]
pub struct SwapWithNames {
    pub swap: Swap,
    pub requester_name: Option<String>,
    pub receiver_name: Option<String>,
}

/// Result of the listing, `created_at` descending.
#[derive(Debug, Clone)]
pub struct ListUserSwapsResult {
    pub swaps: Vec<SwapWithNames>,
}

/// Handler for listing a user's swaps.
pub struct ListUserSwapsHandler {
    swaps: Arc<dyn SwapStore>,
    directory: Arc<dyn UserDirectory>,
}

impl ListUserSwapsHandler {
    pub fn new(swaps: Arc<dyn SwapStore>, directory: Arc<dyn UserDirectory>) -> Self {
        Self { swaps, directory }
    }

    pub async fn handle(&self, query: ListUserSwapsQuery) -> Result<ListUserSwapsResult, SwapError> {
        // 1. Fetch the swaps, newest first
        let swaps = self.swaps.list_for_participant(&query.identity).await?;

        // 2. Resolve each distinct participant's display name once
        let mut names: HashMap<Identity, Option<String>> = HashMap::new();
        for swap in &swaps {
            for participant in [swap.requester(), swap.receiver()] {
                if !names.contains_key(participant) {
                    let name = self
                        .directory
                        .find_by_identity(participant)
                        .await?
                        .map(|user| user.full_name().to_string());
                    names.insert(participant.clone(), name);
                }
            }
        }

        // 3. Join; a name lookup that misses stays None
        let swaps = swaps
            .into_iter()
            .map(|swap| {
                let requester_name = names.get(swap.requester()).cloned().flatten();
                let receiver_name = names.get(swap.receiver()).cloned().flatten();
                SwapWithNames {
                    swap,
                    requester_name,
                    receiver_name,
                }
            })
            .collect();

        Ok(ListUserSwapsResult { swaps })
    }
}
