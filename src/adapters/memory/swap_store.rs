//! In-memory swap store for tests and local composition.
//!
//! Mirrors the conditional-write semantics of the Postgres adapter:
//! transitions and feedback claims only apply when the stored row still
//! matches the expected state.
//!
//! # Security Note
//!
//! This adapter is for **testing only** and should not be used in
//! production. It uses `.expect()` on lock operations which will panic
//! if locks are poisoned.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, ErrorCode, Identity, Score, SwapId, Timestamp};
use crate::domain::swap::{ParticipantRole, Swap, SwapStatus};
use crate::ports::SwapStore;

/// In-memory [`SwapStore`].
///
/// Carries an alias map so tests can seed the legacy situation where a
/// stored participant value is an internal row key rather than the
/// external identity; loads resolve through the map exactly like the
/// Postgres adapter resolves through its join.
pub struct InMemorySwapStore {
    swaps: RwLock<Vec<Swap>>,
    aliases: RwLock<HashMap<String, Identity>>,
}

impl InMemorySwapStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self {
            swaps: RwLock::new(Vec::new()),
            aliases: RwLock::new(HashMap::new()),
        }
    }

    /// Registers a legacy alias: swaps holding `raw` as a participant
    /// resolve to `canonical` when loaded.
    pub fn alias_identity(&self, raw: impl Into<String>, canonical: Identity) {
        self.aliases
            .write()
            .expect("InMemorySwapStore: aliases lock poisoned")
            .insert(raw.into(), canonical);
    }

    /// Returns every stored swap unresolved (for test assertions).
    pub fn raw_swaps(&self) -> Vec<Swap> {
        self.swaps
            .read()
            .expect("InMemorySwapStore: swaps lock poisoned")
            .clone()
    }

    fn resolve_identity(&self, identity: &Identity) -> Identity {
        self.aliases
            .read()
            .expect("InMemorySwapStore: aliases lock poisoned")
            .get(identity.as_str())
            .cloned()
            .unwrap_or_else(|| identity.clone())
    }

    /// A copy of the swap with legacy participant values resolved to
    /// canonical identities.
    fn resolved(&self, swap: &Swap) -> Swap {
        let (requester_feedback, requester_rating) = swap.feedback(ParticipantRole::Requester);
        let (receiver_feedback, receiver_rating) = swap.feedback(ParticipantRole::Receiver);
        Swap::reconstitute(
            *swap.id(),
            self.resolve_identity(swap.requester()),
            self.resolve_identity(swap.receiver()),
            swap.message().map(str::to_string),
            swap.status(),
            requester_feedback.map(str::to_string),
            requester_rating,
            receiver_feedback.map(str::to_string),
            receiver_rating,
            *swap.created_at(),
            *swap.updated_at(),
        )
    }
}

impl Default for InMemorySwapStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SwapStore for InMemorySwapStore {
    async fn insert(&self, swap: &Swap) -> Result<(), DomainError> {
        let mut swaps = self
            .swaps
            .write()
            .expect("InMemorySwapStore: swaps lock poisoned");
        if swaps.iter().any(|s| s.id() == swap.id()) {
            return Err(DomainError::new(
                ErrorCode::DatabaseError,
                format!("Swap id already exists: {}", swap.id()),
            ));
        }
        if swap.status().is_pending()
            && swaps.iter().any(|s| {
                s.status().is_pending()
                    && s.requester() == swap.requester()
                    && s.receiver() == swap.receiver()
            })
        {
            return Err(DomainError::new(
                ErrorCode::DuplicateSwapRequest,
                "A pending swap request between these users already exists",
            ));
        }
        swaps.push(swap.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &SwapId) -> Result<Option<Swap>, DomainError> {
        let swaps = self
            .swaps
            .read()
            .expect("InMemorySwapStore: swaps lock poisoned");
        Ok(swaps.iter().find(|s| s.id() == id).map(|s| self.resolved(s)))
    }

    async fn pending_exists(
        &self,
        requester: &Identity,
        receiver: &Identity,
    ) -> Result<bool, DomainError> {
        let swaps = self
            .swaps
            .read()
            .expect("InMemorySwapStore: swaps lock poisoned");
        Ok(swaps.iter().any(|s| {
            s.status().is_pending() && s.requester() == requester && s.receiver() == receiver
        }))
    }

    async fn transition(
        &self,
        id: &SwapId,
        expected: SwapStatus,
        target: SwapStatus,
        at: Timestamp,
    ) -> Result<bool, DomainError> {
        let mut swaps = self
            .swaps
            .write()
            .expect("InMemorySwapStore: swaps lock poisoned");
        let Some(pos) = swaps.iter().position(|s| s.id() == id) else {
            return Ok(false);
        };
        if swaps[pos].status() != expected {
            return Ok(false);
        }
        let current = &swaps[pos];
        let (requester_feedback, requester_rating) = current.feedback(ParticipantRole::Requester);
        let (receiver_feedback, receiver_rating) = current.feedback(ParticipantRole::Receiver);
        swaps[pos] = Swap::reconstitute(
            *current.id(),
            current.requester().clone(),
            current.receiver().clone(),
            current.message().map(str::to_string),
            target,
            requester_feedback.map(str::to_string),
            requester_rating,
            receiver_feedback.map(str::to_string),
            receiver_rating,
            *current.created_at(),
            at,
        );
        Ok(true)
    }

    async fn claim_feedback(
        &self,
        id: &SwapId,
        role: ParticipantRole,
        feedback: &str,
        score: Score,
        at: Timestamp,
    ) -> Result<bool, DomainError> {
        let mut swaps = self
            .swaps
            .write()
            .expect("InMemorySwapStore: swaps lock poisoned");
        let Some(pos) = swaps.iter().position(|s| s.id() == id) else {
            return Ok(false);
        };
        let current = &swaps[pos];
        if !current.status().accepts_feedback() {
            return Ok(false);
        }
        let (slot_feedback, slot_rating) = current.feedback(role);
        if slot_feedback.is_some() || slot_rating.is_some() {
            return Ok(false);
        }

        let (mut requester_feedback, mut requester_rating) = {
            let (f, r) = current.feedback(ParticipantRole::Requester);
            (f.map(str::to_string), r)
        };
        let (mut receiver_feedback, mut receiver_rating) = {
            let (f, r) = current.feedback(ParticipantRole::Receiver);
            (f.map(str::to_string), r)
        };
        match role {
            ParticipantRole::Requester => {
                requester_feedback = Some(feedback.to_string());
                requester_rating = Some(score);
            }
            ParticipantRole::Receiver => {
                receiver_feedback = Some(feedback.to_string());
                receiver_rating = Some(score);
            }
        }
        swaps[pos] = Swap::reconstitute(
            *current.id(),
            current.requester().clone(),
            current.receiver().clone(),
            current.message().map(str::to_string),
            current.status(),
            requester_feedback,
            requester_rating,
            receiver_feedback,
            receiver_rating,
            *current.created_at(),
            at,
        );
        Ok(true)
    }

    async fn list_for_participant(&self, identity: &Identity) -> Result<Vec<Swap>, DomainError> {
        let swaps = self
            .swaps
            .read()
            .expect("InMemorySwapStore: swaps lock poisoned");
        let mut matching: Vec<Swap> = swaps
            .iter()
            .map(|s| self.resolved(s))
            .filter(|s| s.is_participant(identity))
            .collect();
        matching.sort_by_key(|s| std::cmp::Reverse(*s.created_at()));
        Ok(matching)
    }

    async fn list_all(&self, offset: u32, limit: u32) -> Result<Vec<Swap>, DomainError> {
        let swaps = self
            .swaps
            .read()
            .expect("InMemorySwapStore: swaps lock poisoned");
        let mut all: Vec<Swap> = swaps.iter().map(|s| self.resolved(s)).collect();
        all.sort_by_key(|s| std::cmp::Reverse(*s.created_at()));
        Ok(all
            .into_iter()
            .skip(offset as usize)
            .take(limit as usize)
            .collect())
    }

    async fn delete(&self, id: &SwapId) -> Result<(), DomainError> {
        let mut swaps = self
            .swaps
            .write()
            .expect("InMemorySwapStore: swaps lock poisoned");
        let Some(pos) = swaps.iter().position(|s| s.id() == id) else {
            return Err(DomainError::new(
                ErrorCode::SwapNotFound,
                format!("Swap not found: {}", id),
            ));
        };
        swaps.remove(pos);
        Ok(())
    }

    async fn count_all(&self) -> Result<u64, DomainError> {
        let swaps = self
            .swaps
            .read()
            .expect("InMemorySwapStore: swaps lock poisoned");
        Ok(swaps.len() as u64)
    }

    async fn count_by_status(&self, status: SwapStatus) -> Result<u64, DomainError> {
        let swaps = self
            .swaps
            .read()
            .expect("InMemorySwapStore: swaps lock poisoned");
        Ok(swaps.iter().filter(|s| s.status() == status).count() as u64)
    }

    async fn count_created_since(&self, since: &Timestamp) -> Result<u64, DomainError> {
        let swaps = self
            .swaps
            .read()
            .expect("InMemorySwapStore: swaps lock poisoned");
        Ok(swaps
            .iter()
            .filter(|s| !s.created_at().is_before(since))
            .count() as u64)
    }
}
