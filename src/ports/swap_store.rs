//! Swap store port.
//!
//! Defines the contract for persisting and retrieving Swap aggregates.
//!
//! # Design
//!
//! - **Conditional writes**: status transitions and feedback claims are
//!   single conditional updates keyed on the expected current state.
//!   They report whether a row changed instead of erroring, so handlers
//!   can re-read and produce a precise error after a lost race.
//! - **Identity normalization**: legacy rows may store a participant as
//!   the internal user row key; implementations resolve those to the
//!   external identity before returning a swap.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, Identity, Score, SwapId, Timestamp};
use crate::domain::swap::{ParticipantRole, Swap, SwapStatus};

/// Store port for Swap aggregate persistence.
#[async_trait]
pub trait SwapStore: Send + Sync {
    /// Insert a new swap.
    ///
    /// # Errors
    ///
    /// - `DuplicateSwapRequest` if a pending swap for the same
    ///   (requester, receiver) pair already exists
    /// - `DatabaseError` on persistence failure
    async fn insert(&self, swap: &Swap) -> Result<(), DomainError>;

    /// Find a swap by its ID. Returns `None` if not found.
    async fn find_by_id(&self, id: &SwapId) -> Result<Option<Swap>, DomainError>;

    /// Check whether a pending swap exists for the ordered pair.
    async fn pending_exists(
        &self,
        requester: &Identity,
        receiver: &Identity,
    ) -> Result<bool, DomainError>;

    /// Move a swap from `expected` to `target` status, stamping
    /// `updated_at`, iff its current status is still `expected`.
    ///
    /// Returns `true` when a row changed. `false` means the swap is
    /// missing or no longer in `expected`; callers re-read to find out
    /// which.
    async fn transition(
        &self,
        id: &SwapId,
        expected: SwapStatus,
        target: SwapStatus,
        at: Timestamp,
    ) -> Result<bool, DomainError>;

    /// Claim one side's feedback slot iff the swap is accepted and that
    /// slot is still empty, stamping `updated_at`.
    ///
    /// Returns `true` when the slot was claimed by this call. `false`
    /// means the slot was already taken, the status moved on, or the
    /// swap is gone; callers re-read to find out which.
    async fn claim_feedback(
        &self,
        id: &SwapId,
        role: ParticipantRole,
        feedback: &str,
        score: Score,
        at: Timestamp,
    ) -> Result<bool, DomainError>;

    /// All swaps where the identity is requester or receiver,
    /// `created_at` descending.
    async fn list_for_participant(&self, identity: &Identity) -> Result<Vec<Swap>, DomainError>;

    /// Page through every swap, `created_at` descending.
    async fn list_all(&self, offset: u32, limit: u32) -> Result<Vec<Swap>, DomainError>;

    /// Hard-delete a swap.
    ///
    /// # Errors
    ///
    /// - `SwapNotFound` if the swap doesn't exist
    /// - `DatabaseError` on persistence failure
    async fn delete(&self, id: &SwapId) -> Result<(), DomainError>;

    /// Total number of swaps.
    async fn count_all(&self) -> Result<u64, DomainError>;

    /// Number of swaps currently in the given status.
    async fn count_by_status(&self, status: SwapStatus) -> Result<u64, DomainError>;

    /// Number of swaps created at or after the given instant.
    async fn count_created_since(&self, since: &Timestamp) -> Result<u64, DomainError>;
}
