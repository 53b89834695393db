//! User directory port.
//!
//! Defines the contract for persisting and retrieving User profiles,
//! keyed by external identity.
//!
//! # Design
//!
//! - **Targeted writes**: moderation flags, the scalar rating, and the
//!   ratings list each have their own operation so concurrent appends
//!   are never clobbered by a profile update.
//! - **Append-only ratings**: `append_rating` deduplicates by
//!   (swap_id, rater) provenance; replays are silently absorbed.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, Identity, Timestamp};
use crate::domain::user::{RatingEntry, StoredRatingEntry, User};

/// Directory port for User profile persistence.
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// Insert a new profile.
    ///
    /// # Errors
    ///
    /// - `DuplicateUser` if the identity or email is already taken
    ///   (the `field` detail names which)
    /// - `DatabaseError` on persistence failure
    async fn insert(&self, user: &User) -> Result<(), DomainError>;

    /// Find a profile by identity. Returns `None` if not found.
    async fn find_by_identity(&self, identity: &Identity) -> Result<Option<User>, DomainError>;

    /// Persist the profile fields and `updated_at` of an existing user.
    ///
    /// Moderation flags, role, the scalar rating, and the ratings list
    /// are not written by this method.
    ///
    /// # Errors
    ///
    /// - `UserNotFound` if the profile doesn't exist
    /// - `DuplicateUser` if a changed unique field collides
    /// - `DatabaseError` on persistence failure
    async fn update(&self, user: &User) -> Result<(), DomainError>;

    /// Delete a profile.
    ///
    /// # Errors
    ///
    /// - `UserNotFound` if the profile doesn't exist
    /// - `DatabaseError` on persistence failure
    async fn delete(&self, identity: &Identity) -> Result<(), DomainError>;

    /// Page through browseable profiles (public and not banned),
    /// `created_at` descending.
    async fn list_visible(&self, offset: u32, limit: u32) -> Result<Vec<User>, DomainError>;

    /// Page through every non-admin profile, `created_at` descending.
    ///
    /// Administrators never appear in moderation listings.
    async fn list_members(&self, offset: u32, limit: u32) -> Result<Vec<User>, DomainError>;

    /// Append a rating entry to a user's ratings list.
    ///
    /// If an entry with the same (swap_id, rater) provenance already
    /// exists, nothing is appended and the call succeeds.
    ///
    /// # Errors
    ///
    /// - `UserNotFound` if the rated user doesn't exist
    async fn append_rating(
        &self,
        identity: &Identity,
        entry: &RatingEntry,
    ) -> Result<(), DomainError>;

    /// The full ratings list of a user, in stored order.
    ///
    /// # Errors
    ///
    /// - `UserNotFound` if the user doesn't exist
    async fn rating_entries(
        &self,
        identity: &Identity,
    ) -> Result<Vec<StoredRatingEntry>, DomainError>;

    /// Overwrite the derived scalar rating.
    ///
    /// # Errors
    ///
    /// - `UserNotFound` if the user doesn't exist
    async fn set_scalar_rating(
        &self,
        identity: &Identity,
        rating: Option<f64>,
    ) -> Result<(), DomainError>;

    /// Set or clear the ban flag and reason.
    ///
    /// # Errors
    ///
    /// - `UserNotFound` if the user doesn't exist
    async fn set_banned(
        &self,
        identity: &Identity,
        banned: bool,
        reason: Option<&str>,
    ) -> Result<(), DomainError>;

    /// Set the verification flag.
    ///
    /// # Errors
    ///
    /// - `UserNotFound` if the user doesn't exist
    async fn set_verified(&self, identity: &Identity, verified: bool) -> Result<(), DomainError>;

    /// Total number of profiles.
    async fn count_all(&self) -> Result<u64, DomainError>;

    /// Number of profiles created at or after the given instant.
    async fn count_created_since(&self, since: &Timestamp) -> Result<u64, DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_directory_is_object_safe() {
        fn _accepts_dyn(_directory: &dyn UserDirectory) {}
    }
}
