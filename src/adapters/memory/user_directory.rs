//! In-memory user directory for tests and local composition.
//!
//! # Security Note
//!
//! This adapter is for **testing only** and should not be used in
//! production. It uses `.expect()` on lock operations which will panic
//! if locks are poisoned.

use std::sync::RwLock;

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, ErrorCode, Identity, Timestamp};
use crate::domain::user::{RatingEntry, StoredRatingEntry, User};
use crate::ports::UserDirectory;

/// In-memory [`UserDirectory`].
pub struct InMemoryUserDirectory {
    users: RwLock<Vec<User>>,
}

impl InMemoryUserDirectory {
    /// Creates an empty directory.
    pub fn new() -> Self {
        Self {
            users: RwLock::new(Vec::new()),
        }
    }

    fn not_found(identity: &Identity) -> DomainError {
        DomainError::new(
            ErrorCode::UserNotFound,
            format!("User not found: {}", identity),
        )
    }
}

impl Default for InMemoryUserDirectory {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UserDirectory for InMemoryUserDirectory {
    async fn insert(&self, user: &User) -> Result<(), DomainError> {
        let mut users = self
            .users
            .write()
            .expect("InMemoryUserDirectory: users lock poisoned");
        if users.iter().any(|u| u.identity() == user.identity()) {
            return Err(DomainError::new(
                ErrorCode::DuplicateUser,
                "A user with this identity already exists",
            )
            .with_detail("field", "identity"));
        }
        if users.iter().any(|u| u.email() == user.email()) {
            return Err(DomainError::new(
                ErrorCode::DuplicateUser,
                "A user with this email already exists",
            )
            .with_detail("field", "email"));
        }
        users.push(user.clone());
        Ok(())
    }

    async fn find_by_identity(&self, identity: &Identity) -> Result<Option<User>, DomainError> {
        let users = self
            .users
            .read()
            .expect("InMemoryUserDirectory: users lock poisoned");
        Ok(users.iter().find(|u| u.identity() == identity).cloned())
    }

    async fn update(&self, user: &User) -> Result<(), DomainError> {
        let mut users = self
            .users
            .write()
            .expect("InMemoryUserDirectory: users lock poisoned");
        if users
            .iter()
            .any(|u| u.identity() != user.identity() && u.email() == user.email())
        {
            return Err(DomainError::new(
                ErrorCode::DuplicateUser,
                "A user with this email already exists",
            )
            .with_detail("field", "email"));
        }
        let Some(pos) = users.iter().position(|u| u.identity() == user.identity()) else {
            return Err(Self::not_found(user.identity()));
        };

        // Profile fields come from the caller; flags, role, and ratings
        // keep their stored values.
        let stored = &users[pos];
        users[pos] = User::reconstitute(
            stored.identity().clone(),
            user.username().to_string(),
            user.full_name().to_string(),
            user.email().to_string(),
            user.location().map(str::to_string),
            user.availability().map(str::to_string),
            user.skills_offered().to_vec(),
            user.skills_wanted().to_vec(),
            user.is_public(),
            stored.is_banned(),
            stored.ban_reason().map(str::to_string),
            stored.is_verified(),
            stored.role(),
            stored.rating(),
            stored.ratings().to_vec(),
            *stored.created_at(),
            *user.updated_at(),
        );
        Ok(())
    }

    async fn delete(&self, identity: &Identity) -> Result<(), DomainError> {
        let mut users = self
            .users
            .write()
            .expect("InMemoryUserDirectory: users lock poisoned");
        let Some(pos) = users.iter().position(|u| u.identity() == identity) else {
            return Err(Self::not_found(identity));
        };
        users.remove(pos);
        Ok(())
    }

    async fn list_visible(&self, offset: u32, limit: u32) -> Result<Vec<User>, DomainError> {
        let users = self
            .users
            .read()
            .expect("InMemoryUserDirectory: users lock poisoned");
        let mut visible: Vec<User> = users.iter().filter(|u| u.is_visible()).cloned().collect();
        visible.sort_by_key(|u| std::cmp::Reverse(*u.created_at()));
        Ok(visible
            .into_iter()
            .skip(offset as usize)
            .take(limit as usize)
            .collect())
    }

    async fn list_members(&self, offset: u32, limit: u32) -> Result<Vec<User>, DomainError> {
        let users = self
            .users
            .read()
            .expect("InMemoryUserDirectory: users lock poisoned");
        let mut members: Vec<User> = users
            .iter()
            .filter(|u| !u.role().is_admin())
            .cloned()
            .collect();
        members.sort_by_key(|u| std::cmp::Reverse(*u.created_at()));
        Ok(members
            .into_iter()
            .skip(offset as usize)
            .take(limit as usize)
            .collect())
    }

    async fn append_rating(
        &self,
        identity: &Identity,
        entry: &RatingEntry,
    ) -> Result<(), DomainError> {
        let mut users = self
            .users
            .write()
            .expect("InMemoryUserDirectory: users lock poisoned");
        let Some(pos) = users.iter().position(|u| u.identity() == identity) else {
            return Err(Self::not_found(identity));
        };
        let stored = &users[pos];
        if stored
            .ratings()
            .iter()
            .any(|e| e.matches_provenance(&entry.swap_id, &entry.from))
        {
            return Ok(());
        }

        let mut ratings = stored.ratings().to_vec();
        ratings.push(entry.to_stored());
        // Append only; the scalar is recomputed by a separate call.
        users[pos] = User::reconstitute(
            stored.identity().clone(),
            stored.username().to_string(),
            stored.full_name().to_string(),
            stored.email().to_string(),
            stored.location().map(str::to_string),
            stored.availability().map(str::to_string),
            stored.skills_offered().to_vec(),
            stored.skills_wanted().to_vec(),
            stored.is_public(),
            stored.is_banned(),
            stored.ban_reason().map(str::to_string),
            stored.is_verified(),
            stored.role(),
            stored.rating(),
            ratings,
            *stored.created_at(),
            Timestamp::now(),
        );
        Ok(())
    }

    async fn rating_entries(
        &self,
        identity: &Identity,
    ) -> Result<Vec<StoredRatingEntry>, DomainError> {
        let users = self
            .users
            .read()
            .expect("InMemoryUserDirectory: users lock poisoned");
        users
            .iter()
            .find(|u| u.identity() == identity)
            .map(|u| u.ratings().to_vec())
            .ok_or_else(|| Self::not_found(identity))
    }

    async fn set_scalar_rating(
        &self,
        identity: &Identity,
        rating: Option<f64>,
    ) -> Result<(), DomainError> {
        let mut users = self
            .users
            .write()
            .expect("InMemoryUserDirectory: users lock poisoned");
        let Some(user) = users.iter_mut().find(|u| u.identity() == identity) else {
            return Err(Self::not_found(identity));
        };
        user.set_scalar_rating(rating);
        Ok(())
    }

    async fn set_banned(
        &self,
        identity: &Identity,
        banned: bool,
        reason: Option<&str>,
    ) -> Result<(), DomainError> {
        let mut users = self
            .users
            .write()
            .expect("InMemoryUserDirectory: users lock poisoned");
        let Some(user) = users.iter_mut().find(|u| u.identity() == identity) else {
            return Err(Self::not_found(identity));
        };
        user.set_banned(banned, reason.map(str::to_string));
        Ok(())
    }

    async fn set_verified(&self, identity: &Identity, verified: bool) -> Result<(), DomainError> {
        let mut users = self
            .users
            .write()
            .expect("InMemoryUserDirectory: users lock poisoned");
        let Some(user) = users.iter_mut().find(|u| u.identity() == identity) else {
            return Err(Self::not_found(identity));
        };
        user.set_verified(verified);
        Ok(())
    }

    async fn count_all(&self) -> Result<u64, DomainError> {
        let users = self
            .users
            .read()
            .expect("InMemoryUserDirectory: users lock poisoned");
        Ok(users.len() as u64)
    }

    async fn count_created_since(&self, since: &Timestamp) -> Result<u64, DomainError> {
        let users = self
            .users
            .read()
            .expect("InMemoryUserDirectory: users lock poisoned");
        Ok(users
            .iter()
            .filter(|u| !u.created_at().is_before(since))
            .count() as u64)
    }
}
