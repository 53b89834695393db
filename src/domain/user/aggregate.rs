//! User aggregate entity.
//!
//! A user is a marketplace profile keyed by an external [`Identity`].
//! Profiles advertise offered and wanted skills and accumulate ratings
//! from completed swap feedback. Moderation flags (ban, verification)
//! are mutated only through administrative flows.

use crate::domain::foundation::{DomainError, Identity, Timestamp, ValidationError};

use super::{scalar_rating, StoredRatingEntry, UserRole};

/// Maximum length for usernames.
pub const MAX_USERNAME_LENGTH: usize = 50;

/// Minimum length for usernames.
pub const MIN_USERNAME_LENGTH: usize = 3;

/// Maximum length for full names.
pub const MAX_FULL_NAME_LENGTH: usize = 100;

/// Minimum length for full names.
pub const MIN_FULL_NAME_LENGTH: usize = 2;

/// Partial profile update. `None` fields are left unchanged.
///
/// Moderation flags, role, and ratings are deliberately absent; those
/// change through their own flows.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProfileUpdate {
    pub username: Option<String>,
    pub full_name: Option<String>,
    pub location: Option<String>,
    pub availability: Option<String>,
    pub skills_offered: Option<Vec<String>>,
    pub skills_wanted: Option<Vec<String>>,
    pub is_public: Option<bool>,
}

impl ProfileUpdate {
    /// True when no field would change.
    pub fn is_empty(&self) -> bool {
        self == &ProfileUpdate::default()
    }
}

/// User aggregate - one marketplace profile.
///
/// # Invariants
///
/// - `identity`, `username`, `full_name`, `email` are non-empty
/// - `rating` is the rounded mean of the ratings list, `None` while
///   the list is empty (never 0.0)
/// - the ratings list is append-only
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    /// External identity, the key every other record refers to.
    identity: Identity,

    /// Short handle shown in listings.
    username: String,

    /// Display name.
    full_name: String,

    /// Contact email.
    email: String,

    /// Free-form location, if shared.
    location: Option<String>,

    /// Free-form availability note, if shared.
    availability: Option<String>,

    /// Skills this user offers to teach.
    skills_offered: Vec<String>,

    /// Skills this user wants to learn.
    skills_wanted: Vec<String>,

    /// Whether the profile appears in public listings.
    is_public: bool,

    /// Whether the user is banned or suspended from the platform.
    is_banned: bool,

    /// Reason recorded with the ban, if any.
    ban_reason: Option<String>,

    /// Whether an admin verified this account.
    is_verified: bool,

    /// Platform role.
    role: UserRole,

    /// Derived scalar rating, recomputed from `ratings`.
    rating: Option<f64>,

    /// Every rating this user received, append-only.
    ratings: Vec<StoredRatingEntry>,

    /// When the profile was created.
    created_at: Timestamp,

    /// When the profile was last modified.
    updated_at: Timestamp,
}

impl User {
    /// Create a new profile with default flags: plain user role, not
    /// banned, not verified, no ratings.
    ///
    /// # Errors
    ///
    /// - `ValidationFailed` if any profile field fails validation
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        identity: Identity,
        username: String,
        full_name: String,
        email: String,
        location: Option<String>,
        availability: Option<String>,
        skills_offered: Vec<String>,
        skills_wanted: Vec<String>,
        is_public: bool,
    ) -> Result<Self, DomainError> {
        Self::validate_username(&username)?;
        Self::validate_full_name(&full_name)?;
        Self::validate_email(&email)?;
        Self::validate_skills("skills_offered", &skills_offered)?;
        Self::validate_skills("skills_wanted", &skills_wanted)?;

        let now = Timestamp::now();
        Ok(Self {
            identity,
            username,
            full_name,
            email,
            location,
            availability,
            skills_offered,
            skills_wanted,
            is_public,
            is_banned: false,
            ban_reason: None,
            is_verified: false,
            role: UserRole::User,
            rating: None,
            ratings: Vec::new(),
            created_at: now,
            updated_at: now,
        })
    }

    /// Reconstitute a user from persistence (no validation).
    #[allow(clippy::too_many_arguments)]
    pub fn reconstitute(
        identity: Identity,
        username: String,
        full_name: String,
        email: String,
        location: Option<String>,
        availability: Option<String>,
        skills_offered: Vec<String>,
        skills_wanted: Vec<String>,
        is_public: bool,
        is_banned: bool,
        ban_reason: Option<String>,
        is_verified: bool,
        role: UserRole,
        rating: Option<f64>,
        ratings: Vec<StoredRatingEntry>,
        created_at: Timestamp,
        updated_at: Timestamp,
    ) -> Self {
        Self {
            identity,
            username,
            full_name,
            email,
            location,
            availability,
            skills_offered,
            skills_wanted,
            is_public,
            is_banned,
            ban_reason,
            is_verified,
            role,
            rating,
            ratings,
            created_at,
            updated_at,
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    pub fn identity(&self) -> &Identity {
        &self.identity
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn full_name(&self) -> &str {
        &self.full_name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn location(&self) -> Option<&str> {
        self.location.as_deref()
    }

    pub fn availability(&self) -> Option<&str> {
        self.availability.as_deref()
    }

    pub fn skills_offered(&self) -> &[String] {
        &self.skills_offered
    }

    pub fn skills_wanted(&self) -> &[String] {
        &self.skills_wanted
    }

    pub fn is_public(&self) -> bool {
        self.is_public
    }

    pub fn is_banned(&self) -> bool {
        self.is_banned
    }

    pub fn ban_reason(&self) -> Option<&str> {
        self.ban_reason.as_deref()
    }

    pub fn is_verified(&self) -> bool {
        self.is_verified
    }

    pub fn role(&self) -> UserRole {
        self.role
    }

    pub fn rating(&self) -> Option<f64> {
        self.rating
    }

    pub fn ratings(&self) -> &[StoredRatingEntry] {
        &self.ratings
    }

    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }

    pub fn updated_at(&self) -> &Timestamp {
        &self.updated_at
    }

    /// True when the profile appears in public browse listings.
    pub fn is_visible(&self) -> bool {
        self.is_public && !self.is_banned
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Mutations
    // ─────────────────────────────────────────────────────────────────────────

    /// Apply a partial profile update.
    ///
    /// # Errors
    ///
    /// - `ValidationFailed` if any supplied field fails validation
    pub fn apply_update(&mut self, update: ProfileUpdate) -> Result<(), DomainError> {
        if let Some(ref username) = update.username {
            Self::validate_username(username)?;
        }
        if let Some(ref full_name) = update.full_name {
            Self::validate_full_name(full_name)?;
        }
        if let Some(ref skills) = update.skills_offered {
            Self::validate_skills("skills_offered", skills)?;
        }
        if let Some(ref skills) = update.skills_wanted {
            Self::validate_skills("skills_wanted", skills)?;
        }

        if let Some(username) = update.username {
            self.username = username;
        }
        if let Some(full_name) = update.full_name {
            self.full_name = full_name;
        }
        if let Some(location) = update.location {
            self.location = Some(location);
        }
        if let Some(availability) = update.availability {
            self.availability = Some(availability);
        }
        if let Some(skills) = update.skills_offered {
            self.skills_offered = skills;
        }
        if let Some(skills) = update.skills_wanted {
            self.skills_wanted = skills;
        }
        if let Some(is_public) = update.is_public {
            self.is_public = is_public;
        }
        self.updated_at = Timestamp::now();
        Ok(())
    }

    /// Set or clear the ban flag. Clearing also drops the stored reason.
    pub fn set_banned(&mut self, banned: bool, reason: Option<String>) {
        self.is_banned = banned;
        self.ban_reason = if banned { reason } else { None };
        self.updated_at = Timestamp::now();
    }

    /// Set the verification flag.
    pub fn set_verified(&mut self, verified: bool) {
        self.is_verified = verified;
        self.updated_at = Timestamp::now();
    }

    /// Append a rating entry and refresh the derived scalar.
    ///
    /// Deduplication by provenance is the caller's responsibility; this
    /// method only appends.
    pub fn push_rating(&mut self, entry: StoredRatingEntry) {
        self.ratings.push(entry);
        self.rating = scalar_rating(&self.ratings);
        self.updated_at = Timestamp::now();
    }

    /// Overwrite the derived scalar rating.
    pub fn set_scalar_rating(&mut self, rating: Option<f64>) {
        self.rating = rating;
        self.updated_at = Timestamp::now();
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Validation
    // ─────────────────────────────────────────────────────────────────────────

    fn validate_username(username: &str) -> Result<(), DomainError> {
        if username.trim().is_empty() {
            return Err(ValidationError::empty_field("username").into());
        }
        if username.len() < MIN_USERNAME_LENGTH || username.len() > MAX_USERNAME_LENGTH {
            return Err(ValidationError::out_of_range(
                "username",
                MIN_USERNAME_LENGTH as i32,
                MAX_USERNAME_LENGTH as i32,
                username.len() as i32,
            )
            .into());
        }
        Ok(())
    }

    fn validate_full_name(full_name: &str) -> Result<(), DomainError> {
        if full_name.trim().is_empty() {
            return Err(ValidationError::empty_field("full_name").into());
        }
        if full_name.len() < MIN_FULL_NAME_LENGTH || full_name.len() > MAX_FULL_NAME_LENGTH {
            return Err(ValidationError::out_of_range(
                "full_name",
                MIN_FULL_NAME_LENGTH as i32,
                MAX_FULL_NAME_LENGTH as i32,
                full_name.len() as i32,
            )
            .into());
        }
        Ok(())
    }

    fn validate_email(email: &str) -> Result<(), DomainError> {
        if email.trim().is_empty() {
            return Err(ValidationError::empty_field("email").into());
        }
        if !email.contains('@') {
            return Err(ValidationError::invalid_format("email", "missing @ symbol").into());
        }
        Ok(())
    }

    fn validate_skills(field: &str, skills: &[String]) -> Result<(), DomainError> {
        if skills.iter().any(|s| s.trim().is_empty()) {
            return Err(ValidationError::invalid_format(
                field,
                "skill entries cannot be empty",
            )
            .into());
        }
        Ok(())
    }
}
