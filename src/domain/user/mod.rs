//! User domain module.
//!
//! Marketplace profiles: the skills a user offers and wants, their
//! visibility and moderation flags, and the ratings they accumulate
//! from swap feedback.
//!
//! # Module Structure
//!
//! - `aggregate` - User aggregate entity and partial profile updates
//! - `rating` - Rating entries, stored form, scalar aggregation
//! - `role` - UserRole (user / admin)
//! - `errors` - User-specific error types

mod aggregate;
mod errors;
mod rating;
mod role;

pub use aggregate::{
    ProfileUpdate, User, MAX_FULL_NAME_LENGTH, MAX_USERNAME_LENGTH, MIN_FULL_NAME_LENGTH,
    MIN_USERNAME_LENGTH,
};
pub use errors::UserError;
pub use rating::{scalar_rating, RatingEntry, StoredRatingEntry};
pub use role::UserRole;
