//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (value objects, IDs, enums, errors)
//! - `swap` - Swap request lifecycle and feedback rules
//! - `user` - Marketplace profiles, roles, and rating aggregation
//! - `admin` - Moderation audit log, broadcasts, platform statistics

pub mod admin;
pub mod foundation;
pub mod swap;
pub mod user;
