//! HTTP middleware for axum.
//!
//! This module contains middleware layers for cross-cutting concerns:
//!
//! - `auth` - Identity middleware and extractors

pub mod auth;

pub use auth::{identity_middleware, IdentityRejection, IdentityState, RequireIdentity};
