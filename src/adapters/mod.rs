//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `auth` - Identity verifier implementations (forwarded header, mock)
//! - `http` - Axum routers, handlers, and middleware
//! - `memory` - In-memory store implementations for tests and local runs
//! - `postgres` - PostgreSQL store implementations

pub mod auth;
pub mod http;
pub mod memory;
pub mod postgres;
