//! Foundation module - Shared domain primitives.
//!
//! Contains value objects, identifiers, and error types that form the
//! vocabulary of the skill swap domain.

mod auth;
mod errors;
mod ids;
mod score;
mod state_machine;
mod timestamp;

pub use auth::{AuthError, Caller};
pub use errors::{DomainError, ErrorCode, ValidationError};
pub use ids::{BroadcastId, Identity, LogEntryId, SwapId};
pub use score::{Score, MAX_SCORE, MIN_SCORE};
pub use state_machine::StateMachine;
pub use timestamp::Timestamp;
