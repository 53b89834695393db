//! Swap domain module.
//!
//! Handles the lifecycle of skill swap requests between two users, from
//! the initial pending request through acceptance and completion, plus
//! the single-shot feedback each side may leave.
//!
//! # Module Structure
//!
//! - `aggregate` - Swap aggregate entity
//! - `status` - SwapStatus state machine
//! - `errors` - Swap-specific error types

mod aggregate;
mod errors;
mod status;

pub use aggregate::{ParticipantRole, Swap, MAX_FEEDBACK_LENGTH, MAX_MESSAGE_LENGTH};
pub use errors::SwapError;
pub use status::SwapStatus;
