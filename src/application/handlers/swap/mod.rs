//! Swap command and query handlers.

mod cancel_swap;
mod complete_swap;
mod create_swap;
mod list_user_swaps;
mod respond_to_swap;
mod submit_feedback;

pub use cancel_swap::{CancelSwapCommand, CancelSwapHandler, CancelSwapResult};
pub use complete_swap::{CompleteSwapCommand, CompleteSwapHandler, CompleteSwapResult};
pub use create_swap::{CreateSwapCommand, CreateSwapHandler, CreateSwapResult};
pub use list_user_swaps::{
    ListUserSwapsHandler, ListUserSwapsQuery, ListUserSwapsResult, SwapWithNames,
};
pub use respond_to_swap::{
    RespondToSwapCommand, RespondToSwapHandler, RespondToSwapResult, SwapDecision,
};
pub use submit_feedback::{SubmitFeedbackCommand, SubmitFeedbackHandler, SubmitFeedbackResult};
