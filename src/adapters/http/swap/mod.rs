//! HTTP adapter for swap endpoints.

mod dto;
mod handlers;
mod routes;

pub use dto::{
    CreateSwapRequest, ErrorResponse, SubmitFeedbackRequest, SwapListResponse, SwapResponse,
    SwapSummaryResponse,
};
pub use handlers::SwapHandlers;
pub use routes::swap_routes;
