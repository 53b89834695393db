//! HTTP adapter for admin endpoints.

mod dto;
mod handlers;
mod routes;

pub use dto::{
    AdminLogListResponse, AdminLogResponse, AdminSwapListResponse, AdminUserListResponse,
    AdminUserResponse, BroadcastResponse, ErrorResponse, ModerationRequest, ModerationResponse,
    PageParams, PlatformStatsResponse, SendBroadcastRequest,
};
pub use handlers::AdminHandlers;
pub use routes::admin_routes;
