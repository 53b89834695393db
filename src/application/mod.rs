//! Application layer - Commands, Queries, and Handlers.
//!
//! This layer orchestrates domain operations and coordinates between
//! ports. Command handlers mutate, query handlers read.

pub mod handlers;

pub use handlers::admin::{
    GetAuditLogHandler, GetAuditLogQuery, GetPlatformStatsHandler, GetPlatformStatsQuery,
    ListAllSwapsHandler, ListAllSwapsQuery, ListAllUsersHandler, ListAllUsersQuery,
    ModerateSwapCommand, ModerateSwapHandler, ModerateSwapResult, ModerateUserCommand,
    ModerateUserHandler, ModerateUserResult, SendBroadcastCommand, SendBroadcastHandler,
    SendBroadcastResult, SwapModeration, UserModeration,
};
pub use handlers::swap::{
    CancelSwapCommand, CancelSwapHandler, CancelSwapResult, CompleteSwapCommand,
    CompleteSwapHandler, CompleteSwapResult, CreateSwapCommand, CreateSwapHandler,
    CreateSwapResult, ListUserSwapsHandler, ListUserSwapsQuery, ListUserSwapsResult,
    RespondToSwapCommand, RespondToSwapHandler, RespondToSwapResult, SubmitFeedbackCommand,
    SubmitFeedbackHandler, SubmitFeedbackResult, SwapDecision, SwapWithNames,
};
pub use handlers::user::{
    DeleteAccountCommand, DeleteAccountHandler, GetUserHandler, GetUserQuery, ListUsersHandler,
    ListUsersQuery, RegisterUserCommand, RegisterUserHandler, RegisterUserResult,
    UpdateProfileCommand, UpdateProfileHandler, UpdateProfileResult,
};
