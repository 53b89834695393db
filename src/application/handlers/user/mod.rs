//! User command and query handlers.
//!
//! Registration, profile reads, self-service updates, and account
//! deletion.

mod delete_account;
mod get_user;
mod list_users;
mod register_user;
mod update_profile;

pub use delete_account::{DeleteAccountCommand, DeleteAccountHandler};
pub use get_user::{GetUserHandler, GetUserQuery};
pub use list_users::{ListUsersHandler, ListUsersQuery};
pub use register_user::{RegisterUserCommand, RegisterUserHandler, RegisterUserResult};
pub use update_profile::{UpdateProfileCommand, UpdateProfileHandler, UpdateProfileResult};
