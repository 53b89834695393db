//! Admin authorization guard shared by the moderation handlers.

use crate::domain::admin::AdminError;
use crate::domain::foundation::Identity;
use crate::ports::UserDirectory;

/// Verifies that the caller holds the admin role in the directory.
///
/// # Errors
///
/// - `NotAdmin` if the caller is unknown or not an administrator
pub(super) async fn ensure_admin(
    directory: &dyn UserDirectory,
    caller: &Identity,
) -> Result<(), AdminError> {
    let user = directory
        .find_by_identity(caller)
        .await
        .map_err(AdminError::from)?;
    match user {
        Some(user) if user.role().is_admin() => Ok(()),
        _ => Err(AdminError::not_admin()),
    }
}
