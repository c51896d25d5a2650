use uuid::Uuid;

use crate::db::database_service::DatabaseService;
use crate::types::error::AppError;
use crate::utils::webutils::AuthenticatedUser;

pub mod create;
pub mod deactivate;
pub mod list;
pub mod retrieve;
pub mod update;

/// `me` is the caller, anything else must be a UUID.
pub(crate) fn parse_target(auth: &AuthenticatedUser, raw: &str) -> Option<Uuid> {
    if raw == "me" {
        Some(auth.id())
    } else {
        Uuid::parse_str(raw).ok()
    }
}

/// Loads the `{id}` user under the owner-or-staff rule.
/// Staff get 404 for unknown ids; everyone else gets 403 for any id but their own.
pub(crate) async fn load_target(
    db: &DatabaseService,
    auth: &AuthenticatedUser,
    raw: &str,
) -> Result<entity::user::Model, AppError> {
    let id = parse_target(auth, raw);
    if !auth.is_staff() && id != Some(auth.id()) {
        return Err(AppError::Forbidden);
    }
    let id = id.ok_or(AppError::NotFound)?;
    db.get_user_by_id(&id).await
}
