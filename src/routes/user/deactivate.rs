use crate::db::database_service::DatabaseService;
use crate::routes::user::parse_target;
use crate::types::error::AppError;
use crate::types::response::{ApiResponse, ApiResult};
use crate::utils::webutils::AuthenticatedUser;
use actix_web::{delete, web};
use std::sync::Arc;
use tracing::info;

/// Soft delete. Unknown ids still answer 204.
#[delete("/{id}")]
pub async fn deactivate(
    auth: AuthenticatedUser,
    db: web::Data<Arc<DatabaseService>>,
    path: web::Path<String>,
) -> ApiResult<()> {
    let Some(target) = parse_target(&auth, &path) else {
        return Ok(ApiResponse::NoContent);
    };

    if !auth.may_act_on(target) {
        return match db.find_user_by_id(&target).await? {
            Some(_) => Err(AppError::Forbidden),
            None => Ok(ApiResponse::NoContent),
        };
    }

    if db.deactivate_user(target).await? {
        info!("User {} deactivated by {}", target, auth.id());
    }

    Ok(ApiResponse::NoContent)
}
