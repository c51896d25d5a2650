use crate::db::database_service::DatabaseService;
use crate::types::error::AppError;
use crate::types::response::{ApiResponse, ApiResult};
use crate::utils::webutils::AuthenticatedUser;
use actix_web::{delete, web};
use std::sync::Arc;

/// Logout: deletes one of the caller's own temporary tokens.
#[delete("/{key}")]
pub async fn destroy_token(
    auth: AuthenticatedUser,
    db: web::Data<Arc<DatabaseService>>,
    path: web::Path<String>,
) -> ApiResult<()> {
    if !db.delete_temporary_token(&path, auth.id()).await? {
        return Err(AppError::NotFound);
    }
    Ok(ApiResponse::NoContent)
}
