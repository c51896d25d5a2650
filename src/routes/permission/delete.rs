use crate::db::database_service::DatabaseService;
use crate::types::response::{ApiResponse, ApiResult};
use crate::utils::webutils::AuthenticatedUser;
use actix_web::{delete, web};
use std::sync::Arc;
use tracing::info;

#[delete("/{id}")]
pub async fn delete_permission(
    auth: AuthenticatedUser,
    db: web::Data<Arc<DatabaseService>>,
    path: web::Path<i32>,
) -> ApiResult<()> {
    auth.require_staff()?;

    let id = path.into_inner();
    db.delete_permission(id).await?;
    info!("Permission {} deleted by {}", id, auth.id());

    Ok(ApiResponse::NoContent)
}
