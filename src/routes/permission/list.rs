use crate::db::database_service::DatabaseService;
use crate::types::response::{ApiResponse, ApiResult};
use crate::utils::webutils::AuthenticatedUser;
use actix_web::{get, web};
use std::sync::Arc;

#[get("")]
pub async fn list(
    _auth: AuthenticatedUser,
    db: web::Data<Arc<DatabaseService>>,
) -> ApiResult<Vec<entity::permission::Model>> {
    Ok(ApiResponse::Ok(db.list_permissions().await?))
}
