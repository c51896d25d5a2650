use crate::db::database_service::DatabaseService;
use crate::types::response::{ApiResponse, ApiResult};
use crate::utils::webutils::AuthenticatedUser;
use actix_web::{get, web};
use std::sync::Arc;

#[get("/{id}")]
pub async fn retrieve(
    _auth: AuthenticatedUser,
    db: web::Data<Arc<DatabaseService>>,
    path: web::Path<i32>,
) -> ApiResult<entity::permission::Model> {
    Ok(ApiResponse::Ok(db.get_permission(path.into_inner()).await?))
}
