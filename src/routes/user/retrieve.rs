use crate::db::database_service::DatabaseService;
use crate::routes::user::load_target;
use crate::types::response::{ApiResponse, ApiResult};
use crate::types::user::UserRes;
use crate::utils::webutils::AuthenticatedUser;
use actix_web::{get, web};
use std::sync::Arc;

#[get("/{id}")]
pub async fn retrieve(
    auth: AuthenticatedUser,
    db: web::Data<Arc<DatabaseService>>,
    path: web::Path<String>,
) -> ApiResult<UserRes> {
    let user = load_target(&db, &auth, &path).await?;
    Ok(ApiResponse::Ok(db.user_res(user).await?))
}
