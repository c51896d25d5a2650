use crate::db::database_service::DatabaseService;
use crate::types::response::{ApiResponse, ApiResult};
use crate::types::user::{UserFilter, UserRes};
use crate::utils::webutils::AuthenticatedUser;
use actix_web::{get, web};
use std::sync::Arc;

#[get("")]
pub async fn list(
    auth: AuthenticatedUser,
    db: web::Data<Arc<DatabaseService>>,
    filter: web::Query<UserFilter>,
) -> ApiResult<Vec<UserRes>> {
    auth.require_staff()?;

    let users = db.list_users(&filter).await?;
    let mut res = Vec::with_capacity(users.len());
    for user in users {
        res.push(db.user_res(user).await?);
    }

    Ok(ApiResponse::Ok(res))
}
