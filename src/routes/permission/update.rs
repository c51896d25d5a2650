use crate::db::database_service::DatabaseService;
use crate::routes::permission::CODENAME_TAKEN;
use crate::types::error::{AppError, FieldErrors};
use crate::types::permission::RPermission;
use crate::types::response::{ApiResponse, ApiResult};
use crate::utils::validation::non_blank;
use crate::utils::webutils::AuthenticatedUser;
use actix_web::{patch, put, web};
use std::sync::Arc;

#[put("/{id}")]
pub async fn update(
    auth: AuthenticatedUser,
    db: web::Data<Arc<DatabaseService>>,
    path: web::Path<i32>,
    body: web::Json<RPermission>,
) -> ApiResult<entity::permission::Model> {
    apply_update(&db, &auth, path.into_inner(), body.into_inner(), false).await
}

#[patch("/{id}")]
pub async fn partial_update(
    auth: AuthenticatedUser,
    db: web::Data<Arc<DatabaseService>>,
    path: web::Path<i32>,
    body: web::Json<RPermission>,
) -> ApiResult<entity::permission::Model> {
    apply_update(&db, &auth, path.into_inner(), body.into_inner(), true).await
}

async fn apply_update(
    db: &DatabaseService,
    auth: &AuthenticatedUser,
    id: i32,
    body: RPermission,
    partial: bool,
) -> ApiResult<entity::permission::Model> {
    auth.require_staff()?;
    db.get_permission(id).await?;

    let mut errors = FieldErrors::new();
    let name = match (partial, body.name.as_deref()) {
        (true, None) => None,
        (_, value) => non_blank(&mut errors, "name", value),
    };
    let codename = match (partial, body.codename.as_deref()) {
        (true, None) => None,
        (_, value) => non_blank(&mut errors, "codename", value),
    };
    if let Some(codename) = &codename {
        if db.codename_taken(codename, Some(id)).await? {
            errors.add("codename", CODENAME_TAKEN);
        }
    }
    errors.into_result()?;

    match db.update_permission(id, name, codename).await {
        Ok(permission) => Ok(ApiResponse::Ok(permission)),
        Err(AppError::AlreadyExists) => Err(AppError::field("codename", CODENAME_TAKEN)),
        Err(e) => Err(e),
    }
}
