use crate::db::database_service::DatabaseService;
use crate::routes::permission::CODENAME_TAKEN;
use crate::types::error::{AppError, FieldErrors};
use crate::types::permission::RPermission;
use crate::types::response::{ApiResponse, ApiResult};
use crate::utils::validation::non_blank;
use crate::utils::webutils::AuthenticatedUser;
use actix_web::{post, web};
use std::sync::Arc;
use tracing::info;

#[post("")]
pub async fn create(
    auth: AuthenticatedUser,
    db: web::Data<Arc<DatabaseService>>,
    body: web::Json<RPermission>,
) -> ApiResult<entity::permission::Model> {
    auth.require_staff()?;

    let mut errors = FieldErrors::new();
    let name = non_blank(&mut errors, "name", body.name.as_deref());
    let codename = non_blank(&mut errors, "codename", body.codename.as_deref());
    if let Some(codename) = &codename {
        if db.codename_taken(codename, None).await? {
            errors.add("codename", CODENAME_TAKEN);
        }
    }

    let (name, codename) = match (name, codename) {
        (Some(name), Some(codename)) if errors.is_empty() => (name, codename),
        _ => return Err(AppError::Validation(errors)),
    };

    let permission = match db.create_permission(name, codename).await {
        Ok(permission) => permission,
        Err(AppError::AlreadyExists) => return Err(AppError::field("codename", CODENAME_TAKEN)),
        Err(e) => return Err(e),
    };
    info!("Permission {} created by {}", permission.codename, auth.id());

    Ok(ApiResponse::Created(permission))
}
