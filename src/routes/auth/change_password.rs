use crate::config::EnvConfig;
use crate::db::database_service::DatabaseService;
use crate::types::error::{AppError, FieldErrors};
use crate::types::response::{ApiResponse, ApiResult};
use crate::types::token::{ActionTokenKind, RChangePassword};
use crate::types::user::UserRes;
use crate::utils::token::spawn_hash_password;
use crate::utils::validation::validate_password_field;
use actix_web::{post, web};
use std::sync::Arc;
use tracing::info;

/// Sets a new password for the owner of a password_change token, then expires the token.
#[post("/change_password")]
pub async fn change_password(
    _req: actix_web::HttpRequest,
    db: web::Data<Arc<DatabaseService>>,
    config: web::Data<EnvConfig>,
    body: web::Json<RChangePassword>,
) -> ApiResult<UserRes> {
    let body = body.into_inner();
    let mut errors = FieldErrors::new();

    errors.require("token", &body.token);
    errors.require("new_password", &body.new_password);
    if let Some(password) = &body.new_password {
        validate_password_field(
            &mut errors,
            "new_password",
            password,
            None,
            config.password_min_length,
        );
    }

    let (key, new_password) = match (body.token, body.new_password) {
        (Some(key), Some(new_password)) if errors.is_empty() => (key, new_password),
        _ => return Err(AppError::Validation(errors)),
    };
    let invalid = || AppError::field("token", format!("\"{key}\" is not a valid token."));

    let tokens = db
        .find_action_tokens(&key, ActionTokenKind::PasswordChange, true)
        .await?;
    let token = match tokens.as_slice() {
        [token] => token,
        _ => return Err(invalid()),
    };

    let password_hash = spawn_hash_password(new_password).await?;

    let user = db
        .change_password_with_token(token, password_hash)
        .await?
        .ok_or_else(invalid)?;
    info!("Password changed for user {}", user.id);

    Ok(ApiResponse::Ok(db.user_res(user).await?))
}
