use crate::db::database_service::DatabaseService;
use crate::types::error::{AppError, FieldErrors};
use crate::types::response::{ApiResponse, ApiResult};
use crate::types::token::{RObtainToken, TokenRes};
use crate::utils::token::spawn_verify_password;
use actix_web::{post, web};
use std::sync::Arc;
use tracing::info;

/// Login: trades email and password for the user's temporary token.
#[post("")]
pub async fn obtain_token(
    _req: actix_web::HttpRequest,
    db: web::Data<Arc<DatabaseService>>,
    body: web::Json<RObtainToken>,
) -> ApiResult<TokenRes> {
    let body = body.into_inner();
    let mut errors = FieldErrors::new();
    errors.require("email", &body.email);
    errors.require("password", &body.password);

    let (email, password) = match (body.email, body.password) {
        (Some(email), Some(password)) if errors.is_empty() => (email, password),
        _ => return Err(AppError::Validation(errors)),
    };

    let invalid = || {
        AppError::field(
            FieldErrors::NON_FIELD,
            "Unable to log in with provided credentials.",
        )
    };

    let user = db
        .find_user_by_email(email.trim())
        .await?
        .ok_or_else(invalid)?;

    let matches = spawn_verify_password(password, user.password.clone()).await?;
    if !matches {
        return Err(invalid());
    }
    if !user.is_active {
        return Err(AppError::field(FieldErrors::NON_FIELD, "User account is disabled."));
    }

    let token = db.get_or_create_temporary_token(user.id).await?;
    db.record_login(user.id).await?;
    info!("User {} logged in", user.id);

    Ok(ApiResponse::Ok(TokenRes { token: token.key }))
}
