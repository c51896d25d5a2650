use crate::config::EnvConfig;
use crate::db::database_service::DatabaseService;
use crate::types::error::AppError;
use crate::types::response::{ApiResponse, ApiResult};
use crate::types::token::{ActionTokenKind, RResetPassword};
use crate::utils::mail::{log_mail_result, mail_reset_password};
use crate::utils::validation::validate_email_field;
use actix_web::{post, web};
use chrono::Duration;
use std::sync::Arc;
use tracing::info;

/// Issues a password_change token and mails it to the account owner.
#[post("/reset_password")]
pub async fn reset_password(
    _req: actix_web::HttpRequest,
    db: web::Data<Arc<DatabaseService>>,
    config: web::Data<EnvConfig>,
    body: web::Json<RResetPassword>,
) -> ApiResult<()> {
    // Without email this functionality is not provided
    if !config.mail.enabled {
        return Err(AppError::NotImplemented);
    }

    let Some(raw) = body.into_inner().email else {
        return Err(AppError::field("email", "This field is required."));
    };
    let email = validate_email_field(&raw).map_err(|m| AppError::field("email", m))?;

    let user = match db.find_user_by_email(&email).await? {
        Some(user) => user,
        None => {
            return Err(AppError::field(
                "email",
                "No account associated to this email address.",
            ))
        }
    };
    if !user.is_active {
        return Err(AppError::field("email", "This account is not active."));
    }

    let token = db
        .create_action_token(
            user.id,
            ActionTokenKind::PasswordChange,
            Duration::minutes(config.action_token_lifetime_minutes),
        )
        .await?;
    info!("Issued password change token for user {}", user.id);

    log_mail_result(
        "password reset",
        mail_reset_password(&config.mail, &user.email, &token.key).await,
    );

    Ok(ApiResponse::EmptyCreated)
}
