use crate::config::EnvConfig;
use crate::db::database_service::DatabaseService;
use crate::types::error::{AppError, FieldErrors};
use crate::types::response::{ApiResponse, ApiResult};
use crate::types::token::ActionTokenKind;
use crate::types::user::{DBUserCreate, RUserCreate, UserRes};
use crate::utils::mail::{log_mail_result, mail_activation};
use crate::utils::token::spawn_hash_password;
use crate::utils::validation::{validate_email_field, validate_password_field};
use actix_web::{post, web};
use chrono::Duration;
use std::sync::Arc;
use tracing::info;

const EMAIL_TAKEN: &str = "A user with that email already exists.";

#[post("")]
pub async fn create(
    _req: actix_web::HttpRequest,
    db: web::Data<Arc<DatabaseService>>,
    config: web::Data<EnvConfig>,
    body: web::Json<RUserCreate>,
) -> ApiResult<UserRes> {
    let body = body.into_inner();
    let mut errors = FieldErrors::new();

    let email = match body.email.as_deref() {
        None => {
            errors.add("email", "This field is required.");
            None
        }
        Some(raw) => match validate_email_field(raw) {
            Ok(email) => Some(email),
            Err(message) => {
                errors.add("email", message);
                None
            }
        },
    };

    if let Some(email) = &email {
        if db.user_exists_by_email(email).await? {
            errors.add("email", EMAIL_TAKEN);
        }
    }

    errors.require("password", &body.password);
    if let Some(password) = &body.password {
        validate_password_field(
            &mut errors,
            "password",
            password,
            email.as_deref(),
            config.password_min_length,
        );
    }

    let (email, password) = match (email, body.password) {
        (Some(email), Some(password)) if errors.is_empty() => (email, password),
        _ => return Err(AppError::Validation(errors)),
    };

    let password_hash = spawn_hash_password(password).await?;

    let user = match db
        .create_user(DBUserCreate {
            email,
            first_name: body.first_name.unwrap_or_default(),
            last_name: body.last_name.unwrap_or_default(),
            password_hash,
            is_active: config.auto_activate_user,
            is_staff: false,
            is_superuser: false,
        })
        .await
    {
        Ok(user) => user,
        Err(AppError::AlreadyExists) => return Err(AppError::field("email", EMAIL_TAKEN)),
        Err(e) => return Err(e),
    };
    info!("Created user {}", user.id);

    if config.mail.enabled && !user.is_active {
        let token = db
            .create_action_token(
                user.id,
                ActionTokenKind::AccountActivation,
                Duration::minutes(config.action_token_lifetime_minutes),
            )
            .await?;
        log_mail_result(
            "activation",
            mail_activation(&config.mail, &user.email, &token.key).await,
        );
    }

    Ok(ApiResponse::Created(db.user_res(user).await?))
}
