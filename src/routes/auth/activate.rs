use crate::db::database_service::DatabaseService;
use crate::types::error::AppError;
use crate::types::response::{ApiResponse, ApiResult};
use crate::types::token::{ActionTokenKind, RActivateUser};
use crate::types::user::UserRes;
use actix_web::{post, web};
use std::sync::Arc;
use tracing::{info, warn};

/// Activates the owner of a single-use activation token and consumes the token.
#[post("/activate")]
pub async fn activate(
    _req: actix_web::HttpRequest,
    db: web::Data<Arc<DatabaseService>>,
    body: web::Json<RActivateUser>,
) -> ApiResult<UserRes> {
    let Some(key) = body.into_inner().activation_token else {
        return Err(AppError::field("activation_token", "This field is required."));
    };
    let invalid = || {
        AppError::field(
            "activation_token",
            format!("\"{key}\" is not a valid activation_token."),
        )
    };

    let tokens = db
        .find_action_tokens(&key, ActionTokenKind::AccountActivation, false)
        .await?;

    // exactly one reference, anything else is unusable
    let token = match tokens.as_slice() {
        [token] => token,
        [] => return Err(invalid()),
        _ => {
            warn!("{} activation tokens share one key", tokens.len());
            return Err(invalid());
        }
    };

    let user = db.activate_with_token(token).await?.ok_or_else(invalid)?;
    info!("Activated user {}", user.id);

    Ok(ApiResponse::Ok(db.user_res(user).await?))
}
