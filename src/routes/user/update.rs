use crate::config::EnvConfig;
use crate::db::database_service::DatabaseService;
use crate::routes::user::load_target;
use crate::types::error::{AppError, FieldErrors};
use crate::types::response::{ApiResponse, ApiResult};
use crate::types::user::{DBUserUpdate, RUserUpdate, UserRes};
use crate::utils::token::{spawn_hash_password, spawn_verify_password};
use crate::utils::validation::{validate_email_field, validate_password_field};
use crate::utils::webutils::AuthenticatedUser;
use actix_web::{patch, put, web};
use std::sync::Arc;

#[put("/{id}")]
pub async fn update(
    auth: AuthenticatedUser,
    db: web::Data<Arc<DatabaseService>>,
    config: web::Data<EnvConfig>,
    path: web::Path<String>,
    body: web::Json<RUserUpdate>,
) -> ApiResult<UserRes> {
    apply_update(&db, &config, &auth, &path, body.into_inner(), false).await
}

#[patch("/{id}")]
pub async fn partial_update(
    auth: AuthenticatedUser,
    db: web::Data<Arc<DatabaseService>>,
    config: web::Data<EnvConfig>,
    path: web::Path<String>,
    body: web::Json<RUserUpdate>,
) -> ApiResult<UserRes> {
    apply_update(&db, &config, &auth, &path, body.into_inner(), true).await
}

async fn apply_update(
    db: &DatabaseService,
    config: &EnvConfig,
    auth: &AuthenticatedUser,
    raw_id: &str,
    body: RUserUpdate,
    partial: bool,
) -> ApiResult<UserRes> {
    let target = load_target(db, auth, raw_id).await?;
    let mut errors = FieldErrors::new();

    if !partial {
        errors.require("email", &body.email);
        errors.require("first_name", &body.first_name);
        errors.require("last_name", &body.last_name);
    }

    let email = match body.email.as_deref().map(validate_email_field) {
        None => None,
        Some(Ok(email)) => {
            if db.email_taken_by_other(&email, target.id).await? {
                errors.add("email", "A user with that email already exists.");
            }
            Some(email)
        }
        Some(Err(message)) => {
            errors.add("email", message);
            None
        }
    };

    if !auth.is_staff() {
        let staff_only = [
            ("is_active", body.is_active.is_some()),
            ("is_staff", body.is_staff.is_some()),
            ("user_permissions", body.user_permissions.is_some()),
        ];
        for (field, present) in staff_only {
            if present {
                errors.add(field, "Only staff members may change this field.");
            }
        }
    } else if let Some(ids) = &body.user_permissions {
        for id in db.missing_permissions(ids).await? {
            errors.add("user_permissions", format!("Invalid pk \"{id}\" - object does not exist."));
        }
    }

    if let Some(password) = &body.password {
        let email_for_check = email.as_deref().unwrap_or(&target.email);
        validate_password_field(
            &mut errors,
            "password",
            password,
            Some(email_for_check),
            config.password_min_length,
        );

        // staff resetting someone else's password don't know the old one
        let needs_old_password = !(auth.is_staff() && auth.id() != target.id);
        if needs_old_password {
            match &body.old_password {
                None => errors.add("old_password", "This field is required."),
                Some(old) => {
                    let matches =
                        spawn_verify_password(old.clone(), target.password.clone()).await?;
                    if !matches {
                        errors.add("old_password", "Old password is incorrect.");
                    }
                }
            }
        }
    }

    errors.into_result()?;

    let password_hash = match body.password {
        Some(password) => Some(spawn_hash_password(password).await?),
        None => None,
    };

    let user = match db
        .update_user(
            target.id,
            DBUserUpdate {
                email,
                first_name: body.first_name,
                last_name: body.last_name,
                password_hash,
                is_active: body.is_active,
                is_staff: body.is_staff,
                user_permissions: body.user_permissions,
            },
        )
        .await
    {
        Ok(user) => user,
        Err(AppError::AlreadyExists) => {
            return Err(AppError::field("email", "A user with that email already exists."))
        }
        Err(e) => return Err(e),
    };

    Ok(ApiResponse::Ok(db.user_res(user).await?))
}
