use crate::types::error::AppError;
use crate::utils::webutils::validate_token;
use actix_web::web;
use actix_web_httpauth::middleware::HttpAuthentication;

pub mod auth;
pub mod health;
pub mod permission;
pub mod user;

fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .error_handler(|err, _req| AppError::BadRequest(err.to_string()).into())
}

fn query_config() -> web::QueryConfig {
    web::QueryConfig::default()
        .error_handler(|err, _req| AppError::BadRequest(err.to_string()).into())
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    let session_auth = HttpAuthentication::bearer(validate_token);

    cfg.app_data(json_config());
    cfg.app_data(query_config());

    cfg.service(
        web::scope("/health").service(health::health)
    );
    cfg.service(
        web::scope("/users")
            // fixed paths first so they never reach /{id}
            .service(auth::activate::activate)
            .service(auth::reset_password::reset_password)
            .service(auth::change_password::change_password)
            .service(user::create::create)
            .service(user::list::list)
            .service(user::retrieve::retrieve)
            .service(user::update::update)
            .service(user::update::partial_update)
            .service(user::deactivate::deactivate)
    );
    cfg.service(
        web::scope("/authentication")
            .service(auth::obtain_token::obtain_token)
            .service(auth::destroy_token::destroy_token)
    );
    cfg.service(
        web::scope("/permissions")
            .wrap(session_auth)
            .service(permission::list::list)
            .service(permission::retrieve::retrieve)
            .service(permission::create::create)
            .service(permission::update::update)
            .service(permission::update::partial_update)
            .service(permission::delete::delete_permission)
    );
}
