use account_auth::config::EnvConfig;
use account_auth::db::database_service::DatabaseService;
use account_auth::routes::configure_routes;
use account_auth::utils::token::spawn_hash_password;
use actix_web::{middleware::Logger, web, App, HttpServer};
use std::sync::Arc;
use tracing::{info, warn};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));
    let config = EnvConfig::from_env();
    let addr = format!("0.0.0.0:{}", config.port);

    let database_service = Arc::new(
        DatabaseService::new(&config.db_url)
            .await
            .map_err(std::io::Error::other)?,
    );

    if let Some(admin) = &config.admin {
        let password_hash = spawn_hash_password(admin.password.clone())
            .await
            .map_err(std::io::Error::other)?;
        database_service
            .ensure_admin(&admin.email, password_hash)
            .await
            .map_err(std::io::Error::other)?;
    }

    match database_service.purge_expired_action_tokens().await {
        Ok(0) => {}
        Ok(n) => info!("Purged {n} expired action tokens"),
        Err(e) => warn!("Could not purge expired action tokens: {e}"),
    }

    info!("Starting server on {}", addr);

    let config = web::Data::new(config);
    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .app_data(web::Data::new(Arc::clone(&database_service)))
            .app_data(config.clone())
            .configure(configure_routes)
    })
    .bind(addr)?
    .run()
    .await
}
