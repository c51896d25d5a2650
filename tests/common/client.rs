use account_auth::{
    config::EnvConfig,
    db::database_service::DatabaseService,
    types::user::DBUserCreate,
    utils::token::hash_password,
};
use actix_web::{web, App};
use entity::user::Model as UserModel;
use std::sync::Arc;
use uuid::Uuid;

use super::test_data::PASSWORD;

pub struct TestClient {
    pub db: Arc<DatabaseService>,
    pub config: EnvConfig,
}

#[allow(dead_code)]
impl TestClient {
    pub fn new(db: Arc<DatabaseService>, config: EnvConfig) -> Self {
        TestClient { db, config }
    }

    pub fn create_app(&self) -> actix_web::App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        App::new()
            .app_data(web::Data::new(Arc::clone(&self.db)))
            .app_data(web::Data::new(self.config.clone()))
            .configure(account_auth::routes::configure_routes)
    }

    async fn insert_user(&self, email: String, is_active: bool, is_staff: bool) -> UserModel {
        self.db
            .create_user(DBUserCreate {
                email,
                first_name: "Test".to_string(),
                last_name: "User".to_string(),
                password_hash: hash_password(PASSWORD).expect("Failed to hash password"),
                is_active,
                is_staff,
                is_superuser: is_staff,
            })
            .await
            .expect("Failed to create user")
    }

    /// Active staff account plus a session token for it.
    pub async fn create_test_admin(&self) -> (UserModel, String) {
        let admin = self
            .insert_user(format!("admin-{}@test.com", Uuid::new_v4()), true, true)
            .await;
        let token = self.login(admin.id).await;
        (admin, token)
    }

    /// Active regular account plus a session token for it.
    pub async fn create_test_user(&self) -> (UserModel, String) {
        let user = self
            .insert_user(format!("user-{}@test.com", Uuid::new_v4()), true, false)
            .await;
        let token = self.login(user.id).await;
        (user, token)
    }

    /// Regular account that has not been activated yet.
    pub async fn create_inactive_user(&self, email: &str) -> UserModel {
        self.insert_user(email.to_string(), false, false).await
    }

    pub async fn login(&self, user_id: Uuid) -> String {
        self.db
            .get_or_create_temporary_token(user_id)
            .await
            .expect("Failed to create temporary token")
            .key
    }
}

pub fn bearer(token: &str) -> (&'static str, String) {
    ("Authorization", format!("Bearer {}", token))
}
