use account_auth::config::{EnvConfig, MailConfig};
use account_auth::db::database_service::DatabaseService;
use std::sync::Arc;

pub mod client;

pub struct TestContext {
    pub db: Arc<DatabaseService>,
    pub config: EnvConfig,
}

impl TestContext {
    pub async fn new() -> TestContext {
        Self::with_config(get_test_config()).await
    }

    /// Every context gets its own private in-memory database.
    pub async fn with_config(config: EnvConfig) -> TestContext {
        let db = Arc::new(
            DatabaseService::new(&config.db_url)
                .await
                .expect("Failed to initialize DatabaseService")
        );

        TestContext { db, config }
    }
}

pub fn get_test_config() -> EnvConfig {
    EnvConfig {
        port: 8080,
        db_url: "sqlite::memory:".to_string(),
        auto_activate_user: false,
        action_token_lifetime_minutes: 60,
        password_min_length: 8,
        mail: MailConfig {
            enabled: false,
            api_key: "test_mail_key".to_string(),
            // nothing listens here, deliveries fail fast and are only logged
            endpoint: "http://127.0.0.1:9/emails".to_string(),
            ..MailConfig::default()
        },
        admin: None,
    }
}

#[allow(dead_code)]
pub fn get_mail_config() -> EnvConfig {
    let mut config = get_test_config();
    config.mail.enabled = true;
    config
}

// Test data helpers
#[allow(dead_code)]
pub mod test_data {
    use account_auth::types::user::RUserCreate;

    pub const PASSWORD: &str = "Tr0ub4dor&3x";

    pub fn sample_user() -> RUserCreate {
        sample_user_with_email("test@example.com")
    }

    pub fn sample_user_with_email(email: &str) -> RUserCreate {
        RUserCreate {
            email: Some(email.to_string()),
            password: Some(PASSWORD.to_string()),
            first_name: Some("Test".to_string()),
            last_name: Some("User".to_string()),
        }
    }
}
