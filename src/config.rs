use std::env;
use std::str::FromStr;

#[derive(Clone, Debug)]
pub struct EnvConfig {
    pub port: u16,
    pub db_url: String,
    pub auto_activate_user: bool,
    pub action_token_lifetime_minutes: i64,
    pub password_min_length: usize,
    pub mail: MailConfig,
    pub admin: Option<AdminConfig>,
}

#[derive(Clone, Debug)]
pub struct MailConfig {
    /// Outgoing mail is only sent when this is on. Password reset answers 501 otherwise.
    pub enabled: bool,
    pub api_key: String,
    pub endpoint: String,
    pub from: String,
    /// Link templates, `{token}` is replaced by the action token key.
    pub activation_url: String,
    pub reset_password_url: String,
}

#[derive(Clone, Debug)]
pub struct AdminConfig {
    pub email: String,
    pub password: String,
}

impl Default for EnvConfig {
    fn default() -> Self {
        EnvConfig {
            port: 8080,
            db_url: "sqlite::memory:".to_string(),
            auto_activate_user: false,
            action_token_lifetime_minutes: 24 * 60,
            password_min_length: 8,
            mail: MailConfig::default(),
            admin: None,
        }
    }
}

impl Default for MailConfig {
    fn default() -> Self {
        MailConfig {
            enabled: false,
            api_key: String::new(),
            endpoint: "https://api.resend.com/emails".to_string(),
            from: "noreply@example.com".to_string(),
            activation_url: "http://localhost:3000/activate/{token}".to_string(),
            reset_password_url: "http://localhost:3000/reset-password/{token}".to_string(),
        }
    }
}

impl EnvConfig {
    fn get_env(key: &str) -> String {
        env::var(key).unwrap_or_else(|_| panic!("Environment variable {} not set", key))
    }

    fn get_env_or<T: FromStr>(key: &str, default: T) -> T {
        env::var(key)
            .ok()
            .and_then(|v| v.trim().parse().ok())
            .unwrap_or(default)
    }

    fn get_flag(key: &str) -> bool {
        env::var(key)
            .map(|v| matches!(v.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on"))
            .unwrap_or(false)
    }

    pub fn from_env() -> Self {
        dotenv::dotenv().ok();

        let defaults = EnvConfig::default();
        let mail_defaults = MailConfig::default();

        let admin = match (env::var("ADMIN_EMAIL"), env::var("ADMIN_PASSWORD")) {
            (Ok(email), Ok(password)) => Some(AdminConfig { email, password }),
            _ => None,
        };

        EnvConfig {
            port: Self::get_env_or("PORT", defaults.port),
            db_url: Self::get_env("DATABASE_URL"),
            auto_activate_user: Self::get_flag("AUTO_ACTIVATE_USER"),
            action_token_lifetime_minutes: Self::get_env_or(
                "ACTION_TOKEN_LIFETIME_MINUTES",
                defaults.action_token_lifetime_minutes,
            ),
            password_min_length: Self::get_env_or("PASSWORD_MIN_LENGTH", defaults.password_min_length),
            mail: MailConfig {
                enabled: Self::get_flag("EMAIL_SERVICE"),
                api_key: env::var("MAIL_API_KEY").unwrap_or_default(),
                endpoint: Self::get_env_or("MAIL_ENDPOINT", mail_defaults.endpoint),
                from: Self::get_env_or("MAIL_FROM", mail_defaults.from),
                activation_url: Self::get_env_or("ACTIVATION_URL", mail_defaults.activation_url),
                reset_password_url: Self::get_env_or(
                    "RESET_PASSWORD_URL",
                    mail_defaults.reset_password_url,
                ),
            },
            admin,
        }
    }
}
