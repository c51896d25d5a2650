use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ActionTokenKind {
    AccountActivation,
    PasswordChange,
}

impl ActionTokenKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActionTokenKind::AccountActivation => entity::action_token::ACCOUNT_ACTIVATION,
            ActionTokenKind::PasswordChange => entity::action_token::PASSWORD_CHANGE,
        }
    }
}

impl fmt::Display for ActionTokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Serialize, Deserialize, Debug, Default)]
pub struct RActivateUser {
    pub activation_token: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Default)]
pub struct RResetPassword {
    pub email: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Default)]
pub struct RChangePassword {
    pub token: Option<String>,
    pub new_password: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Default)]
pub struct RObtainToken {
    #[serde(alias = "login")]
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct TokenRes {
    pub token: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds_use_stored_tags() {
        assert_eq!(ActionTokenKind::AccountActivation.to_string(), "account_activation");
        assert_eq!(ActionTokenKind::PasswordChange.to_string(), "password_change");
    }

    #[test]
    fn login_is_accepted_as_email() {
        let body: RObtainToken =
            serde_json::from_str(r#"{"login": "a@b.io", "password": "x"}"#).unwrap();
        assert_eq!(body.email.as_deref(), Some("a@b.io"));
    }
}
