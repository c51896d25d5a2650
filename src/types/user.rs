use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Sign-up body. Required fields are optional here so missing ones come back as field errors.
#[derive(Serialize, Deserialize, Debug, Default, Clone)]
pub struct RUserCreate {
    pub email: Option<String>,
    pub password: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

/// Body of PUT and PATCH on a user. PUT additionally requires email and both names.
#[derive(Serialize, Deserialize, Debug, Default, Clone)]
pub struct RUserUpdate {
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub password: Option<String>,
    pub old_password: Option<String>,
    pub is_active: Option<bool>,
    pub is_staff: Option<bool>,
    pub user_permissions: Option<Vec<i32>>,
}

#[derive(Deserialize, Debug, Default, Clone)]
pub struct UserFilter {
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub is_active: Option<bool>,
    pub is_staff: Option<bool>,
}

pub struct DBUserCreate {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub password_hash: String,
    pub is_active: bool,
    pub is_staff: bool,
    pub is_superuser: bool,
}

/// Column changes already validated by the route.
#[derive(Default)]
pub struct DBUserUpdate {
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub password_hash: Option<String>,
    pub is_active: Option<bool>,
    pub is_staff: Option<bool>,
    pub user_permissions: Option<Vec<i32>>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct UserRes {
    pub id: Uuid,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub is_active: bool,
    pub is_staff: bool,
    pub is_superuser: bool,
    pub last_login: Option<DateTime<Utc>>,
    pub date_joined: DateTime<Utc>,
    pub user_permissions: Vec<i32>,
}

impl UserRes {
    pub fn new(user: entity::user::Model, user_permissions: Vec<i32>) -> Self {
        UserRes {
            id: user.id,
            email: user.email,
            first_name: user.first_name,
            last_name: user.last_name,
            is_active: user.is_active,
            is_staff: user.is_staff,
            is_superuser: user.is_superuser,
            last_login: user.last_login,
            date_joined: user.created_at,
            user_permissions,
        }
    }
}
