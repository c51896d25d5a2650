pub mod action_token;
pub mod database_service;
pub mod permission;
pub mod temporary_token;
pub mod user;
