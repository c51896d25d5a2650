pub mod action_token;
pub mod permission;
pub mod temporary_token;
pub mod user;
pub mod user_permission;

/*
 Accounts sign up inactive and prove control of their email with an activation token.
 Logging in hands out one temporary token per user, logging out deletes it.
 Password resets go through a password_change action token that is expired once used.
 */
