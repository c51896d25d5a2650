pub mod activate;
pub mod change_password;
pub mod destroy_token;
pub mod obtain_token;
pub mod reset_password;
