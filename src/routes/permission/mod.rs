pub mod create;
pub mod delete;
pub mod list;
pub mod retrieve;
pub mod update;

pub(crate) const CODENAME_TAKEN: &str = "permission with this codename already exists.";
