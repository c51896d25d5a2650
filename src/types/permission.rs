use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Default, Clone)]
pub struct RPermission {
    pub name: Option<String>,
    pub codename: Option<String>,
}
