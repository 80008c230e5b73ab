use crate::imei::ImeiSelection;

use super::{Role, User};

/// Body returned by a successful login
#[derive(Debug, serde::Serialize, serde::Deserialize, Clone, PartialEq, Eq)]
pub struct LoginResponse {
    pub user: LoginIdentity,
}

/// Who the server says just logged in
#[derive(Debug, serde::Serialize, serde::Deserialize, Clone, PartialEq, Eq)]
pub struct LoginIdentity {
    #[serde(default)]
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub imei: ImeiSelection,
    #[serde(rename = "type", default)]
    pub role: Role,
}

/// Endpoints returning a single user send it either bare or wrapped in `user`
#[derive(Debug, serde::Deserialize)]
#[serde(untagged)]
pub enum UserEnvelope {
    Wrapped { user: User },
    Bare(User),
}

impl From<UserEnvelope> for User {
    fn from(value: UserEnvelope) -> Self {
        match value {
            UserEnvelope::Wrapped { user } | UserEnvelope::Bare(user) => user,
        }
    }
}
