//! Expected format of the request bodies. The structure of the module follows
//! the endpoint paths, for example `/api/user/change-password` maps to
//! [`api::user::ChangePasswordReqArgs`]

use secrecy::{ExposeSecret, SecretString};
use std::fmt::Debug;

use crate::{errors::ValidationError, uac::Role};

pub mod api;

#[derive(Clone)]
pub struct LoginReqArgs {
    pub email: String,
    pub password: SecretString,
    pub login_type: Role,
}

impl LoginReqArgs {
    pub fn new<S: Into<String>>(email: S, password: SecretString, login_type: Role) -> Self {
        Self {
            email: email.into(),
            password,
            login_type,
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        crate::errors::require_field("email", &self.email)?;
        crate::errors::require_field("password", self.password.expose_secret())?;
        if !self.login_type.is_assigned() {
            return Err(ValidationError::MissingField("login type"));
        }
        Ok(())
    }

    /// Exposes the password, only call when building the request
    pub fn to_json_body(&self) -> serde_json::Value {
        serde_json::json!({
            "email": self.email.trim(),
            "password": self.password.expose_secret(),
            "loginType": self.login_type,
        })
    }
}

impl Debug for LoginReqArgs {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginReqArgs")
            .field("email", &self.email)
            .field("has_password", &!self.password.expose_secret().is_empty())
            .field("login_type", &self.login_type)
            .finish()
    }
}
