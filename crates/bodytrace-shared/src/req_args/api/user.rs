use secrecy::{ExposeSecret, SecretString};

use crate::{
    errors::{require_field, ValidationError},
    id::UserId,
    imei::Imei,
    pagination::{PageRequest, SortOrder},
    uac::ChangePasswordError,
};

#[derive(Debug, Clone)]
pub struct NewUserReqArgs {
    pub name: String,
    pub email: String,
    pub password: SecretString,
    pub imei: Vec<Imei>,
}

impl NewUserReqArgs {
    pub fn validate(&self) -> Result<(), ValidationError> {
        require_field("name", &self.name)?;
        require_field("email", &self.email)?;
        require_field("password", self.password.expose_secret())?;
        Ok(())
    }

    /// Exposes the password, only call when building the request
    pub fn to_json_body(&self) -> serde_json::Value {
        serde_json::json!({
            "name": self.name.trim(),
            "email": self.email.trim(),
            "password": self.password.expose_secret(),
            "imei": self.imei,
        })
    }
}

#[derive(Debug, Clone, serde::Serialize)]
pub struct EditUserReqArgs {
    #[serde(skip)]
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub imei: Vec<Imei>,
}

impl EditUserReqArgs {
    pub fn validate(&self) -> Result<(), ValidationError> {
        require_field("name", &self.name)?;
        require_field("email", &self.email)?;
        Ok(())
    }
}

/// Shared by the admin user list (JSON body) and the middle admin client list
/// (query string)
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListUsersReqArgs {
    pub page: u32,
    pub limit: u32,
    pub sort_by: String,
    pub order: SortOrder,
    pub search: String,
}

impl ListUsersReqArgs {
    pub fn new(page: PageRequest, sort_by: impl Into<String>, order: SortOrder, search: &str) -> Self {
        Self {
            page: page.page(),
            limit: page.limit(),
            sort_by: sort_by.into(),
            order,
            search: search.trim().to_string(),
        }
    }
}

#[derive(Debug, Clone, serde::Serialize)]
pub struct PasswordResetRequestReqArgs {
    pub email: String,
}

impl PasswordResetRequestReqArgs {
    pub fn validate(&self) -> Result<(), ValidationError> {
        require_field("email", &self.email)
    }
}

#[derive(Debug, Clone)]
pub struct ResetPasswordReqArgs {
    pub reset_token: String,
    pub new_password: SecretString,
    pub confirm_password: SecretString,
}

impl ResetPasswordReqArgs {
    pub fn validate(&self) -> Result<(), ValidationError> {
        require_field("reset token", &self.reset_token)?;
        require_field("new password", self.new_password.expose_secret())?;
        check_passwords_match(&self.new_password, &self.confirm_password)?;
        Ok(())
    }

    /// Exposes the passwords, only call when building the request
    pub fn to_json_body(&self) -> serde_json::Value {
        serde_json::json!({
            "resetToken": self.reset_token,
            "newPassword": self.new_password.expose_secret(),
            "confirmPassword": self.confirm_password.expose_secret(),
        })
    }
}

#[derive(Debug, Clone)]
pub struct ChangePasswordReqArgs {
    pub email: String,
    pub old_password: SecretString,
    pub new_password: SecretString,
    pub confirm_password: SecretString,
}

impl ChangePasswordReqArgs {
    pub fn validate(&self) -> Result<(), ValidationError> {
        require_field("email", &self.email)?;
        require_field("old password", self.old_password.expose_secret())?;
        require_field("new password", self.new_password.expose_secret())?;
        check_passwords_match(&self.new_password, &self.confirm_password)?;
        Ok(())
    }

    /// Exposes the passwords, only call when building the request
    pub fn to_json_body(&self) -> serde_json::Value {
        serde_json::json!({
            "email": self.email,
            "oldPassword": self.old_password.expose_secret(),
            "newPassword": self.new_password.expose_secret(),
            "confirmPassword": self.confirm_password.expose_secret(),
        })
    }
}

fn check_passwords_match(
    new_password: &SecretString,
    confirm_password: &SecretString,
) -> Result<(), ChangePasswordError> {
    if new_password.expose_secret() == confirm_password.expose_secret() {
        Ok(())
    } else {
        Err(ChangePasswordError::PasswordsDoNotMatch)
    }
}
