use crate::{
    imei::{Imei, ImeiSelection},
    uac::{LoginIdentity, Role},
};

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("server did not return a recognized account type (got {0:?})")]
pub struct UnrecognizedRoleError(pub String);

/// Identity of the logged in account
///
/// Only constructed from a successful login (or reloaded from storage) so that
/// an unassigned role can never be logged in. The default value is the logged
/// out state.
#[derive(Debug, Default, serde::Serialize, serde::Deserialize, Clone, PartialEq, Eq)]
pub struct Session {
    name: String,
    email: String,
    is_logged_in: bool,
    imei: ImeiSelection,
    role: Role,
}

impl Session {
    pub fn try_from_identity(identity: LoginIdentity) -> Result<Self, UnrecognizedRoleError> {
        let LoginIdentity {
            name,
            email,
            imei,
            role,
        } = identity;
        if !role.is_assigned() {
            return Err(UnrecognizedRoleError(role.as_wire_str().to_string()));
        }
        Ok(Self {
            name,
            email,
            is_logged_in: true,
            imei,
            role,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn is_logged_in(&self) -> bool {
        self.is_logged_in
    }

    pub fn imei(&self) -> &ImeiSelection {
        &self.imei
    }

    /// The device shown on single device screens
    pub fn primary_imei(&self) -> Option<&Imei> {
        self.imei.first()
    }

    /// Role used for routing, [`Role::Unassigned`] when logged out
    pub fn role(&self) -> Role {
        if self.is_logged_in {
            self.role
        } else {
            Role::Unassigned
        }
    }

    /// False if the value could not have been produced by a login (for
    /// example a hand edited session file)
    pub fn is_consistent(&self) -> bool {
        if self.is_logged_in {
            self.role.is_assigned() && !self.email.is_empty()
        } else {
            *self == Self::default()
        }
    }
}
