//! Shared items related to user account control

mod errors;
mod responses;
mod role;
mod user;

pub use errors::ChangePasswordError;
pub use responses::{LoginIdentity, LoginResponse, UserEnvelope};
pub use role::Role;
pub use user::User;
