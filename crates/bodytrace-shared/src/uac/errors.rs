#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum ChangePasswordError {
    #[error("New password and confirm password do not match.")]
    PasswordsDoNotMatch,
}
