use std::fmt::Display;

use crate::errors::ConversionError;

/// Server assigned identifier of a user record (opaque to the client)
#[derive(
    Debug, Default, serde::Serialize, serde::Deserialize, Clone, PartialEq, Eq, Hash, PartialOrd, Ord,
)]
#[serde(transparent)]
pub struct UserId(String);

impl TryFrom<String> for UserId {
    type Error = ConversionError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        let value = value.trim();
        if value.is_empty() {
            return Err(ConversionError::Empty);
        }
        Ok(Self(value.to_string()))
    }
}

impl TryFrom<&str> for UserId {
    type Error = ConversionError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        value.to_string().try_into()
    }
}

impl AsRef<str> for UserId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_id_rejected() {
        let actual: Result<UserId, _> = "  ".try_into();
        assert_eq!(actual.unwrap_err(), ConversionError::Empty);
    }

    #[test]
    fn id_is_trimmed() {
        let actual: UserId = " 65f1c0ffee ".try_into().unwrap();
        assert_eq!(actual.as_ref(), "65f1c0ffee");
    }
}
