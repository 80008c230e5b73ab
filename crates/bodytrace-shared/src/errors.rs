use thiserror::Error;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConversionError {
    #[error("Empty not allowed")]
    Empty,
    #[error("Maximum length exceeded. {max} allowed but found {actual}")]
    MaxExceeded { max: usize, actual: usize },
    #[error("Zero not allowed")]
    Zero,
    #[error("Invalid character {0:?}")]
    InvalidCharacter(char),
}

/// Raised before a request is sent when the input cannot possibly succeed
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{0} is required")]
    MissingField(&'static str),
    #[error("{field} is invalid: {source}")]
    InvalidField {
        field: &'static str,
        source: ConversionError,
    },
    #[error("{0:?} is not a spreadsheet. Expected a .xlsx or .xls file")]
    NotASpreadsheet(String),
    #[error("{0}")]
    Password(#[from] crate::uac::ChangePasswordError),
}

#[derive(Debug, Error)]
#[error("The user has not logged in")]
pub struct NotLoggedInError;

/// Returns an error naming `field` if `value` is blank
pub fn require_field(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        Err(ValidationError::MissingField(field))
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case::empty("", false)]
    #[case::whitespace("   ", false)]
    #[case::value("a@b.com", true)]
    fn required_field(#[case] value: &str, #[case] expected_ok: bool) {
        let actual = require_field("email", value);
        assert_eq!(actual.is_ok(), expected_ok);
        if !expected_ok {
            assert_eq!(actual.unwrap_err().to_string(), "email is required");
        }
    }
}
