use std::fmt::Display;

use egui::WidgetText;
use serde::{Deserialize, Serialize};

/// The kind of account, also sent as the `loginType` when logging in
///
/// Any value the client does not recognize becomes [`Role::Unassigned`] which
/// has no access to any screen.
#[derive(
    Debug, Default, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash, strum::EnumIter,
)]
#[serde(from = "Option<String>", into = "String")]
pub enum Role {
    Admin,
    MiddleAdmin,
    User,
    #[default]
    Unassigned,
}

impl Role {
    pub fn as_wire_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::MiddleAdmin => "middleAdmin",
            Role::User => "user",
            Role::Unassigned => "",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Role::Admin => "Admin",
            Role::MiddleAdmin => "Middle Admin",
            Role::User => "User",
            Role::Unassigned => "[NOT SET]",
        }
    }

    pub fn is_assigned(&self) -> bool {
        *self != Role::Unassigned
    }

    /// Roles that can be chosen on the login screen
    pub fn login_types() -> [Role; 3] {
        [Role::Admin, Role::MiddleAdmin, Role::User]
    }
}

impl From<String> for Role {
    fn from(value: String) -> Self {
        match value.as_str() {
            "admin" => Role::Admin,
            "middleAdmin" => Role::MiddleAdmin,
            "user" => Role::User,
            _ => Role::Unassigned,
        }
    }
}

impl From<Option<String>> for Role {
    fn from(value: Option<String>) -> Self {
        value.map(Role::from).unwrap_or_default()
    }
}

impl From<Role> for String {
    fn from(value: Role) -> Self {
        value.as_wire_str().to_string()
    }
}

impl Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_wire_str())
    }
}

impl From<Role> for WidgetText {
    fn from(value: Role) -> Self {
        value.display_name().into()
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;
    use strum::IntoEnumIterator;

    use super::*;

    #[rstest]
    #[case::admin(r#""admin""#, Role::Admin)]
    #[case::middle_admin(r#""middleAdmin""#, Role::MiddleAdmin)]
    #[case::user(r#""user""#, Role::User)]
    #[case::empty(r#""""#, Role::Unassigned)]
    #[case::null("null", Role::Unassigned)]
    #[case::unknown(r#""superuser""#, Role::Unassigned)]
    #[case::wrong_case(r#""Admin""#, Role::Unassigned)]
    fn role_from_wire(#[case] input: &str, #[case] expected: Role) {
        let actual: Role = serde_json::from_str(input).unwrap();
        assert_eq!(actual, expected);
    }

    #[test]
    fn wire_strings_round_trip() {
        for role in Role::iter() {
            assert_eq!(Role::from(String::from(role)), role);
        }
    }

    #[test]
    fn login_types_are_assigned() {
        assert!(Role::login_types().iter().all(Role::is_assigned));
    }
}
