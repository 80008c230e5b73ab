//! Static route table and the per role capability table
//!
//! Everything here is pure so the dashboard only has to ask which routes to
//! show for the current role.

use std::collections::BTreeMap;

use crate::uac::Role;

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    serde::Serialize,
    serde::Deserialize,
    strum::EnumIter,
)]
pub enum RouteId {
    SignIn,
    ForgotPassword,
    ResetPassword,
    ChangePassword,
    UserAccounts,
    BulkCreateUsers,
    BulkResetPasswords,
    CreateMiddleAdmins,
    Clients,
    ClientDashboard,
    MainDashboard,
    DeviceReadings,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    /// Requires a logged in session
    Admin,
    /// Reachable without logging in
    Auth,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RouteDescriptor {
    pub id: RouteId,
    pub name: &'static str,
    pub layout: Layout,
    pub path: &'static str,
    /// Shown in the navigation menu
    pub navigable: bool,
}

impl RouteDescriptor {
    const fn new(
        id: RouteId,
        name: &'static str,
        layout: Layout,
        path: &'static str,
        navigable: bool,
    ) -> Self {
        Self {
            id,
            name,
            layout,
            path,
            navigable,
        }
    }
}

pub static ROUTES: [RouteDescriptor; 12] = [
    RouteDescriptor::new(RouteId::SignIn, "Sign In", Layout::Auth, "/auth/sign-in", false),
    RouteDescriptor::new(
        RouteId::ForgotPassword,
        "Forgot Password",
        Layout::Auth,
        "/auth/forgot-password",
        false,
    ),
    RouteDescriptor::new(
        RouteId::ResetPassword,
        "Reset Password",
        Layout::Auth,
        "/auth/reset-password/:resetToken",
        false,
    ),
    RouteDescriptor::new(
        RouteId::UserAccounts,
        "User Accounts",
        Layout::Admin,
        "/admin/add-user",
        true,
    ),
    RouteDescriptor::new(
        RouteId::BulkCreateUsers,
        "Bulk Create Users",
        Layout::Admin,
        "/admin/bulk-create-users",
        true,
    ),
    RouteDescriptor::new(
        RouteId::BulkResetPasswords,
        "Bulk Reset Passwords",
        Layout::Admin,
        "/admin/bulk-reset-passwords",
        true,
    ),
    RouteDescriptor::new(
        RouteId::CreateMiddleAdmins,
        "Create Middle Admins",
        Layout::Admin,
        "/admin/create-middle-admins",
        true,
    ),
    RouteDescriptor::new(
        RouteId::Clients,
        "Clients",
        Layout::Admin,
        "/admin/middle-admin-imei",
        true,
    ),
    RouteDescriptor::new(
        RouteId::ClientDashboard,
        "Client Dashboard",
        Layout::Admin,
        "/admin/Client-dashboard",
        true,
    ),
    RouteDescriptor::new(
        RouteId::MainDashboard,
        "Main Dashboard",
        Layout::Admin,
        "/admin/default",
        true,
    ),
    RouteDescriptor::new(
        RouteId::DeviceReadings,
        "Device Readings",
        Layout::Admin,
        "/admin/list-user-imei",
        true,
    ),
    RouteDescriptor::new(
        RouteId::ChangePassword,
        "Change Password",
        Layout::Admin,
        "/admin/change-password",
        false,
    ),
];

/// Routes each role is allowed to open
pub fn capabilities(role: Role) -> &'static [RouteId] {
    match role {
        Role::Admin => &[
            RouteId::UserAccounts,
            RouteId::BulkCreateUsers,
            RouteId::BulkResetPasswords,
            RouteId::CreateMiddleAdmins,
            RouteId::ChangePassword,
        ],
        Role::MiddleAdmin => &[
            RouteId::Clients,
            RouteId::ClientDashboard,
            RouteId::ChangePassword,
        ],
        Role::User => &[
            RouteId::MainDashboard,
            RouteId::DeviceReadings,
            RouteId::ChangePassword,
        ],
        Role::Unassigned => &[],
    }
}

pub fn descriptor(id: RouteId) -> &'static RouteDescriptor {
    ROUTES
        .iter()
        .find(|route| route.id == id)
        .unwrap_or(&ROUTES[0])
}

/// The ordered sub list of `routes` to show in the navigation menu for `role`
pub fn visible_routes<'a>(role: Role, routes: &'a [RouteDescriptor]) -> Vec<&'a RouteDescriptor> {
    let allowed = capabilities(role);
    routes
        .iter()
        .filter(|route| route.navigable && allowed.contains(&route.id))
        .collect()
}

pub fn is_reachable(role: Role, route: RouteId) -> bool {
    descriptor(route).layout == Layout::Auth || capabilities(role).contains(&route)
}

/// Where to go right after logging in
pub fn landing_route(role: Role) -> Option<RouteId> {
    match role {
        Role::Admin => Some(RouteId::UserAccounts),
        Role::MiddleAdmin => Some(RouteId::Clients),
        Role::User => Some(RouteId::MainDashboard),
        Role::Unassigned => None,
    }
}

/// Parameters captured from `:name` segments of a route path
pub type RouteParams = BTreeMap<String, String>;

/// Matches a concrete path like `/auth/reset-password/abc` against the route
/// table
pub fn resolve_path(path: &str) -> Option<(RouteId, RouteParams)> {
    let path = path.split(['?', '#']).next().unwrap_or_default();
    ROUTES
        .iter()
        .find_map(|route| match_path(route.path, path).map(|params| (route.id, params)))
}

fn match_path(pattern: &str, path: &str) -> Option<RouteParams> {
    let mut pattern_segments = segments(pattern);
    let mut path_segments = segments(path);
    let mut params = RouteParams::new();
    loop {
        match (pattern_segments.next(), path_segments.next()) {
            (None, None) => return Some(params),
            (Some(expected), Some(actual)) => {
                if let Some(name) = expected.strip_prefix(':') {
                    params.insert(name.to_string(), actual.to_string());
                } else if expected != actual {
                    return None;
                }
            }
            _ => return None,
        }
    }
}

fn segments(path: &str) -> impl Iterator<Item = &str> {
    path.split('/').filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use rstest::rstest;
    use strum::IntoEnumIterator;

    use super::*;

    fn visible_ids(role: Role) -> Vec<RouteId> {
        visible_routes(role, &ROUTES).iter().map(|r| r.id).collect()
    }

    #[rstest]
    #[case::admin(
        Role::Admin,
        vec![
            RouteId::UserAccounts,
            RouteId::BulkCreateUsers,
            RouteId::BulkResetPasswords,
            RouteId::CreateMiddleAdmins
        ]
    )]
    #[case::middle_admin(Role::MiddleAdmin, vec![RouteId::Clients, RouteId::ClientDashboard])]
    #[case::user(Role::User, vec![RouteId::MainDashboard, RouteId::DeviceReadings])]
    #[case::unassigned(Role::Unassigned, vec![])]
    fn menu_per_role(#[case] role: Role, #[case] expected: Vec<RouteId>) {
        assert_eq!(visible_ids(role), expected);
    }

    #[test]
    fn visible_routes_is_pure() {
        for role in Role::iter() {
            assert_eq!(visible_ids(role), visible_ids(role));
        }
    }

    #[test]
    fn every_route_has_a_descriptor() {
        for id in RouteId::iter() {
            assert_eq!(descriptor(id).id, id);
        }
    }

    #[test]
    fn landing_route_is_reachable() {
        for role in Role::iter() {
            match landing_route(role) {
                Some(route) => assert!(is_reachable(role, route)),
                None => assert_eq!(role, Role::Unassigned),
            }
        }
    }

    #[rstest]
    #[case::sign_in_for_anyone(Role::Unassigned, RouteId::SignIn, true)]
    #[case::reset_for_anyone(Role::Unassigned, RouteId::ResetPassword, true)]
    #[case::change_password_needs_login(Role::Unassigned, RouteId::ChangePassword, false)]
    #[case::admin_change_password(Role::Admin, RouteId::ChangePassword, true)]
    #[case::user_cannot_see_accounts(Role::User, RouteId::UserAccounts, false)]
    #[case::middle_admin_cannot_see_user_dashboard(Role::MiddleAdmin, RouteId::MainDashboard, false)]
    fn reachability(#[case] role: Role, #[case] route: RouteId, #[case] expected: bool) {
        assert_eq!(is_reachable(role, route), expected);
    }

    #[test]
    fn resolve_captures_params() {
        // Act
        let (id, params) = resolve_path("/auth/reset-password/abc123?x=1").unwrap();

        // Assert
        assert_eq!(id, RouteId::ResetPassword);
        assert_eq!(params.get("resetToken").map(String::as_str), Some("abc123"));
    }

    #[rstest]
    #[case::trailing_slash("/admin/default/", Some(RouteId::MainDashboard))]
    #[case::unknown("/admin/unknown", None)]
    #[case::missing_param("/auth/reset-password", None)]
    #[case::extra_segment("/admin/default/extra", None)]
    #[case::forgot_password("/auth/forgot-password", Some(RouteId::ForgotPassword))]
    #[case::old_forgot_spelling("/auth/forget-password", None)]
    #[case::device_readings("/admin/list-user-imei", Some(RouteId::DeviceReadings))]
    #[case::client_dashboard("/admin/Client-dashboard", Some(RouteId::ClientDashboard))]
    fn resolve_paths(#[case] path: &str, #[case] expected: Option<RouteId>) {
        assert_eq!(resolve_path(path).map(|(id, _)| id), expected);
    }
}
