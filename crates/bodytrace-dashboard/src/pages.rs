use crate::DataShared;

pub mod bulk_upload;
pub mod change_password;
pub mod client_dashboard;
pub mod clients;
mod data_state;
pub mod device_readings;
mod filtered_readings;
mod list_query;
pub mod forgot_password;
pub mod login;
mod macros;
pub mod main_dashboard;
mod readings_view;
pub mod reset_password;
pub mod user_accounts;

mod private {
    /// Used to make some trait methods private
    pub struct Token;
}

use bodytrace_shared::{
    routes::{is_reachable, RouteId, RouteParams},
    uac::Role,
};
use bulk_upload::{UiBulkCreateUsers, UiBulkResetPasswords, UiCreateMiddleAdmins};
use change_password::UiChangePassword;
use client_dashboard::UiClientDashboard;
use clients::UiClients;
use device_readings::UiDeviceReadings;
use forgot_password::UiForgotPassword;
pub use login::UiLogin;
use main_dashboard::UiMainDashboard;
use reset_password::UiResetPassword;
use strum::{EnumIter, IntoEnumIterator};
use tracing::{info, warn};
use user_accounts::UiUserAccounts;

#[derive(Debug, serde::Serialize, serde::Deserialize, EnumIter)]
pub enum UiPage {
    ChangePassword(UiChangePassword),
    UserAccounts(UiUserAccounts),
    BulkCreateUsers(UiBulkCreateUsers),
    BulkResetPasswords(UiBulkResetPasswords),
    CreateMiddleAdmins(UiCreateMiddleAdmins),
    Clients(UiClients),
    ClientDashboard(UiClientDashboard),
    MainDashboard(UiMainDashboard),
    DeviceReadings(UiDeviceReadings),
}

/// Trait for types that can be treated as pages to display
///
/// It uses Default and serde Traits as super traits to ensure all these types
/// implement these traits
pub trait DisplayablePage: Default + serde::Serialize + serde::de::DeserializeOwned {
    /// Reset the state of the screen
    fn reset_to_default(&mut self, _: private::Token);

    /// Displays the page
    fn show(&mut self, ui: &mut eframe::egui::Ui, data_shared: &mut DataShared);

    /// The route this page is shown for
    fn route_id() -> RouteId;

    /// Base of the page's title (numbers get appended to duplicates)
    ///
    /// ASSUMPTION: THIS IS UNIQUE PER TYPE
    fn title_base() -> &'static str;

    /// Convenance function for working with instances inside of the enum
    fn title_base_from_instance(&self) -> &'static str {
        Self::title_base()
    }

    /// Page number to make title unique
    ///
    /// Assumed that the caller will ensure this number is unique across pages
    /// with the same base title
    fn page_unique_number(&self) -> usize;

    /// Creates a page with the unique number passed
    fn new_page(page_unique_number: usize) -> Self;

    /// Pages display title (includes page number if not first)
    fn title(&self) -> String {
        if self.page_unique_number() == 0 {
            Self::title_base().to_string()
        } else {
            format!("{} ({})", Self::title_base(), self.page_unique_number())
        }
    }

    fn is_page_open(&self) -> bool;

    fn open_page(&mut self) {
        info!("Open Page {}", self.title());
        self.internal_do_open_page(private::Token {});
    }

    fn close_page(&mut self) {
        info!("Close Page {}", self.title());
        self.internal_do_close_page(private::Token {});
    }

    fn internal_do_open_page(&mut self, _: private::Token);

    /// This usually clears any state loaded from the server
    fn internal_do_close_page(&mut self, _: private::Token);

    /// Convenance method for chaining
    #[must_use]
    fn and_open_page(mut self) -> Self {
        self.open_page();
        self
    }

    /// Provides an opportunity for the page to change settings on the window
    /// before display
    fn adjust_window_settings<'open>(&self, window: egui::Window<'open>) -> egui::Window<'open> {
        window.default_width(720.0)
    }
}

macro_rules! do_on_ui_page {
    ($on:ident, $page:ident, $body:tt) => {
        match $on {
            UiPage::ChangePassword($page) => $body,
            UiPage::UserAccounts($page) => $body,
            UiPage::BulkCreateUsers($page) => $body,
            UiPage::BulkResetPasswords($page) => $body,
            UiPage::CreateMiddleAdmins($page) => $body,
            UiPage::Clients($page) => $body,
            UiPage::ClientDashboard($page) => $body,
            UiPage::MainDashboard($page) => $body,
            UiPage::DeviceReadings($page) => $body,
        }
    };
}

/// Helper to avoid repeating the same expression for every page type
fn opened<T: DisplayablePage>(page_unique_number: usize) -> T {
    T::new_page(page_unique_number).and_open_page()
}

impl UiPage {
    /// `None` for routes that are not shown as a page window (the auth
    /// screens)
    #[tracing::instrument(ret)]
    pub fn new_page_for_route(route_id: RouteId, page_unique_number: usize) -> Option<UiPage> {
        let n = page_unique_number;
        Some(match route_id {
            RouteId::ChangePassword => Self::ChangePassword(opened(n)),
            RouteId::UserAccounts => Self::UserAccounts(opened(n)),
            RouteId::BulkCreateUsers => Self::BulkCreateUsers(opened(n)),
            RouteId::BulkResetPasswords => Self::BulkResetPasswords(opened(n)),
            RouteId::CreateMiddleAdmins => Self::CreateMiddleAdmins(opened(n)),
            RouteId::Clients => Self::Clients(opened(n)),
            RouteId::ClientDashboard => Self::ClientDashboard(opened(n)),
            RouteId::MainDashboard => Self::MainDashboard(opened(n)),
            RouteId::DeviceReadings => Self::DeviceReadings(opened(n)),
            RouteId::SignIn | RouteId::ForgotPassword | RouteId::ResetPassword => return None,
        })
    }

    pub fn display_page(&mut self, ctx: &egui::Context, data_shared: &mut DataShared) {
        do_on_ui_page!(self, page, { show_page(page, ctx, data_shared) })
    }

    pub fn route_id(&self) -> RouteId {
        do_on_ui_page!(self, page, { route_id_of(page) })
    }

    pub fn is_reachable(&self, role: Role) -> bool {
        is_reachable(role, self.route_id())
    }

    pub fn title_base(&self) -> &'static str {
        do_on_ui_page!(self, page, { page.title_base_from_instance() })
    }

    pub fn page_unique_number(&self) -> usize {
        do_on_ui_page!(self, page, { page.page_unique_number() })
    }

    pub fn is_page_open(&self) -> bool {
        do_on_ui_page!(self, page, { page.is_page_open() })
    }

    pub fn title(&self) -> String {
        do_on_ui_page!(self, page, { page.title() })
    }

    pub fn open_page(&mut self) {
        do_on_ui_page!(self, page, { page.open_page() })
    }

    pub fn close_page(&mut self) {
        do_on_ui_page!(self, page, { page.close_page() })
    }

    /// Every route that has a page window
    pub fn page_routes() -> Vec<RouteId> {
        Self::iter().map(|page| page.route_id()).collect()
    }
}

fn route_id_of<P: DisplayablePage>(_: &P) -> RouteId {
    P::route_id()
}

fn show_page<P: DisplayablePage>(page: &mut P, ctx: &egui::Context, data_shared: &mut DataShared) {
    let mut is_open = page.is_page_open();
    if !is_open {
        return;
    }
    let mut window = egui::Window::new(page.title()).vscroll(true).hscroll(true);
    window = page.adjust_window_settings(window);
    window
        .open(&mut is_open)
        .show(ctx, |ui| page.show(ui, data_shared));
    if !is_open {
        page.close_page();
    }
}

/// Screens used before logging in. Shown full window instead of as a page.
#[derive(Debug)]
pub enum AuthPage {
    SignIn(UiLogin),
    ForgotPassword(UiForgotPassword),
    ResetPassword(UiResetPassword),
}

impl Default for AuthPage {
    fn default() -> Self {
        Self::SignIn(Default::default())
    }
}

impl AuthPage {
    /// `None` if `route_id` is not an auth route
    pub fn for_route(route_id: RouteId, params: &RouteParams) -> Option<Self> {
        Some(match route_id {
            RouteId::SignIn => Self::SignIn(Default::default()),
            RouteId::ForgotPassword => Self::ForgotPassword(Default::default()),
            RouteId::ResetPassword => {
                let token = params.get("resetToken").cloned().unwrap_or_else(|| {
                    warn!("reset password opened without a token");
                    String::new()
                });
                Self::ResetPassword(UiResetPassword::new(token))
            }
            _ => return None,
        })
    }

    pub fn route_id(&self) -> RouteId {
        match self {
            AuthPage::SignIn(_) => RouteId::SignIn,
            AuthPage::ForgotPassword(_) => RouteId::ForgotPassword,
            AuthPage::ResetPassword(_) => RouteId::ResetPassword,
        }
    }

    pub fn show(&mut self, ctx: &egui::Context, data_shared: &mut DataShared) {
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.vertical_centered(|ui| match self {
                AuthPage::SignIn(page) => page.show(ui, data_shared),
                AuthPage::ForgotPassword(page) => page.show(ui, data_shared),
                AuthPage::ResetPassword(page) => page.show(ui, data_shared),
            });
        });
    }
}
