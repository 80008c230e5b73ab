use std::sync::Arc;

use bodytrace_client_core::{Client, UiCallBack};
use bodytrace_shared::{
    imei::Imei,
    pagination::PageRequest,
    routes::{is_reachable, landing_route, resolve_path, visible_routes, RouteId, ROUTES},
    session::Session,
    uac::Role,
};
use bodytrace_time::Timestamp;
use egui::ScrollArea;
use tracing::{info, instrument, warn};

use crate::pages::{AuthPage, UiPage};
use crate::StartupSettings;

/// We derive Deserialize/Serialize so we can persist app state on shutdown.
#[derive(Debug, Default, serde::Deserialize, serde::Serialize)]
#[serde(default)] // if we add new fields, give them default values when deserializing old state
pub struct DashboardApp {
    #[serde(skip)]
    auth_page: Option<AuthPage>,
    data_shared: DataShared,
    active_pages: Vec<UiPage>,
}

#[derive(Debug, Default, serde::Deserialize, serde::Serialize)]
#[serde(default)]
pub struct DataShared {
    /// Prefilled on the sign in screen
    pub email: String,

    #[serde(skip)]
    pub client: Client,
    /// Starting page and page size for paginated lists
    #[serde(skip)]
    pub page_request: PageRequest,
    #[cfg(not(target_arch = "wasm32"))]
    #[serde(skip)]
    pub export_folder: std::path::PathBuf,
    /// Device picked on the clients page for the client dashboard
    #[serde(skip)]
    pub selected_client_imei: Option<Imei>,
    #[serde(skip)]
    open_requests: Vec<RouteId>,
}

impl DataShared {
    fn new(settings: &StartupSettings) -> Self {
        Self {
            email: String::new(),
            client: Client::new(&settings.server_address, settings.session_store()),
            page_request: settings.page_request(),
            #[cfg(not(target_arch = "wasm32"))]
            export_folder: settings.export_folder.clone(),
            selected_client_imei: None,
            open_requests: Vec::new(),
        }
    }

    /// Snapshot of the current session
    pub fn session(&self) -> Arc<Session> {
        self.client.session()
    }

    pub fn role(&self) -> Role {
        self.session().role()
    }

    pub fn is_logged_in(&self) -> bool {
        self.client.is_logged_in()
    }

    /// Queues the landing page for the role of the new session
    #[instrument(skip(self))]
    pub(crate) fn mark_login_complete(&mut self) {
        let session = self.session();
        self.email = session.email().to_string();
        match landing_route(session.role()) {
            Some(route_id) => self.request_open(route_id),
            None => warn!("no landing page for {:?}", session.role()),
        }
    }

    /// The page is opened at the start of the next frame
    pub fn request_open(&mut self, route_id: RouteId) {
        self.open_requests.push(route_id);
    }

    pub fn open_client_dashboard(&mut self, imei: Imei) {
        self.selected_client_imei = Some(imei);
        self.request_open(RouteId::ClientDashboard);
    }

    fn take_open_requests(&mut self) -> Vec<RouteId> {
        std::mem::take(&mut self.open_requests)
    }
}

impl eframe::App for DashboardApp {
    /// Called by the frame work to save state before shutdown.
    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        info!("Saving with key: {}", eframe::APP_KEY);
        eframe::set_value(storage, eframe::APP_KEY, self);
    }

    /// Called each time the UI needs repainting, which may be many times per
    /// second. Put your widgets into a `SidePanel`, `TopPanel`,
    /// `CentralPanel`, `Window` or `Area`.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.top_panel(ctx);
        self.bottom_panel(ctx);
        self.show_pages(ctx);

        // Request repaint after 1 second
        ctx.request_repaint_after(std::time::Duration::from_secs(1));
    }
}

impl DashboardApp {
    /// Called once before the first frame.
    pub fn new(cc: &eframe::CreationContext<'_>, settings: StartupSettings) -> Self {
        // Load previous app state (if any).
        // Note that you must enable the `persistence` feature for this to work.
        let mut result: Self = if let Some(storage) = cc.storage {
            info!("Storage found. Loading...");
            match eframe::get_value(storage, eframe::APP_KEY) {
                Some(value) => {
                    info!("Loaded succeeded");
                    value
                }
                None => {
                    warn!("Load failed");
                    Default::default()
                }
            }
        } else {
            info!("No storage found");
            Default::default()
        };
        result.start(settings);
        result
    }

    /// Connects the restored state to the server and session from `settings`
    #[instrument(skip(self))]
    fn start(&mut self, settings: StartupSettings) {
        let email = std::mem::take(&mut self.data_shared.email);
        self.data_shared = DataShared {
            email,
            ..DataShared::new(&settings)
        };
        if self.data_shared.is_logged_in() && self.active_pages.is_empty() {
            self.data_shared.mark_login_complete();
        }
        if let Some(path) = settings.open_path.as_deref() {
            self.open_path(path);
        }
    }

    /// Deep link to a route by its path
    #[instrument(skip(self))]
    fn open_path(&mut self, path: &str) {
        let Some((route_id, params)) = resolve_path(path) else {
            warn!("no screen matches path");
            return;
        };
        match AuthPage::for_route(route_id, &params) {
            Some(auth_page) => self.auth_page = Some(auth_page),
            None => self.data_shared.request_open(route_id),
        }
    }

    fn is_logged_in(&self) -> bool {
        self.data_shared.is_logged_in()
    }

    fn menu(&mut self, ui: &mut egui::Ui, ctx: &egui::Context) {
        ui.style_mut().wrap_mode = Some(egui::TextWrapMode::Extend);
        self.ui_menu_file(ui, ctx);
        self.ui_menu_pages(ui);
    }

    fn ui_menu_pages(&mut self, ui: &mut egui::Ui) {
        let role = self.data_shared.role();
        ui.menu_button("Pages", |ui| {
            for route in visible_routes(role, &ROUTES) {
                if ui.button(route.name).clicked() {
                    self.add_page(route.id);
                    ui.close_menu();
                }
            }

            ui.separator();
            if ui.button("Open All Pages").clicked() {
                self.open_all_pages();
                ui.close_menu();
            }
            if ui.button("Close All Pages").clicked() {
                self.close_all_pages();
                ui.close_menu();
            }
            if ui.button("Deactivate All Pages").clicked() {
                self.deactivate_all_pages();
                ui.close_menu();
            }
            if ui.button("Organize Pages").clicked() {
                do_organize_pages(ui);
                ui.close_menu();
            }
        });
    }

    #[cfg_attr(target_arch = "wasm32", allow(unused_variables))]
    fn ui_menu_file(&mut self, ui: &mut egui::Ui, ctx: &egui::Context) {
        let role = self.data_shared.role();
        ui.menu_button("File", |ui| {
            if is_reachable(role, RouteId::ChangePassword) && ui.button("Change Password").clicked()
            {
                self.show_route(RouteId::ChangePassword);
                ui.close_menu();
            }

            // On the web the browser controls the zoom
            #[cfg(not(target_arch = "wasm32"))]
            {
                ui.separator();
                egui::gui_zoom::zoom_menu_buttons(ui);
                ui.weak(format!(
                    "Current zoom: {:.0}%",
                    100.0 * ui.ctx().zoom_factor()
                ))
                .on_hover_text("The UI zoom level, on top of the operating system's default value");
                ui.separator();
            }

            if ui.button("Logout").clicked() {
                self.logout();
                ui.close_menu();
            }

            #[cfg(not(target_arch = "wasm32"))] // no File->Quit on web pages!
            if ui.button("Quit").clicked() {
                ctx.send_viewport_cmd(egui::ViewportCommand::Close);
            }
        });
    }

    fn top_panel(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                egui::widgets::global_theme_preference_switch(ui);
                if self.is_logged_in() {
                    ui.separator();
                    self.menu(ui, ctx);
                }
            });
        });
    }

    fn bottom_panel(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("bottom_panel").show(ctx, |ui| {
            ui.with_layout(egui::Layout::right_to_left(egui::Align::BOTTOM), |ui| {
                ui.label(current_time());
                if self.is_logged_in() {
                    if ui.button("Logout").clicked() {
                        self.logout();
                    }
                    let session = self.data_shared.session();
                    ui.label(format!(
                        "Logged in as {} ({})",
                        session.name(),
                        session.role().display_name()
                    ));
                }
                egui::warn_if_debug_build(ui);
            });
        });
    }

    fn show_pages(&mut self, ctx: &egui::Context) {
        let is_logged_in = self.is_logged_in();
        let is_auth_link = self
            .auth_page
            .as_ref()
            .is_some_and(|page| page.route_id() != RouteId::SignIn);
        if !is_logged_in || is_auth_link {
            self.process_auth_requests();
            self.auth_page
                .get_or_insert_with(Default::default)
                .show(ctx, &mut self.data_shared);
        } else {
            self.auth_page = None; // Clear out sign in page once we are logged in
            self.process_open_requests();
            self.ui_active_pages_panel(ctx);
            for page in self.active_pages.iter_mut() {
                page.display_page(ctx, &mut self.data_shared);
            }
        }
    }

    /// Switches between the auth screens. Other routes wait for a login.
    fn process_auth_requests(&mut self) {
        let requests = self.data_shared.take_open_requests();
        let mut waiting = Vec::new();
        for route_id in requests {
            match AuthPage::for_route(route_id, &Default::default()) {
                Some(auth_page) => self.auth_page = Some(auth_page),
                None => waiting.push(route_id),
            }
        }
        self.data_shared.open_requests = waiting;
    }

    fn process_open_requests(&mut self) {
        let role = self.data_shared.role();
        self.active_pages.retain(|page| {
            let keep = page.is_reachable(role);
            if !keep {
                info!("Removing page {} not available to {role:?}", page.title());
            }
            keep
        });
        for route_id in self.data_shared.take_open_requests() {
            if AuthPage::for_route(route_id, &Default::default()).is_some() {
                continue; // Already logged in
            }
            self.show_route(route_id);
        }
    }

    fn logout(&mut self) {
        self.data_shared.client.logout();
        self.data_shared.selected_client_imei = None;
        self.data_shared.open_requests.clear();
        // Pages depend on the role so they are not kept for the next login
        self.active_pages.clear();
        self.auth_page = None;
    }

    /// Opens the existing page for the route or adds one
    #[instrument(skip(self))]
    fn show_route(&mut self, route_id: RouteId) {
        if let Some(page) = self
            .active_pages
            .iter_mut()
            .find(|page| page.route_id() == route_id)
        {
            page.open_page();
        } else {
            self.add_page(route_id);
        }
    }

    /// Adds another page for the route even if one already exists
    fn add_page(&mut self, route_id: RouteId) {
        let role = self.data_shared.role();
        if !is_reachable(role, route_id) {
            warn!(?route_id, ?role, "route not reachable");
            return;
        }
        let new_num = self
            .active_pages
            .iter()
            .filter(|page| page.route_id() == route_id)
            .map(|page| page.page_unique_number() + 1)
            .max()
            .unwrap_or_default();
        match UiPage::new_page_for_route(route_id, new_num) {
            Some(page) => self.active_pages.push(page),
            None => {
                bodytrace_shared::internal_error!(format!("no page defined for {route_id:?}"));
            }
        }
    }

    fn ui_active_pages_panel(&mut self, ctx: &egui::Context) {
        egui::SidePanel::right("side_panel")
            .resizable(false)
            .default_width(200.0)
            .show(ctx, |ui| {
                ui.vertical_centered(|ui| {
                    ui.heading("Active Pages");
                });

                ui.separator();

                self.ui_pages_list(ui);
            });
    }

    fn ui_pages_list(&mut self, ui: &mut egui::Ui) {
        ScrollArea::vertical().show(ui, |ui| {
            ui.with_layout(egui::Layout::top_down_justified(egui::Align::LEFT), |ui| {
                if self.active_pages.is_empty() {
                    ui.label("NO PAGES ARE ACTIVE.\nUse top menu to activate a page");
                }
                let mut to_deactivate = Vec::new();
                for (i, page) in self.active_pages.iter_mut().enumerate() {
                    let mut is_open = page.is_page_open();
                    ui.horizontal(|ui| {
                        let is_open_before = is_open;
                        if ui.button("x").clicked() {
                            to_deactivate.push(i); // Mark page for removal
                        }
                        if ui.toggle_value(&mut is_open, page.title()).middle_clicked() {
                            to_deactivate.push(i); // Mark page for removal
                        };
                        if is_open != is_open_before {
                            if is_open {
                                page.open_page();
                            } else {
                                page.close_page();
                            }
                        }
                    });
                }

                // Both pushes for one page are possible, removal needs unique sorted indices
                to_deactivate.sort_unstable();
                to_deactivate.dedup();
                while let Some(marked_index) = to_deactivate.pop() {
                    self.active_pages.remove(marked_index);
                }

                ui.separator();

                if ui.button("Open All Pages").clicked() {
                    self.open_all_pages();
                }
                if ui.button("Close All Pages").clicked() {
                    self.close_all_pages();
                }
                if ui.button("Sort Pages by Name").clicked() {
                    self.sort_pages_by_name();
                }
            });
        });
    }

    fn deactivate_all_pages(&mut self) {
        self.active_pages.clear();
    }

    fn close_all_pages(&mut self) {
        self.active_pages
            .iter_mut()
            .for_each(|page| page.close_page())
    }

    fn open_all_pages(&mut self) {
        self.active_pages
            .iter_mut()
            .for_each(|page| page.open_page())
    }

    fn sort_pages_by_name(&mut self) {
        self.active_pages.sort_by_key(|x| x.title());
    }
}

fn current_time() -> String {
    Timestamp::now().display_as_locale_datetime()
}

fn do_organize_pages(ui: &mut egui::Ui) {
    ui.ctx().memory_mut(|mem| mem.reset_areas());
}

#[inline]
pub fn wake_fn(ctx: egui::Context) -> impl UiCallBack {
    move || ctx.request_repaint()
}

#[cfg(test)]
mod tests {
    use bodytrace_client_core::SessionStore;
    use bodytrace_shared::{imei::ImeiSelection, uac::LoginIdentity};
    use rstest::rstest;

    use super::*;

    fn app_logged_in_as(role: Role) -> DashboardApp {
        let store = SessionStore::in_memory();
        store
            .set_session(LoginIdentity {
                name: "A".to_string(),
                email: "a@b.com".to_string(),
                imei: ImeiSelection::None,
                role,
            })
            .unwrap();
        let mut app = DashboardApp::default();
        app.data_shared.client = Client::new("http://localhost:8080", store);
        app.data_shared.mark_login_complete();
        app.process_open_requests();
        app
    }

    fn page_routes(app: &DashboardApp) -> Vec<RouteId> {
        app.active_pages.iter().map(|page| page.route_id()).collect()
    }

    #[rstest]
    #[case::admin(Role::Admin, RouteId::UserAccounts)]
    #[case::middle_admin(Role::MiddleAdmin, RouteId::Clients)]
    #[case::user(Role::User, RouteId::MainDashboard)]
    fn login_opens_landing_page(#[case] role: Role, #[case] expected: RouteId) {
        let app = app_logged_in_as(role);
        assert_eq!(page_routes(&app), vec![expected]);
    }

    #[test]
    fn unreachable_route_not_opened() {
        // Arrange
        let mut app = app_logged_in_as(Role::User);

        // Act
        app.add_page(RouteId::UserAccounts);

        // Assert
        assert_eq!(page_routes(&app), vec![RouteId::MainDashboard]);
    }

    #[test]
    fn show_route_reuses_page_and_add_page_duplicates() {
        // Arrange
        let mut app = app_logged_in_as(Role::MiddleAdmin);

        // Act
        app.show_route(RouteId::Clients);
        app.add_page(RouteId::Clients);

        // Assert
        assert_eq!(page_routes(&app), vec![RouteId::Clients, RouteId::Clients]);
        assert_eq!(app.active_pages[1].title(), "Clients (1)");
    }

    #[test]
    fn logout_clears_pages_and_session() {
        // Arrange
        let mut app = app_logged_in_as(Role::Admin);

        // Act
        app.logout();

        // Assert
        assert!(app.active_pages.is_empty());
        assert!(!app.is_logged_in());
        assert_eq!(app.data_shared.role(), Role::Unassigned);
    }

    #[test]
    fn reset_link_shows_reset_screen() {
        // Arrange
        let mut app = DashboardApp::default();

        // Act
        app.open_path("/auth/reset-password/tok123");

        // Assert
        assert_eq!(
            app.auth_page.as_ref().map(|page| page.route_id()),
            Some(RouteId::ResetPassword)
        );
    }

    #[test]
    fn admin_route_link_waits_for_login() {
        // Arrange
        let mut app = DashboardApp::default();

        // Act
        app.open_path("/admin/bulk-create-users");
        app.process_auth_requests();

        // Assert
        assert_eq!(app.data_shared.open_requests, vec![RouteId::BulkCreateUsers]);
        assert!(app.auth_page.is_none());
    }
}
