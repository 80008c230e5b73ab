use std::ops::ControlFlow;

use bodytrace_client_core::Client;
use bodytrace_shared::{
    pagination::{Page, PageRequest},
    routes::RouteId,
    uac::User,
};
use edit_user_info::EditUserInfo;
use egui::Button;
use egui_extras::{Column, TableBuilder};
use new_user_info::NewUserInfo;

use super::{
    data_state::{DataSlot, DataState},
    list_query::ListQuery,
    DisplayablePage,
};
use crate::{
    app::wake_fn,
    displayable_page_common,
    ui_helpers::{
        is_secret_set, ui_error_label, ui_no_data, ui_pagination, ui_password_edit,
        ui_success_label,
    },
    DataShared,
};

mod edit_user_info;
mod new_user_info;

#[derive(Debug, Default, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct UiUserAccounts {
    is_open: bool,
    page_unique_number: usize,
    query: ListQuery,
    #[serde(skip)]
    should_refresh: bool,
    #[serde(skip)]
    last_saved: Option<String>,
    #[serde(skip)]
    users: DataSlot<Page<User>>,
    #[serde(skip)]
    user_op: UserOp,
}

#[derive(Debug, Default)]
enum UserOp {
    #[default]
    None,
    Selected(User),
    New(NewUserInfo),
    Edit(EditUserInfo),
}

#[must_use]
#[derive(Debug, PartialEq, Eq)]
enum OpResult {
    NoAction,
    /// The list changed on the server
    Saved(String),
    Cancel,
}

#[must_use]
enum SaveState {
    Completed(User),
    Ongoing,
    Failed(String),
}

/// Polls a save and reports where it is at. Returns None if no save was sent.
fn save_outcome(save_status: &mut DataSlot<User>, ui: &mut egui::Ui) -> Option<SaveState> {
    save_status.poll(None);
    match save_status.state() {
        DataState::None => None,
        DataState::AwaitingResponse(_) => {
            ui.ctx().request_repaint();
            Some(SaveState::Ongoing)
        }
        DataState::Present(user) => Some(SaveState::Completed(user.clone())),
        DataState::Failed(e) => Some(SaveState::Failed(format!("Save failed. {e}"))),
    }
}

impl UserOp {
    // Serves as a way to check if there are changes to be lost
    fn has_changes(&self) -> bool {
        match self {
            UserOp::None | UserOp::Selected(_) => false,
            UserOp::New(_) => true,
            UserOp::Edit(edit_user_info) => edit_user_info.has_changes(),
        }
    }

    fn selected_user(&self) -> Option<&User> {
        match self {
            UserOp::Selected(user) => Some(user),
            UserOp::Edit(edit_user_info) => Some(edit_user_info.original_user()),
            UserOp::None | UserOp::New(_) => None,
        }
    }
}

impl UiUserAccounts {
    fn ui_controls(&mut self, ui: &mut egui::Ui, request: PageRequest) {
        ui.horizontal_wrapped(|ui| {
            if ui.button("Refresh Page").clicked() {
                self.should_refresh = true;
            }
            if ui.button("Add New User").clicked() {
                self.user_op = UserOp::New(NewUserInfo::new());
                self.last_saved = None;
            }
            ui.separator();
            if self.query.ui(ui, "user accounts", request) {
                self.users.refresh();
            }
        });
    }
}

impl DisplayablePage for UiUserAccounts {
    displayable_page_common!(RouteId::UserAccounts);

    fn reset_to_default(&mut self, _: super::private::Token) {
        self.should_refresh = false;
        self.users.clear();
        self.user_op = Default::default();
        self.query.reset();
        self.last_saved = None;
    }

    fn show(&mut self, ui: &mut eframe::egui::Ui, data_shared: &mut DataShared) {
        if self.should_refresh {
            self.should_refresh = false;
            self.user_op = UserOp::None;
            self.users.refresh();
        }
        let request = self.query.request(data_shared.page_request);
        egui::TopBottomPanel::bottom(format!("user edit panel{}", self.page_unique_number))
            .show_inside(ui, |ui| {
                ui.vertical_centered(|ui| {
                    if let Some(msg) = self.last_saved.as_ref() {
                        ui_success_label(ui, msg.as_str());
                    }
                    match ui_show_user_op(ui, &data_shared.client, &mut self.user_op) {
                        OpResult::NoAction => {}
                        OpResult::Saved(msg) => {
                            self.last_saved = Some(msg);
                            self.should_refresh = true;
                        }
                        OpResult::Cancel => self.user_op = UserOp::None,
                    }
                });
            });

        egui::CentralPanel::default().show_inside(ui, |ui| {
            if self.user_op.has_changes() {
                // Reduce risk of accident data loss by changing user
                ui.disable();
            }
            self.ui_controls(ui, request);
            ui.separator();
            let args = self.query.args(request);
            let ctx = ui.ctx().clone();
            self.users.get(Some(ui), None, || {
                data_shared.client.list_users(args, wake_fn(ctx))
            });
            let Some(page) = self.users.present() else {
                return;
            };
            let last_page = page.last_page();
            egui::ScrollArea::horizontal()
                .show(ui, |ui| ui_show_user_list(ui, &page.data, &mut self.user_op));
            if let Some(new_request) = ui_pagination(ui, request, last_page) {
                self.query.set_request(new_request);
                self.users.refresh();
            }
        });
    }

    fn adjust_window_settings<'open>(&self, window: egui::Window<'open>) -> egui::Window<'open> {
        window.default_width(800.0).default_height(600.0)
    }
}

fn ui_show_user_op(ui: &mut egui::Ui, client_core: &Client, user_op: &mut UserOp) -> OpResult {
    match user_op {
        UserOp::None => {
            ui.label("[NO USER SELECTED]");
            OpResult::NoAction
        }
        UserOp::Selected(user) => {
            ui.label(format!("{} ({})", user.name, user.email));
            if ui.button("View / Edit User").clicked() {
                *user_op = UserOp::Edit(EditUserInfo::new(user.clone()));
            }
            OpResult::NoAction
        }
        UserOp::New(new_user_info) => ui_show_new_user(ui, client_core, new_user_info),
        UserOp::Edit(edit_user_info) => ui_show_edit_user(ui, client_core, edit_user_info),
    }
}

fn ui_show_new_user(
    ui: &mut egui::Ui,
    client_core: &Client,
    new_user_info: &mut NewUserInfo,
) -> OpResult {
    let outcome = new_user_info.save_outcome(ui);
    match poll_save_outcome(outcome, ui, "User created successfully.") {
        ControlFlow::Continue(()) => {} // Do nothing just continue
        ControlFlow::Break(action) => return action,
    }

    let mut has_errors = false;
    egui::Grid::new("New User Grid")
        .num_columns(2)
        .show(ui, |ui| {
            has_errors |= ui_required_text(ui, "Name", &mut new_user_info.name);
            ui.end_row();

            has_errors |= ui_required_text(ui, "Email", &mut new_user_info.email);
            ui.end_row();

            ui.label("Password");
            ui.horizontal(|ui| {
                ui_password_edit(ui, &mut new_user_info.password, "User's Password");
                if !is_secret_set(&new_user_info.password) {
                    has_errors = true;
                    ui_error_label(ui, "Required");
                }
            });
            ui.end_row();

            ui.label("IMEI");
            ui.add(
                egui::TextEdit::singleline(&mut new_user_info.imei)
                    .hint_text("Comma separated, optional"),
            );
            ui.end_row();
        });

    if ui
        .add_enabled(!has_errors, Button::new("Save New User"))
        .clicked()
    {
        new_user_info.save(ui, client_core);
    }

    if ui_cancel_button(ui) {
        return OpResult::Cancel;
    }

    OpResult::NoAction
}

fn ui_show_edit_user(
    ui: &mut egui::Ui,
    client_core: &Client,
    edit_user_info: &mut EditUserInfo,
) -> OpResult {
    let outcome = edit_user_info.save_outcome(ui);
    match poll_save_outcome(outcome, ui, "User updated successfully.") {
        ControlFlow::Continue(()) => {} // Do nothing just continue
        ControlFlow::Break(action) => return action,
    }

    let Some((loaded_user, edits)) = edit_user_info.loaded_and_edits(ui, client_core) else {
        // User still loading
        return OpResult::NoAction;
    };

    let mut has_errors = false;
    egui::Grid::new("Edit User Grid")
        .num_columns(2)
        .show(ui, |ui| {
            ui.label("ID");
            ui.label(loaded_user.id.to_string());
            ui.end_row();

            has_errors |= ui_required_text(ui, "Name", &mut edits.name);
            ui.end_row();

            has_errors |= ui_required_text(ui, "Email", &mut edits.email);
            ui.end_row();

            ui.label("IMEI");
            ui.add(egui::TextEdit::singleline(&mut edits.imei).hint_text("Comma separated"));
            ui.end_row();
        });

    ui.horizontal(|ui| {
        if ui
            .add_enabled(
                edit_user_info.has_changes() && !has_errors,
                Button::new("Save"),
            )
            .clicked()
        {
            edit_user_info.save(ui, client_core);
        }
        if ui.button("Reload User").clicked() {
            edit_user_info.reload();
        }
    });

    if ui_cancel_button(ui) {
        return OpResult::Cancel;
    }

    OpResult::NoAction
}

fn poll_save_outcome(
    outcome: Option<SaveState>,
    ui: &mut egui::Ui,
    success_msg: &str,
) -> ControlFlow<OpResult> {
    if let Some(save_status) = outcome {
        // Save in progress
        match save_status {
            SaveState::Completed(user) => {
                return ControlFlow::Break(OpResult::Saved(format!(
                    "{success_msg} ({})",
                    user.email
                )))
            }
            SaveState::Ongoing => {
                ui.horizontal(|ui| {
                    ui.spinner();
                    ui.spacing();
                    ui.label("Saving...");
                });
            }
            SaveState::Failed(e) => {
                ui_error_label(ui, e);
                if ui.button("Clear Error").clicked() {
                    return ControlFlow::Break(OpResult::Cancel);
                }
            }
        }
        ControlFlow::Break(OpResult::NoAction)
    } else {
        ControlFlow::Continue(())
    }
}

/// Returns `true` if the field is blank
fn ui_required_text(ui: &mut egui::Ui, label: &str, value: &mut String) -> bool {
    ui.label(label);
    let is_blank = value.trim().is_empty();
    ui.horizontal(|ui| {
        ui.text_edit_singleline(value);
        if is_blank {
            ui_error_label(ui, "Required");
        }
    });
    is_blank
}

fn ui_cancel_button(ui: &mut egui::Ui) -> bool {
    ui.button("Cancel").clicked() || ui.input(|i| i.key_pressed(egui::Key::Escape))
}

fn ui_show_user_list(ui: &mut egui::Ui, users: &[User], user_op: &mut UserOp) {
    if users.is_empty() {
        ui_no_data(ui);
        return;
    }
    let text_height = egui::TextStyle::Body
        .resolve(ui.style())
        .size
        .max(ui.spacing().interact_size.y);
    let selected_id = user_op.selected_user().map(|user| user.id.clone());

    TableBuilder::new(ui)
        .striped(true)
        .resizable(true)
        .cell_layout(egui::Layout::left_to_right(egui::Align::Center))
        .column(Column::auto())
        .column(Column::auto())
        .column(Column::remainder())
        .sense(egui::Sense::click())
        .header(20.0, |mut header| {
            header.col(|ui| {
                ui.strong("Name");
            });
            header.col(|ui| {
                ui.strong("Email");
            });
            header.col(|ui| {
                ui.strong("IMEI");
            });
        })
        .body(|body| {
            body.rows(text_height, users.len(), |mut row| {
                let user = &users[row.index()];
                row.set_selected(selected_id.as_ref() == Some(&user.id));
                row.col(|ui| {
                    ui.label(user.name.as_str());
                });
                row.col(|ui| {
                    ui.label(user.email.as_str());
                });
                row.col(|ui| {
                    ui.label(user.imei.joined());
                });
                if row.response().clicked() {
                    *user_op = UserOp::Selected(user.clone());
                }
            });
        });
}
