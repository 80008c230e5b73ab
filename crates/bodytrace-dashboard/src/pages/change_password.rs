use bodytrace_shared::{req_args::api::user::ChangePasswordReqArgs, routes::RouteId};
use egui::Button;
use secrecy::SecretString;

use super::{
    data_state::{DataSlot, DataState},
    DisplayablePage,
};
use crate::{
    app::wake_fn,
    displayable_page_common,
    ui_helpers::{is_secret_set, ui_error_label, ui_password_edit, ui_success_label},
    DataShared,
};

#[derive(Debug, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct UiChangePassword {
    is_open: bool,
    page_unique_number: usize,
    #[serde(skip)]
    request: DataSlot<()>,
    #[serde(skip)]
    old_password: SecretString,
    #[serde(skip)]
    new_password: SecretString,
    #[serde(skip)]
    confirm_password: SecretString,
}

impl UiChangePassword {
    fn is_ready_to_send(&self) -> bool {
        is_secret_set(&self.old_password)
            && is_secret_set(&self.new_password)
            && is_secret_set(&self.confirm_password)
    }

    fn clear_fields(&mut self) {
        self.old_password = SecretString::from("");
        self.new_password = SecretString::from("");
        self.confirm_password = SecretString::from("");
    }

    fn send_request(&mut self, ctx: egui::Context, data_shared: &mut DataShared) {
        let args = ChangePasswordReqArgs {
            email: data_shared.session().email().to_string(),
            old_password: self.old_password.clone(),
            new_password: self.new_password.clone(),
            confirm_password: self.confirm_password.clone(),
        };
        let rx = data_shared.client.change_password(&args, wake_fn(ctx));
        self.request.send(rx);
    }

    fn show_controls(&mut self, ui: &mut egui::Ui, data_shared: &mut DataShared) {
        let mut email = data_shared.session().email().to_string();
        ui.add_enabled(false, egui::TextEdit::singleline(&mut email));

        ui.spacing();
        let mut lost_focus =
            ui_password_edit(ui, &mut self.old_password, "Current Password").lost_focus();
        ui.spacing();
        lost_focus =
            ui_password_edit(ui, &mut self.new_password, "New Password").lost_focus() || lost_focus;
        ui.spacing();
        lost_focus = ui_password_edit(ui, &mut self.confirm_password, "Confirm New Password")
            .lost_focus()
            || lost_focus;

        let is_ready_to_send = self.is_ready_to_send();
        let mut should_send =
            lost_focus && is_ready_to_send && ui.input(|i| i.key_pressed(egui::Key::Enter));

        ui.spacing();
        if ui
            .add_enabled(is_ready_to_send, Button::new("Change Password"))
            .clicked()
        {
            should_send = true;
        }

        if should_send {
            self.send_request(ui.ctx().clone(), data_shared);
        }
    }
}

impl DisplayablePage for UiChangePassword {
    displayable_page_common!(RouteId::ChangePassword);

    fn reset_to_default(&mut self, _: super::private::Token) {
        self.request.clear();
        self.clear_fields();
    }

    fn show(&mut self, ui: &mut eframe::egui::Ui, data_shared: &mut DataShared) {
        ui.vertical_centered(|ui| match self.request.state() {
            DataState::None => self.show_controls(ui, data_shared),
            DataState::AwaitingResponse(_) => {
                self.request.poll(Some(ui));
                if self.request.present().is_some() {
                    self.clear_fields();
                }
            }
            DataState::Present(()) => {
                ui.spacing();
                ui_success_label(ui, "Your password has been successfully changed.");
                if ui.button("Done").clicked() {
                    self.request.clear();
                }
            }
            DataState::Failed(e) => {
                ui_error_label(ui, e);
                if ui.button("Try Again").clicked() {
                    self.request.clear();
                }
            }
        });
    }

    fn adjust_window_settings<'open>(&self, window: egui::Window<'open>) -> egui::Window<'open> {
        window.default_width(320.0)
    }
}

impl Default for UiChangePassword {
    fn default() -> Self {
        Self {
            is_open: Default::default(),
            page_unique_number: Default::default(),
            request: Default::default(),
            old_password: SecretString::from(""),
            new_password: SecretString::from(""),
            confirm_password: SecretString::from(""),
        }
    }
}
