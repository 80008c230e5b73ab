use bodytrace_shared::{req_args::api::user::ResetPasswordReqArgs, routes::RouteId};
use secrecy::SecretString;

use super::data_state::{DataSlot, DataState};
use crate::{
    app::wake_fn,
    ui_helpers::{is_secret_set, ui_error_label, ui_password_edit, ui_success_label},
    DataShared,
};

/// Reached from the link in a password reset email
#[derive(Debug)]
pub struct UiResetPassword {
    reset_token: String,
    new_password: SecretString,
    confirm_password: SecretString,
    request: DataSlot<()>,
}

impl UiResetPassword {
    pub fn new(reset_token: String) -> Self {
        Self {
            reset_token,
            new_password: SecretString::from(""),
            confirm_password: SecretString::from(""),
            request: Default::default(),
        }
    }

    pub fn reset_token(&self) -> &str {
        &self.reset_token
    }

    fn is_ready_to_send(&self) -> bool {
        !self.reset_token.is_empty()
            && is_secret_set(&self.new_password)
            && is_secret_set(&self.confirm_password)
    }

    pub fn show(&mut self, ui: &mut egui::Ui, data_shared: &mut DataShared) {
        ui.heading("Reset Password");
        match self.request.state() {
            DataState::None => self.show_controls(ui, data_shared),
            DataState::AwaitingResponse(_) => self.request.poll(Some(ui)),
            DataState::Present(()) => {
                ui_success_label(ui, "Password Reset Successful");
                ui.label("You can now log in with your new password.");
            }
            DataState::Failed(e) => {
                ui_error_label(ui, e);
                if ui.button("Try Again").clicked() {
                    self.request.clear();
                }
            }
        }
        ui.separator();
        if ui.link("Back to sign in").clicked() {
            data_shared.request_open(RouteId::SignIn);
        }
    }

    fn show_controls(&mut self, ui: &mut egui::Ui, data_shared: &mut DataShared) {
        if self.reset_token.is_empty() {
            ui_error_label(
                ui,
                "This reset link is incomplete. Please use the link from the email.",
            );
            return;
        }
        let mut lost_focus =
            ui_password_edit(ui, &mut self.new_password, "New Password").lost_focus();
        lost_focus = ui_password_edit(ui, &mut self.confirm_password, "Confirm New Password")
            .lost_focus()
            || lost_focus;

        let is_ready_to_send = self.is_ready_to_send();
        let mut should_send =
            lost_focus && is_ready_to_send && ui.input(|i| i.key_pressed(egui::Key::Enter));
        if ui
            .add_enabled(is_ready_to_send, egui::Button::new("Reset Password"))
            .clicked()
        {
            should_send = true;
        }

        if should_send {
            let args = ResetPasswordReqArgs {
                reset_token: self.reset_token.clone(),
                new_password: self.new_password.clone(),
                confirm_password: self.confirm_password.clone(),
            };
            let rx = data_shared
                .client
                .reset_password(&args, wake_fn(ui.ctx().clone()));
            self.request.send(rx);
        }
    }
}

impl Default for UiResetPassword {
    fn default() -> Self {
        Self::new(String::new())
    }
}
