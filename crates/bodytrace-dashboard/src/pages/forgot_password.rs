use bodytrace_shared::{req_args::api::user::PasswordResetRequestReqArgs, routes::RouteId};

use super::data_state::{DataSlot, DataState};
use crate::{
    app::wake_fn,
    ui_helpers::{ui_error_label, ui_success_label},
    DataShared,
};

/// Asks the server to email a reset link
#[derive(Debug, Default)]
pub struct UiForgotPassword {
    request: DataSlot<()>,
}

impl UiForgotPassword {
    pub fn show(&mut self, ui: &mut egui::Ui, data_shared: &mut DataShared) {
        ui.heading("Forgot Password");
        ui.label("Enter the email of your account to receive a reset link");
        match self.request.state() {
            DataState::None => self.show_controls(ui, data_shared),
            DataState::AwaitingResponse(_) => self.request.poll(Some(ui)),
            DataState::Present(()) => {
                ui_success_label(ui, "Password reset email sent successfully.");
            }
            DataState::Failed(e) => {
                ui_error_label(ui, format!("Failed to send reset email: {e}"));
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
        let response = ui.add(egui::TextEdit::singleline(&mut data_shared.email).hint_text("Email"));
        let is_ready_to_send = !data_shared.email.trim().is_empty();
        let entered = response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
        if ui
            .add_enabled(is_ready_to_send, egui::Button::new("Send Reset Link"))
            .clicked()
            || (entered && is_ready_to_send)
        {
            let args = PasswordResetRequestReqArgs {
                email: data_shared.email.trim().to_string(),
            };
            let rx = data_shared
                .client
                .request_password_reset(args, wake_fn(ui.ctx().clone()));
            self.request.send(rx);
        }
    }
}
