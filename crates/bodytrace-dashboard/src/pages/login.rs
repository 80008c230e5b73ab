use std::{fmt::Debug, sync::Arc};

use bodytrace_shared::{req_args::LoginReqArgs, routes::RouteId, session::Session, uac::Role};
use futures::channel::oneshot;
use secrecy::SecretString;
use tracing::{error, info};

use crate::{
    app::wake_fn,
    ui_helpers::{is_secret_set, ui_error_label, ui_password_edit},
    DataShared,
};

#[derive(Debug)]
pub struct UiLogin {
    password: SecretString,
    login_type: Role,
    login_attempt_status: LoginAttemptStatus,
}

type AwaitingType = oneshot::Receiver<anyhow::Result<Arc<Session>>>;

#[derive(Default)]
enum LoginAttemptStatus {
    #[default]
    NotAttempted,
    AwaitingResponse(AwaitingType),
    Failed(String),
    Success,
}

impl Debug for LoginAttemptStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotAttempted => write!(f, "NotAttempted"),
            Self::AwaitingResponse(_) => write!(f, "AwaitingResponse"),
            Self::Failed(e) => f.debug_tuple("Failed").field(e).finish(),
            Self::Success => write!(f, "Success"),
        }
    }
}

impl LoginAttemptStatus {
    fn is_allowed_to_login(&self) -> bool {
        match self {
            LoginAttemptStatus::NotAttempted | LoginAttemptStatus::Failed(_) => true,
            LoginAttemptStatus::AwaitingResponse(_) | LoginAttemptStatus::Success => false,
        }
    }
}

impl UiLogin {
    fn login_prompt(&mut self, ui: &mut egui::Ui, data_shared: &mut DataShared) {
        let email_widget = egui::TextEdit::singleline(&mut data_shared.email).hint_text("Email");
        let mut lost_focus = ui.add(email_widget).lost_focus();

        lost_focus =
            ui_password_edit(ui, &mut self.password, "Password").lost_focus() || lost_focus;

        ui.horizontal(|ui| {
            ui.label("Login as");
            egui::ComboBox::from_id_salt("login type")
                .selected_text(self.login_type.display_name())
                .show_ui(ui, |ui| {
                    for role in Role::login_types() {
                        ui.selectable_value(&mut self.login_type, role, role.display_name());
                    }
                });
        });

        if lost_focus
            && is_allowed_to_login(self, &data_shared.email)
            && ui.input(|i| i.key_pressed(egui::Key::Enter))
        {
            self.send_login_attempt(ui, data_shared)
        }
    }

    fn check_login_attempt_status(&mut self, ui: &mut egui::Ui, data_shared: &mut DataShared) {
        match &mut self.login_attempt_status {
            LoginAttemptStatus::NotAttempted => {
                // No special UI needed
            }
            LoginAttemptStatus::Success => {
                // App switches to the pages once the session is set
                ui.spinner();
            }
            LoginAttemptStatus::AwaitingResponse(rx) => match rx.try_recv() {
                Ok(Some(Ok(session))) => {
                    info!(role = ?session.role(), "login succeeded");
                    self.login_attempt_status = LoginAttemptStatus::Success;
                    data_shared.mark_login_complete();
                    ui.ctx().request_repaint(); // Repaint with new value
                }
                Ok(Some(Err(e))) => {
                    info!("error returned from client-core: {e:?}");
                    self.login_attempt_status = LoginAttemptStatus::Failed(format!("{e:#}"));
                }
                Ok(None) => {
                    ui.spinner();
                }
                Err(e) => {
                    error!("Error receiving on channel. Canceled: {e:?}");
                    self.login_attempt_status =
                        LoginAttemptStatus::Failed(format!("Internal error: {e}"));
                }
            },
            LoginAttemptStatus::Failed(e) => {
                let err_msg = format!("Login attempt failed: {e}");
                ui.separator();
                ui_error_label(ui, err_msg);
                if ui.button("Clear error status").clicked() {
                    self.login_attempt_status = LoginAttemptStatus::NotAttempted;
                }
                ui.separator();
            }
        }
    }

    pub fn show(&mut self, ui: &mut egui::Ui, data_shared: &mut DataShared) {
        ui.heading("Sign In");

        self.login_prompt(ui, data_shared);

        self.check_login_attempt_status(ui, data_shared);

        self.login_button(ui, data_shared);

        if ui.link("Forgot password?").clicked() {
            data_shared.request_open(RouteId::ForgotPassword);
        }
    }

    fn login_button(&mut self, ui: &mut egui::Ui, data_shared: &mut DataShared) {
        if ui
            .add_enabled(
                is_allowed_to_login(self, &data_shared.email),
                egui::Button::new("Login"),
            )
            .clicked()
        {
            self.send_login_attempt(ui, data_shared);
        }
    }

    fn send_login_attempt(&mut self, ui: &mut egui::Ui, data_shared: &mut DataShared) {
        let args = LoginReqArgs::new(
            data_shared.email.clone(),
            self.password.clone(),
            self.login_type,
        );

        let rx = data_shared.client.login(args, wake_fn(ui.ctx().clone()));
        self.login_attempt_status = LoginAttemptStatus::AwaitingResponse(rx);
    }
}

impl Default for UiLogin {
    fn default() -> Self {
        Self {
            password: SecretString::from(""),
            login_type: Role::Admin,
            login_attempt_status: Default::default(),
        }
    }
}

fn is_allowed_to_login(data: &UiLogin, email: &str) -> bool {
    !email.trim().is_empty()
        && is_secret_set(&data.password)
        && data.login_type.is_assigned()
        && data.login_attempt_status.is_allowed_to_login()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn login_needs_email_and_password() {
        let mut page = UiLogin::default();
        assert!(!is_allowed_to_login(&page, "a@b.com"));

        page.password = SecretString::from("pw");
        assert!(!is_allowed_to_login(&page, "  "));
        assert!(is_allowed_to_login(&page, "a@b.com"));
    }

    #[test]
    fn no_second_attempt_while_waiting() {
        let (_tx, rx) = oneshot::channel();
        let page = UiLogin {
            password: SecretString::from("pw"),
            login_attempt_status: LoginAttemptStatus::AwaitingResponse(rx),
            ..Default::default()
        };
        assert!(!is_allowed_to_login(&page, "a@b.com"));
    }
}
