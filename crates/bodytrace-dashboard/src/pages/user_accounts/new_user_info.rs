use anyhow::Context as _;
use bodytrace_client_core::Client;
use bodytrace_shared::{imei::Imei, req_args::api::user::NewUserReqArgs, uac::User};
use secrecy::SecretString;

use super::{save_outcome, SaveState};
use crate::pages::data_state::DataSlot;

#[derive(Debug)]
pub struct NewUserInfo {
    pub name: String,
    pub email: String,
    pub password: SecretString,
    /// Comma separated
    pub imei: String,
    save_status: DataSlot<User>,
    save_error: Option<String>,
}

impl NewUserInfo {
    pub fn new() -> Self {
        Self {
            name: Default::default(),
            email: Default::default(),
            password: "".to_string().into(),
            imei: Default::default(),
            save_status: Default::default(),
            save_error: None,
        }
    }

    /// Returns None if no save is ongoing
    pub fn save_outcome(&mut self, ui: &mut egui::Ui) -> Option<SaveState> {
        if let Some(e) = self.save_error.as_ref() {
            return Some(SaveState::Failed(format!("Save failed. {e}")));
        }
        save_outcome(&mut self.save_status, ui)
    }

    /// Sends the new user to the server
    pub fn save(&mut self, ui: &egui::Ui, client_core: &Client) {
        match self.try_into_req_args() {
            Ok(req_args) => {
                let rx = client_core.create_user(req_args, crate::app::wake_fn(ui.ctx().clone()));
                self.save_status.send(rx);
            }
            Err(e) => self.save_error = Some(format!("{e:#}")),
        }
    }

    pub fn try_into_req_args(&self) -> anyhow::Result<NewUserReqArgs> {
        let imei = Imei::parse_list(&self.imei).context("invalid IMEI")?;
        Ok(NewUserReqArgs {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            password: self.password.clone(),
            imei,
        })
    }
}
