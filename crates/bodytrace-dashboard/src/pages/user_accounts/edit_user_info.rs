use anyhow::Context as _;
use bodytrace_client_core::Client;
use bodytrace_shared::{imei::Imei, req_args::api::user::EditUserReqArgs, uac::User};

use super::{save_outcome, SaveState};
use crate::{app::wake_fn, pages::data_state::DataSlot};

/// Fields of a user as typed into the edit form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserEdits {
    pub name: String,
    pub email: String,
    /// Comma separated
    pub imei: String,
}

impl From<&User> for UserEdits {
    fn from(user: &User) -> Self {
        Self {
            name: user.name.clone(),
            email: user.email.clone(),
            imei: user.imei.joined(),
        }
    }
}

#[derive(Debug)]
pub struct EditUserInfo {
    original_user: User,
    /// Latest copy from the server, the form starts from this
    loaded_user: DataSlot<User>,
    edits: Option<UserEdits>,
    save_status: DataSlot<User>,
    save_error: Option<String>,
}

impl EditUserInfo {
    pub fn new(original_user: User) -> Self {
        Self {
            original_user,
            loaded_user: Default::default(),
            edits: None,
            save_status: Default::default(),
            save_error: None,
        }
    }

    pub fn original_user(&self) -> &User {
        &self.original_user
    }

    /// Returns if the form differs from the loaded user
    pub fn has_changes(&self) -> bool {
        match (self.loaded_user.present(), self.edits.as_ref()) {
            (Some(loaded), Some(edits)) => &UserEdits::from(loaded) != edits,
            _ => false,
        }
    }

    /// Loads the user on first call and polls on later calls. Returns the
    /// loaded user and the form once available.
    pub fn loaded_and_edits(
        &mut self,
        ui: &mut egui::Ui,
        client_core: &Client,
    ) -> Option<(&User, &mut UserEdits)> {
        let id = self.original_user.id.clone();
        let ctx = ui.ctx().clone();
        self.loaded_user.get(Some(ui), Some("Reload User"), || {
            client_core.get_user(id, wake_fn(ctx))
        });
        let loaded = self.loaded_user.present()?;
        let edits = self.edits.get_or_insert_with(|| UserEdits::from(loaded));
        Some((loaded, edits))
    }

    /// Discards the form so it is filled from the server again
    pub fn reload(&mut self) {
        self.loaded_user.clear();
        self.edits = None;
    }

    /// Sends the edits to the server
    ///
    /// NOTE: Expects to only be called if there are changes
    pub fn save(&mut self, ui: &egui::Ui, client_core: &Client) {
        match self.try_into_req_args() {
            Ok(req_args) => {
                let rx = client_core.edit_user(req_args, wake_fn(ui.ctx().clone()));
                self.save_status.send(rx);
            }
            Err(e) => self.save_error = Some(format!("{e:#}")),
        }
    }

    fn try_into_req_args(&self) -> anyhow::Result<EditUserReqArgs> {
        let edits = self.edits.as_ref().context("user not loaded")?;
        Ok(EditUserReqArgs {
            id: self.original_user.id.clone(),
            name: edits.name.trim().to_string(),
            email: edits.email.trim().to_string(),
            imei: Imei::parse_list(&edits.imei).context("invalid IMEI")?,
        })
    }

    /// Returns None if no save is ongoing
    pub fn save_outcome(&mut self, ui: &mut egui::Ui) -> Option<SaveState> {
        if let Some(e) = self.save_error.as_ref() {
            return Some(SaveState::Failed(format!("Save failed. {e}")));
        }
        save_outcome(&mut self.save_status, ui)
    }
}

#[cfg(test)]
mod tests {
    use bodytrace_shared::imei::ImeiSelection;

    use super::*;

    fn user() -> User {
        User {
            id: "u1".try_into().unwrap(),
            name: "Ann".to_string(),
            email: "ann@clinic.com".to_string(),
            imei: ImeiSelection::Many(vec![
                Imei::parse("111").unwrap(),
                Imei::parse("222").unwrap(),
            ]),
        }
    }

    #[test]
    fn form_prefilled_from_user() {
        let actual = UserEdits::from(&user());
        assert_eq!(actual.imei, "111, 222");
        assert_eq!(actual.name, "Ann");
    }

    #[test]
    fn edits_become_request_for_same_id() {
        // Arrange
        let mut info = EditUserInfo::new(user());
        let mut edits = UserEdits::from(&user());
        edits.name = "Anne ".to_string();
        edits.imei = "333".to_string();
        info.edits = Some(edits);

        // Act
        let actual = info.try_into_req_args().unwrap();

        // Assert
        assert_eq!(actual.id.as_ref(), "u1");
        assert_eq!(actual.name, "Anne");
        assert_eq!(actual.imei, vec![Imei::parse("333").unwrap()]);
    }

    #[test]
    fn nothing_to_save_before_load() {
        let info = EditUserInfo::new(user());
        assert!(!info.has_changes());
        assert!(info.try_into_req_args().is_err());
    }
}
