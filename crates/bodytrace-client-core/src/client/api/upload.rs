use bodytrace_shared::{
    const_config::{
        download::{
            DOWNLOAD_DEFAULT_CREATED_USERS, DOWNLOAD_DEFAULT_MIDDLE_ADMINS,
            DOWNLOAD_DEFAULT_RESET_PASSWORDS, DOWNLOAD_UPLOAD_FIELD_NAME, DOWNLOAD_XLSX_MIME,
        },
        path::{
            PathSpec, PATH_API_MIDDLE_ADMINS_FROM_EXCEL, PATH_API_PASSWORDS_FROM_EXCEL,
            PATH_API_USERS_FROM_EXCEL,
        },
    },
    errors::ValidationError,
};
use futures::channel::oneshot;
use reqwest::multipart::{Form, Part};

use crate::{
    client::{reject, UiCallBack},
    Client, Download,
};

const SPREADSHEET_EXTENSIONS: [&str; 2] = ["xlsx", "xls"];

/// A spreadsheet picked (or dropped) by the user
#[derive(Clone, PartialEq, Eq)]
pub struct FileUpload {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl std::fmt::Debug for FileUpload {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileUpload")
            .field("file_name", &self.file_name)
            .field("len", &self.bytes.len())
            .finish()
    }
}

impl FileUpload {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.bytes.is_empty() {
            return Err(ValidationError::MissingField("file"));
        }
        let is_spreadsheet = self
            .file_name
            .rsplit_once('.')
            .is_some_and(|(_, ext)| {
                SPREADSHEET_EXTENSIONS
                    .iter()
                    .any(|expected| ext.eq_ignore_ascii_case(expected))
            });
        if is_spreadsheet {
            Ok(())
        } else {
            Err(ValidationError::NotASpreadsheet(self.file_name.clone()))
        }
    }

    fn into_form(self) -> anyhow::Result<Form> {
        let part = Part::bytes(self.bytes)
            .file_name(self.file_name)
            .mime_str(DOWNLOAD_XLSX_MIME)?;
        Ok(Form::new().part(DOWNLOAD_UPLOAD_FIELD_NAME, part))
    }
}

impl Client {
    /// Returns the spreadsheet the backend generates with the results
    #[tracing::instrument(skip(ui_notify))]
    pub fn create_users_from_excel<F: UiCallBack>(
        &self,
        file: FileUpload,
        ui_notify: F,
    ) -> oneshot::Receiver<anyhow::Result<Download>> {
        self.upload_spreadsheet(
            PATH_API_USERS_FROM_EXCEL,
            file,
            DOWNLOAD_DEFAULT_CREATED_USERS,
            ui_notify,
        )
    }

    #[tracing::instrument(skip(ui_notify))]
    pub fn reset_passwords_from_excel<F: UiCallBack>(
        &self,
        file: FileUpload,
        ui_notify: F,
    ) -> oneshot::Receiver<anyhow::Result<Download>> {
        self.upload_spreadsheet(
            PATH_API_PASSWORDS_FROM_EXCEL,
            file,
            DOWNLOAD_DEFAULT_RESET_PASSWORDS,
            ui_notify,
        )
    }

    #[tracing::instrument(skip(ui_notify))]
    pub fn create_middle_admins_from_excel<F: UiCallBack>(
        &self,
        file: FileUpload,
        ui_notify: F,
    ) -> oneshot::Receiver<anyhow::Result<Download>> {
        self.upload_spreadsheet(
            PATH_API_MIDDLE_ADMINS_FROM_EXCEL,
            file,
            DOWNLOAD_DEFAULT_MIDDLE_ADMINS,
            ui_notify,
        )
    }

    fn upload_spreadsheet<F: UiCallBack>(
        &self,
        path_spec: PathSpec,
        file: FileUpload,
        default_file_name: &'static str,
        ui_notify: F,
    ) -> oneshot::Receiver<anyhow::Result<Download>> {
        if let Err(e) = file.validate() {
            return reject(e, path_spec.action, ui_notify);
        }
        let form = match file.into_form() {
            Ok(form) => form,
            Err(e) => return reject(e, path_spec.action, ui_notify),
        };
        self.send_multipart_expect_download(path_spec, form, default_file_name, ui_notify)
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case::xlsx("users.xlsx", true)]
    #[case::xls_upper("USERS.XLS", true)]
    #[case::csv("users.csv", false)]
    #[case::no_extension("users", false)]
    fn spreadsheet_extension(#[case] file_name: &str, #[case] expected_ok: bool) {
        let upload = FileUpload {
            file_name: file_name.to_string(),
            bytes: vec![1],
        };
        assert_eq!(upload.validate().is_ok(), expected_ok);
    }

    #[test]
    fn empty_file_rejected() {
        let upload = FileUpload {
            file_name: "users.xlsx".to_string(),
            bytes: vec![],
        };
        assert_eq!(upload.validate(), Err(ValidationError::MissingField("file")));
    }
}
