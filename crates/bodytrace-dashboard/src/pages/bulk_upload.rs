//! Spreadsheet uploads that return a spreadsheet of results

use bodytrace_client_core::{Download, FileUpload};
use bodytrace_shared::routes::RouteId;
use tracing::{info, warn};

use super::{
    data_state::{DataSlot, DataState},
    DisplayablePage,
};
use crate::{
    app::wake_fn,
    displayable_page_common,
    ui_helpers::{save_download, ui_error_label, ui_success_label},
    DataShared,
};

const PROCESSED_MSG: &str = "Your file has been processed. You can now download the results.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum UploadKind {
    CreateUsers,
    ResetPasswords,
    CreateMiddleAdmins,
}

impl UploadKind {
    fn instructions(&self) -> &'static str {
        match self {
            UploadKind::CreateUsers => "Upload a spreadsheet of users to create.",
            UploadKind::ResetPasswords => "Upload a spreadsheet of users whose passwords to reset.",
            UploadKind::CreateMiddleAdmins => "Upload a spreadsheet of middle admins to create.",
        }
    }

    fn send(
        &self,
        data_shared: &DataShared,
        file: FileUpload,
        ctx: egui::Context,
    ) -> futures::channel::oneshot::Receiver<anyhow::Result<Download>> {
        let client = &data_shared.client;
        match self {
            UploadKind::CreateUsers => client.create_users_from_excel(file, wake_fn(ctx)),
            UploadKind::ResetPasswords => client.reset_passwords_from_excel(file, wake_fn(ctx)),
            UploadKind::CreateMiddleAdmins => {
                client.create_middle_admins_from_excel(file, wake_fn(ctx))
            }
        }
    }
}

#[derive(Debug, Default)]
struct BulkUpload {
    file: Option<FileUpload>,
    file_error: Option<String>,
    #[cfg(not(target_arch = "wasm32"))]
    path_text: String,
    result: DataSlot<Download>,
    /// The result file once processed, kept so it can be saved again
    processed: Option<Download>,
    save_outcome: Option<Result<String, String>>,
}

impl BulkUpload {
    fn clear(&mut self) {
        *self = Self::default();
    }

    fn set_file(&mut self, file: Result<FileUpload, String>) {
        self.result.clear();
        self.processed = None;
        self.save_outcome = None;
        match file {
            Ok(file) => {
                info!(?file, "spreadsheet chosen");
                self.file = Some(file);
                self.file_error = None;
            }
            Err(e) => {
                warn!(%e, "unable to use file");
                self.file = None;
                self.file_error = Some(e);
            }
        }
    }

    fn show(&mut self, ui: &mut egui::Ui, data_shared: &DataShared, kind: UploadKind) {
        ui.label(kind.instructions());
        ui.separator();
        self.ui_pick_file(ui);

        let can_upload = self.file.is_some() && !self.result.is_awaiting();
        if ui
            .add_enabled(can_upload, egui::Button::new("Upload"))
            .clicked()
        {
            if let Some(file) = self.file.clone() {
                self.processed = None;
                self.save_outcome = None;
                let rx = kind.send(data_shared, file, ui.ctx().clone());
                self.result.send(rx);
            }
        }

        self.result.poll(Some(ui));
        match self.result.state() {
            DataState::Present(download) => {
                self.processed = Some(download.clone());
                self.result.clear();
            }
            DataState::Failed(e) => {
                ui_error_label(ui, e);
                if ui.button("Clear Error").clicked() {
                    self.result.clear();
                }
            }
            DataState::None | DataState::AwaitingResponse(_) => {}
        }

        if let Some(download) = self.processed.as_ref() {
            ui.separator();
            ui_success_label(ui, PROCESSED_MSG);
            if ui
                .button(format!("Download {}", download.file_name))
                .clicked()
            {
                self.save_outcome = Some(save_download(download, data_shared));
            }
        }
        match &self.save_outcome {
            Some(Ok(msg)) => ui_success_label(ui, msg.as_str()),
            Some(Err(e)) => ui_error_label(ui, e),
            None => {}
        }
    }

    fn ui_pick_file(&mut self, ui: &mut egui::Ui) {
        let dropped = ui.ctx().input(|i| i.raw.dropped_files.first().cloned());
        if let Some(dropped) = dropped {
            self.set_file(file_from_dropped(&dropped));
        }

        let hovering = ui.ctx().input(|i| !i.raw.hovered_files.is_empty());
        egui::Frame::group(ui.style()).show(ui, |ui| {
            ui.set_min_width(300.0);
            match (&self.file, hovering) {
                (_, true) => ui.strong("Release to use this file"),
                (Some(file), false) => ui.label(format!("Selected: {}", file.file_name)),
                (None, false) => ui.weak("Drop a spreadsheet (.xlsx or .xls) here"),
            };
        });

        #[cfg(not(target_arch = "wasm32"))]
        ui.horizontal(|ui| {
            ui.add(egui::TextEdit::singleline(&mut self.path_text).hint_text("Or enter a path"));
            if ui
                .add_enabled(!self.path_text.trim().is_empty(), egui::Button::new("Load"))
                .clicked()
            {
                let path = std::path::PathBuf::from(self.path_text.trim());
                self.set_file(file_from_path(&path));
            }
        });

        if let Some(e) = self.file_error.as_ref() {
            ui_error_label(ui, e);
        }
    }
}

/// On the web the contents come with the drop, natively only the path does
fn file_from_dropped(dropped: &egui::DroppedFile) -> Result<FileUpload, String> {
    if let Some(bytes) = dropped.bytes.as_ref() {
        let file_name = if dropped.name.is_empty() {
            dropped
                .path
                .as_ref()
                .and_then(|path| path.file_name())
                .map(|name| name.to_string_lossy().to_string())
                .unwrap_or_default()
        } else {
            dropped.name.clone()
        };
        return checked(FileUpload {
            file_name,
            bytes: bytes.to_vec(),
        });
    }
    #[cfg(not(target_arch = "wasm32"))]
    if let Some(path) = dropped.path.as_ref() {
        return file_from_path(path);
    }
    Err("The dropped file could not be read".to_string())
}

#[cfg(not(target_arch = "wasm32"))]
fn file_from_path(path: &std::path::Path) -> Result<FileUpload, String> {
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_default();
    let bytes = std::fs::read(path).map_err(|e| format!("Failed to read {path:?}: {e}"))?;
    checked(FileUpload { file_name, bytes })
}

fn checked(file: FileUpload) -> Result<FileUpload, String> {
    file.validate().map_err(|e| e.to_string())?;
    Ok(file)
}

macro_rules! bulk_upload_page {
    ($name:ident, $route_id:expr, $kind:expr) => {
        #[derive(Debug, Default, serde::Serialize, serde::Deserialize)]
        #[serde(default)]
        pub struct $name {
            is_open: bool,
            page_unique_number: usize,
            #[serde(skip)]
            upload: BulkUpload,
        }

        impl DisplayablePage for $name {
            displayable_page_common!($route_id);

            fn reset_to_default(&mut self, _: super::private::Token) {
                self.upload.clear();
            }

            fn show(&mut self, ui: &mut eframe::egui::Ui, data_shared: &mut DataShared) {
                self.upload.show(ui, data_shared, $kind);
            }

            fn adjust_window_settings<'open>(
                &self,
                window: egui::Window<'open>,
            ) -> egui::Window<'open> {
                window.default_width(420.0)
            }
        }
    };
}

bulk_upload_page!(
    UiBulkCreateUsers,
    RouteId::BulkCreateUsers,
    UploadKind::CreateUsers
);
bulk_upload_page!(
    UiBulkResetPasswords,
    RouteId::BulkResetPasswords,
    UploadKind::ResetPasswords
);
bulk_upload_page!(
    UiCreateMiddleAdmins,
    RouteId::CreateMiddleAdmins,
    UploadKind::CreateMiddleAdmins
);

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use rstest::rstest;

    use super::*;

    fn dropped(name: &str, bytes: &[u8]) -> egui::DroppedFile {
        egui::DroppedFile {
            name: name.to_string(),
            bytes: Some(Arc::from(bytes)),
            ..Default::default()
        }
    }

    #[rstest]
    #[case::xlsx("users.xlsx")]
    #[case::xls_upper("USERS.XLS")]
    fn spreadsheet_accepted(#[case] name: &str) {
        let actual = file_from_dropped(&dropped(name, b"PK")).unwrap();
        assert_eq!(actual.file_name, name);
        assert_eq!(actual.bytes, b"PK");
    }

    #[test]
    fn other_file_rejected() {
        let actual = file_from_dropped(&dropped("notes.txt", b"hi"));
        assert!(actual.is_err());
    }

    #[test]
    fn choosing_new_file_drops_old_result() {
        // Arrange
        let mut upload = BulkUpload {
            processed: Some(Download {
                file_name: "created_users.xlsx".to_string(),
                bytes: vec![1],
            }),
            ..Default::default()
        };

        // Act
        upload.set_file(file_from_dropped(&dropped("more.xlsx", b"PK")));

        // Assert
        assert!(upload.processed.is_none());
        assert_eq!(upload.file.map(|f| f.file_name).as_deref(), Some("more.xlsx"));
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn missing_path_reported() {
        let actual = file_from_path(std::path::Path::new("/definitely/not/here.xlsx"));
        assert!(actual.unwrap_err().starts_with("Failed to read"));
    }
}
