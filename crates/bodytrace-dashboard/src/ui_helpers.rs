use bodytrace_client_core::Download;
use bodytrace_shared::{
    const_config::client::CLIENT_PAGE_SIZE_OPTIONS,
    pagination::{PageRequest, SortOrder},
    time::{DateRange, DateRangeError},
    units::WeightUnit,
};
use secrecy::{ExposeSecret as _, SecretString};
use strum::IntoEnumIterator as _;

use crate::DataShared;

pub fn ui_password_edit(
    ui: &mut egui::Ui,
    password: &mut SecretString,
    hint_text: &str,
) -> egui::Response {
    let mut temp = password.expose_secret().to_owned();
    let result = ui.add(
        egui::TextEdit::singleline(&mut temp)
            .password(true)
            .hint_text(hint_text),
    );
    *password = SecretString::from(temp);
    result
}

pub fn is_secret_set(secret: &SecretString) -> bool {
    !secret.expose_secret().is_empty()
}

pub fn ui_error_label(ui: &mut egui::Ui, msg: impl std::fmt::Display) {
    ui.colored_label(ui.visuals().error_fg_color, msg.to_string());
}

pub fn ui_success_label(ui: &mut egui::Ui, msg: impl Into<egui::RichText>) {
    ui.colored_label(egui::Color32::DARK_GREEN, msg);
}

/// Shown instead of an empty table
pub fn ui_no_data(ui: &mut egui::Ui) {
    ui.weak("No data");
}

/// Previous / next controls. Returns the new request if the page changed.
pub fn ui_pagination(
    ui: &mut egui::Ui,
    request: PageRequest,
    last_page: u32,
) -> Option<PageRequest> {
    let mut result = None;
    ui.horizontal(|ui| {
        let page = request.page();
        if ui
            .add_enabled(page > 1, egui::Button::new("Previous"))
            .clicked()
        {
            result = Some(step_page(request, -1, last_page));
        }
        ui.label(format!("Page {page} of {}", last_page.max(1)));
        if ui
            .add_enabled(page < last_page, egui::Button::new("Next"))
            .clicked()
        {
            result = Some(step_page(request, 1, last_page));
        }
    });
    result
}

fn step_page(request: PageRequest, delta: i64, last_page: u32) -> PageRequest {
    let target = i64::from(request.page()) + delta;
    let target = u32::try_from(target.max(1)).unwrap_or(u32::MAX);
    request.with_page(target, last_page)
}

/// Returns the new request (back on the first page) if the size changed
pub fn ui_page_size(
    ui: &mut egui::Ui,
    id_salt: impl std::hash::Hash,
    request: PageRequest,
) -> Option<PageRequest> {
    let mut limit = request.limit();
    ui.label("Rows per page");
    egui::ComboBox::from_id_salt(id_salt)
        .selected_text(limit.to_string())
        .show_ui(ui, |ui| {
            for option in CLIENT_PAGE_SIZE_OPTIONS {
                ui.selectable_value(&mut limit, option, option.to_string());
            }
        });
    if limit == request.limit() {
        return None;
    }
    request.with_limit(limit).ok()
}

/// Returns `true` if the unit changed
pub fn ui_weight_unit(ui: &mut egui::Ui, id_salt: impl std::hash::Hash, unit: &mut WeightUnit) -> bool {
    let before = *unit;
    ui.label("Weight unit");
    egui::ComboBox::from_id_salt(id_salt)
        .selected_text(unit.to_string())
        .show_ui(ui, |ui| {
            for option in WeightUnit::iter() {
                ui.selectable_value(unit, option, option.to_string());
            }
        });
    before != *unit
}

/// Returns `true` if the user asked to search (button or enter)
pub fn ui_search(ui: &mut egui::Ui, search: &mut String) -> bool {
    let response = ui.add(egui::TextEdit::singleline(search).hint_text("Search"));
    let entered = response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
    ui.button("Search").clicked() || entered
}

/// Button that flips the sort order, returns `true` if clicked
pub fn ui_sort_order(ui: &mut egui::Ui, order: &mut SortOrder) -> bool {
    let caption = match order {
        SortOrder::Asc => "Oldest first ⬆",
        SortOrder::Desc => "Newest first ⬇",
    };
    if ui.button(caption).clicked() {
        *order = order.toggled();
        true
    } else {
        false
    }
}

/// Text inputs for a date range (`YYYY-MM-DD`, blank for open ended).
/// Returns the parsed range when the user applies it.
pub fn ui_date_range(
    ui: &mut egui::Ui,
    start: &mut String,
    end: &mut String,
) -> Option<Result<DateRange, DateRangeError>> {
    let mut result = None;
    ui.horizontal(|ui| {
        ui.label("From");
        ui.add(
            egui::TextEdit::singleline(start)
                .hint_text("YYYY-MM-DD")
                .desired_width(100.0),
        );
        ui.label("To");
        ui.add(
            egui::TextEdit::singleline(end)
                .hint_text("YYYY-MM-DD")
                .desired_width(100.0),
        );
        if ui.button("Apply").clicked() {
            result = Some(DateRange::parse(start, end));
        }
        if ui.button("Clear").clicked() {
            start.clear();
            end.clear();
            result = Some(Ok(DateRange::default()));
        }
    });
    result
}

/// Saves the file and describes the outcome for display
#[cfg_attr(target_arch = "wasm32", allow(unused_variables))]
pub fn save_download(download: &Download, data_shared: &DataShared) -> Result<String, String> {
    #[cfg(not(target_arch = "wasm32"))]
    let outcome = download
        .save(&data_shared.export_folder)
        .map(|path| format!("Saved to {}", path.display()));
    #[cfg(target_arch = "wasm32")]
    let outcome = download
        .save()
        .map(|()| format!("Download of {} started", download.file_name));
    outcome.map_err(|e| {
        tracing::error!(?e, "failed to save download");
        format!("{e:#}")
    })
}
