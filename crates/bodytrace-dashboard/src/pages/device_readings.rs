use bodytrace_shared::{routes::RouteId, units::WeightUnit};

use super::{filtered_readings::FilteredReadings, DisplayablePage};
use crate::{displayable_page_common, ui_helpers::ui_weight_unit, DataShared};

/// The logged in user's readings filtered by date
#[derive(Debug, Default, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct UiDeviceReadings {
    is_open: bool,
    page_unique_number: usize,
    unit: WeightUnit,
    readings: FilteredReadings,
}

impl DisplayablePage for UiDeviceReadings {
    displayable_page_common!(RouteId::DeviceReadings);

    fn reset_to_default(&mut self, _: super::private::Token) {
        self.readings.clear();
    }

    fn show(&mut self, ui: &mut eframe::egui::Ui, data_shared: &mut DataShared) {
        let imeis = data_shared.session().imei().to_vec();
        if imeis.is_empty() {
            ui.label("No device is linked to your account.");
            return;
        }

        ui.horizontal(|ui| {
            ui_weight_unit(ui, "device readings unit", &mut self.unit);
            if ui
                .add_enabled(!self.readings.is_awaiting(), egui::Button::new("Refresh"))
                .clicked()
            {
                self.readings.refresh();
            }
        });
        self.readings
            .show(ui, "device readings", data_shared, &imeis, self.unit);
    }

    fn adjust_window_settings<'open>(&self, window: egui::Window<'open>) -> egui::Window<'open> {
        window.default_width(900.0)
    }
}
