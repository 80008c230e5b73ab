use bodytrace_shared::{
    device::{chart_readings, DeviceReading},
    pagination::{paginate, PageRequest},
    routes::RouteId,
    units::WeightUnit,
};

use super::{
    data_state::DataSlot,
    readings_view::{readings_display, ui_readings_chart, ui_readings_table},
    DisplayablePage,
};
use crate::{
    app::wake_fn,
    displayable_page_common,
    ui_helpers::{ui_page_size, ui_pagination, ui_weight_unit},
    DataShared,
};

/// Readings from the devices linked to the logged in user
#[derive(Debug, Default, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct UiMainDashboard {
    is_open: bool,
    page_unique_number: usize,
    unit: WeightUnit,
    #[serde(skip)]
    page_request: Option<PageRequest>,
    #[serde(skip)]
    readings: DataSlot<Vec<DeviceReading>>,
}

impl UiMainDashboard {
    fn ui_user_info(ui: &mut egui::Ui, data_shared: &DataShared) {
        let session = data_shared.session();
        egui::Grid::new("user info").num_columns(2).show(ui, |ui| {
            ui.label("Name");
            ui.label(session.name());
            ui.end_row();
            ui.label("Email");
            ui.label(session.email());
            ui.end_row();
            ui.label("IMEI");
            ui.label(session.imei().joined());
            ui.end_row();
        });
    }

    fn ui_readings(&mut self, ui: &mut egui::Ui, data_shared: &DataShared) {
        let Some(readings) = self.readings.present() else {
            return;
        };
        ui_readings_chart(ui, "main dashboard", readings, self.unit);
        ui.separator();

        let sorted = chart_readings(readings);
        let request = *self
            .page_request
            .get_or_insert_with(|| data_shared.page_request);
        let page = paginate(&sorted, request);
        let rows: Vec<&DeviceReading> = page.data.iter().map(|reading| **reading).collect();
        ui_readings_table(ui, "main dashboard", &readings_display(&rows, self.unit), self.unit);

        ui.horizontal(|ui| {
            if let Some(new_request) = ui_pagination(ui, request, page.last_page()) {
                self.page_request = Some(new_request);
            }
            if let Some(new_request) = ui_page_size(ui, "main dashboard page size", request) {
                self.page_request = Some(new_request);
            }
        });
    }
}

impl DisplayablePage for UiMainDashboard {
    displayable_page_common!(RouteId::MainDashboard);

    fn reset_to_default(&mut self, _: super::private::Token) {
        self.readings.clear();
        self.page_request = None;
    }

    fn show(&mut self, ui: &mut eframe::egui::Ui, data_shared: &mut DataShared) {
        Self::ui_user_info(ui, data_shared);
        ui.separator();

        let imeis = data_shared.session().imei().to_vec();
        if imeis.is_empty() {
            ui.label("No device is linked to your account.");
            return;
        }

        ui.horizontal(|ui| {
            ui_weight_unit(ui, "main dashboard unit", &mut self.unit);
            if ui
                .add_enabled(!self.readings.is_awaiting(), egui::Button::new("Refresh"))
                .clicked()
            {
                self.readings.refresh();
            }
        });

        let ctx = ui.ctx().clone();
        self.readings.get(Some(ui), None, || {
            data_shared.client.fetch_device_data(imeis, wake_fn(ctx))
        });
        self.ui_readings(ui, data_shared);
    }

    fn adjust_window_settings<'open>(&self, window: egui::Window<'open>) -> egui::Window<'open> {
        window.default_width(900.0)
    }
}
