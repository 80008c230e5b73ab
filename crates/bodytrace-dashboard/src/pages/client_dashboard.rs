use bodytrace_shared::{device::DeviceReading, imei::Imei, routes::RouteId, units::WeightUnit};
use tracing::info;

use super::{
    data_state::DataSlot, filtered_readings::FilteredReadings, readings_view::ui_readings_chart,
    DisplayablePage,
};
use crate::{app::wake_fn, displayable_page_common, ui_helpers::ui_weight_unit, DataShared};

pub const MISSING_IMEI_MSG: &str =
    "IMEI is missing. Please go back and select a device from Middle Admin IMEI.";

/// Readings of one client device chosen on the clients page
#[derive(Debug, Default, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct UiClientDashboard {
    is_open: bool,
    page_unique_number: usize,
    imei: Option<Imei>,
    unit: WeightUnit,
    #[serde(skip)]
    chart_readings: DataSlot<Vec<DeviceReading>>,
    table: FilteredReadings,
}

impl UiClientDashboard {
    /// Switches to a device picked on the clients page
    fn adopt_selected_imei(&mut self, data_shared: &mut DataShared) {
        let Some(imei) = data_shared.selected_client_imei.take() else {
            return;
        };
        if self.imei.as_ref() != Some(&imei) {
            info!(%imei, "client dashboard showing new device");
            self.imei = Some(imei);
            self.chart_readings.clear();
            self.table.clear();
        }
    }
}

impl DisplayablePage for UiClientDashboard {
    displayable_page_common!(RouteId::ClientDashboard);

    fn reset_to_default(&mut self, _: super::private::Token) {
        self.chart_readings.clear();
        self.table.clear();
    }

    fn show(&mut self, ui: &mut eframe::egui::Ui, data_shared: &mut DataShared) {
        self.adopt_selected_imei(data_shared);
        let Some(imei) = self.imei.clone() else {
            ui.label(MISSING_IMEI_MSG);
            if ui.button("Go to Clients").clicked() {
                data_shared.request_open(RouteId::Clients);
            }
            return;
        };

        ui.horizontal(|ui| {
            ui.strong(format!("IMEI {imei}"));
            ui_weight_unit(ui, "client dashboard unit", &mut self.unit);
            if ui
                .add_enabled(
                    !self.chart_readings.is_awaiting(),
                    egui::Button::new("Refresh"),
                )
                .clicked()
            {
                self.chart_readings.refresh();
                self.table.refresh();
            }
        });
        ui.separator();

        let ctx = ui.ctx().clone();
        let chart_imei = imei.clone();
        self.chart_readings.get(Some(ui), None, || {
            data_shared
                .client
                .fetch_middle_admin_device_data(vec![chart_imei], wake_fn(ctx))
        });
        if let Some(readings) = self.chart_readings.present() {
            let id_salt = format!("client dashboard {}", self.page_unique_number);
            ui_readings_chart(ui, &id_salt, readings, self.unit);
        }
        ui.separator();

        self.table.show(
            ui,
            "client dashboard readings",
            data_shared,
            std::slice::from_ref(&imei),
            self.unit,
        );
    }

    fn adjust_window_settings<'open>(&self, window: egui::Window<'open>) -> egui::Window<'open> {
        window.default_width(900.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn imei(value: &str) -> Imei {
        Imei::parse(value).unwrap()
    }

    #[test]
    fn selected_imei_taken_once() {
        // Arrange
        let mut page = UiClientDashboard::default();
        let mut data_shared = DataShared::default();
        data_shared.open_client_dashboard(imei("111"));

        // Act
        page.adopt_selected_imei(&mut data_shared);

        // Assert
        assert_eq!(page.imei, Some(imei("111")));
        assert!(data_shared.selected_client_imei.is_none());
    }

    #[test]
    fn no_selection_keeps_current_device() {
        // Arrange
        let mut page = UiClientDashboard {
            imei: Some(imei("111")),
            ..Default::default()
        };
        let mut data_shared = DataShared::default();

        // Act
        page.adopt_selected_imei(&mut data_shared);

        // Assert
        assert_eq!(page.imei, Some(imei("111")));
    }
}
