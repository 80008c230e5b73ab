//! Date filtered, server side paginated readings with a CSV export

use bodytrace_client_core::Download;
use bodytrace_shared::{
    device::DeviceReading,
    imei::Imei,
    pagination::{Page, PageRequest},
    time::DateRange,
    units::WeightUnit,
};

use super::{
    data_state::{DataSlot, DataState},
    readings_view::{readings_display, ui_readings_table},
};
use crate::{
    app::wake_fn,
    ui_helpers::{
        save_download, ui_date_range, ui_error_label, ui_page_size, ui_pagination,
        ui_success_label,
    },
    DataShared,
};

#[derive(Debug, Default, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct FilteredReadings {
    start_text: String,
    end_text: String,
    /// Parsed from the date text on first use
    #[serde(skip)]
    range: Option<DateRange>,
    #[serde(skip)]
    range_error: Option<String>,
    #[serde(skip)]
    page_request: Option<PageRequest>,
    #[serde(skip)]
    readings: DataSlot<Page<DeviceReading>>,
    #[serde(skip)]
    download: DataSlot<Download>,
    #[serde(skip)]
    download_outcome: Option<Result<String, String>>,
}

impl FilteredReadings {
    /// Drops loaded data. The typed dates are kept and applied again.
    pub fn clear(&mut self) {
        self.readings.clear();
        self.download.clear();
        self.download_outcome = None;
        self.range_error = None;
        self.page_request = None;
        self.range = None;
    }

    /// The range requests are sent with. Matches the date text shown, including
    /// text restored from a previous run.
    fn applied_range(&mut self) -> DateRange {
        if let Some(range) = self.range {
            return range;
        }
        let range = match DateRange::parse(&self.start_text, &self.end_text) {
            Ok(range) => range,
            Err(e) => {
                self.range_error = Some(e.to_string());
                DateRange::default()
            }
        };
        self.range = Some(range);
        range
    }

    pub fn refresh(&mut self) {
        self.readings.refresh();
    }

    pub fn is_awaiting(&self) -> bool {
        self.readings.is_awaiting()
    }

    pub fn show(
        &mut self,
        ui: &mut egui::Ui,
        id_salt: &str,
        data_shared: &DataShared,
        imeis: &[Imei],
        unit: WeightUnit,
    ) {
        self.applied_range();
        self.ui_filters(ui);
        ui.separator();

        let request = *self
            .page_request
            .get_or_insert_with(|| data_shared.page_request);
        let ctx = ui.ctx().clone();
        let range = self.applied_range();
        self.readings.get(Some(ui), None, || {
            data_shared
                .client
                .fetch_filtered_device_data(imeis.to_vec(), range, request, wake_fn(ctx))
        });

        let Some(page) = self.readings.present() else {
            return;
        };
        let rows: Vec<&DeviceReading> = page.data.iter().collect();
        let last_page = page.last_page();
        ui_readings_table(ui, id_salt, &readings_display(&rows, unit), unit);
        ui.label(format!("{} readings in total", page.total_count));

        let mut new_request = None;
        ui.horizontal(|ui| {
            new_request = ui_pagination(ui, request, last_page);
            if let Some(resized) = ui_page_size(ui, (id_salt, "page size"), request) {
                new_request = Some(resized);
            }
        });
        if let Some(new_request) = new_request {
            self.page_request = Some(new_request);
            self.readings.refresh();
        }

        ui.separator();
        self.ui_download(ui, data_shared, imeis, request);
    }

    fn ui_filters(&mut self, ui: &mut egui::Ui) {
        if let Some(outcome) = ui_date_range(ui, &mut self.start_text, &mut self.end_text) {
            match outcome {
                Ok(range) => {
                    self.range = Some(range);
                    self.range_error = None;
                    self.page_request = self.page_request.map(|req| req.with_page(1, 1));
                    self.readings.refresh();
                }
                Err(e) => self.range_error = Some(e.to_string()),
            }
        }
        if let Some(e) = self.range_error.as_ref() {
            ui_error_label(ui, e);
        }
    }

    fn ui_download(
        &mut self,
        ui: &mut egui::Ui,
        data_shared: &DataShared,
        imeis: &[Imei],
        request: PageRequest,
    ) {
        let range = self.applied_range();
        ui.horizontal(|ui| {
            if ui
                .add_enabled(!self.download.is_awaiting(), egui::Button::new("Download CSV"))
                .clicked()
            {
                self.download_outcome = None;
                let rx = data_shared.client.download_filtered_device_data(
                    imeis.to_vec(),
                    range,
                    request,
                    wake_fn(ui.ctx().clone()),
                );
                self.download.send(rx);
            }
            self.download.poll(Some(ui));
        });
        match self.download.state() {
            DataState::Present(download) => {
                self.download_outcome = Some(save_download(download, data_shared));
                self.download.clear();
            }
            DataState::Failed(e) => {
                self.download_outcome = Some(Err(e.clone()));
                self.download.clear();
            }
            DataState::None | DataState::AwaitingResponse(_) => {}
        }
        match &self.download_outcome {
            Some(Ok(msg)) => ui_success_label(ui, msg.as_str()),
            Some(Err(e)) => ui_error_label(ui, e),
            None => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn restored_dates_are_used_for_requests() {
        // Arrange
        let persisted = r#"{"start_text":"2024-01-01","end_text":"2024-01-31"}"#;
        let mut readings: FilteredReadings = serde_json::from_str(persisted).unwrap();

        // Act
        let actual = readings.applied_range();

        // Assert
        assert_eq!(actual, DateRange::parse("2024-01-01", "2024-01-31").unwrap());
        assert!(readings.range_error.is_none());
    }

    #[test]
    fn invalid_restored_dates_report_error() {
        // Arrange
        let mut readings = FilteredReadings {
            start_text: "2024-02-01".to_string(),
            end_text: "2024-01-01".to_string(),
            ..Default::default()
        };

        // Act
        let actual = readings.applied_range();

        // Assert
        assert_eq!(actual, DateRange::default());
        assert!(readings.range_error.is_some());
    }

    #[test]
    fn clear_reparses_edited_text() {
        // Arrange
        let mut readings = FilteredReadings::default();
        assert_eq!(readings.applied_range(), DateRange::default());
        readings.start_text = "2024-03-01".to_string();

        // Act
        readings.clear();

        // Assert
        assert_eq!(
            readings.applied_range(),
            DateRange::parse("2024-03-01", "").unwrap()
        );
    }
}
