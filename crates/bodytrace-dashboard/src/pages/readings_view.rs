//! Chart and table rendering shared by the dashboards

use bodytrace_shared::{
    device::{ChartPoint, ChartSeries, DeviceReading, ReadingColumns},
    units::{format_centi_mmhg, WeightUnit, NOT_AVAILABLE},
};
use bodytrace_time::Timestamp;
use egui_extras::{Column, TableBuilder};
use egui_plot::{Legend, Line, Plot, PlotPoints};

use crate::ui_helpers::ui_no_data;

/// One table row already converted to display units
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadingRow {
    pub time: String,
    pub imei: String,
    pub weight: String,
    pub systolic: String,
    pub diastolic: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReadingsDisplay {
    /// Nothing came back, this is not an error
    NoData,
    Rows {
        columns: ReadingColumns,
        rows: Vec<ReadingRow>,
    },
}

/// Converts readings for display. Value columns are only included if at least
/// one reading has that value.
pub fn readings_display(readings: &[&DeviceReading], unit: WeightUnit) -> ReadingsDisplay {
    if readings.is_empty() {
        return ReadingsDisplay::NoData;
    }
    let columns = ReadingColumns::from_readings(readings.iter().copied());
    let rows = readings
        .iter()
        .map(|reading| ReadingRow {
            time: reading
                .ts
                .map(|ts| ts.display_as_locale_datetime())
                .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
            imei: reading
                .imei
                .as_ref()
                .map(|imei| imei.to_string())
                .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
            weight: unit.format_grams(reading.weight()),
            systolic: format_centi_mmhg(reading.systolic()),
            diastolic: format_centi_mmhg(reading.diastolic()),
        })
        .collect();
    ReadingsDisplay::Rows { columns, rows }
}

pub fn ui_readings_table(
    ui: &mut egui::Ui,
    id_salt: impl std::hash::Hash,
    display: &ReadingsDisplay,
    unit: WeightUnit,
) {
    let ReadingsDisplay::Rows { columns, rows } = display else {
        ui_no_data(ui);
        return;
    };
    let text_height = egui::TextStyle::Body
        .resolve(ui.style())
        .size
        .max(ui.spacing().interact_size.y);
    let mut headers = vec!["Date".to_string(), "IMEI".to_string()];
    if columns.weight {
        headers.push(format!("Weight ({unit})"));
    }
    if columns.systolic {
        headers.push("Systolic (mmHg)".to_string());
    }
    if columns.diastolic {
        headers.push("Diastolic (mmHg)".to_string());
    }

    ui.push_id(id_salt, |ui| {
        TableBuilder::new(ui)
            .striped(true)
            .resizable(true)
            .cell_layout(egui::Layout::left_to_right(egui::Align::Center))
            .columns(Column::auto(), headers.len())
            .header(20.0, |mut header| {
                for title in headers.iter() {
                    header.col(|ui| {
                        ui.strong(title.as_str());
                    });
                }
            })
            .body(|body| {
                body.rows(text_height, rows.len(), |mut row| {
                    let reading = &rows[row.index()];
                    let mut cells = vec![&reading.time, &reading.imei];
                    if columns.weight {
                        cells.push(&reading.weight);
                    }
                    if columns.systolic {
                        cells.push(&reading.systolic);
                    }
                    if columns.diastolic {
                        cells.push(&reading.diastolic);
                    }
                    for cell in cells {
                        row.col(|ui| {
                            ui.label(cell.as_str());
                        });
                    }
                });
            });
    });
}

/// Weight and blood pressure are plotted separately as their scales differ
pub fn ui_readings_chart(
    ui: &mut egui::Ui,
    id_salt: &str,
    readings: &[DeviceReading],
    unit: WeightUnit,
) {
    let series = ChartSeries::build(readings, unit);
    if series.is_empty() {
        ui_no_data(ui);
        return;
    }
    if !series.weight.is_empty() {
        ui.label(format!("Weight ({unit})"));
        ui_plot(
            ui,
            format!("{id_salt} weight"),
            &[(format!("Weight ({unit})"), &series.weight)],
        );
    }
    if !series.systolic.is_empty() || !series.diastolic.is_empty() {
        ui.label("Blood pressure (mmHg)");
        ui_plot(
            ui,
            format!("{id_salt} blood pressure"),
            &[
                ("Systolic".to_string(), &series.systolic),
                ("Diastolic".to_string(), &series.diastolic),
            ],
        );
    }
}

fn ui_plot(ui: &mut egui::Ui, id: String, lines: &[(String, &Vec<ChartPoint>)]) {
    Plot::new(id)
        .legend(Legend::default())
        .height(200.0)
        .allow_scroll(false)
        .x_axis_formatter(|mark, _range| Timestamp::from_days_f64(mark.value).display_as_locale_date())
        .show(ui, |plot_ui| {
            for (name, points) in lines {
                if points.is_empty() {
                    continue;
                }
                let points: PlotPoints = points.iter().map(|p| [p.x, p.y]).collect();
                plot_ui.line(Line::new(points).name(name));
            }
        });
}
