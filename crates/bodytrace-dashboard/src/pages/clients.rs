use bodytrace_shared::{
    imei::Imei,
    pagination::{Page, PageRequest},
    routes::RouteId,
    uac::User,
};
use egui_extras::{Column, TableBuilder};

use super::{data_state::DataSlot, list_query::ListQuery, DisplayablePage};
use crate::{
    app::wake_fn,
    displayable_page_common,
    ui_helpers::{ui_no_data, ui_pagination},
    DataShared,
};

/// Users managed by the logged in middle admin
#[derive(Debug, Default, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct UiClients {
    is_open: bool,
    page_unique_number: usize,
    query: ListQuery,
    #[serde(skip)]
    clients: DataSlot<Page<User>>,
}

impl UiClients {
    fn ui_controls(&mut self, ui: &mut egui::Ui, request: PageRequest) {
        ui.horizontal_wrapped(|ui| {
            let mut changed = self.query.ui(ui, "clients", request);
            if ui
                .add_enabled(!self.clients.is_awaiting(), egui::Button::new("Refresh"))
                .clicked()
            {
                changed = true;
            }
            if changed {
                self.clients.refresh();
            }
        });
    }
}

impl DisplayablePage for UiClients {
    displayable_page_common!(RouteId::Clients);

    fn reset_to_default(&mut self, _: super::private::Token) {
        self.clients.clear();
        self.query.reset();
    }

    fn show(&mut self, ui: &mut eframe::egui::Ui, data_shared: &mut DataShared) {
        let request = self.query.request(data_shared.page_request);
        self.ui_controls(ui, request);
        ui.separator();

        let middle_admin_id = data_shared.session().email().to_string();
        let args = self.query.args(request);
        let ctx = ui.ctx().clone();
        self.clients.get(Some(ui), None, || {
            data_shared
                .client
                .list_middle_admin_users(&middle_admin_id, args, wake_fn(ctx))
        });

        let Some(page) = self.clients.present() else {
            return;
        };
        if let Some(imei) = ui_clients_table(ui, &page.data) {
            data_shared.open_client_dashboard(imei);
        }
        let last_page = page.last_page();
        if let Some(new_request) = ui_pagination(ui, request, last_page) {
            self.query.set_request(new_request);
            self.clients.refresh();
        }
    }
}

/// Returns the device that was clicked on
fn ui_clients_table(ui: &mut egui::Ui, clients: &[User]) -> Option<Imei> {
    if clients.is_empty() {
        ui_no_data(ui);
        return None;
    }
    let mut result = None;
    let text_height = egui::TextStyle::Body
        .resolve(ui.style())
        .size
        .max(ui.spacing().interact_size.y);
    egui::ScrollArea::horizontal().show(ui, |ui| {
        TableBuilder::new(ui)
            .striped(true)
            .resizable(true)
            .cell_layout(egui::Layout::left_to_right(egui::Align::Center))
            .column(Column::auto())
            .column(Column::auto())
            .column(Column::remainder())
            .header(20.0, |mut header| {
                header.col(|ui| {
                    ui.strong("IMEI");
                });
                header.col(|ui| {
                    ui.strong("Name");
                });
                header.col(|ui| {
                    ui.strong("Email");
                });
            })
            .body(|body| {
                body.rows(text_height, clients.len(), |mut row| {
                    let client = &clients[row.index()];
                    row.col(|ui| {
                        for imei in client.imei.as_slice() {
                            if ui
                                .link(imei.to_string())
                                .on_hover_text("Open in Client Dashboard")
                                .clicked()
                            {
                                result = Some(imei.clone());
                            }
                        }
                    });
                    row.col(|ui| {
                        ui.label(client.name.as_str());
                    });
                    row.col(|ui| {
                        ui.label(client.email.as_str());
                    });
                });
            });
    });
    result
}
