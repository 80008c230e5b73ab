//! Search, sort and paging for the server side user lists

use bodytrace_shared::{
    const_config::client::CLIENT_DEFAULT_SORT_BY,
    pagination::{PageRequest, SortOrder},
    req_args::api::user::ListUsersReqArgs,
};

use crate::ui_helpers::{ui_page_size, ui_search, ui_sort_order};

/// The search box text only takes effect once submitted
#[derive(Debug, Default, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ListQuery {
    order: SortOrder,
    #[serde(skip)]
    search_text: String,
    #[serde(skip)]
    search: String,
    #[serde(skip)]
    page_request: Option<PageRequest>,
}

impl ListQuery {
    pub fn request(&mut self, default: PageRequest) -> PageRequest {
        *self.page_request.get_or_insert(default)
    }

    pub fn set_request(&mut self, request: PageRequest) {
        self.page_request = Some(request);
    }

    pub fn args(&self, request: PageRequest) -> ListUsersReqArgs {
        ListUsersReqArgs::new(request, CLIENT_DEFAULT_SORT_BY, self.order, &self.search)
    }

    pub fn reset(&mut self) {
        self.search_text.clear();
        self.search.clear();
        self.page_request = None;
    }

    fn submit_search(&mut self) {
        self.search = self.search_text.trim().to_string();
        self.to_first_page();
    }

    fn toggle_order(&mut self) {
        self.order = self.order.toggled();
        self.to_first_page();
    }

    fn to_first_page(&mut self) {
        self.page_request = self.page_request.map(|req| req.with_page(1, 1));
    }

    /// Returns `true` if the list needs fetching again
    pub fn ui(&mut self, ui: &mut egui::Ui, id_salt: &str, request: PageRequest) -> bool {
        let mut changed = false;
        if ui_search(ui, &mut self.search_text) {
            self.submit_search();
            changed = true;
        }
        let mut order = self.order;
        if ui_sort_order(ui, &mut order) {
            self.toggle_order();
            changed = true;
        }
        if let Some(resized) = ui_page_size(ui, (id_salt, "page size"), request) {
            self.set_request(resized);
            changed = true;
        }
        changed
    }
}
