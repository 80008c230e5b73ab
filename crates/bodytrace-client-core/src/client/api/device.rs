use bodytrace_shared::{
    const_config::{
        download::DOWNLOAD_DEFAULT_DEVICE_CSV,
        path::{PATH_API_DEVICE_DATA, PATH_API_DEVICE_DOWNLOAD_CSV, PATH_API_DEVICE_FILTERED_DATA},
    },
    device::{DeviceReading, ReadingsEnvelope},
    imei::Imei,
    pagination::{Page, PageRequest},
    req_args::api::device::{DeviceDataReqArgs, FilteredDataReqArgs},
    time::DateRange,
};
use futures::channel::oneshot;

use crate::{
    client::{reject, UiCallBack},
    Client, Download,
};

impl Client {
    /// Every reading for the devices, used for charts
    #[tracing::instrument(skip(ui_notify))]
    pub fn fetch_device_data<F: UiCallBack>(
        &self,
        imeis: Vec<Imei>,
        ui_notify: F,
    ) -> oneshot::Receiver<anyhow::Result<Vec<DeviceReading>>> {
        let args = match DeviceDataReqArgs::new(imeis) {
            Ok(args) => args,
            Err(e) => return reject(e, PATH_API_DEVICE_DATA.action, ui_notify),
        };
        self.send_request_expect_wrapped_json::<_, _, ReadingsEnvelope, _>(
            PATH_API_DEVICE_DATA,
            None,
            &args,
            ui_notify,
        )
    }

    #[tracing::instrument(skip(ui_notify))]
    pub fn fetch_filtered_device_data<F: UiCallBack>(
        &self,
        imeis: Vec<Imei>,
        range: DateRange,
        page: PageRequest,
        ui_notify: F,
    ) -> oneshot::Receiver<anyhow::Result<Page<DeviceReading>>> {
        let args = match FilteredDataReqArgs::new(imeis, &range, page) {
            Ok(args) => args,
            Err(e) => return reject(e, PATH_API_DEVICE_FILTERED_DATA.action, ui_notify),
        };
        self.send_request_expect_json(PATH_API_DEVICE_FILTERED_DATA, None, &args, ui_notify)
    }

    /// Same filter as [`Self::fetch_filtered_device_data`] but returns a CSV
    #[tracing::instrument(skip(ui_notify))]
    pub fn download_filtered_device_data<F: UiCallBack>(
        &self,
        imeis: Vec<Imei>,
        range: DateRange,
        page: PageRequest,
        ui_notify: F,
    ) -> oneshot::Receiver<anyhow::Result<Download>> {
        let args = match FilteredDataReqArgs::new(imeis, &range, page) {
            Ok(args) => args,
            Err(e) => return reject(e, PATH_API_DEVICE_DOWNLOAD_CSV.action, ui_notify),
        };
        self.send_request_expect_download(
            PATH_API_DEVICE_DOWNLOAD_CSV,
            &args,
            DOWNLOAD_DEFAULT_DEVICE_CSV,
            ui_notify,
        )
    }
}
