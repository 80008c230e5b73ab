use bodytrace_shared::{
    const_config::path::{PATH_API_MIDDLE_ADMIN_DEVICE_DATA, PATH_API_MIDDLE_ADMIN_USERS},
    device::{DeviceReading, ReadingsEnvelope},
    errors::require_field,
    imei::Imei,
    pagination::Page,
    req_args::api::{device::DeviceDataReqArgs, user::ListUsersReqArgs},
    uac::User,
};
use futures::channel::oneshot;

use crate::{
    client::{reject, UiCallBack},
    Client,
};

impl Client {
    /// Clients assigned to a middle admin. The backend identifies the middle
    /// admin by their email.
    #[tracing::instrument(skip(ui_notify))]
    pub fn list_middle_admin_users<F: UiCallBack>(
        &self,
        middle_admin_id: &str,
        args: ListUsersReqArgs,
        ui_notify: F,
    ) -> oneshot::Receiver<anyhow::Result<Page<User>>> {
        if let Err(e) = require_field("middle admin id", middle_admin_id) {
            return reject(e, PATH_API_MIDDLE_ADMIN_USERS.action, ui_notify);
        }
        self.send_request_expect_json(
            PATH_API_MIDDLE_ADMIN_USERS,
            Some(middle_admin_id.trim()),
            &args,
            ui_notify,
        )
    }

    #[tracing::instrument(skip(ui_notify))]
    pub fn fetch_middle_admin_device_data<F: UiCallBack>(
        &self,
        imeis: Vec<Imei>,
        ui_notify: F,
    ) -> oneshot::Receiver<anyhow::Result<Vec<DeviceReading>>> {
        let args = match DeviceDataReqArgs::new(imeis) {
            Ok(args) => args,
            Err(e) => return reject(e, PATH_API_MIDDLE_ADMIN_DEVICE_DATA.action, ui_notify),
        };
        self.send_request_expect_wrapped_json::<_, _, ReadingsEnvelope, _>(
            PATH_API_MIDDLE_ADMIN_DEVICE_DATA,
            None,
            &args,
            ui_notify,
        )
    }
}
