use bodytrace_shared::{
    const_config::path::{
        PATH_API_CHANGE_PASSWORD, PATH_API_PASSWORD_RESET, PATH_API_PASSWORD_RESET_REQUEST,
    },
    req_args::api::user::{ChangePasswordReqArgs, PasswordResetRequestReqArgs, ResetPasswordReqArgs},
};
use futures::channel::oneshot;

use crate::{
    client::{reject, UiCallBack},
    Client,
};

impl Client {
    /// Asks the backend to email a reset link
    #[tracing::instrument(skip(ui_notify))]
    pub fn request_password_reset<F: UiCallBack>(
        &self,
        args: PasswordResetRequestReqArgs,
        ui_notify: F,
    ) -> oneshot::Receiver<anyhow::Result<()>> {
        if let Err(e) = args.validate() {
            return reject(e, PATH_API_PASSWORD_RESET_REQUEST.action, ui_notify);
        }
        self.send_request_expect_empty(PATH_API_PASSWORD_RESET_REQUEST, &args, ui_notify)
    }

    #[tracing::instrument(skip(args, ui_notify))]
    pub fn reset_password<F: UiCallBack>(
        &self,
        args: &ResetPasswordReqArgs,
        ui_notify: F,
    ) -> oneshot::Receiver<anyhow::Result<()>> {
        if let Err(e) = args.validate() {
            return reject(e, PATH_API_PASSWORD_RESET.action, ui_notify);
        }
        self.send_request_expect_empty(PATH_API_PASSWORD_RESET, &args.to_json_body(), ui_notify)
    }

    #[tracing::instrument(skip(args, ui_notify), fields(email = %args.email))]
    pub fn change_password<F: UiCallBack>(
        &self,
        args: &ChangePasswordReqArgs,
        ui_notify: F,
    ) -> oneshot::Receiver<anyhow::Result<()>> {
        if let Err(e) = args.validate() {
            return reject(e, PATH_API_CHANGE_PASSWORD.action, ui_notify);
        }
        self.send_request_expect_empty(PATH_API_CHANGE_PASSWORD, &args.to_json_body(), ui_notify)
    }
}
