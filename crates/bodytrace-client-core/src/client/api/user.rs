use bodytrace_shared::{
    const_config::path::{PATH_API_USER, PATH_API_USERS_LIST, PATH_API_USER_CREATE, PATH_API_USER_EDIT},
    id::UserId,
    pagination::Page,
    req_args::api::user::{EditUserReqArgs, ListUsersReqArgs, NewUserReqArgs},
    uac::{User, UserEnvelope},
};
use futures::channel::oneshot;

use crate::{
    client::{reject, UiCallBack, DUMMY_ARGUMENT},
    Client,
};

impl Client {
    #[tracing::instrument(skip(ui_notify))]
    pub fn create_user<F: UiCallBack>(
        &self,
        args: NewUserReqArgs,
        ui_notify: F,
    ) -> oneshot::Receiver<anyhow::Result<User>> {
        if let Err(e) = args.validate() {
            return reject(e, PATH_API_USER_CREATE.action, ui_notify);
        }
        self.send_request_expect_wrapped_json::<_, _, UserEnvelope, _>(
            PATH_API_USER_CREATE,
            None,
            &args.to_json_body(),
            ui_notify,
        )
    }

    #[tracing::instrument(skip(ui_notify))]
    pub fn list_users<F: UiCallBack>(
        &self,
        args: ListUsersReqArgs,
        ui_notify: F,
    ) -> oneshot::Receiver<anyhow::Result<Page<User>>> {
        self.send_request_expect_json(PATH_API_USERS_LIST, None, &args, ui_notify)
    }

    #[tracing::instrument(skip(ui_notify))]
    pub fn edit_user<F: UiCallBack>(
        &self,
        args: EditUserReqArgs,
        ui_notify: F,
    ) -> oneshot::Receiver<anyhow::Result<User>> {
        if let Err(e) = args.validate() {
            return reject(e, PATH_API_USER_EDIT.action, ui_notify);
        }
        self.send_request_expect_wrapped_json::<_, _, UserEnvelope, _>(
            PATH_API_USER_EDIT,
            Some(args.id.as_ref()),
            &args,
            ui_notify,
        )
    }

    #[tracing::instrument(skip(ui_notify))]
    pub fn get_user<F: UiCallBack>(
        &self,
        id: UserId,
        ui_notify: F,
    ) -> oneshot::Receiver<anyhow::Result<User>> {
        self.send_request_expect_wrapped_json::<_, _, UserEnvelope, _>(
            PATH_API_USER,
            Some(id.as_ref()),
            DUMMY_ARGUMENT,
            ui_notify,
        )
    }
}
