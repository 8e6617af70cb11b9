use futures::channel::oneshot;
use libris_shared::{
    const_config::path::{PATH_API_DASHBOARD, PATH_REGISTER},
    library::Dashboard,
    req_args::RegisterReqArgs,
    uac::MessageResponse,
};
use secrecy::ExposeSecret as _;

use crate::{
    client::{UiCallBack, NO_ARGUMENT},
    Client,
};

mod admin;
mod books;
mod circulation;

impl Client {
    /// Self registration, does not log in
    #[tracing::instrument(skip(ui_notify))]
    pub fn register<F: UiCallBack>(
        &self,
        args: RegisterReqArgs,
        ui_notify: F,
    ) -> oneshot::Receiver<anyhow::Result<MessageResponse>> {
        if let Err(e) = args.validate() {
            return self.immediate_result(Err(e.into()), ui_notify);
        }
        let args = serde_json::json!({
            "username": args.username,
            "password": args.password.expose_secret(),
            "name": args.name,
            "email": args.email,
            "phone": args.phone,
        });
        self.send_request_expect_json(PATH_REGISTER, &args, ui_notify)
    }

    /// The current user's profile with their open loans and unpaid fines
    #[tracing::instrument(skip(ui_notify))]
    pub fn dashboard<F: UiCallBack>(
        &self,
        ui_notify: F,
    ) -> oneshot::Receiver<anyhow::Result<Dashboard>> {
        self.send_request_expect_json(PATH_API_DASHBOARD, &NO_ARGUMENT, ui_notify)
    }
}
