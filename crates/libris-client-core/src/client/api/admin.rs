//! Librarian only endpoints, other roles get a 403

use futures::channel::oneshot;
use libris_shared::{
    const_config::path::{
        PATH_API_REPORTS, PATH_API_USER, PATH_API_USERS, PATH_API_USER_DELETE,
        PATH_API_USER_UPDATE,
    },
    id::DbId,
    library::Report,
    uac::{MessageResponse, UserProfile, UserProfileDiff},
};

use crate::{
    client::{UiCallBack, NO_ARGUMENT},
    Client,
};

impl Client {
    /// All users that are not librarians
    #[tracing::instrument(skip(ui_notify))]
    pub fn list_users<F: UiCallBack>(
        &self,
        ui_notify: F,
    ) -> oneshot::Receiver<anyhow::Result<Vec<UserProfile>>> {
        self.send_request_expect_json(PATH_API_USERS, &NO_ARGUMENT, ui_notify)
    }

    #[tracing::instrument(skip(ui_notify))]
    pub fn get_user<F: UiCallBack>(
        &self,
        id: DbId,
        ui_notify: F,
    ) -> oneshot::Receiver<anyhow::Result<UserProfile>> {
        self.send_request_expect_json(PATH_API_USER.with_id(id), &NO_ARGUMENT, ui_notify)
    }

    /// Only the fields set in `diff` are sent
    #[tracing::instrument(skip(ui_notify))]
    pub fn update_user<F: UiCallBack>(
        &self,
        id: DbId,
        diff: UserProfileDiff,
        ui_notify: F,
    ) -> oneshot::Receiver<anyhow::Result<MessageResponse>> {
        self.send_request_expect_json(PATH_API_USER_UPDATE.with_id(id), &diff, ui_notify)
    }

    #[tracing::instrument(skip(ui_notify))]
    pub fn delete_user<F: UiCallBack>(
        &self,
        id: DbId,
        ui_notify: F,
    ) -> oneshot::Receiver<anyhow::Result<MessageResponse>> {
        self.send_request_expect_json(PATH_API_USER_DELETE.with_id(id), &NO_ARGUMENT, ui_notify)
    }

    #[tracing::instrument(skip(ui_notify))]
    pub fn reports<F: UiCallBack>(
        &self,
        ui_notify: F,
    ) -> oneshot::Receiver<anyhow::Result<Report>> {
        self.send_request_expect_json(PATH_API_REPORTS, &NO_ARGUMENT, ui_notify)
    }
}
