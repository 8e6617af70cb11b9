use futures::channel::oneshot;
use libris_shared::{
    const_config::path::{PATH_API_BORROW, PATH_API_HOLD, PATH_API_PAY_FINE, PATH_API_RETURN},
    id::DbId,
    uac::MessageResponse,
};

use crate::{
    client::{UiCallBack, NO_ARGUMENT},
    Client,
};

impl Client {
    #[tracing::instrument(skip(ui_notify))]
    pub fn place_hold<F: UiCallBack>(
        &self,
        book_id: DbId,
        ui_notify: F,
    ) -> oneshot::Receiver<anyhow::Result<MessageResponse>> {
        self.send_request_expect_json(PATH_API_HOLD.with_id(book_id), &NO_ARGUMENT, ui_notify)
    }

    /// Loans are due 14 days after borrowing
    #[tracing::instrument(skip(ui_notify))]
    pub fn borrow_book<F: UiCallBack>(
        &self,
        book_id: DbId,
        ui_notify: F,
    ) -> oneshot::Receiver<anyhow::Result<MessageResponse>> {
        self.send_request_expect_json(PATH_API_BORROW.with_id(book_id), &NO_ARGUMENT, ui_notify)
    }

    /// Takes the loan id, not the book id. Returning late adds a fine.
    #[tracing::instrument(skip(ui_notify))]
    pub fn return_book<F: UiCallBack>(
        &self,
        loan_id: DbId,
        ui_notify: F,
    ) -> oneshot::Receiver<anyhow::Result<MessageResponse>> {
        self.send_request_expect_json(PATH_API_RETURN.with_id(loan_id), &NO_ARGUMENT, ui_notify)
    }

    #[tracing::instrument(skip(ui_notify))]
    pub fn pay_fine<F: UiCallBack>(
        &self,
        fine_id: DbId,
        ui_notify: F,
    ) -> oneshot::Receiver<anyhow::Result<MessageResponse>> {
        self.send_request_expect_json(PATH_API_PAY_FINE.with_id(fine_id), &NO_ARGUMENT, ui_notify)
    }
}
