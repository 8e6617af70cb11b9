use futures::channel::oneshot;
use libris_shared::{
    const_config::path::{
        PATH_API_BOOK, PATH_API_BOOKS, PATH_API_BOOK_DELETE, PATH_API_BOOK_NEW,
        PATH_API_BOOK_UPDATE,
    },
    id::DbId,
    library::Book,
    req_args::api::{BookDraft, BookSearchReqArgs},
    uac::MessageResponse,
};

use crate::{
    client::{UiCallBack, NO_ARGUMENT},
    Client,
};

impl Client {
    /// Books whose title or author contains `search`, all books if empty
    #[tracing::instrument(skip(ui_notify))]
    pub fn search_books<F: UiCallBack>(
        &self,
        search: String,
        ui_notify: F,
    ) -> oneshot::Receiver<anyhow::Result<Vec<Book>>> {
        let args = BookSearchReqArgs { search };
        self.send_request_expect_json(PATH_API_BOOKS, &args, ui_notify)
    }

    #[tracing::instrument(skip(ui_notify))]
    pub fn get_book<F: UiCallBack>(
        &self,
        id: DbId,
        ui_notify: F,
    ) -> oneshot::Receiver<anyhow::Result<Book>> {
        self.send_request_expect_json(PATH_API_BOOK.with_id(id), &NO_ARGUMENT, ui_notify)
    }

    #[tracing::instrument(skip(ui_notify))]
    pub fn add_book<F: UiCallBack>(
        &self,
        draft: BookDraft,
        ui_notify: F,
    ) -> oneshot::Receiver<anyhow::Result<MessageResponse>> {
        if let Err(e) = draft.validate() {
            return self.immediate_result(Err(e.into()), ui_notify);
        }
        self.send_request_expect_json(PATH_API_BOOK_NEW, &draft, ui_notify)
    }

    /// Replaces every editable field, the backend adjusts the available
    /// copies by the change in total copies
    #[tracing::instrument(skip(ui_notify))]
    pub fn update_book<F: UiCallBack>(
        &self,
        id: DbId,
        draft: BookDraft,
        ui_notify: F,
    ) -> oneshot::Receiver<anyhow::Result<MessageResponse>> {
        if let Err(e) = draft.validate() {
            return self.immediate_result(Err(e.into()), ui_notify);
        }
        self.send_request_expect_json(PATH_API_BOOK_UPDATE.with_id(id), &draft, ui_notify)
    }

    #[tracing::instrument(skip(ui_notify))]
    pub fn delete_book<F: UiCallBack>(
        &self,
        id: DbId,
        ui_notify: F,
    ) -> oneshot::Receiver<anyhow::Result<MessageResponse>> {
        self.send_request_expect_json(PATH_API_BOOK_DELETE.with_id(id), &NO_ARGUMENT, ui_notify)
    }
}
