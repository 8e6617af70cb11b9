use futures::channel::oneshot;
use libris_client_core::{storage::MemoryStorage, Client, LoginOutcome, SessionStore};
use libris_shared::uac::UserProfile;
use libris_test_helper::TestUser;
use std::sync::Arc;

pub use libris_test_helper::{no_cb, TestApp};

pub async fn spawn_app() -> TestApp<Client> {
    spawn_app_with_storage().await.0
}

/// Also returns a handle to the storage behind the client's session
pub async fn spawn_app_with_storage() -> (TestApp<Client>, MemoryStorage) {
    let storage = MemoryStorage::new();
    let session_storage = storage.clone();
    let app = libris_test_helper::spawn_app(move |address| {
        let session = SessionStore::load(Box::new(session_storage))
            .expect("failed to load session from empty storage");
        Client::new(address, session)
    })
    .await;
    (app, storage)
}

pub async fn receive<T>(rx: oneshot::Receiver<anyhow::Result<T>>) -> anyhow::Result<T> {
    rx.await.expect("failed to receive on rx")
}

pub async fn login(app: &TestApp<Client>, user: &TestUser) -> anyhow::Result<LoginOutcome> {
    receive(app.core_client.login(user.login_args(), no_cb)).await
}

/// Logs in and checks the profile was stored
pub async fn login_assert(app: &TestApp<Client>, user: &TestUser) -> Arc<UserProfile> {
    match login(app, user).await.expect("failed to login") {
        LoginOutcome::Authenticated(profile) => profile,
        LoginOutcome::TokenOnly(e) => panic!("profile fetch failed after login: {e:?}"),
    }
}

/// Status code of the error response behind `err`
pub fn status_of(err: &anyhow::Error) -> u16 {
    err.downcast_ref::<libris_client_core::ResponseError>()
        .unwrap_or_else(|| panic!("not a response error: {err:?}"))
        .status
        .as_u16()
}
