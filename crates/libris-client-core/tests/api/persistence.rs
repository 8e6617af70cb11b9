use libris_client_core::{
    storage::{FileStorage, MemoryStorage},
    Client, SessionStore,
};
use libris_shared::uac::Role;

use crate::helpers::{login_assert, no_cb, receive, spawn_app_with_storage};

#[tokio::test]
async fn session_survives_restart() {
    // Arrange
    let (app, storage) = spawn_app_with_storage().await;
    let profile = login_assert(&app, &app.librarian).await;

    // Act
    let session = SessionStore::load(Box::new(storage.clone())).unwrap();
    let restarted = Client::new(app.address.clone(), session);

    // Assert
    assert_eq!(restarted.user().as_deref(), Some(&*profile));
    assert_eq!(restarted.role(), Some(Role::Librarian));
    let report = receive(restarted.reports(no_cb)).await;
    assert!(report.is_ok(), "restored token should be accepted: {report:?}");
}

#[tokio::test]
async fn file_storage_session_survives_restart() {
    // Arrange
    let dir = tempfile::tempdir().unwrap();
    let (app, _) = spawn_app_with_storage().await;
    let client = Client::new(
        app.address.clone(),
        SessionStore::load(Box::new(FileStorage::open(dir.path()).unwrap())).unwrap(),
    );
    app.backend.set_next_token("file-token");
    receive(client.login(app.patron.login_args(), no_cb))
        .await
        .unwrap();

    // Act
    let restarted = Client::new(
        app.address.clone(),
        SessionStore::load(Box::new(FileStorage::open(dir.path()).unwrap())).unwrap(),
    );

    // Assert
    assert_eq!(restarted.session().token, "file-token");
    assert_eq!(restarted.role(), Some(Role::Patron));
    let dashboard = receive(restarted.dashboard(no_cb)).await.unwrap();
    assert_eq!(dashboard.user.username, app.patron.username);
}

#[tokio::test]
async fn separate_storages_do_not_share_sessions() {
    // Arrange
    let (app, _) = spawn_app_with_storage().await;
    login_assert(&app, &app.patron).await;

    // Act
    let other = Client::new(
        app.address.clone(),
        SessionStore::load(Box::new(MemoryStorage::new())).unwrap(),
    );

    // Assert
    assert!(!other.is_authenticated());
}
