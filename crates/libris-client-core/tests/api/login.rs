use libris_client_core::{LoginOutcome, Navigation, ResponseError, SessionError, View};
use libris_shared::{
    const_config::storage_key::{STORAGE_KEY_ROLE, STORAGE_KEY_TOKEN, STORAGE_KEY_USER},
    uac::{Role, UserProfile},
};
use std::sync::{Arc, Mutex};

use crate::helpers::{login, login_assert, no_cb, receive, spawn_app, spawn_app_with_storage};

fn authentication_failure_status(err: &anyhow::Error) -> u16 {
    let Some(SessionError::Authentication(source)) = err.downcast_ref::<SessionError>() else {
        panic!("expected an authentication error but got: {err:?}");
    };
    source
        .downcast_ref::<ResponseError>()
        .expect("authentication failure should come from the response")
        .status
        .as_u16()
}

#[tokio::test]
async fn librarian_login_stores_token_profile_and_role() {
    // Arrange
    let (app, storage) = spawn_app_with_storage().await;
    app.backend.set_next_token("T1");

    // Act
    let outcome = login(&app, &app.librarian).await.unwrap();

    // Assert - Outcome and session
    let LoginOutcome::Authenticated(profile) = outcome else {
        panic!("expected authenticated outcome but got: {outcome:?}");
    };
    assert_eq!(profile.role, Role::Librarian);
    assert_eq!(profile.username, app.librarian.username);
    assert!(app.core_client.is_authenticated());
    assert_eq!(app.core_client.role(), Some(Role::Librarian));
    assert_eq!(app.core_client.session().token, "T1");

    // Assert - Durable mirror
    let slots = storage.snapshot();
    assert_eq!(slots[STORAGE_KEY_TOKEN], "T1");
    assert_eq!(slots[STORAGE_KEY_ROLE], "librarian");
    let stored: UserProfile = serde_json::from_str(&slots[STORAGE_KEY_USER]).unwrap();
    assert_eq!(stored, *profile);

    // Assert - Profile fetched with the new token
    let dashboard_request = app.backend.last_request_to("/api/dashboard").unwrap();
    assert_eq!(dashboard_request.authorization.as_deref(), Some("Bearer T1"));
    let login_request = app.backend.last_request_to("/api/login").unwrap();
    assert_eq!(login_request.authorization, None);

    // Assert - Guard sees the role
    assert_eq!(
        app.core_client.navigate("/librarian"),
        Navigation::Show {
            view: View::LibrarianDashboard,
            params: Default::default()
        }
    );
}

#[tokio::test]
async fn login_failure_invalid_password_changes_nothing() {
    // Arrange
    let (app, storage) = spawn_app_with_storage().await;
    let mut user = app.patron.clone();
    user.password = "random-password".to_string();

    // Act
    let err = login(&app, &user).await.unwrap_err();

    // Assert
    assert_eq!(authentication_failure_status(&err), 401);
    assert!(!app.core_client.is_authenticated());
    assert_eq!(app.core_client.user(), None);
    assert!(storage.snapshot().is_empty(), "no durable writes expected");
    assert!(
        app.backend.last_request_to("/api/dashboard").is_none(),
        "profile should not be fetched"
    );
}

#[tokio::test]
async fn login_failure_invalid_user() {
    // Arrange
    let app = spawn_app().await;
    let user = libris_test_helper::TestUser::generate("unknown");

    // Act
    let err = login(&app, &user).await.unwrap_err();

    // Assert
    assert_eq!(authentication_failure_status(&err), 401);
    assert_eq!(err.to_string(), "login failed");
}

#[tokio::test]
async fn login_failure_server_error() {
    // Arrange
    let (app, storage) = spawn_app_with_storage().await;
    app.backend.set_fail_login(true);

    // Act
    let err = login(&app, &app.patron).await.unwrap_err();

    // Assert
    assert_eq!(authentication_failure_status(&err), 500);
    assert!(storage.snapshot().is_empty());
}

#[tokio::test]
async fn profile_fetch_failure_keeps_token_without_user() {
    // Arrange
    let (app, storage) = spawn_app_with_storage().await;
    app.backend.set_next_token("T2");
    app.backend.set_fail_dashboard(true);

    // Act
    let outcome = login(&app, &app.librarian).await.unwrap();

    // Assert
    let LoginOutcome::TokenOnly(e) = outcome else {
        panic!("expected token only outcome but got: {outcome:?}");
    };
    assert!(e.is_profile_fetch());
    assert!(app.core_client.is_authenticated());
    assert_eq!(app.core_client.user(), None);
    assert_eq!(app.core_client.role(), None);
    let slots = storage.snapshot();
    assert_eq!(slots.get(STORAGE_KEY_TOKEN).map(String::as_str), Some("T2"));
    assert!(!slots.contains_key(STORAGE_KEY_USER));
    assert!(!slots.contains_key(STORAGE_KEY_ROLE));

    // Authenticated routes open but the role is unknown
    assert!(matches!(
        app.core_client.navigate("/dashboard"),
        Navigation::Show {
            view: View::UserDashboard,
            ..
        }
    ));
    assert_eq!(
        app.core_client.navigate("/librarian"),
        Navigation::Redirect { to: "/" }
    );
}

#[tokio::test]
async fn profile_can_be_fetched_again_after_token_only_login() {
    // Arrange
    let app = spawn_app().await;
    app.backend.set_fail_dashboard(true);
    let outcome = login(&app, &app.patron).await.unwrap();
    assert!(!outcome.is_authenticated());
    app.backend.set_fail_dashboard(false);

    // Act
    let dashboard = receive(app.core_client.dashboard(no_cb)).await.unwrap();
    app.core_client.set_user(dashboard.user).unwrap();

    // Assert
    assert_eq!(app.core_client.role(), Some(Role::Patron));
}

#[tokio::test]
async fn login_logout_round_trip() {
    // Arrange
    let (app, storage) = spawn_app_with_storage().await;
    assert!(
        !app.core_client.is_authenticated(),
        "should not be logged in before logging in"
    );

    // Act - Login
    login_assert(&app, &app.patron).await;

    // Assert - Logged in
    assert!(
        app.core_client.is_authenticated(),
        "should be logged in after logging in"
    );
    assert_eq!(storage.snapshot().len(), 3);

    // Act - Logout
    app.core_client.logout().unwrap();

    // Assert - Logged out locally and in storage
    assert!(!app.core_client.is_authenticated());
    assert_eq!(app.core_client.role(), None);
    assert!(storage.snapshot().is_empty());

    // Assert - Later requests carry no credential and are rejected
    let err = receive(app.core_client.dashboard(no_cb)).await.unwrap_err();
    assert!(err.downcast_ref::<ResponseError>().unwrap().is_unauthorized());
    let request = app.backend.last_request_to("/api/dashboard").unwrap();
    assert_eq!(request.authorization, None);
}

#[tokio::test]
async fn ensure_call_back_is_run() {
    // Arrange
    let app = spawn_app().await;
    let test_flag = Arc::new(Mutex::new(false));
    let test_flag_clone = Arc::clone(&test_flag);

    // Act
    let outcome = receive(app.core_client.login(app.patron.login_args(), move || {
        *test_flag_clone.lock().unwrap() = true;
    }))
    .await
    .expect("failed to get result of login");

    // Assert
    assert!(outcome.is_authenticated());
    assert!(*test_flag.lock().unwrap(), "flag was not flipped");
}
