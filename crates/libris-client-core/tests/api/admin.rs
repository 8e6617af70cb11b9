use libris_shared::{
    errors::InvalidArgsError,
    req_args::RegisterReqArgs,
    uac::{Role, UserProfileDiff},
};
use libris_test_helper::TestUser;

use crate::helpers::{login, login_assert, no_cb, receive, spawn_app, status_of};

fn register_args(user: &TestUser) -> RegisterReqArgs {
    RegisterReqArgs {
        username: user.username.as_str().try_into().unwrap(),
        password: user.password.clone().into(),
        name: user.name.clone(),
        email: "new.user@example.com".to_string(),
        phone: "01234567890".to_string(),
    }
}

#[tokio::test]
async fn registered_user_can_login_as_patron() {
    // Arrange
    let app = spawn_app().await;
    let user = TestUser::generate("reader");

    // Act
    let response = receive(app.core_client.register(register_args(&user), no_cb))
        .await
        .unwrap();

    // Assert
    assert_eq!(response.message, "User registered successfully");
    assert!(
        !app.core_client.is_authenticated(),
        "registering does not log in"
    );
    let profile = login_assert(&app, &user).await;
    assert_eq!(profile.role, Role::Patron);
    assert_eq!(profile.phone, "01234567890");
}

#[tokio::test]
async fn duplicate_username_is_rejected() {
    // Arrange
    let app = spawn_app().await;
    let mut user = TestUser::generate("reader");
    user.username = app.patron.username.clone();

    // Act
    let err = receive(app.core_client.register(register_args(&user), no_cb))
        .await
        .unwrap_err();

    // Assert
    assert_eq!(status_of(&err), 400);
    assert_eq!(err.to_string(), "Username already exists");
}

#[tokio::test]
async fn invalid_registration_is_never_sent() {
    // Arrange
    let app = spawn_app().await;
    let mut args = register_args(&TestUser::generate("reader"));
    args.phone = "12345".to_string();

    // Act
    let err = receive(app.core_client.register(args, no_cb))
        .await
        .unwrap_err();

    // Assert
    assert_eq!(err.downcast_ref::<InvalidArgsError>().unwrap().field, "phone");
    assert!(app.backend.last_request_to("/api/register").is_none());
}

#[tokio::test]
async fn list_users_excludes_librarians() {
    // Arrange
    let app = spawn_app().await;
    login_assert(&app, &app.librarian).await;

    // Act
    let users = receive(app.core_client.list_users(no_cb)).await.unwrap();

    // Assert
    let usernames: Vec<_> = users.iter().map(|user| user.username.as_str()).collect();
    assert_eq!(usernames, [app.patron.username.as_str()]);
}

#[tokio::test]
async fn patron_cannot_use_admin_endpoints() {
    // Arrange
    let app = spawn_app().await;
    login_assert(&app, &app.patron).await;

    // Act
    let list = receive(app.core_client.list_users(no_cb)).await;
    let reports = receive(app.core_client.reports(no_cb)).await;
    let delete = receive(app.core_client.delete_user(app.librarian.id(), no_cb)).await;

    // Assert
    assert_eq!(status_of(&list.unwrap_err()), 403);
    assert_eq!(status_of(&reports.unwrap_err()), 403);
    assert_eq!(status_of(&delete.unwrap_err()), 403);
}

#[tokio::test]
async fn update_user_changes_only_given_fields() {
    // Arrange
    let app = spawn_app().await;
    login_assert(&app, &app.librarian).await;
    let id = app.patron.id();
    let before = receive(app.core_client.get_user(id, no_cb)).await.unwrap();
    let mut after = before.clone();
    after.email = "bob@library.test".to_string();
    let diff = UserProfileDiff::from_diff(&before, &after).unwrap().unwrap();

    // Act
    receive(app.core_client.update_user(id, diff, no_cb))
        .await
        .unwrap();

    // Assert
    let actual = receive(app.core_client.get_user(id, no_cb)).await.unwrap();
    assert_eq!(actual, after);
}

#[tokio::test]
async fn deleted_user_can_no_longer_login() {
    // Arrange
    let app = spawn_app().await;
    login_assert(&app, &app.librarian).await;

    // Act
    receive(app.core_client.delete_user(app.patron.id(), no_cb))
        .await
        .unwrap();

    // Assert
    let err = receive(app.core_client.get_user(app.patron.id(), no_cb))
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "User not found");
    app.core_client.logout().unwrap();
    assert!(login(&app, &app.patron).await.is_err());
}

#[tokio::test]
async fn reports_summarise_circulation() {
    // Arrange
    let app = spawn_app().await;
    login_assert(&app, &app.patron).await;
    let dune = app.backend.book_id("Dune").unwrap();
    receive(app.core_client.borrow_book(dune, no_cb))
        .await
        .unwrap();
    app.core_client.logout().unwrap();
    login_assert(&app, &app.librarian).await;
    receive(app.core_client.borrow_book(dune, no_cb))
        .await
        .unwrap();

    // Act
    let report = receive(app.core_client.reports(no_cb)).await.unwrap();

    // Assert
    assert_eq!(report.total_books, 2);
    assert_eq!(report.total_loans, 2);
    assert_eq!(report.total_fines, 0.0);
    assert!(report.overdue_loans.is_empty());
    assert!(report.unpaid_fines.is_empty());
    insta::assert_json_snapshot!(report.most_popular_books, @r#"
    [
      {
        "title": "Dune",
        "count": 2
      }
    ]
    "#);
}
