use chrono::{Duration, Utc};

use crate::helpers::{login_assert, no_cb, receive, spawn_app, status_of};

#[tokio::test]
async fn borrow_shows_loan_on_dashboard() {
    // Arrange
    let app = spawn_app().await;
    login_assert(&app, &app.patron).await;
    let book_id = app.backend.book_id("Emma").unwrap();

    // Act
    let response = receive(app.core_client.borrow_book(book_id, no_cb))
        .await
        .unwrap();

    // Assert
    assert_eq!(response.message, "Book borrowed successfully");
    let dashboard = receive(app.core_client.dashboard(no_cb)).await.unwrap();
    assert_eq!(dashboard.loans.len(), 1);
    let loan = &dashboard.loans[0];
    assert_eq!(loan.book_id, book_id);
    assert_eq!(loan.book_title, "Emma");
    assert_eq!(loan.user.name, app.patron.name);
    assert!(!loan.is_overdue(Utc::now().naive_utc()));
    assert_eq!(app.backend.book(book_id).unwrap().copies_available, 0);
}

#[tokio::test]
async fn borrow_unavailable_book_fails() {
    // Arrange
    let app = spawn_app().await;
    login_assert(&app, &app.patron).await;
    let book_id = app.backend.book_id("Emma").unwrap();
    receive(app.core_client.borrow_book(book_id, no_cb))
        .await
        .unwrap();

    // Act
    let err = receive(app.core_client.borrow_book(book_id, no_cb))
        .await
        .unwrap_err();

    // Assert
    assert_eq!(status_of(&err), 400);
    assert_eq!(err.to_string(), "No copies available");
}

#[tokio::test]
async fn second_hold_on_same_book_fails() {
    // Arrange
    let app = spawn_app().await;
    login_assert(&app, &app.patron).await;
    let book_id = app.backend.book_id("Dune").unwrap();

    // Act
    let first = receive(app.core_client.place_hold(book_id, no_cb)).await;
    let second = receive(app.core_client.place_hold(book_id, no_cb)).await;

    // Assert
    assert_eq!(first.unwrap().message, "Hold placed successfully");
    let err = second.unwrap_err();
    assert_eq!(err.to_string(), "You already have a hold on this book");
}

#[tokio::test]
async fn return_on_time_adds_no_fine() {
    // Arrange
    let app = spawn_app().await;
    login_assert(&app, &app.patron).await;
    let book_id = app.backend.book_id("Dune").unwrap();
    receive(app.core_client.borrow_book(book_id, no_cb))
        .await
        .unwrap();
    let loan_id = receive(app.core_client.dashboard(no_cb)).await.unwrap().loans[0].id;

    // Act
    receive(app.core_client.return_book(loan_id, no_cb))
        .await
        .unwrap();

    // Assert
    let dashboard = receive(app.core_client.dashboard(no_cb)).await.unwrap();
    assert!(dashboard.loans.is_empty());
    assert!(dashboard.fines.is_empty());
    assert_eq!(app.backend.book(book_id).unwrap().copies_available, 2);
}

#[tokio::test]
async fn late_return_adds_fine_which_can_be_paid() {
    // Arrange
    let app = spawn_app().await;
    login_assert(&app, &app.patron).await;
    let book_id = app.backend.book_id("Dune").unwrap();
    receive(app.core_client.borrow_book(book_id, no_cb))
        .await
        .unwrap();
    let loan_id = receive(app.core_client.dashboard(no_cb)).await.unwrap().loans[0].id;
    app.backend
        .set_loan_due_date(loan_id, Utc::now().naive_utc() - Duration::days(3));

    // Act - Return
    receive(app.core_client.return_book(loan_id, no_cb))
        .await
        .unwrap();

    // Assert - Fined
    let dashboard = receive(app.core_client.dashboard(no_cb)).await.unwrap();
    assert_eq!(dashboard.fines.len(), 1);
    assert_eq!(dashboard.outstanding_fines_total(), 1.5);
    assert_eq!(dashboard.fines[0].description, "Overdue fine for \"Dune\"");

    // Act - Pay
    let fine_id = dashboard.fines[0].id;
    receive(app.core_client.pay_fine(fine_id, no_cb))
        .await
        .unwrap();

    // Assert - Paid
    let dashboard = receive(app.core_client.dashboard(no_cb)).await.unwrap();
    assert!(dashboard.fines.is_empty());
    let err = receive(app.core_client.pay_fine(fine_id, no_cb))
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "Invalid fine record");
}

#[tokio::test]
async fn cannot_return_another_users_loan() {
    // Arrange
    let app = spawn_app().await;
    login_assert(&app, &app.patron).await;
    let book_id = app.backend.book_id("Dune").unwrap();
    receive(app.core_client.borrow_book(book_id, no_cb))
        .await
        .unwrap();
    let loan_id = receive(app.core_client.dashboard(no_cb)).await.unwrap().loans[0].id;
    app.core_client.logout().unwrap();
    login_assert(&app, &app.librarian).await;

    // Act
    let err = receive(app.core_client.return_book(loan_id, no_cb))
        .await
        .unwrap_err();

    // Assert
    assert_eq!(status_of(&err), 400);
    assert_eq!(err.to_string(), "Invalid loan record");
}
