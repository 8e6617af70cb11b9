use libris_shared::{errors::InvalidArgsError, req_args::api::BookDraft};

use crate::helpers::{login_assert, no_cb, receive, spawn_app, status_of};

fn draft() -> BookDraft {
    BookDraft {
        title: "The Left Hand of Darkness".to_string(),
        author: "Ursula K. Le Guin".to_string(),
        isbn: "9780441478125".to_string(),
        publisher: "Ace".to_string(),
        publication_year: 1969,
        total_copies: 3,
        location: "Shelf B".to_string(),
    }
}

#[tokio::test]
async fn search_requires_login() {
    // Arrange
    let app = spawn_app().await;

    // Act
    let err = receive(app.core_client.search_books(String::new(), no_cb))
        .await
        .unwrap_err();

    // Assert
    assert_eq!(status_of(&err), 401);
    let request = app.backend.last_request_to("/api/books").unwrap();
    assert_eq!(request.authorization, None);
}

#[tokio::test]
async fn search_empty_lists_all() {
    // Arrange
    let app = spawn_app().await;
    login_assert(&app, &app.patron).await;

    // Act
    let books = receive(app.core_client.search_books(String::new(), no_cb))
        .await
        .unwrap();

    // Assert
    let mut titles: Vec<_> = books.iter().map(|book| book.title.as_str()).collect();
    titles.sort();
    assert_eq!(titles, ["Dune", "Emma"]);
}

#[tokio::test]
async fn search_matches_author_case_insensitively() {
    // Arrange
    let app = spawn_app().await;
    login_assert(&app, &app.patron).await;

    // Act
    let books = receive(app.core_client.search_books("AUSTEN".to_string(), no_cb))
        .await
        .unwrap();

    // Assert
    assert_eq!(books.len(), 1);
    assert_eq!(books[0].title, "Emma");
    let request = app.backend.last_request_to("/api/books").unwrap();
    assert_eq!(request.method, "GET");
    assert_eq!(request.query, "search=AUSTEN");
}

#[tokio::test]
async fn get_book_by_id() {
    // Arrange
    let app = spawn_app().await;
    login_assert(&app, &app.patron).await;
    let id = app.backend.book_id("Dune").unwrap();

    // Act
    let book = receive(app.core_client.get_book(id, no_cb)).await.unwrap();

    // Assert
    assert_eq!(book.id, id);
    assert_eq!(book.author, "Frank Herbert");
    assert!(book.is_available());
}

#[tokio::test]
async fn get_missing_book_reports_backend_message() {
    // Arrange
    let app = spawn_app().await;
    login_assert(&app, &app.patron).await;

    // Act
    let err = receive(app.core_client.get_book(999u64.into(), no_cb))
        .await
        .unwrap_err();

    // Assert
    assert_eq!(status_of(&err), 404);
    assert_eq!(err.to_string(), "Book not found");
}

#[tokio::test]
async fn librarian_can_add_update_and_delete_book() {
    // Arrange
    let app = spawn_app().await;
    login_assert(&app, &app.librarian).await;

    // Act - Add
    let added = receive(app.core_client.add_book(draft(), no_cb))
        .await
        .unwrap();

    // Assert - Add
    assert_eq!(added.message, "Book added successfully");
    let id = app.backend.book_id(&draft().title).unwrap();
    let book = app.backend.book(id).unwrap();
    assert_eq!(book.copies_available, 3);

    // Act - Update
    let mut changed = draft();
    changed.total_copies = 5;
    changed.location = "Shelf C".to_string();
    receive(app.core_client.update_book(id, changed, no_cb))
        .await
        .unwrap();

    // Assert - Update
    let book = app.backend.book(id).unwrap();
    assert_eq!(book.total_copies, 5);
    assert_eq!(book.copies_available, 5);
    assert_eq!(book.location, "Shelf C");

    // Act - Delete
    receive(app.core_client.delete_book(id, no_cb))
        .await
        .unwrap();

    // Assert - Delete
    assert!(app.backend.book(id).is_none());
    let err = receive(app.core_client.get_book(id, no_cb))
        .await
        .unwrap_err();
    assert_eq!(status_of(&err), 404);
}

#[tokio::test]
async fn duplicate_isbn_is_rejected() {
    // Arrange
    let app = spawn_app().await;
    login_assert(&app, &app.librarian).await;
    receive(app.core_client.add_book(draft(), no_cb))
        .await
        .unwrap();

    // Act
    let err = receive(app.core_client.add_book(draft(), no_cb))
        .await
        .unwrap_err();

    // Assert
    assert_eq!(status_of(&err), 400);
    assert_eq!(err.to_string(), "Book with this ISBN already exists");
}

#[tokio::test]
async fn patron_cannot_add_book() {
    // Arrange
    let app = spawn_app().await;
    login_assert(&app, &app.patron).await;

    // Act
    let err = receive(app.core_client.add_book(draft(), no_cb))
        .await
        .unwrap_err();

    // Assert
    let response = err
        .downcast_ref::<libris_client_core::ResponseError>()
        .unwrap();
    assert!(response.is_forbidden());
    assert_eq!(response.message, "Access denied");
}

#[tokio::test]
async fn invalid_book_is_never_sent() {
    // Arrange
    let app = spawn_app().await;
    login_assert(&app, &app.librarian).await;
    let mut invalid = draft();
    invalid.total_copies = 0;
    let request_count = app.backend.requests().len();

    // Act
    let err = receive(app.core_client.add_book(invalid, no_cb))
        .await
        .unwrap_err();

    // Assert
    let err = err.downcast_ref::<InvalidArgsError>().unwrap();
    assert_eq!(err.field, "total_copies");
    assert_eq!(app.backend.requests().len(), request_count);
}
