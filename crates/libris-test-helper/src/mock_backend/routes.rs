use actix_web::{
    http::{header::AUTHORIZATION, StatusCode},
    web, HttpRequest, HttpResponse, ResponseError,
};
use chrono::{Duration, Utc};
use libris_shared::{
    id::DbId,
    library::{Book, Dashboard, Fine, Hold, Loan, PopularBook, Report, UserSummary},
    req_args::{api::BookDraft, LoginReqArgs, RegisterReqArgs},
    uac::{LoginResponse, MessageResponse, Role, UserProfile, UserProfileDiff},
};
use secrecy::ExposeSecret as _;
use std::{collections::BTreeMap, fmt::Display, sync::MutexGuard};
use uuid::Uuid;

use super::{MockData, MockState, StoredUser};

const LOAN_PERIOD_DAYS: i64 = 14;
const FINE_PER_DAY_OVERDUE: f64 = 0.5;
const MOST_POPULAR_LIMIT: usize = 5;

pub(super) fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .route("/register", web::post().to(register))
            .route("/login", web::post().to(login))
            .route("/dashboard", web::get().to(dashboard))
            .route("/books", web::get().to(book_list))
            .route("/books", web::post().to(book_new))
            .route("/books/{id}", web::get().to(book_get))
            .route("/books/{id}", web::put().to(book_update))
            .route("/books/{id}", web::delete().to(book_delete))
            .route("/hold/{id}", web::post().to(hold))
            .route("/borrow/{id}", web::post().to(borrow))
            .route("/return/{id}", web::post().to(return_loan))
            .route("/payfine/{id}", web::post().to(pay_fine))
            .route("/users", web::get().to(user_list))
            .route("/users/{id}", web::get().to(user_get))
            .route("/users/{id}", web::put().to(user_update))
            .route("/users/{id}", web::delete().to(user_delete))
            .route("/reports", web::get().to(reports)),
    );
}

/// A failed request, sent as `{"message": ...}` with the status code
#[derive(Debug)]
struct Rejection {
    status: StatusCode,
    message: String,
}

impl Display for Rejection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.status, self.message)
    }
}

impl ResponseError for Rejection {
    fn status_code(&self) -> StatusCode {
        self.status
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status).json(MessageResponse::new(self.message.clone()))
    }
}

fn reject<S: Into<String>>(status: StatusCode, message: S) -> Rejection {
    Rejection {
        status,
        message: message.into(),
    }
}

type Reply = Result<HttpResponse, Rejection>;

fn ok_message(message: &str) -> Reply {
    Ok(HttpResponse::Ok().json(MessageResponse::new(message)))
}

fn lock(state: &web::Data<MockState>) -> MutexGuard<'_, MockData> {
    state.lock().expect("mock state mutex poisoned")
}

/// Resolves the bearer token to a stored user
fn authenticate(req: &HttpRequest, data: &MockData) -> Result<DbId, Rejection> {
    let header = req
        .headers()
        .get(AUTHORIZATION)
        .ok_or_else(|| reject(StatusCode::UNAUTHORIZED, "Missing Authorization Header"))?;
    let user_id = header
        .to_str()
        .ok()
        .and_then(|value| value.strip_prefix("Bearer "))
        .and_then(|token| data.tokens.get(token))
        .ok_or_else(|| reject(StatusCode::UNAUTHORIZED, "Invalid token"))?;
    if data.users.contains_key(user_id) {
        Ok(*user_id)
    } else {
        Err(reject(StatusCode::UNAUTHORIZED, "Invalid token"))
    }
}

fn require_librarian(req: &HttpRequest, data: &MockData) -> Result<DbId, Rejection> {
    let user_id = authenticate(req, data)?;
    if data.users[&user_id].profile.role.is_librarian() {
        Ok(user_id)
    } else {
        Err(reject(StatusCode::FORBIDDEN, "Access denied"))
    }
}

fn user_summary(data: &MockData, user_id: DbId) -> UserSummary {
    UserSummary {
        id: user_id,
        name: data
            .users
            .get(&user_id)
            .map(|user| user.profile.name.clone())
            .unwrap_or_default(),
    }
}

fn validation_error(e: impl Display) -> Rejection {
    reject(StatusCode::BAD_REQUEST, format!("Validation errors: {e}"))
}

async fn register(
    state: web::Data<MockState>,
    web::Json(args): web::Json<RegisterReqArgs>,
) -> Reply {
    args.validate().map_err(validation_error)?;
    let mut data = lock(&state);
    let username = args.username.to_string();
    if data
        .users
        .values()
        .any(|user| user.profile.username == username)
    {
        return Err(reject(StatusCode::BAD_REQUEST, "Username already exists"));
    }
    let id = data.next_id();
    let profile = UserProfile {
        id: Some(id),
        username,
        name: args.name,
        role: Role::Patron,
        email: args.email,
        phone: args.phone,
    };
    data.users.insert(
        id,
        StoredUser {
            profile,
            password: args.password.expose_secret().to_string(),
        },
    );
    Ok(HttpResponse::Created().json(MessageResponse::new("User registered successfully")))
}

async fn login(state: web::Data<MockState>, web::Json(args): web::Json<LoginReqArgs>) -> Reply {
    let mut data = lock(&state);
    if data.fail_login {
        return Err(reject(
            StatusCode::INTERNAL_SERVER_ERROR,
            "Internal Server Error",
        ));
    }
    let user_id = data
        .users
        .iter()
        .find(|(_, user)| {
            user.profile.username == args.username
                && user.password == args.password.expose_secret()
        })
        .map(|(id, _)| *id)
        .ok_or_else(|| reject(StatusCode::UNAUTHORIZED, "Invalid credentials"))?;
    let token = data
        .next_token
        .take()
        .unwrap_or_else(|| Uuid::new_v4().to_string());
    data.tokens.insert(token.clone(), user_id);
    Ok(HttpResponse::Ok().json(LoginResponse { token }))
}

async fn dashboard(req: HttpRequest, state: web::Data<MockState>) -> Reply {
    let data = lock(&state);
    if data.fail_dashboard {
        return Err(reject(
            StatusCode::INTERNAL_SERVER_ERROR,
            "Internal Server Error",
        ));
    }
    let user_id = authenticate(&req, &data)?;
    let loans = data
        .loans
        .values()
        .filter(|loan| loan.user_id == user_id && loan.return_date.is_none())
        .cloned()
        .collect();
    let fines = data
        .fines
        .values()
        .filter(|fine| fine.user_id == user_id && !fine.paid)
        .cloned()
        .collect();
    Ok(HttpResponse::Ok().json(Dashboard {
        user: data.users[&user_id].profile.clone(),
        loans,
        fines,
    }))
}

#[derive(serde::Deserialize)]
struct SearchQuery {
    #[serde(default)]
    search: String,
}

async fn book_list(
    req: HttpRequest,
    state: web::Data<MockState>,
    query: web::Query<SearchQuery>,
) -> Reply {
    let data = lock(&state);
    authenticate(&req, &data)?;
    let needle = query.search.to_lowercase();
    let books: Vec<&Book> = data
        .books
        .values()
        .filter(|book| {
            book.title.to_lowercase().contains(&needle)
                || book.author.to_lowercase().contains(&needle)
        })
        .collect();
    Ok(HttpResponse::Ok().json(books))
}

async fn book_new(
    req: HttpRequest,
    state: web::Data<MockState>,
    web::Json(draft): web::Json<BookDraft>,
) -> Reply {
    let mut data = lock(&state);
    require_librarian(&req, &data)?;
    draft.validate().map_err(validation_error)?;
    if data.books.values().any(|book| book.isbn == draft.isbn) {
        return Err(reject(
            StatusCode::BAD_REQUEST,
            "Book with this ISBN already exists",
        ));
    }
    let id = data.next_id();
    data.books.insert(
        id,
        Book {
            id,
            title: draft.title,
            author: draft.author,
            isbn: draft.isbn,
            publisher: draft.publisher,
            publication_year: draft.publication_year,
            copies_available: draft.total_copies,
            total_copies: draft.total_copies,
            location: draft.location,
        },
    );
    Ok(HttpResponse::Created().json(MessageResponse::new("Book added successfully")))
}

fn book_not_found() -> Rejection {
    reject(StatusCode::NOT_FOUND, "Book not found")
}

async fn book_get(
    req: HttpRequest,
    state: web::Data<MockState>,
    path: web::Path<u64>,
) -> Reply {
    let data = lock(&state);
    authenticate(&req, &data)?;
    let book = data
        .books
        .get(&DbId::from(path.into_inner()))
        .ok_or_else(book_not_found)?;
    Ok(HttpResponse::Ok().json(book))
}

async fn book_update(
    req: HttpRequest,
    state: web::Data<MockState>,
    path: web::Path<u64>,
    web::Json(draft): web::Json<BookDraft>,
) -> Reply {
    let mut data = lock(&state);
    require_librarian(&req, &data)?;
    let book = data
        .books
        .get_mut(&DbId::from(path.into_inner()))
        .ok_or_else(book_not_found)?;
    draft.validate().map_err(validation_error)?;
    let difference = draft.total_copies - book.total_copies;
    book.title = draft.title;
    book.author = draft.author;
    book.isbn = draft.isbn;
    book.publisher = draft.publisher;
    book.publication_year = draft.publication_year;
    book.total_copies = draft.total_copies;
    book.location = draft.location;
    book.copies_available = (book.copies_available + difference).max(0);
    ok_message("Book updated successfully")
}

async fn book_delete(
    req: HttpRequest,
    state: web::Data<MockState>,
    path: web::Path<u64>,
) -> Reply {
    let mut data = lock(&state);
    require_librarian(&req, &data)?;
    data.books
        .remove(&DbId::from(path.into_inner()))
        .ok_or_else(book_not_found)?;
    ok_message("Book deleted successfully")
}

async fn hold(req: HttpRequest, state: web::Data<MockState>, path: web::Path<u64>) -> Reply {
    let mut data = lock(&state);
    let user_id = authenticate(&req, &data)?;
    let book_id: DbId = path.into_inner().into();
    let book_title = data
        .books
        .get(&book_id)
        .ok_or_else(book_not_found)?
        .title
        .clone();
    if data
        .holds
        .values()
        .any(|hold| hold.user_id == user_id && hold.book_id == book_id)
    {
        return Err(reject(
            StatusCode::BAD_REQUEST,
            "You already have a hold on this book",
        ));
    }
    let id = data.next_id();
    data.holds.insert(
        id,
        Hold {
            id,
            user_id,
            book_id,
            hold_date: Utc::now().naive_utc(),
            book_title,
        },
    );
    ok_message("Hold placed successfully")
}

async fn borrow(req: HttpRequest, state: web::Data<MockState>, path: web::Path<u64>) -> Reply {
    let mut data = lock(&state);
    let user_id = authenticate(&req, &data)?;
    let book_id: DbId = path.into_inner().into();
    let book = data.books.get(&book_id).ok_or_else(book_not_found)?;
    if book.copies_available <= 0 {
        return Err(reject(StatusCode::BAD_REQUEST, "No copies available"));
    }
    let book_title = book.title.clone();
    if data.loans.values().any(|loan| {
        loan.user_id == user_id && loan.book_id == book_id && loan.return_date.is_none()
    }) {
        return Err(reject(
            StatusCode::BAD_REQUEST,
            "You have already borrowed this book",
        ));
    }
    let id = data.next_id();
    let user = user_summary(&data, user_id);
    if let Some(book) = data.books.get_mut(&book_id) {
        book.copies_available -= 1;
    }
    data.loans.insert(
        id,
        Loan {
            id,
            user_id,
            user,
            book_id,
            book_title,
            due_date: Utc::now().naive_utc() + Duration::days(LOAN_PERIOD_DAYS),
            return_date: None,
        },
    );
    ok_message("Book borrowed successfully")
}

async fn return_loan(
    req: HttpRequest,
    state: web::Data<MockState>,
    path: web::Path<u64>,
) -> Reply {
    let mut data = lock(&state);
    let user_id = authenticate(&req, &data)?;
    let loan_id: DbId = path.into_inner().into();
    let now = Utc::now().naive_utc();
    let loan = data
        .loans
        .get_mut(&loan_id)
        .filter(|loan| loan.user_id == user_id && loan.return_date.is_none())
        .ok_or_else(|| reject(StatusCode::BAD_REQUEST, "Invalid loan record"))?;
    loan.return_date = Some(now);
    let loan = loan.clone();
    if let Some(book) = data.books.get_mut(&loan.book_id) {
        book.copies_available += 1;
    }
    if now > loan.due_date {
        let days_overdue = (now - loan.due_date).num_days();
        let id = data.next_id();
        let user = user_summary(&data, user_id);
        data.fines.insert(
            id,
            Fine {
                id,
                user_id,
                user,
                amount: days_overdue as f64 * FINE_PER_DAY_OVERDUE,
                description: format!("Overdue fine for \"{}\"", loan.book_title),
                paid: false,
            },
        );
    }
    ok_message("Book returned successfully")
}

async fn pay_fine(req: HttpRequest, state: web::Data<MockState>, path: web::Path<u64>) -> Reply {
    let mut data = lock(&state);
    let user_id = authenticate(&req, &data)?;
    let fine = data
        .fines
        .get_mut(&DbId::from(path.into_inner()))
        .filter(|fine| fine.user_id == user_id && !fine.paid)
        .ok_or_else(|| reject(StatusCode::BAD_REQUEST, "Invalid fine record"))?;
    fine.paid = true;
    ok_message("Fine paid successfully")
}

fn user_not_found() -> Rejection {
    reject(StatusCode::NOT_FOUND, "User not found")
}

async fn user_list(req: HttpRequest, state: web::Data<MockState>) -> Reply {
    let data = lock(&state);
    require_librarian(&req, &data)?;
    let users: Vec<&UserProfile> = data
        .users
        .values()
        .map(|user| &user.profile)
        .filter(|profile| !profile.role.is_librarian())
        .collect();
    Ok(HttpResponse::Ok().json(users))
}

async fn user_get(req: HttpRequest, state: web::Data<MockState>, path: web::Path<u64>) -> Reply {
    let data = lock(&state);
    require_librarian(&req, &data)?;
    let user = data
        .users
        .get(&DbId::from(path.into_inner()))
        .ok_or_else(user_not_found)?;
    Ok(HttpResponse::Ok().json(&user.profile))
}

async fn user_update(
    req: HttpRequest,
    state: web::Data<MockState>,
    path: web::Path<u64>,
    web::Json(diff): web::Json<UserProfileDiff>,
) -> Reply {
    let mut data = lock(&state);
    require_librarian(&req, &data)?;
    let user = data
        .users
        .get_mut(&DbId::from(path.into_inner()))
        .ok_or_else(user_not_found)?;
    if let Some(name) = diff.name {
        user.profile.name = name;
    }
    if let Some(email) = diff.email {
        user.profile.email = email;
    }
    if let Some(phone) = diff.phone {
        user.profile.phone = phone;
    }
    ok_message("User information updated successfully")
}

async fn user_delete(
    req: HttpRequest,
    state: web::Data<MockState>,
    path: web::Path<u64>,
) -> Reply {
    let mut data = lock(&state);
    require_librarian(&req, &data)?;
    let user_id: DbId = path.into_inner().into();
    data.users.remove(&user_id).ok_or_else(user_not_found)?;
    data.loans.retain(|_, loan| loan.user_id != user_id);
    data.holds.retain(|_, hold| hold.user_id != user_id);
    data.fines.retain(|_, fine| fine.user_id != user_id);
    data.tokens.retain(|_, id| *id != user_id);
    ok_message("User deleted successfully")
}

async fn reports(req: HttpRequest, state: web::Data<MockState>) -> Reply {
    let data = lock(&state);
    require_librarian(&req, &data)?;
    let now = Utc::now().naive_utc();

    let mut loan_counts: BTreeMap<DbId, u64> = BTreeMap::new();
    for loan in data.loans.values() {
        *loan_counts.entry(loan.book_id).or_default() += 1;
    }
    let mut most_popular_books: Vec<PopularBook> = loan_counts
        .into_iter()
        .filter_map(|(book_id, count)| {
            data.books.get(&book_id).map(|book| PopularBook {
                title: book.title.clone(),
                count,
            })
        })
        .collect();
    most_popular_books.sort_by(|a, b| b.count.cmp(&a.count));
    most_popular_books.truncate(MOST_POPULAR_LIMIT);

    let report = Report {
        total_books: data.books.len() as u64,
        total_loans: data.loans.len() as u64,
        total_fines: data
            .fines
            .values()
            .filter(|fine| fine.paid)
            .map(|fine| fine.amount)
            .sum(),
        overdue_loans: data
            .loans
            .values()
            .filter(|loan| loan.is_overdue(now))
            .cloned()
            .collect(),
        unpaid_fines: data
            .fines
            .values()
            .filter(|fine| !fine.paid)
            .cloned()
            .collect(),
        most_popular_books,
    };
    Ok(HttpResponse::Ok().json(report))
}
