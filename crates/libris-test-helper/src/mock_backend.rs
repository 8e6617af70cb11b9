//! In-process stand-in for the library backend
//!
//! Holds everything in memory and issues opaque tokens. Follows the status
//! codes and `{"message": ...}` bodies of the real backend closely enough to
//! exercise the client.

use actix_web::{
    body::MessageBody,
    dev::{ServiceRequest, ServiceResponse},
    http::header::AUTHORIZATION,
    middleware::{from_fn, Next},
    web, App, HttpServer,
};
use anyhow::Context as _;
use chrono::NaiveDateTime;
use libris_shared::{
    id::DbId,
    library::{Book, Fine, Hold, Loan},
    uac::UserProfile,
};
use std::{
    collections::{BTreeMap, HashMap},
    net::TcpListener,
    sync::{Mutex, MutexGuard},
};
use tracing::info;
use tracing_actix_web::TracingLogger;

use crate::TestUser;

mod routes;

/// A request as seen by the backend
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub query: String,
    pub authorization: Option<String>,
}

#[derive(Debug)]
struct StoredUser {
    profile: UserProfile,
    password: String,
}

#[derive(Debug, Default)]
struct MockData {
    last_id: u64,
    users: BTreeMap<DbId, StoredUser>,
    books: BTreeMap<DbId, Book>,
    loans: BTreeMap<DbId, Loan>,
    holds: BTreeMap<DbId, Hold>,
    fines: BTreeMap<DbId, Fine>,
    tokens: HashMap<String, DbId>,
    next_token: Option<String>,
    fail_login: bool,
    fail_dashboard: bool,
    requests: Vec<RecordedRequest>,
}

impl MockData {
    fn next_id(&mut self) -> DbId {
        self.last_id += 1;
        self.last_id.into()
    }
}

type MockState = Mutex<MockData>;

/// Handle to a running mock backend, clones share the same data
#[derive(Debug, Clone)]
pub struct MockBackend {
    port: u16,
    state: web::Data<MockState>,
}

impl MockBackend {
    /// Binds a random local port and spawns the server on the current tokio
    /// runtime
    pub async fn start() -> anyhow::Result<Self> {
        let listener =
            TcpListener::bind("127.0.0.1:0").context("failed to bind mock backend listener")?;
        let port = listener
            .local_addr()
            .context("failed to get local address of listener")?
            .port();
        let state = web::Data::new(MockState::default());
        let app_state = state.clone();
        let server = HttpServer::new(move || {
            App::new()
                .wrap(from_fn(record_request))
                .wrap(TracingLogger::default())
                .app_data(app_state.clone())
                .configure(routes::configure)
        })
        .workers(1)
        .listen(listener)
        .context("failed to bind mock backend to listener")?
        .run();
        tokio::spawn(server);
        info!(?port, "Mock backend started");
        Ok(Self { port, state })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    fn lock(&self) -> MutexGuard<'_, MockData> {
        self.state.lock().expect("mock state mutex poisoned")
    }

    /// Stores the user and returns it with its assigned id
    pub fn seed_user(&self, mut user: TestUser) -> TestUser {
        let mut data = self.lock();
        let id = data.next_id();
        user.id = Some(id);
        let profile = UserProfile {
            id: Some(id),
            username: user.username.clone(),
            name: user.name.clone(),
            role: user.role.clone(),
            email: format!("{}@example.com", user.username),
            phone: "0123456789".to_string(),
        };
        data.users.insert(
            id,
            StoredUser {
                profile,
                password: user.password.clone(),
            },
        );
        user
    }

    pub fn seed_books(&self) {
        let mut data = self.lock();
        for (title, author, isbn, year, copies) in [
            ("Dune", "Frank Herbert", "9780441013593", 1965, 2),
            ("Emma", "Jane Austen", "9780141439587", 1815, 1),
        ] {
            let id = data.next_id();
            data.books.insert(
                id,
                Book {
                    id,
                    title: title.to_string(),
                    author: author.to_string(),
                    isbn: isbn.to_string(),
                    publisher: "Seed Press".to_string(),
                    publication_year: year,
                    copies_available: copies,
                    total_copies: copies,
                    location: "Shelf A".to_string(),
                },
            );
        }
    }

    /// Id of the first book with this title
    pub fn book_id(&self, title: &str) -> Option<DbId> {
        self.lock()
            .books
            .values()
            .find(|book| book.title == title)
            .map(|book| book.id)
    }

    pub fn book(&self, id: DbId) -> Option<Book> {
        self.lock().books.get(&id).cloned()
    }

    /// The token issued by the next successful login
    pub fn set_next_token(&self, token: &str) {
        self.lock().next_token = Some(token.to_string());
    }

    /// Makes logins fail with a 500
    pub fn set_fail_login(&self, value: bool) {
        self.lock().fail_login = value;
    }

    /// Makes the dashboard (and so the profile fetch after login) fail with
    /// a 500
    pub fn set_fail_dashboard(&self, value: bool) {
        self.lock().fail_dashboard = value;
    }

    /// Moves the due date of a loan, used to create overdue loans
    pub fn set_loan_due_date(&self, loan_id: DbId, due_date: NaiveDateTime) {
        let mut data = self.lock();
        let loan = data.loans.get_mut(&loan_id).expect("loan not found");
        loan.due_date = due_date;
    }

    /// All requests received so far in arrival order
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.lock().requests.clone()
    }

    /// The most recent request to `path`
    pub fn last_request_to(&self, path: &str) -> Option<RecordedRequest> {
        self.lock()
            .requests
            .iter()
            .rev()
            .find(|request| request.path == path)
            .cloned()
    }
}

async fn record_request(
    req: ServiceRequest,
    next: Next<impl MessageBody>,
) -> Result<ServiceResponse<impl MessageBody>, actix_web::Error> {
    if let Some(state) = req.app_data::<web::Data<MockState>>() {
        let recorded = RecordedRequest {
            method: req.method().to_string(),
            path: req.path().to_string(),
            query: req.query_string().to_string(),
            authorization: req
                .headers()
                .get(AUTHORIZATION)
                .and_then(|value| value.to_str().ok())
                .map(str::to_string),
        };
        state
            .lock()
            .expect("mock state mutex poisoned")
            .requests
            .push(recorded);
    }
    next.call(req).await
}
