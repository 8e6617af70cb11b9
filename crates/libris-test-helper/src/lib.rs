#![warn(unused_crate_dependencies)]

use libris_shared::{
    id::DbId,
    req_args::LoginReqArgs,
    telemetry::{self, get_subscriber, init_subscriber},
    uac::Role,
};
use std::fmt::Debug;
use std::ops::Deref;
use std::path::Path;
use std::sync::LazyLock;
use uuid::Uuid;

mod mock_backend;

pub use mock_backend::{MockBackend, RecordedRequest};

// Ensure that the `tracing` stack is only initialised once
pub static TRACING: LazyLock<String> = LazyLock::new(|| {
    let default_filter_level = "info".to_string();
    let subscriber_name = "test".to_string();
    if std::env::var("TEST_LOG").is_ok() {
        let log_file_name = format!("{subscriber_name}_{}", Uuid::new_v4());
        let path =
            telemetry::init_file_subscriber(Path::new("traces"), &log_file_name, &default_filter_level)
                .expect("failed to start tracing to file");
        format!("Traces for tests being written to: {path:?}")
    } else {
        let subscriber = get_subscriber(subscriber_name, default_filter_level, std::io::sink);
        init_subscriber(subscriber).expect("failed to init subscriber");
        "Traces set to std::io::sink".to_string()
    }
});

pub struct TestApp<C> {
    pub address: String,
    pub backend: MockBackend,
    /// Seeded with the librarian role
    pub librarian: TestUser,
    /// Seeded with the patron role
    pub patron: TestUser,
    pub core_client: C,
}

impl<C> Debug for TestApp<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TestApp")
            .field("address", &self.address)
            .field("librarian", &self.librarian)
            .field("patron", &self.patron)
            .finish()
    }
}

/// Empty function for use when a call back isn't needed
pub fn no_cb() {}

/// Starts a fresh mock backend with the seed data and builds the client under
/// test pointed at it
pub async fn spawn_app<C, F>(build_client: F) -> TestApp<C>
where
    F: FnOnce(String) -> C,
{
    start_tracing();
    let librarian = TestUser::new("alice", "Alice Librarian", Role::Librarian);
    let patron = TestUser::new("bob", "Bob Patron", Role::Patron);
    let backend = MockBackend::start()
        .await
        .expect("failed to start mock backend");
    let librarian = backend.seed_user(librarian);
    let patron = backend.seed_user(patron);
    backend.seed_books();
    let address = port_to_test_address(backend.port());
    let core_client = build_client(address.clone());
    TestApp {
        address,
        backend,
        librarian,
        patron,
        core_client,
    }
}

pub fn port_to_test_address(application_port: u16) -> String {
    format!("http://127.0.0.1:{application_port}")
}

fn start_tracing() {
    // Accessing TRACING also forces the LazyLock to initialize
    let logging_msg = TRACING.deref();
    println!("{logging_msg}");
}

#[derive(Debug, Clone)]
pub struct TestUser {
    /// Set once stored in the backend
    pub id: Option<DbId>,
    pub username: String,
    pub password: String,
    pub name: String,
    pub role: Role,
}

impl TestUser {
    pub fn new(username: &str, name: &str, role: Role) -> Self {
        Self {
            id: None,
            username: username.to_string(),
            password: format!("{username}-password"),
            name: name.to_string(),
            role,
        }
    }

    /// A user not yet known to the backend, for registration tests
    pub fn generate(username_prefix: &str) -> Self {
        let username = format!("{username_prefix}-{}", &Uuid::new_v4().to_string()[..8]);
        Self {
            id: None,
            password: Uuid::new_v4().to_string(),
            name: "Generated User".to_string(),
            username,
            role: Role::Patron,
        }
    }

    pub fn login_args(&self) -> LoginReqArgs {
        LoginReqArgs::new(self.username.clone(), self.password.clone().into())
    }

    pub fn id(&self) -> DbId {
        self.id.expect("user has not been stored")
    }
}
