//! Stores settings that are not expected to need to change but grouped together
//! for discoverability and reuse. Each constant should be prefixed by the module
//! name to allow importing the constant only and still be readable

pub mod client {
    /// Base address used when none is configured
    pub const CLIENT_DEFAULT_SERVER_ADDRESS: &str = "http://localhost:5000";
}

/// Keys of the durable mirror of the session
pub mod storage_key {
    /// JSON serialized user profile
    pub const STORAGE_KEY_USER: &str = "user";
    pub const STORAGE_KEY_TOKEN: &str = "token";
    /// Copy of the role in the stored user profile, read by the navigation
    /// guard
    pub const STORAGE_KEY_ROLE: &str = "role";

    /// In the order they are removed on logout
    pub const STORAGE_KEYS_ALL: [&str; 3] = [STORAGE_KEY_USER, STORAGE_KEY_TOKEN, STORAGE_KEY_ROLE];
}

pub mod path {
    mod path_spec;
    pub use path_spec::{ApiPath, PathSpec};
    pub const PATH_API_BOOK_DELETE: PathSpec = PathSpec::delete("/api/books");
    pub const PATH_API_BOOK_NEW: PathSpec = PathSpec::post("/api/books");
    pub const PATH_API_BOOK_UPDATE: PathSpec = PathSpec::put("/api/books");
    pub const PATH_API_BOOK: PathSpec = PathSpec::get("/api/books");
    pub const PATH_API_BOOKS: PathSpec = PathSpec::get("/api/books");
    pub const PATH_API_BORROW: PathSpec = PathSpec::post("/api/borrow");
    pub const PATH_API_DASHBOARD: PathSpec = PathSpec::get("/api/dashboard");
    pub const PATH_API_HOLD: PathSpec = PathSpec::post("/api/hold");
    pub const PATH_API_PAY_FINE: PathSpec = PathSpec::post("/api/payfine");
    pub const PATH_API_REPORTS: PathSpec = PathSpec::get("/api/reports");
    pub const PATH_API_RETURN: PathSpec = PathSpec::post("/api/return");
    pub const PATH_API_USER_DELETE: PathSpec = PathSpec::delete("/api/users");
    pub const PATH_API_USER_UPDATE: PathSpec = PathSpec::put("/api/users");
    pub const PATH_API_USER: PathSpec = PathSpec::get("/api/users");
    pub const PATH_API_USERS: PathSpec = PathSpec::get("/api/users");
    pub const PATH_LOGIN: PathSpec = PathSpec::post("/api/login");
    pub const PATH_REGISTER: PathSpec = PathSpec::post("/api/register");
}

/// In-app navigation paths
pub mod route {
    pub const ROUTE_ROOT: &str = "/";
    pub const ROUTE_REGISTER: &str = "/register";
    pub const ROUTE_SEARCH: &str = "/search";
    pub const ROUTE_BOOK_DETAILS: &str = "/book/:id";
    pub const ROUTE_DASHBOARD: &str = "/dashboard";
    pub const ROUTE_LIBRARIAN: &str = "/librarian";
    pub const ROUTE_ADD_BOOK: &str = "/add-book";
    pub const ROUTE_MANAGE_USERS: &str = "/librarian/users";
    pub const ROUTE_EDIT_USER: &str = "/librarian/users/:id/edit";
    pub const ROUTE_MANAGE_BOOKS: &str = "/librarian/books";
    pub const ROUTE_EDIT_BOOK: &str = "/librarian/books/:id/edit";

    /// Every path starting with this requires the librarian role
    pub const ROUTE_PREFIX_LIBRARIAN: &str = "/librarian";
}

/// Limits enforced by the backend, checked before sending to fail early
pub mod validation {
    pub const VALIDATION_USERNAME_MIN_LENGTH: usize = 3;
    pub const VALIDATION_USERNAME_MAX_LENGTH: usize = 50;
    pub const VALIDATION_PASSWORD_MIN_LENGTH: usize = 6;
    pub const VALIDATION_NAME_MIN_LENGTH: usize = 3;
    pub const VALIDATION_NAME_MAX_LENGTH: usize = 100;
    pub const VALIDATION_PHONE_MIN_DIGITS: usize = 10;
    pub const VALIDATION_PHONE_MAX_DIGITS: usize = 11;
}
