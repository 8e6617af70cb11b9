//! Route table and the guard run before every navigation

use std::collections::BTreeMap;

use libris_shared::{
    const_config::route::{
        ROUTE_ADD_BOOK, ROUTE_BOOK_DETAILS, ROUTE_DASHBOARD, ROUTE_EDIT_BOOK, ROUTE_EDIT_USER,
        ROUTE_LIBRARIAN, ROUTE_MANAGE_BOOKS, ROUTE_MANAGE_USERS, ROUTE_REGISTER, ROUTE_ROOT,
        ROUTE_SEARCH,
    },
    uac::Role,
};
use strum::IntoEnumIterator as _;
use tracing::{debug, info};

use crate::SessionStore;

mod guard;

pub use guard::{
    evaluate, evaluate_with, AccessRule, Capability, GuardDecision, PathPattern, ACCESS_POLICY,
    REDIRECT_TARGET,
};

/// The screens a front-end can show, one per route
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::EnumIter)]
pub enum View {
    Login,
    Register,
    SearchBooks,
    BookDetails,
    UserDashboard,
    LibrarianDashboard,
    AddBook,
    ManageUsers,
    EditUser,
    ManageBooks,
    EditBook,
}

impl View {
    /// Route pattern, segments starting with `:` capture a parameter
    pub fn path(&self) -> &'static str {
        match self {
            View::Login => ROUTE_ROOT,
            View::Register => ROUTE_REGISTER,
            View::SearchBooks => ROUTE_SEARCH,
            View::BookDetails => ROUTE_BOOK_DETAILS,
            View::UserDashboard => ROUTE_DASHBOARD,
            View::LibrarianDashboard => ROUTE_LIBRARIAN,
            View::AddBook => ROUTE_ADD_BOOK,
            View::ManageUsers => ROUTE_MANAGE_USERS,
            View::EditUser => ROUTE_EDIT_USER,
            View::ManageBooks => ROUTE_MANAGE_BOOKS,
            View::EditBook => ROUTE_EDIT_BOOK,
        }
    }

    /// Matches `path` against this view's pattern and returns the captured
    /// parameters on success
    fn capture(&self, path: &str) -> Option<RouteParams> {
        let pattern: Vec<&str> = self.path().split('/').collect();
        let segments: Vec<&str> = path.split('/').collect();
        if pattern.len() != segments.len() {
            return None;
        }
        let mut params = RouteParams::new();
        for (expected, actual) in pattern.into_iter().zip(segments) {
            match expected.strip_prefix(':') {
                Some(name) if !actual.is_empty() => {
                    params.insert(name, actual.to_string());
                }
                Some(_) => return None,
                None if expected == actual => {}
                None => return None,
            }
        }
        Some(params)
    }
}

pub type RouteParams = BTreeMap<&'static str, String>;

/// Outcome of a navigation request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Navigation {
    Show { view: View, params: RouteParams },
    Redirect { to: &'static str },
}

/// Drops any query string or fragment and a trailing slash. An empty result
/// is the root.
pub fn normalize(path: &str) -> &str {
    let end = path.find(['?', '#']).unwrap_or(path.len());
    let path = &path[..end];
    let path = path.strip_suffix('/').unwrap_or(path);
    if path.is_empty() {
        ROUTE_ROOT
    } else {
        path
    }
}

/// Finds the view for an already normalized path
pub fn resolve(path: &str) -> Option<(View, RouteParams)> {
    View::iter().find_map(|view| view.capture(path).map(|params| (view, params)))
}

/// Runs the guard then the route table. Unknown paths go to the root.
pub fn navigate(path: &str, role: Option<&Role>, is_authenticated: bool) -> Navigation {
    let path = normalize(path);
    if let GuardDecision::Redirect(to) = evaluate(path, role, is_authenticated) {
        info!(?path, ?to, "navigation denied by guard");
        return Navigation::Redirect { to };
    }
    match resolve(path) {
        Some((view, params)) => Navigation::Show { view, params },
        None => {
            debug!(?path, "no route matched");
            Navigation::Redirect {
                to: REDIRECT_TARGET,
            }
        }
    }
}

/// Navigation decided from the durable mirror of `session`
pub fn navigate_with_session(path: &str, session: &SessionStore) -> Navigation {
    let role = session.persisted_role();
    navigate(path, role.as_ref(), session.persisted_is_authenticated())
}
