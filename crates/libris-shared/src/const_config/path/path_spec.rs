use reqwest::Method;

use crate::id::DbId;

#[derive(Debug, Clone)]
pub struct PathSpec {
    pub path: &'static str,
    pub method: reqwest::Method,
}

/// A fully resolved endpoint, possibly including a record id
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiPath {
    pub path: String,
    pub method: reqwest::Method,
}

impl PathSpec {
    pub const fn get(path: &'static str) -> Self {
        Self {
            path,
            method: Method::GET,
        }
    }

    pub const fn post(path: &'static str) -> Self {
        Self {
            path,
            method: Method::POST,
        }
    }

    pub const fn put(path: &'static str) -> Self {
        Self {
            path,
            method: Method::PUT,
        }
    }

    pub const fn delete(path: &'static str) -> Self {
        Self {
            path,
            method: Method::DELETE,
        }
    }

    /// Targets a single record, for endpoints of the form `/api/books/<id>`
    pub fn with_id(&self, id: DbId) -> ApiPath {
        ApiPath {
            path: format!("{}/{id}", self.path),
            method: self.method.clone(),
        }
    }
}

impl From<PathSpec> for ApiPath {
    fn from(value: PathSpec) -> Self {
        Self {
            path: value.path.to_string(),
            method: value.method,
        }
    }
}
