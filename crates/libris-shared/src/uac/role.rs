use std::fmt::Display;

/// The privilege level stored on a user profile
///
/// Open set: values the client does not know about are kept verbatim in
/// [`Role::Other`] so they survive a round trip through storage.
#[derive(Debug, serde::Serialize, serde::Deserialize, Clone, PartialEq, Eq, Hash)]
#[serde(from = "String", into = "String")]
pub enum Role {
    User,
    /// Assigned by the backend on self registration
    Patron,
    Librarian,
    Other(String),
}

impl Role {
    pub fn as_str(&self) -> &str {
        match self {
            Role::User => "user",
            Role::Patron => "patron",
            Role::Librarian => "librarian",
            Role::Other(s) => s,
        }
    }

    /// Returns `true` if the role is [`Librarian`].
    ///
    /// [`Librarian`]: Role::Librarian
    #[must_use]
    pub fn is_librarian(&self) -> bool {
        matches!(self, Self::Librarian)
    }
}

impl From<&str> for Role {
    fn from(value: &str) -> Self {
        match value {
            "user" => Self::User,
            "patron" => Self::Patron,
            "librarian" => Self::Librarian,
            other => Self::Other(other.to_string()),
        }
    }
}

impl From<String> for Role {
    fn from(value: String) -> Self {
        match Self::from(value.as_str()) {
            Self::Other(_) => Self::Other(value),
            known => known,
        }
    }
}

impl From<Role> for String {
    fn from(value: Role) -> Self {
        match value {
            Role::Other(s) => s,
            known => known.as_str().to_string(),
        }
    }
}

impl Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
