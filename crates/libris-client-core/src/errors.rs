use reqwest::StatusCode;

/// Failures of the session lifecycle
#[derive(thiserror::Error, Debug)]
pub enum SessionError {
    /// The credential check failed, nothing was changed
    #[error("login failed")]
    Authentication(#[source] anyhow::Error),
    /// The token was stored but the profile could not be fetched
    #[error("failed to fetch the user profile after login")]
    ProfileFetch(#[source] anyhow::Error),
    #[error("stored user profile could not be read")]
    Deserialization(#[source] serde_json::Error),
    #[error("logout did not clear stored keys: {remaining:?}")]
    PartialLogout {
        remaining: Vec<&'static str>,
        #[source]
        source: anyhow::Error,
    },
    #[error("durable storage failed")]
    Storage(#[source] anyhow::Error),
}

impl SessionError {
    /// Returns `true` if the session error is [`ProfileFetch`].
    ///
    /// [`ProfileFetch`]: SessionError::ProfileFetch
    #[must_use]
    pub fn is_profile_fetch(&self) -> bool {
        matches!(self, Self::ProfileFetch(..))
    }
}

/// A response with a non-success status
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct ResponseError {
    pub status: StatusCode,
    pub message: String,
}

impl ResponseError {
    /// The backend rejected the bearer token (missing or expired)
    #[must_use]
    pub fn is_unauthorized(&self) -> bool {
        self.status == StatusCode::UNAUTHORIZED
    }

    #[must_use]
    pub fn is_forbidden(&self) -> bool {
        self.status == StatusCode::FORBIDDEN
    }
}
