use std::{fmt::Debug, sync::Arc};

use libris_shared::{
    const_config::storage_key::{
        STORAGE_KEYS_ALL, STORAGE_KEY_ROLE, STORAGE_KEY_TOKEN, STORAGE_KEY_USER,
    },
    uac::{Role, UserProfile},
};
use tracing::{info, warn};

use crate::{
    storage::{DurableStorage, MemoryStorage},
    SessionError,
};

/// Who is logged in and with what credential
#[derive(Default, Clone, PartialEq, Eq)]
pub struct Session {
    pub user: Option<Arc<UserProfile>>,
    /// Empty when not logged in
    pub token: String,
}

impl Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("user", &self.user)
            .field("has_token", &!self.token.is_empty())
            .finish()
    }
}

/// Single authority for the session, mirrored into durable storage
///
/// The mirror is written on every mutation and read once when the store is
/// loaded. The only other reads of the mirror are the `persisted_*` methods
/// used by navigation.
#[derive(Debug)]
pub struct SessionStore {
    session: Session,
    storage: Box<dyn DurableStorage>,
}

impl SessionStore {
    /// Restores the session from the mirror. Missing slots give an anonymous
    /// session, a stored profile that cannot be parsed is an error.
    #[tracing::instrument(err(Debug))]
    pub fn load(storage: Box<dyn DurableStorage>) -> Result<Self, SessionError> {
        let user = match storage
            .get(STORAGE_KEY_USER)
            .map_err(SessionError::Storage)?
        {
            Some(text) => Some(Arc::new(
                serde_json::from_str::<UserProfile>(&text).map_err(SessionError::Deserialization)?,
            )),
            None => None,
        };
        let token = storage
            .get(STORAGE_KEY_TOKEN)
            .map_err(SessionError::Storage)?
            .unwrap_or_default();
        let session = Session { user, token };
        info!(?session, "session loaded");
        Ok(Self { session, storage })
    }

    /// Anonymous session backed by [`MemoryStorage`]
    pub fn new_in_memory() -> Self {
        Self {
            session: Session::default(),
            storage: Box::new(MemoryStorage::new()),
        }
    }

    /// Writes the profile and its role to the mirror, then replaces the user.
    ///
    /// On error the in-memory user is unchanged.
    #[tracing::instrument(ret, err(Debug))]
    pub fn set_user(&mut self, profile: UserProfile) -> Result<Arc<UserProfile>, SessionError> {
        let serialized = serde_json::to_string(&profile).map_err(|e| {
            SessionError::Storage(anyhow::Error::new(e).context("failed to serialize profile"))
        })?;
        self.storage
            .set(STORAGE_KEY_USER, &serialized)
            .map_err(SessionError::Storage)?;
        self.storage
            .set(STORAGE_KEY_ROLE, profile.role.as_str())
            .map_err(SessionError::Storage)?;
        let user = Arc::new(profile);
        self.session.user = Some(Arc::clone(&user));
        Ok(user)
    }

    /// On error the in-memory token is unchanged
    #[tracing::instrument(skip(token), err(Debug))]
    pub fn set_token(&mut self, token: String) -> Result<(), SessionError> {
        self.storage
            .set(STORAGE_KEY_TOKEN, &token)
            .map_err(SessionError::Storage)?;
        self.session.token = token;
        Ok(())
    }

    /// Clears the session in memory then removes each mirrored key in turn.
    ///
    /// Every key is attempted even if an earlier removal failed. The error
    /// lists the keys that may still be present.
    #[tracing::instrument(err(Debug))]
    pub fn logout(&mut self) -> Result<(), SessionError> {
        self.session = Session::default();
        let mut remaining = Vec::new();
        let mut first_error = None;
        for key in STORAGE_KEYS_ALL {
            if let Err(e) = self.storage.remove(key) {
                warn!(?key, ?e, "failed to remove key on logout");
                remaining.push(key);
                first_error.get_or_insert(e);
            }
        }
        match first_error {
            Some(source) => Err(SessionError::PartialLogout { remaining, source }),
            None => Ok(()),
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn user(&self) -> Option<Arc<UserProfile>> {
        self.session.user.clone()
    }

    pub fn token(&self) -> &str {
        &self.session.token
    }

    pub fn is_authenticated(&self) -> bool {
        !self.session.token.is_empty()
    }

    pub fn role(&self) -> Option<&Role> {
        self.session.user.as_ref().map(|user| &user.role)
    }

    /// Role as recorded in the mirror, `None` if absent or unreadable
    pub fn persisted_role(&self) -> Option<Role> {
        self.read_persisted(STORAGE_KEY_ROLE).map(Role::from)
    }

    /// `true` if the mirror holds a non-empty token
    pub fn persisted_is_authenticated(&self) -> bool {
        self.read_persisted(STORAGE_KEY_TOKEN)
            .is_some_and(|token| !token.is_empty())
    }

    fn read_persisted(&self, key: &str) -> Option<String> {
        match self.storage.get(key) {
            Ok(value) => value,
            Err(e) => {
                warn!(?key, ?e, "failed to read mirror, treating as absent");
                None
            }
        }
    }
}
