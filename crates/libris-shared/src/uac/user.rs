use std::fmt::Display;

use anyhow::bail;

use crate::{
    const_config::validation::{VALIDATION_USERNAME_MAX_LENGTH, VALIDATION_USERNAME_MIN_LENGTH},
    errors::ConversionError,
    id::DbId,
};

use super::Role;

#[derive(
    Debug, serde::Serialize, serde::Deserialize, Clone, PartialEq, Eq, Hash, PartialOrd, Ord,
)]
#[serde(try_from = "String")]
/// Represents a username as accepted by the backend on registration
///
/// Lengths are counted in characters, not bytes
pub struct Username(String);

impl TryFrom<String> for Username {
    type Error = ConversionError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        let actual = value.chars().count();
        if actual == 0 {
            return Err(ConversionError::Empty);
        }
        if actual < Self::MIN_LENGTH {
            return Err(ConversionError::MinNotMet {
                min: Self::MIN_LENGTH,
                actual,
            });
        }
        if actual > Self::MAX_LENGTH {
            return Err(ConversionError::MaxExceeded {
                max: Self::MAX_LENGTH,
                actual,
            });
        }
        Ok(Self(value))
    }
}

impl TryFrom<&str> for Username {
    type Error = ConversionError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        value.to_string().try_into()
    }
}

impl Username {
    pub const MIN_LENGTH: usize = VALIDATION_USERNAME_MIN_LENGTH;
    pub const MAX_LENGTH: usize = VALIDATION_USERNAME_MAX_LENGTH;
}

impl From<Username> for String {
    fn from(value: Username) -> Self {
        value.0
    }
}

impl AsRef<str> for Username {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Display for Username {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The profile of the logged in user as returned by the dashboard endpoint
///
/// Only `role` is required, the rest default when missing so that partial
/// profiles can still be stored and restored.
#[derive(Debug, serde::Serialize, serde::Deserialize, Clone, PartialEq, Eq)]
pub struct UserProfile {
    #[serde(default)]
    pub id: Option<DbId>,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub name: String,
    pub role: Role,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
}

impl UserProfile {
    /// Convenience constructor for a profile with only a name and role
    pub fn new<S: Into<String>>(name: S, role: Role) -> Self {
        Self {
            id: None,
            username: String::new(),
            name: name.into(),
            role,
            email: String::new(),
            phone: String::new(),
        }
    }
}

/// Stores the changed contact details of a user for the librarian's edit
/// screen.
///
/// `Some` are the ones changed
#[derive(Debug, serde::Serialize, serde::Deserialize, Clone, PartialEq, Eq, Default)]
pub struct UserProfileDiff {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

impl UserProfileDiff {
    /// Returns an error if the ids do not match
    ///
    /// Returns None if there are no differences otherwise
    /// sets the changed fields to `Some`
    pub fn from_diff(from: &UserProfile, to: &UserProfile) -> anyhow::Result<Option<Self>> {
        if from.id != to.id {
            bail!("user ids do not match");
        }
        let changed = |a: &String, b: &String| if a == b { None } else { Some(b.clone()) };
        let result = Self {
            name: changed(&from.name, &to.name),
            email: changed(&from.email, &to.email),
            phone: changed(&from.phone, &to.phone),
        };
        Ok(if result.is_valid().is_ok() {
            Some(result)
        } else {
            None
        })
    }

    pub fn is_valid(&self) -> anyhow::Result<()> {
        if self.name.is_some() || self.email.is_some() || self.phone.is_some() {
            Ok(())
        } else {
            bail!("No change is being requested")
        }
    }
}
