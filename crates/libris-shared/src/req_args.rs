//! This module stores the expected format of the arguments for the requests
//! The structure of the module is supposed to match the path of the endpoints.
//! For example `/api/books` would map to [`api::BookDraft`]. Types holding
//! secrets are not serializable and are converted at the call site instead.

use secrecy::{ExposeSecret, SecretString};
use std::fmt::Debug;

use crate::{
    const_config::validation::{
        VALIDATION_NAME_MAX_LENGTH, VALIDATION_NAME_MIN_LENGTH, VALIDATION_PASSWORD_MIN_LENGTH,
        VALIDATION_PHONE_MAX_DIGITS, VALIDATION_PHONE_MIN_DIGITS,
    },
    errors::{ConversionError, InvalidArgsError},
    uac::Username,
};

pub mod api;

#[derive(serde::Deserialize, Clone)]
pub struct LoginReqArgs {
    pub username: String,
    pub password: SecretString,
}

impl LoginReqArgs {
    pub fn new<S: Into<String>>(username: S, password: SecretString) -> Self {
        Self {
            username: username.into(),
            password,
        }
    }

    pub fn username(mut self, username: String) -> Self {
        self.username = username;
        self
    }

    pub fn password(mut self, password: SecretString) -> Self {
        self.password = password;
        self
    }
}

impl Debug for LoginReqArgs {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginReqArgs")
            .field("username", &self.username)
            .field("has_password", &!self.password.expose_secret().is_empty())
            .finish()
    }
}

/// Self registration, the backend assigns the patron role
#[derive(serde::Deserialize, Clone)]
pub struct RegisterReqArgs {
    pub username: Username,
    pub password: SecretString,
    pub name: String,
    pub email: String,
    pub phone: String,
}

impl RegisterReqArgs {
    /// Applies the same checks as the backend so bad input fails without a
    /// round trip
    pub fn validate(&self) -> Result<(), InvalidArgsError> {
        let password_len = self.password.expose_secret().chars().count();
        if password_len < VALIDATION_PASSWORD_MIN_LENGTH {
            return Err(InvalidArgsError::new(
                "password",
                ConversionError::MinNotMet {
                    min: VALIDATION_PASSWORD_MIN_LENGTH,
                    actual: password_len,
                },
            ));
        }
        validate_length(
            "name",
            &self.name,
            VALIDATION_NAME_MIN_LENGTH,
            VALIDATION_NAME_MAX_LENGTH,
        )?;
        if !is_email_shaped(&self.email) {
            return Err(InvalidArgsError::new(
                "email",
                ConversionError::InvalidFormat("expected an email address"),
            ));
        }
        let is_digits = self.phone.chars().all(|c| c.is_ascii_digit());
        let digit_count = self.phone.len();
        if !is_digits
            || !(VALIDATION_PHONE_MIN_DIGITS..=VALIDATION_PHONE_MAX_DIGITS).contains(&digit_count)
        {
            return Err(InvalidArgsError::new(
                "phone",
                ConversionError::InvalidFormat("phone number must be 10 or 11 digits"),
            ));
        }
        Ok(())
    }
}

impl Debug for RegisterReqArgs {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegisterReqArgs")
            .field("username", &self.username)
            .field("has_password", &!self.password.expose_secret().is_empty())
            .field("name", &self.name)
            .field("email", &self.email)
            .field("phone", &self.phone)
            .finish()
    }
}

pub(crate) fn validate_length(
    field: &'static str,
    value: &str,
    min: usize,
    max: usize,
) -> Result<(), InvalidArgsError> {
    let actual = value.chars().count();
    if actual == 0 {
        return Err(InvalidArgsError::new(field, ConversionError::Empty));
    }
    if actual < min {
        return Err(InvalidArgsError::new(
            field,
            ConversionError::MinNotMet { min, actual },
        ));
    }
    if actual > max {
        return Err(InvalidArgsError::new(
            field,
            ConversionError::MaxExceeded { max, actual },
        ));
    }
    Ok(())
}

fn is_email_shaped(value: &str) -> bool {
    match value.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.contains('@')
                && domain
                    .split_once('.')
                    .is_some_and(|(host, tld)| !host.is_empty() && !tld.is_empty())
        }
        None => false,
    }
}
