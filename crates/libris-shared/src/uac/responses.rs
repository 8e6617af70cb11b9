use std::fmt::Debug;

#[derive(serde::Serialize, serde::Deserialize, Clone)]
pub struct LoginResponse {
    pub token: String,
}

impl Debug for LoginResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginResponse")
            .field("has_token", &!self.token.is_empty())
            .finish()
    }
}

/// Body the backend sends with most non-data responses, including errors
#[derive(Debug, serde::Serialize, serde::Deserialize, Clone, PartialEq, Eq)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new<S: Into<String>>(message: S) -> Self {
        Self {
            message: message.into(),
        }
    }
}
