//! Wire types for the JSON login call.

use serde::{Deserialize, Serialize};

/// Body posted to the login endpoint.
#[derive(Debug, Serialize)]
pub(crate) struct LoginRequest<'a> {
    pub method: &'static str,
    pub user_login: &'a str,
    pub password: &'a str,
}

impl<'a> LoginRequest<'a> {
    pub fn new(user_login: &'a str, password: &'a str) -> Self {
        Self {
            method: "login",
            user_login,
            password,
        }
    }
}

/// Body returned by the login endpoint. Only the session key matters;
/// everything else the controller sends is ignored.
#[derive(Debug, Deserialize)]
pub(crate) struct LoginResponse {
    /// Older firmware spells this `sessionKey`.
    #[serde(default, alias = "sessionKey")]
    pub session_key: Option<String>,
}

/// Field name reported when the session key is absent.
pub(crate) const SESSION_KEY_FIELD: &str = "session_key";
