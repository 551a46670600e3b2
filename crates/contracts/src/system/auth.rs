//! Session credential and the auth header built from it.

use crate::shared::config::ApiConfig;

/// Token of the signed-in operator. Every backend call carries it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    token: String,
}

impl Session {
    /// `None` for a blank token: there is no session to speak of.
    pub fn new(token: impl Into<String>) -> Option<Self> {
        let token = token.into();
        let token = token.trim();
        (!token.is_empty()).then(|| Self {
            token: token.to_string(),
        })
    }

    /// Header name and value, e.g. `("token", "islam__abc")`.
    pub fn header(&self, api: &ApiConfig) -> (String, String) {
        (
            api.auth_header.clone(),
            format!("{}{}", api.token_prefix, self.token),
        )
    }
}
