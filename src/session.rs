//! Session state: the bearer token shared by every request.
//!
//! A [`Session`] is cheap to clone; clones share the same token. Event
//! streams read the token once while opening the connection and never
//! mutate it.

use std::sync::{Arc, RwLock};

use crate::traits::Headers;

/// Holder of the current access token.
#[derive(Debug, Clone, Default)]
pub struct Session {
    token: Arc<RwLock<Option<String>>>,
}

impl Session {
    /// Create an unauthenticated session.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a session that already holds a token.
    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: Arc::new(RwLock::new(Some(token.into()))),
        }
    }

    /// The current token, if any.
    pub fn get_token(&self) -> Option<String> {
        self.token
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    /// Replace the current token.
    pub fn set_token(&self, token: impl Into<String>) {
        *self
            .token
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = Some(token.into());
    }

    /// Forget the current token.
    pub fn clear_token(&self) {
        *self
            .token
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = None;
    }

    pub fn is_authenticated(&self) -> bool {
        self.get_token().is_some()
    }

    /// `Authorization` header for the current token; empty when signed out.
    pub fn auth_headers(&self) -> Headers {
        let mut headers = Headers::new();
        if let Some(token) = self.get_token() {
            headers.insert("Authorization".to_string(), format!("Bearer {}", token));
        }
        headers
    }
}
