//! Access/refresh token storage.
//!
//! Tokens are opaque strings: no shape validation, no expiry tracking.
//! A stale token is only discovered when the backend rejects a request.

use serde::{Deserialize, Serialize};
use std::sync::Mutex;

/// Storage key for the access token in persistent implementations.
pub const ACCESS_TOKEN_KEY: &str = "access_token";
/// Storage key for the refresh token in persistent implementations.
pub const REFRESH_TOKEN_KEY: &str = "refresh_token";

/// Which half of the token pair to read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Access,
    Refresh,
}

/// Access/refresh credential pair as returned by the login endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenPair {
    pub access: String,
    pub refresh: String,
}

/// Key-value storage for the session's token pair.
///
/// Written on login/register, cleared on logout. Any previously stored
/// string is returned verbatim.
pub trait TokenStore: Send + Sync {
    fn get(&self, kind: TokenKind) -> Option<String>;
    fn set(&self, access: &str, refresh: &str);
    fn clear(&self);
}

/// Process-local token store.
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    tokens: Mutex<Option<TokenPair>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TokenStore for MemoryTokenStore {
    fn get(&self, kind: TokenKind) -> Option<String> {
        let tokens = self.tokens.lock().expect("token store lock poisoned");
        tokens.as_ref().map(|pair| match kind {
            TokenKind::Access => pair.access.clone(),
            TokenKind::Refresh => pair.refresh.clone(),
        })
    }

    fn set(&self, access: &str, refresh: &str) {
        let mut tokens = self.tokens.lock().expect("token store lock poisoned");
        *tokens = Some(TokenPair {
            access: access.to_string(),
            refresh: refresh.to_string(),
        });
    }

    fn clear(&self) {
        let mut tokens = self.tokens.lock().expect("token store lock poisoned");
        *tokens = None;
    }
}

#[cfg(any(test, feature = "tests"))]
pub mod mock {
    use super::*;
    use mockall::mock;

    mock! {
        pub TokenStore {}

        impl TokenStore for TokenStore {
            fn get(&self, kind: TokenKind) -> Option<String>;
            fn set(&self, access: &str, refresh: &str);
            fn clear(&self);
        }
    }
}
