//! Process-wide authentication session.
//!
//! All [`AuthState`] mutation funnels through the operations here; callers
//! only ever see snapshots. Concurrent operations are not coordinated: two
//! racing logins leave the state of whichever response resolved last.

use crate::api::auth::{AuthApi, ProfileUpdate, RegisterRequest};
use crate::client::ApiClient;
use crate::error::ClientError;
use aeris_core::{AlertThreshold, AuthState, User};
use std::sync::RwLock;

/// Owned session object; share it behind an `Arc` where needed.
pub struct AuthSession {
    api: AuthApi,
    state: RwLock<AuthState>,
}

impl AuthSession {
    /// Start with no resolved session; call [`check_auth`](Self::check_auth)
    /// to settle the initial state.
    pub fn new(client: ApiClient) -> Self {
        Self {
            api: AuthApi::new(client),
            state: RwLock::new(AuthState::default()),
        }
    }

    /// Snapshot of the current state.
    pub fn state(&self) -> AuthState {
        self.state.read().expect("auth state lock poisoned").clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.state().is_authenticated
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<User, ClientError> {
        self.set_loading(true);
        match self.api.login(email, password).await {
            Ok(user) => {
                tracing::info!(user = %user.id, "login succeeded");
                self.replace(AuthState::authenticated(user.clone()));
                Ok(user)
            }
            Err(err) => {
                self.replace(AuthState::logged_out());
                Err(err)
            }
        }
    }

    pub async fn register(&self, request: &RegisterRequest) -> Result<User, ClientError> {
        self.set_loading(true);
        match self.api.register(request).await {
            Ok(user) => {
                tracing::info!(user = %user.id, "registration succeeded");
                self.replace(AuthState::authenticated(user.clone()));
                Ok(user)
            }
            Err(err) => {
                self.replace(AuthState::logged_out());
                Err(err)
            }
        }
    }

    /// Pass-through; does not touch the session state.
    pub async fn reset_password(&self, email: &str) -> Result<(), ClientError> {
        self.api.reset_password(email).await
    }

    /// Pass-through; does not touch the session state.
    pub async fn change_password(
        &self,
        current_password: &str,
        new_password: &str,
    ) -> Result<(), ClientError> {
        self.api.change_password(current_password, new_password).await
    }

    /// End the session. Tokens and the cached user are dropped locally;
    /// there is no server-side session to revoke.
    pub fn logout(&self) {
        self.api.logout();
        self.replace(AuthState::logged_out());
        tracing::info!("logged out");
    }

    /// Apply a partial profile update. A no-op when nobody is logged in.
    ///
    /// On failure the session survives; only the loading flag resets.
    pub async fn update_profile(
        &self,
        updates: &ProfileUpdate,
    ) -> Result<Option<User>, ClientError> {
        if self.state().user.is_none() {
            return Ok(None);
        }

        self.set_loading(true);
        match self.api.update_profile(updates).await {
            Ok(user) => {
                self.replace(AuthState::authenticated(user.clone()));
                Ok(Some(user))
            }
            Err(err) => {
                self.set_loading(false);
                Err(err)
            }
        }
    }

    /// Push alert thresholds, then patch the in-memory user in place.
    pub async fn update_threshold(&self, thresholds: &AlertThreshold) -> Result<(), ClientError> {
        self.api.update_threshold(thresholds).await?;

        let mut state = self.state.write().expect("auth state lock poisoned");
        if let Some(user) = state.user.as_mut() {
            user.alert_thresholds = Some(thresholds.clone());
        }
        Ok(())
    }

    /// Resolve the session against the backend (or the cached user).
    ///
    /// Never fails outward: an unreachable backend reads as logged out.
    pub async fn check_auth(&self) {
        match self.api.current_user().await {
            Some(user) => self.replace(AuthState::authenticated(user)),
            None => {
                tracing::debug!("no active session");
                self.replace(AuthState::logged_out());
            }
        }
    }

    /// Direct access to the underlying API module.
    pub fn api(&self) -> &AuthApi {
        &self.api
    }

    fn replace(&self, next: AuthState) {
        debug_assert!(next.is_consistent());
        *self.state.write().expect("auth state lock poisoned") = next;
    }

    fn set_loading(&self, loading: bool) {
        self.state.write().expect("auth state lock poisoned").loading = loading;
    }
}
