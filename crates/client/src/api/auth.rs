//! Account and credential endpoints.

use crate::client::ApiClient;
use crate::error::ClientError;
use aeris_core::token::TokenPair;
use aeris_core::{AlertThreshold, User};
use serde::{Deserialize, Serialize};
use std::sync::Mutex;

#[derive(Debug, Serialize)]
struct LoginRequest<'a> {
    email: &'a str,
    password: &'a str,
}

/// Registration payload. Names are accepted by the backend even though the
/// returned [`User`] record does not carry them.
#[derive(Debug, Clone, Serialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
}

#[derive(Debug, Deserialize)]
struct RegisterResponse {
    user: User,
}

#[derive(Debug, Serialize)]
struct PasswordResetRequest<'a> {
    email: &'a str,
}

#[derive(Debug, Serialize)]
struct PasswordResetConfirmRequest<'a> {
    token: &'a str,
    password: &'a str,
}

#[derive(Debug, Serialize)]
struct PasswordChangeRequest<'a> {
    current_password: &'a str,
    new_password: &'a str,
}

/// Partial profile update; absent fields are left untouched by the backend.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ProfileUpdate {
    // The backend expects the scalar threshold under this shorter name.
    #[serde(rename = "threshold", skip_serializing_if = "Option::is_none")]
    pub pollution_threshold: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub receive_alerts: Option<bool>,
}

/// Threshold payload accepted by the backend. The optional ATMO index of
/// [`AlertThreshold`] is client-side only and never sent.
#[derive(Debug, Serialize)]
pub(crate) struct ThresholdUpdate {
    pm25: f64,
    pm10: f64,
    no2: f64,
    o3: f64,
}

impl From<&AlertThreshold> for ThresholdUpdate {
    fn from(thresholds: &AlertThreshold) -> Self {
        Self {
            pm25: thresholds.pm25,
            pm10: thresholds.pm10,
            no2: thresholds.no2,
            o3: thresholds.o3,
        }
    }
}

/// Authentication API service.
///
/// Keeps a single-slot cache of the current user, filled by
/// [`login`](Self::login) and [`current_user`](Self::current_user) and
/// invalidated only by [`logout`](Self::logout).
pub struct AuthApi {
    client: ApiClient,
    current_user: Mutex<Option<User>>,
}

impl AuthApi {
    pub fn new(client: ApiClient) -> Self {
        Self {
            client,
            current_user: Mutex::new(None),
        }
    }

    /// Exchange credentials for a token pair, then fetch the user record.
    ///
    /// Tokens are only written to the store once the backend has accepted
    /// the credentials.
    pub async fn login(&self, email: &str, password: &str) -> Result<User, ClientError> {
        let tokens: TokenPair = self
            .client
            .post("/users/login/", &LoginRequest { email, password })
            .await?;
        self.client.token_store().set(&tokens.access, &tokens.refresh);

        let user: User = self.client.get("/users/me/").await?;
        self.cache_user(user.clone());
        Ok(user)
    }

    /// Create an account, then log in with the same credentials.
    pub async fn register(&self, request: &RegisterRequest) -> Result<User, ClientError> {
        let registered: RegisterResponse =
            self.client.post("/users/register/", request).await?;

        self.login(&request.email, &request.password).await?;
        Ok(registered.user)
    }

    pub async fn reset_password(&self, email: &str) -> Result<(), ClientError> {
        let _: serde_json::Value = self
            .client
            .post("/users/password-reset/", &PasswordResetRequest { email })
            .await?;
        Ok(())
    }

    pub async fn confirm_password_reset(
        &self,
        token: &str,
        password: &str,
    ) -> Result<(), ClientError> {
        let _: serde_json::Value = self
            .client
            .post(
                "/users/password-reset/confirm/",
                &PasswordResetConfirmRequest { token, password },
            )
            .await?;
        Ok(())
    }

    /// The reset route doubles as the change-password route when called
    /// with the current credentials.
    pub async fn change_password(
        &self,
        current_password: &str,
        new_password: &str,
    ) -> Result<(), ClientError> {
        let _: serde_json::Value = self
            .client
            .post(
                "/users/password-reset/",
                &PasswordChangeRequest {
                    current_password,
                    new_password,
                },
            )
            .await?;
        Ok(())
    }

    /// Cached user if present, otherwise fetched from the backend.
    ///
    /// Lookup failures resolve to `None`; callers cannot distinguish "no
    /// session" from "backend unreachable" here.
    pub async fn current_user(&self) -> Option<User> {
        if let Some(user) = self.cached_user() {
            return Some(user);
        }
        match self.client.get::<User>("/users/me/").await {
            Ok(user) => {
                self.cache_user(user.clone());
                Some(user)
            }
            Err(err) => {
                tracing::debug!(error = %err, "current user lookup failed");
                None
            }
        }
    }

    /// Apply a partial update and return the server's record.
    pub async fn update_profile(&self, updates: &ProfileUpdate) -> Result<User, ClientError> {
        let user: User = self.client.put("/users/me/", updates).await?;
        self.cache_user(user.clone());
        Ok(user)
    }

    pub async fn update_threshold(&self, thresholds: &AlertThreshold) -> Result<(), ClientError> {
        let _: serde_json::Value = self
            .client
            .put("/users/threshold/", &ThresholdUpdate::from(thresholds))
            .await?;
        Ok(())
    }

    /// Drop the stored tokens and the cached user.
    ///
    /// Local only; the backend keeps no server-side session to revoke.
    pub fn logout(&self) {
        self.client.token_store().clear();
        *self
            .current_user
            .lock()
            .expect("user cache lock poisoned") = None;
    }

    fn cache_user(&self, user: User) {
        *self
            .current_user
            .lock()
            .expect("user cache lock poisoned") = Some(user);
    }

    fn cached_user(&self) -> Option<User> {
        self.current_user
            .lock()
            .expect("user cache lock poisoned")
            .clone()
    }
}
