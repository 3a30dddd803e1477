//! Token-aware HTTP client for the Aeris backend.

use crate::config::ClientConfig;
use crate::error::ClientError;
use aeris_core::token::{MemoryTokenStore, TokenKind, TokenStore};
use reqwest::{Client, ClientBuilder, Method, header};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::sync::Arc;

/// Aeris API client.
///
/// Builds requests against a configured base URL, injecting the bearer
/// credential whenever the token store holds one. A single fire-and-forget
/// request per call: no retries, no timeout, no cancellation.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    tokens: Arc<dyn TokenStore>,
}

impl ApiClient {
    /// Create a new client with default configuration
    pub fn new(base_url: impl Into<String>) -> Result<Self, ClientError> {
        Self::builder().base_url(base_url).build()
    }

    /// Create a new client builder
    pub fn builder() -> ApiClientBuilder {
        ApiClientBuilder::default()
    }

    /// Get the base URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// The token store this client consults on every request.
    pub fn token_store(&self) -> &Arc<dyn TokenStore> {
        &self.tokens
    }

    /// Create a request builder for an endpoint path.
    ///
    /// The path is appended to the base URL verbatim; callers keep the
    /// backend's trailing-slash convention. The authorization header is
    /// attached iff an access token is currently stored.
    pub fn request(&self, method: Method, path: &str) -> reqwest::RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        tracing::debug!(%method, %url, "dispatching request");

        let mut request = self
            .client
            .request(method, url)
            .header(header::CONTENT_TYPE, "application/json");

        if let Some(access) = self.tokens.get(TokenKind::Access) {
            request = request.header(header::AUTHORIZATION, format!("Bearer {access}"));
        }

        request
    }

    /// Execute a request and handle common errors.
    ///
    /// A 204 response deserializes from JSON `null`, so `Option<_>` and
    /// `serde_json::Value` targets work; any other non-2xx status maps to a
    /// [`ClientError`] carrying the backend's message.
    pub async fn execute<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<T, ClientError> {
        let response = request.send().await?;
        let status = response.status();

        if status == reqwest::StatusCode::NO_CONTENT {
            return Ok(serde_json::from_value(serde_json::Value::Null)?);
        }

        if status.is_success() {
            Ok(response.json().await?)
        } else {
            let body = response.text().await.unwrap_or_default();
            Err(ClientError::from_response(status, &body))
        }
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        self.execute(self.request(Method::GET, path)).await
    }

    pub async fn post<T, B>(&self, path: &str, body: &B) -> Result<T, ClientError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.execute(self.request(Method::POST, path).json(body))
            .await
    }

    /// POST without a request body.
    pub async fn post_empty<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        self.execute(self.request(Method::POST, path)).await
    }

    pub async fn put<T, B>(&self, path: &str, body: &B) -> Result<T, ClientError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.execute(self.request(Method::PUT, path).json(body))
            .await
    }

    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        self.execute(self.request(Method::DELETE, path)).await
    }
}

/// Builder for ApiClient
#[derive(Default)]
pub struct ApiClientBuilder {
    base_url: Option<String>,
    token_store: Option<Arc<dyn TokenStore>>,
    user_agent: Option<String>,
}

impl ApiClientBuilder {
    /// Set the base URL
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Set the token store consulted for the bearer credential
    pub fn token_store(mut self, store: Arc<dyn TokenStore>) -> Self {
        self.token_store = Some(store);
        self
    }

    /// Set the user agent
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = Some(agent.into());
        self
    }

    /// Build the client
    pub fn build(self) -> Result<ApiClient, ClientError> {
        let base_url = self
            .base_url
            .unwrap_or_else(|| ClientConfig::DEFAULT_API_BASE.to_string());
        if base_url.is_empty() {
            return Err(ClientError::Configuration(
                "base_url must not be empty".into(),
            ));
        }

        // Ensure base_url ends without a trailing slash
        let base_url = base_url.trim_end_matches('/').to_string();

        let user_agent = self
            .user_agent
            .unwrap_or_else(|| ClientConfig::USER_AGENT.to_string());
        let client = ClientBuilder::new().user_agent(user_agent).build()?;

        Ok(ApiClient {
            client,
            base_url,
            tokens: self
                .token_store
                .unwrap_or_else(|| Arc::new(MemoryTokenStore::new())),
        })
    }
}
