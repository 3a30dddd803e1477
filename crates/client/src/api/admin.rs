//! Administrative endpoints.

use crate::api::auth::ThresholdUpdate;
use crate::client::ApiClient;
use crate::error::ClientError;
use crate::query::Query;
use aeris_core::{AlertThreshold, Paginated, User};
use reqwest::Method;

/// Filters accepted by the user list endpoint.
#[derive(Debug, Clone, Default)]
pub struct UserQuery {
    pub role: Option<String>,
    pub email_alerts_enabled: Option<bool>,
    pub limit: Option<u32>,
    pub offset: Option<u32>,
}

/// Administration API service.
#[derive(Clone)]
pub struct AdminApi {
    client: ApiClient,
}

impl AdminApi {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn users(&self, params: &UserQuery) -> Result<Vec<User>, ClientError> {
        let query = Query::new()
            .maybe("role", params.role.as_deref())
            .maybe("email_alerts_enabled", params.email_alerts_enabled)
            .maybe("limit", params.limit)
            .maybe("offset", params.offset);

        let request = self
            .client
            .request(Method::GET, "/users/list/")
            .query(query.as_slice());
        let page: Paginated<User> = self.client.execute(request).await?;
        Ok(page.results)
    }

    /// Platform-default thresholds. The backend has no read route for
    /// these, so the values are fixed client-side.
    pub async fn global_thresholds(&self) -> AlertThreshold {
        AlertThreshold {
            pm25: 35.0,
            pm10: 50.0,
            no2: 80.0,
            o3: 100.0,
            atmo: None,
        }
    }

    pub async fn update_global_thresholds(
        &self,
        thresholds: &AlertThreshold,
    ) -> Result<(), ClientError> {
        let _: serde_json::Value = self
            .client
            .put("/users/threshold/default/", &ThresholdUpdate::from(thresholds))
            .await?;
        Ok(())
    }

    /// Not supported by the backend; logged and dropped.
    pub fn update_atmo_config(&self, config: &serde_json::Value) {
        tracing::warn!(%config, "ATMO configuration updates are not supported by the backend");
    }

    pub async fn clear_data(&self) -> Result<(), ClientError> {
        let _: serde_json::Value = self.client.post_empty("/data/purge/").await?;
        Ok(())
    }

    pub async fn train_model(&self) -> Result<(), ClientError> {
        let _: serde_json::Value = self
            .client
            .post_empty("/predictions/training/manual/")
            .await?;
        Ok(())
    }

    pub async fn update_remote_model(&self) -> Result<(), ClientError> {
        let _: serde_json::Value = self
            .client
            .post_empty("/predictions/models/update-remote/")
            .await?;
        Ok(())
    }

    pub async fn download_remote_model(&self) -> Result<(), ClientError> {
        let _: serde_json::Value = self
            .client
            .post_empty("/predictions/models/download-remote/")
            .await?;
        Ok(())
    }
}
