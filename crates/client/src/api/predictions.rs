//! Prediction endpoints and the demo weekly forecast.

use crate::api::data::DataQuery;
use crate::client::ApiClient;
use crate::error::ClientError;
use crate::mock::ForecastCache;
use aeris_core::{Paginated, PollutionData};
use chrono::{NaiveDate, Utc};
use reqwest::Method;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
struct PredictionRequest<'a> {
    location: &'a str,
    date: NaiveDate,
}

/// Parameters for a prediction over caller-supplied conditions.
#[derive(Debug, Clone, Serialize)]
pub struct CustomPredictionRequest {
    pub location: String,
    pub date: NaiveDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weather_data: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub traffic_data: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct ModelsResponse {
    models: Vec<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct TrainingHistoryResponse {
    history: Vec<serde_json::Value>,
}

/// Prediction API service.
pub struct PredictionApi {
    client: ApiClient,
    forecast: ForecastCache,
}

impl PredictionApi {
    pub fn new(client: ApiClient) -> Self {
        Self::with_forecast_cache(client, ForecastCache::new())
    }

    /// Use a custom forecast cache (tests tune the TTL and delay).
    pub fn with_forecast_cache(client: ApiClient, forecast: ForecastCache) -> Self {
        Self { client, forecast }
    }

    pub async fn models(&self) -> Result<Vec<serde_json::Value>, ClientError> {
        let response: ModelsResponse = self.client.get("/predictions/models/").await?;
        Ok(response.models)
    }

    pub async fn active_model(&self) -> Result<serde_json::Value, ClientError> {
        self.client.get("/predictions/models/active/").await
    }

    pub async fn predictions(
        &self,
        params: &DataQuery,
    ) -> Result<Paginated<PollutionData>, ClientError> {
        let request = self
            .client
            .request(Method::GET, "/predictions/list/")
            .query(params.to_query().as_slice());
        self.client.execute(request).await
    }

    /// Seven-day demo forecast, cached for five minutes.
    ///
    /// Not sourced from the backend: stands in for the real prediction
    /// pipeline until one exists.
    pub async fn weekly_predictions(&self) -> Vec<PollutionData> {
        self.forecast.get().await
    }

    /// Prediction for one location, defaulting to today.
    pub async fn prediction_for(
        &self,
        location: &str,
        date: Option<NaiveDate>,
    ) -> Result<PollutionData, ClientError> {
        let date = date.unwrap_or_else(|| Utc::now().date_naive());
        self.client
            .post("/predictions/get/", &PredictionRequest { location, date })
            .await
    }

    pub async fn custom_prediction(
        &self,
        request: &CustomPredictionRequest,
    ) -> Result<PollutionData, ClientError> {
        self.client.post("/predictions/custom/", request).await
    }

    pub async fn training_history(&self) -> Result<Vec<serde_json::Value>, ClientError> {
        let response: TrainingHistoryResponse =
            self.client.get("/predictions/training/history/").await?;
        Ok(response.history)
    }

    pub async fn evaluation_metrics(&self) -> Result<serde_json::Value, ClientError> {
        self.client.get("/predictions/evaluation/").await
    }
}
