//! Pollution data endpoints.

use crate::client::ApiClient;
use crate::error::ClientError;
use crate::mock;
use crate::query::Query;
use aeris_core::{Paginated, PollutionAlert, PollutionData};
use chrono::{NaiveDate, Utc};
use reqwest::Method;
use serde::Deserialize;

/// Filters accepted by the paginated data endpoints.
#[derive(Debug, Clone, Default)]
pub struct DataQuery {
    pub location: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub limit: Option<u32>,
    pub offset: Option<u32>,
}

impl DataQuery {
    pub(crate) fn to_query(&self) -> Query {
        Query::new()
            .maybe("location", self.location.as_deref())
            .maybe("start_date", self.start_date)
            .maybe("end_date", self.end_date)
            .maybe("limit", self.limit)
            .maybe("offset", self.offset)
    }
}

/// Filters accepted by the statistics endpoint.
#[derive(Debug, Clone, Default)]
pub struct StatsQuery {
    pub location: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

impl StatsQuery {
    fn to_query(&self) -> Query {
        Query::new()
            .maybe("location", self.location.as_deref())
            .maybe("start_date", self.start_date)
            .maybe("end_date", self.end_date)
    }
}

#[derive(Debug, Deserialize)]
struct LocationsResponse {
    locations: Vec<String>,
}

/// Pollution data API service.
#[derive(Clone)]
pub struct PollutionApi {
    client: ApiClient,
}

impl PollutionApi {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// Raw sensor readings, unprocessed. Schema varies per collector.
    pub async fn raw_data(
        &self,
        params: &DataQuery,
    ) -> Result<Paginated<serde_json::Value>, ClientError> {
        let request = self
            .client
            .request(Method::GET, "/data/raw/")
            .query(params.to_query().as_slice());
        self.client.execute(request).await
    }

    pub async fn processed_data(
        &self,
        params: &DataQuery,
    ) -> Result<Paginated<PollutionData>, ClientError> {
        let request = self
            .client
            .request(Method::GET, "/data/processed/")
            .query(params.to_query().as_slice());
        self.client.execute(request).await
    }

    pub async fn latest_data(&self, location: Option<&str>) -> Result<PollutionData, ClientError> {
        let request = self
            .client
            .request(Method::GET, "/data/latest/")
            .query(Query::new().maybe("location", location).as_slice());
        self.client.execute(request).await
    }

    /// Latest reading across all locations.
    pub async fn current_pollution(&self) -> Result<PollutionData, ClientError> {
        self.latest_data(None).await
    }

    pub async fn locations(&self) -> Result<Vec<String>, ClientError> {
        let response: LocationsResponse = self.client.get("/data/locations/").await?;
        Ok(response.locations)
    }

    pub async fn statistics(&self, params: &StatsQuery) -> Result<serde_json::Value, ClientError> {
        let request = self
            .client
            .request(Method::GET, "/data/statistics/")
            .query(params.to_query().as_slice());
        self.client.execute(request).await
    }

    /// Alert feed. The backend has no alert route yet; this serves the demo
    /// fixtures.
    pub async fn alerts(&self) -> Vec<PollutionAlert> {
        mock::sample_alerts(Utc::now())
    }
}
