use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub email: String,
    pub phone: String,
    pub is_admin: bool,
    pub pollution_threshold: f64,
    pub receive_alerts: bool,
    pub date_joined: DateTime<Utc>,
    /// Per-pollutant alert levels. Absent until the user pushes custom
    /// thresholds; the backend only persists the scalar `pollution_threshold`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alert_thresholds: Option<AlertThreshold>,
}

/// One pollution reading or forecast point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PollutionData {
    pub id: String,
    pub date: DateTime<Utc>,
    pub pm25: f64,
    pub pm10: f64,
    pub no2: f64,
    pub o3: f64,
    pub aqi: f64,
    pub location: String,
    pub prediction: bool,
}

/// Per-pollutant alert levels, attached to a user or used globally.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlertThreshold {
    pub pm25: f64,
    pub pm10: f64,
    pub no2: f64,
    pub o3: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub atmo: Option<f64>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum AlertSeverity {
    Info,
    Warning,
    Critical,
}

/// One entry of the alert feed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PollutionAlert {
    pub id: String,
    #[serde(rename = "type")]
    pub severity: AlertSeverity,
    pub pollutant: String,
    pub value: f64,
    pub threshold: f64,
    pub location: String,
    pub timestamp: DateTime<Utc>,
    pub message: String,
}

/// Envelope returned by every list endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Paginated<T> {
    pub count: u64,
    pub next: Option<String>,
    pub previous: Option<String>,
    pub results: Vec<T>,
}

/// Process-wide authentication state.
///
/// `is_authenticated` must equal `user.is_some()` after every completed auth
/// operation; the constructors below are the only sanctioned way to build a
/// fully-resolved state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthState {
    pub user: Option<User>,
    pub is_authenticated: bool,
    pub loading: bool,
}

impl Default for AuthState {
    /// Initial state: nobody logged in, session check still pending.
    fn default() -> Self {
        Self {
            user: None,
            is_authenticated: false,
            loading: true,
        }
    }
}

impl AuthState {
    /// Resolved state with an active session.
    pub fn authenticated(user: User) -> Self {
        Self {
            user: Some(user),
            is_authenticated: true,
            loading: false,
        }
    }

    /// Resolved state with no active session.
    pub fn logged_out() -> Self {
        Self {
            user: None,
            is_authenticated: false,
            loading: false,
        }
    }

    /// Check the `is_authenticated == user.is_some()` invariant.
    pub fn is_consistent(&self) -> bool {
        self.is_authenticated == self.user.is_some()
    }
}
