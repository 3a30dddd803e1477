//! Client configuration

use std::time::Duration;

/// Client-wide constants.
pub struct ClientConfig;

impl ClientConfig {
    /// Base URL prefix used when none is configured.
    pub const DEFAULT_API_BASE: &'static str = "/api";

    /// User agent sent with every request.
    pub const USER_AGENT: &'static str = concat!("aeris-client/", env!("CARGO_PKG_VERSION"));

    /// How long a generated weekly forecast stays fresh.
    pub const FORECAST_CACHE_TTL: Duration = Duration::from_secs(5 * 60);

    /// Simulated network delay bounds for demo data, in milliseconds.
    pub const SIMULATED_DELAY_MS: (u64, u64) = (300, 700);

    /// Location attached to demo readings and forecasts.
    pub const DEMO_LOCATION: &'static str = "Lyon, France";
}

/// Base URL from `AERIS_API_URL`, falling back to the default prefix.
pub fn api_base_from_env() -> String {
    std::env::var("AERIS_API_URL").unwrap_or_else(|_| ClientConfig::DEFAULT_API_BASE.to_string())
}
