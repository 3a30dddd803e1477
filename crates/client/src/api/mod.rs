//! Domain API modules.
//!
//! Thin method sets over [`ApiClient`](crate::client::ApiClient) with fixed
//! endpoint paths. No cross-field validation happens here; malformed
//! parameter combinations are rejected by the backend.

pub mod admin;
pub mod auth;
pub mod data;
pub mod predictions;

pub use admin::AdminApi;
pub use auth::AuthApi;
pub use data::PollutionApi;
pub use predictions::PredictionApi;
