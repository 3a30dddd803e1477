//! Aeris core types and utilities

pub mod token;
pub mod types;

pub use token::{MemoryTokenStore, TokenKind, TokenPair, TokenStore};
pub use types::{
    AlertSeverity, AlertThreshold, AuthState, Paginated, PollutionAlert, PollutionData, User,
};
