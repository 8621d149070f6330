//! HTTP inbound adapter exposing the dashboard pages, JSON API and probes.

pub mod dashboard;
pub mod error;
pub mod health;
pub mod state;
pub mod templates;

pub use error::ApiResult;
