//! Search engine transports.
//!
//! Enable transports with feature flags:
//! - `elasticsearch` - Elasticsearch via the official client

#[cfg(feature = "elasticsearch")]
pub mod elasticsearch;
