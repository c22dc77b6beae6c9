//! Helios Search Bridge
//!
//! This crate translates an application's search intent into the wire format
//! of a document search engine exposing bulk indexing and query DSL search
//! endpoints, and translates the engine's answers back.
//!
//! # Architecture
//!
//! - [`types`] - Search requests, filters, free-text terms, sort keys
//! - [`query`] - Compiles requests into the engine's boolean-combination query
//! - [`bulk`] - Builds bulk index/upsert/delete operations from record batches
//! - [`results`] - Maps raw responses to ids, totals and page counts; hydration
//! - [`engine`] - The [`SearchEngine`](engine::SearchEngine) facade
//! - [`transport`] / [`store`] / [`record`] - Traits for the collaborators the
//!   bridge relies on: the engine transport, the record store and the records
//! - [`backends`] - Transport implementations behind feature flags
//! - [`config`] / [`error`] - Configuration and error types
//!
//! Network transport, persistence and record serialization are supplied by
//! the caller through traits. The bridge adds no retries and no caching;
//! transport failures reach the caller unchanged.
//!
//! # Compiling a Request
//!
//! ```
//! use helios_search_bridge::config::BridgeConfig;
//! use helios_search_bridge::query::QueryCompiler;
//! use helios_search_bridge::types::{GeoDistance, SearchRequest, StructuredQuery};
//! use serde_json::json;
//!
//! let request = SearchRequest::new("restaurants", "restaurant")
//!     .with_free_text(StructuredQuery::new().with_geo_distance(GeoDistance::new(48.85, 2.35)))
//!     .with_filter("rating", 4)
//!     .with_filter("cuisine", "thai");
//!
//! let config = BridgeConfig::default();
//! let query = QueryCompiler::for_request(&request, &config).compile(&request);
//!
//! assert_eq!(query.must()[0], json!({ "term": { "rating": 4 } }));
//! assert_eq!(query.filter()[0]["geo_distance"]["distance"], "3km");
//! assert_eq!(query.size, Some(10000));
//! ```
//!
//! # Features
//!
//! - `elasticsearch` - [`ElasticsearchTransport`](backends::elasticsearch::ElasticsearchTransport)

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod backends;
pub mod bulk;
pub mod config;
pub mod engine;
pub mod error;
pub mod query;
pub mod record;
pub mod results;
pub mod store;
pub mod transport;
pub mod types;

pub use engine::{SearchEngine, SearchOutcome};
pub use error::{BridgeError, BridgeResult};
