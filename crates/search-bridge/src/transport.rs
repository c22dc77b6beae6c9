//! Transport traits.
//!
//! The bridge never talks to the network itself. A [`SearchTransport`] sends
//! compiled requests and returns the engine's raw JSON response; failures are
//! returned as-is and never retried here.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use crate::bulk::BulkOperation;
use crate::error::{BridgeResult, TransportError};
use crate::query::CompiledQuery;

/// Sends bulk and search requests to a search engine.
#[async_trait]
pub trait SearchTransport: Send + Sync {
    /// Returns a short name for the engine, used in errors and logs.
    fn name(&self) -> &'static str;

    /// Sends a bulk request, returning the engine's raw response.
    async fn bulk(&self, operation: &BulkOperation) -> Result<Value, TransportError>;

    /// Sends a search request, returning the engine's raw response.
    async fn search(&self, query: &CompiledQuery) -> Result<Value, TransportError>;
}

/// A dynamically typed transport.
pub type DynTransport = Arc<dyn SearchTransport>;

/// Low-level override for the default search path.
///
/// A request carrying a handler is compiled as usual, then the compiled query
/// and the transport are handed to the handler instead of being searched and
/// mapped. Whatever the handler returns becomes the call's result verbatim.
/// This is the way to reach engine features the bridge does not model, such
/// as inspecting aggregations or per-item bulk results.
#[async_trait]
pub trait ResponseHandler: Send + Sync {
    /// Handles a compiled query.
    async fn handle(
        &self,
        transport: &dyn SearchTransport,
        query: &CompiledQuery,
    ) -> BridgeResult<Value>;
}
