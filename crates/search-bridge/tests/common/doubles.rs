//! Recording transport and in-memory record store.

use std::collections::VecDeque;
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::Value;

use helios_search_bridge::bulk::BulkOperation;
use helios_search_bridge::error::{BridgeResult, TransportError};
use helios_search_bridge::query::CompiledQuery;
use helios_search_bridge::store::RecordStore;
use helios_search_bridge::transport::SearchTransport;

use super::fixtures::{Restaurant, bulk_ack};

/// Transport that records every request and replays queued responses.
#[derive(Default)]
pub struct RecordingTransport {
    bulk_requests: Mutex<Vec<BulkOperation>>,
    search_requests: Mutex<Vec<CompiledQuery>>,
    search_responses: Mutex<VecDeque<Result<Value, TransportError>>>,
}

impl RecordingTransport {
    /// Creates a transport with no queued responses.
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Queues a search response.
    pub fn respond_with(&self, response: Value) {
        self.search_responses.lock().push_back(Ok(response));
    }

    /// Queues a search failure.
    pub fn fail_with(&self, status: u16) {
        self.search_responses
            .lock()
            .push_back(Err(TransportError::Status {
                backend_name: "recording".to_string(),
                status,
                body: "unavailable".to_string(),
            }));
    }

    /// Returns the recorded bulk requests.
    pub fn bulk_requests(&self) -> Vec<BulkOperation> {
        self.bulk_requests.lock().clone()
    }

    /// Returns the recorded search requests.
    pub fn search_requests(&self) -> Vec<CompiledQuery> {
        self.search_requests.lock().clone()
    }
}

#[async_trait]
impl SearchTransport for RecordingTransport {
    fn name(&self) -> &'static str {
        "recording"
    }

    async fn bulk(&self, operation: &BulkOperation) -> Result<Value, TransportError> {
        self.bulk_requests.lock().push(operation.clone());
        Ok(bulk_ack())
    }

    async fn search(&self, query: &CompiledQuery) -> Result<Value, TransportError> {
        self.search_requests.lock().push(query.clone());
        self.search_responses
            .lock()
            .pop_front()
            .unwrap_or_else(|| {
                Err(TransportError::Internal {
                    backend_name: "recording".to_string(),
                    message: "no queued response".to_string(),
                    source: None,
                })
            })
    }
}

/// In-memory record store honoring soft deletes.
#[derive(Default)]
pub struct InMemoryStore {
    records: Vec<Restaurant>,
    fetches: Mutex<Vec<(Vec<String>, bool)>>,
}

impl InMemoryStore {
    /// Creates a store holding `records`.
    pub fn with_records(records: Vec<Restaurant>) -> Arc<Self> {
        Arc::new(Self {
            records,
            fetches: Mutex::new(Vec::new()),
        })
    }

    /// Returns every fetch as `(ids, with_trashed)`.
    pub fn fetches(&self) -> Vec<(Vec<String>, bool)> {
        self.fetches.lock().clone()
    }
}

#[async_trait]
impl RecordStore<Restaurant> for InMemoryStore {
    async fn fetch_by_ids(
        &self,
        ids: &[String],
        with_trashed: bool,
    ) -> BridgeResult<Vec<Restaurant>> {
        self.fetches.lock().push((ids.to_vec(), with_trashed));

        // Storage order, deliberately unrelated to the requested order
        Ok(self
            .records
            .iter()
            .filter(|r| ids.contains(&r.id.to_string()))
            .filter(|r| with_trashed || !r.trashed)
            .cloned()
            .collect())
    }
}
