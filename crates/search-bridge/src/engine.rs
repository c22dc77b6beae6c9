//! Search engine facade.
//!
//! [`SearchEngine`] is the public entry point. It composes the bulk builder,
//! the query compiler and the result mapper around a [`SearchTransport`] and a
//! [`RecordStore`].
//!
//! # Visibility of soft-deleted records
//!
//! Each request may set `trashed_visible`; requests that leave it unset use
//! the engine default, which [`SearchEngine::with_trashed_visible`] changes on
//! a new engine value. The effective visibility travels with the
//! [`SearchResult`], so concurrent callers sharing one engine never observe
//! each other's setting.
//!
//! # Example
//!
//! ```ignore
//! let engine = SearchEngine::new(transport, store);
//!
//! engine.index_batch(&restaurants).await?;
//!
//! let request = SearchRequest::new("restaurants", "restaurant")
//!     .with_text("pizza")
//!     .with_filter("city", "Paris");
//!
//! if let SearchOutcome::Hits(result) = engine.paginated_search(&request, 10, 2).await? {
//!     let records = engine.hydrate(&result).await?;
//!     println!("{} of {} pages", records.len(), result.page_count().unwrap_or(0));
//! }
//! ```

use std::fmt;
use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, instrument};

use crate::bulk::BulkOperation;
use crate::config::BridgeConfig;
use crate::error::{BridgeResult, RequestError};
use crate::query::{CompiledQuery, QueryCompiler};
use crate::record::Searchable;
use crate::results::{self, SearchResult};
use crate::store::{DynRecordStore, RecordStore};
use crate::transport::{DynTransport, SearchTransport};
use crate::types::SearchRequest;

/// The result of a search call.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchOutcome {
    /// The mapped engine response.
    Hits(SearchResult),
    /// The value returned by the request's response handler, verbatim.
    Custom(Value),
}

impl SearchOutcome {
    /// Returns the mapped result, if the default path ran.
    pub fn hits(&self) -> Option<&SearchResult> {
        match self {
            SearchOutcome::Hits(result) => Some(result),
            SearchOutcome::Custom(_) => None,
        }
    }

    /// Consumes the outcome, returning the mapped result if present.
    pub fn into_hits(self) -> Option<SearchResult> {
        match self {
            SearchOutcome::Hits(result) => Some(result),
            SearchOutcome::Custom(_) => None,
        }
    }

    /// Consumes the outcome, returning the handler's value if present.
    pub fn into_custom(self) -> Option<Value> {
        match self {
            SearchOutcome::Custom(value) => Some(value),
            SearchOutcome::Hits(_) => None,
        }
    }
}

/// Search facade over a transport and a record store.
pub struct SearchEngine<R> {
    /// Engine transport.
    transport: DynTransport,
    /// Store used for hydration.
    store: DynRecordStore<R>,
    /// Compiler and bulk configuration.
    config: BridgeConfig,
    /// Visibility used by requests that do not set their own.
    trashed_visible: bool,
}

impl<R> Clone for SearchEngine<R> {
    fn clone(&self) -> Self {
        Self {
            transport: Arc::clone(&self.transport),
            store: Arc::clone(&self.store),
            config: self.config.clone(),
            trashed_visible: self.trashed_visible,
        }
    }
}

impl<R> fmt::Debug for SearchEngine<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SearchEngine")
            .field("transport", &self.transport.name())
            .field("config", &self.config)
            .field("trashed_visible", &self.trashed_visible)
            .finish_non_exhaustive()
    }
}

impl<R> SearchEngine<R>
where
    R: Searchable + Send + Sync + 'static,
{
    /// Creates an engine with the default configuration.
    pub fn new(transport: DynTransport, store: DynRecordStore<R>) -> Self {
        Self {
            transport,
            store,
            config: BridgeConfig::default(),
            trashed_visible: false,
        }
    }

    /// Replaces the configuration.
    pub fn with_config(mut self, config: BridgeConfig) -> Self {
        self.config = config;
        self
    }

    /// Returns an engine whose requests may hydrate soft-deleted records
    /// unless they say otherwise.
    pub fn with_trashed_visible(mut self, visible: bool) -> Self {
        self.trashed_visible = visible;
        self
    }

    /// Returns the configuration.
    pub fn config(&self) -> &BridgeConfig {
        &self.config
    }

    /// Returns the transport.
    pub fn transport(&self) -> &dyn SearchTransport {
        self.transport.as_ref()
    }

    /// Returns the record store.
    pub fn store(&self) -> &dyn RecordStore<R> {
        self.store.as_ref()
    }

    /// Indexes a batch of records in one bulk call.
    ///
    /// Returns the engine's raw bulk response; per-item results are not
    /// inspected.
    #[instrument(skip(self, records), fields(count = records.len()))]
    pub async fn index_batch(&self, records: &[R]) -> BridgeResult<Value> {
        let operation = BulkOperation::index_batch(records, &self.config);
        self.send_bulk(operation).await
    }

    /// Upserts a batch of records in one bulk call.
    #[instrument(skip(self, records), fields(count = records.len()))]
    pub async fn upsert_batch(&self, records: &[R]) -> BridgeResult<Value> {
        let operation = BulkOperation::upsert_batch(records, &self.config);
        self.send_bulk(operation).await
    }

    /// Deletes a batch of records in one bulk call.
    #[instrument(skip(self, records), fields(count = records.len()))]
    pub async fn delete_batch(&self, records: &[R]) -> BridgeResult<Value> {
        let operation = BulkOperation::delete_batch(records, &self.config);
        self.send_bulk(operation).await
    }

    async fn send_bulk(&self, operation: BulkOperation) -> BridgeResult<Value> {
        if operation.is_empty() {
            debug!("empty bulk operation, nothing to send");
            return Ok(Value::Null);
        }

        debug!(
            actions = operation.action_count(),
            transport = self.transport.name(),
            "sending bulk operation"
        );
        Ok(self.transport.bulk(&operation).await?)
    }

    /// Compiles a request without sending it.
    pub fn compile(&self, request: &SearchRequest) -> CompiledQuery {
        QueryCompiler::for_request(request, &self.config).compile(request)
    }

    /// Runs a search.
    ///
    /// Requests carrying a response handler return
    /// [`SearchOutcome::Custom`]; all others return the mapped hits.
    #[instrument(skip(self, request), fields(index = %request.collection))]
    pub async fn search(&self, request: &SearchRequest) -> BridgeResult<SearchOutcome> {
        let query = self.compile(request);
        self.execute(request, &query, None).await
    }

    /// Runs one page of a search.
    ///
    /// Pages are numbered from 1. The window is `from = (page - 1) *
    /// per_page`, `size = per_page`, overriding any window on the request.
    /// A zero `per_page` or `page` is rejected before anything is sent.
    #[instrument(skip(self, request), fields(index = %request.collection))]
    pub async fn paginated_search(
        &self,
        request: &SearchRequest,
        per_page: u64,
        page: u64,
    ) -> BridgeResult<SearchOutcome> {
        if per_page == 0 {
            return Err(RequestError::InvalidPageSize { page_size: per_page }.into());
        }
        if page == 0 {
            return Err(RequestError::InvalidPageNumber { page }.into());
        }
        let offset = (page - 1)
            .checked_mul(per_page)
            .ok_or(RequestError::InvalidPageNumber { page })?;

        let paged = request.clone().with_offset(offset).with_limit(per_page);
        let query = self.compile(&paged);
        self.execute(&paged, &query, Some(per_page)).await
    }

    async fn execute(
        &self,
        request: &SearchRequest,
        query: &CompiledQuery,
        per_page: Option<u64>,
    ) -> BridgeResult<SearchOutcome> {
        if let Some(ref handler) = request.response_handler {
            debug!("delegating compiled query to response handler");
            let value = handler.handle(self.transport.as_ref(), query).await?;
            return Ok(SearchOutcome::Custom(value));
        }

        let response = self.transport.search(query).await?;
        let visible = request.trashed_visible.unwrap_or(self.trashed_visible);
        let mut result = SearchResult::from_response(&response)?.with_trashed_visible(visible);

        if let Some(per_page) = per_page {
            let pages = results::page_count(result.total_hits(), per_page)?;
            result = result.with_page_count(pages);
        }

        debug!(
            hits = result.hits().len(),
            total = result.total_hits(),
            "search completed"
        );
        Ok(SearchOutcome::Hits(result))
    }

    /// Returns the matched ids in response order.
    pub fn ids_of(&self, result: &SearchResult) -> Vec<String> {
        results::ids_of(result)
    }

    /// Returns the engine-reported total.
    pub fn total_count(&self, result: &SearchResult) -> u64 {
        results::total_count(result)
    }

    /// Resolves a result into records, in response order.
    ///
    /// Uses the visibility recorded on the result.
    pub async fn hydrate(&self, result: &SearchResult) -> BridgeResult<Vec<R>> {
        results::hydrate(result, self.store.as_ref(), result.trashed_visible()).await
    }
}
