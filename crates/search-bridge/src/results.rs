//! Result mapping.
//!
//! Reads the engine's raw search response into a [`SearchResult`] and resolves
//! matched ids back into records. Response order is the engine's relevance or
//! sort order and is preserved through hydration.

use std::collections::HashMap;

use serde_json::Value;

use crate::error::{BridgeResult, RequestError, ResponseError};
use crate::record::Searchable;
use crate::store::RecordStore;

/// A single matched document.
#[derive(Debug, Clone, PartialEq)]
pub struct Hit {
    /// The document id.
    pub id: String,
    /// The stored document (`null` if the engine did not return it).
    pub source: Value,
}

/// The mapped outcome of a search.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchResult {
    hits: Vec<Hit>,
    total_hits: u64,
    page_count: Option<u64>,
    trashed_visible: bool,
}

impl SearchResult {
    /// Creates a result from hits and a total.
    pub fn new(hits: Vec<Hit>, total_hits: u64) -> Self {
        Self {
            hits,
            total_hits,
            page_count: None,
            trashed_visible: false,
        }
    }

    /// Parses a raw engine response.
    ///
    /// Expects `{ "hits": { "total": n, "hits": [ { "_id", "_source" } ] } }`.
    /// `total` may also be an object carrying `value`. Anything else is a
    /// malformed response.
    pub fn from_response(response: &Value) -> Result<Self, ResponseError> {
        let hits_obj = response
            .get("hits")
            .filter(|h| h.is_object())
            .ok_or_else(|| ResponseError::malformed("hits"))?;

        let total_hits = match hits_obj.get("total") {
            Some(Value::Number(n)) => n.as_u64(),
            Some(Value::Object(obj)) => obj.get("value").and_then(|v| v.as_u64()),
            _ => None,
        }
        .ok_or_else(|| ResponseError::malformed("hits.total"))?;

        let raw_hits = hits_obj
            .get("hits")
            .and_then(|h| h.as_array())
            .ok_or_else(|| ResponseError::malformed("hits.hits"))?;

        let hits = raw_hits
            .iter()
            .enumerate()
            .map(|(i, hit)| {
                let id = match hit.get("_id") {
                    Some(Value::String(s)) => s.clone(),
                    Some(Value::Number(n)) => n.to_string(),
                    _ => return Err(ResponseError::malformed(format!("hits.hits[{}]._id", i))),
                };
                let source = hit.get("_source").cloned().unwrap_or(Value::Null);
                Ok(Hit { id, source })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self::new(hits, total_hits))
    }

    /// Sets the page count.
    pub fn with_page_count(mut self, page_count: u64) -> Self {
        self.page_count = Some(page_count);
        self
    }

    /// Records whether soft-deleted records may be hydrated.
    pub fn with_trashed_visible(mut self, visible: bool) -> Self {
        self.trashed_visible = visible;
        self
    }

    /// Returns the hits in response order.
    pub fn hits(&self) -> &[Hit] {
        &self.hits
    }

    /// Returns the matched ids in response order.
    pub fn ids(&self) -> Vec<String> {
        self.hits.iter().map(|hit| hit.id.clone()).collect()
    }

    /// Returns the engine-reported total.
    ///
    /// Computed before the window is applied. Engines that cap total-hit
    /// accuracy report a lower bound here, and page counts inherit it.
    pub fn total_hits(&self) -> u64 {
        self.total_hits
    }

    /// Returns the page count for paginated searches.
    pub fn page_count(&self) -> Option<u64> {
        self.page_count
    }

    /// Returns whether soft-deleted records may be hydrated.
    pub fn trashed_visible(&self) -> bool {
        self.trashed_visible
    }

    /// Returns true if nothing matched in this window.
    pub fn is_empty(&self) -> bool {
        self.hits.is_empty()
    }
}

/// Returns the matched ids in response order.
pub fn ids_of(result: &SearchResult) -> Vec<String> {
    result.ids()
}

/// Returns the engine-reported total.
pub fn total_count(result: &SearchResult) -> u64 {
    result.total_hits()
}

/// Computes `ceil(total / page_size)`.
pub fn page_count(total: u64, page_size: u64) -> Result<u64, RequestError> {
    if page_size == 0 {
        return Err(RequestError::InvalidPageSize { page_size });
    }
    Ok(total.div_ceil(page_size))
}

/// Resolves a result's ids into records, in response order.
///
/// Issues one batch fetch. Ids the store no longer knows are dropped; a stale
/// index entry is expected and not an error.
pub async fn hydrate<R: Searchable>(
    result: &SearchResult,
    store: &dyn RecordStore<R>,
    trashed_visible: bool,
) -> BridgeResult<Vec<R>> {
    if result.is_empty() {
        return Ok(Vec::new());
    }

    let ids = result.ids();
    let fetched = store.fetch_by_ids(&ids, trashed_visible).await?;

    let mut by_id: HashMap<String, R> = fetched
        .into_iter()
        .map(|record| (record.identifier(), record))
        .collect();

    let records: Vec<R> = ids.iter().filter_map(|id| by_id.remove(id)).collect();

    if records.len() < ids.len() {
        tracing::debug!(
            requested = ids.len(),
            resolved = records.len(),
            "dropped unresolved ids during hydration"
        );
    }

    Ok(records)
}
