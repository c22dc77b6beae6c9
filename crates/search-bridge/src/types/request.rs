//! Search request type.

use std::fmt;
use std::sync::Arc;

use serde_json::{Map, Value};

use crate::transport::ResponseHandler;

use super::filter::{FilterValue, Filters};
use super::free_text::FreeText;
use super::sort::SortOrder;

/// A complete search request.
///
/// # Example
///
/// ```
/// use helios_search_bridge::types::{SearchRequest, SortOrder};
///
/// let request = SearchRequest::new("restaurants", "restaurant")
///     .with_text("pizza")
///     .with_filter("city", "Paris")
///     .with_filter("rating", 4)
///     .with_order(SortOrder::parse("-rating"))
///     .with_limit(20);
///
/// assert_eq!(request.filters.len(), 2);
/// ```
#[derive(Clone, Default)]
pub struct SearchRequest {
    /// The collection (index) searched.
    pub collection: String,

    /// The collection type tag.
    pub collection_type: String,

    /// The primary search term.
    pub free_text: FreeText,

    /// Field filters, in insertion order.
    pub filters: Filters,

    /// Engine-native fragments merged into the boolean query last.
    pub raw_fragments: Vec<Map<String, Value>>,

    /// Sort keys, in priority order.
    pub orders: Vec<SortOrder>,

    /// Window size.
    pub limit: Option<u64>,

    /// Window offset.
    pub offset: Option<u64>,

    /// Whether soft-deleted records may be hydrated. `None` defers to the
    /// engine default.
    pub trashed_visible: Option<bool>,

    /// Low-level override receiving the compiled query and the transport.
    pub response_handler: Option<Arc<dyn ResponseHandler>>,
}

impl fmt::Debug for SearchRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SearchRequest")
            .field("collection", &self.collection)
            .field("collection_type", &self.collection_type)
            .field("free_text", &self.free_text)
            .field("filters", &self.filters)
            .field("raw_fragments", &self.raw_fragments)
            .field("orders", &self.orders)
            .field("limit", &self.limit)
            .field("offset", &self.offset)
            .field("trashed_visible", &self.trashed_visible)
            .field("has_response_handler", &self.response_handler.is_some())
            .finish()
    }
}

impl SearchRequest {
    /// Creates a match-everything request against a collection.
    pub fn new(collection: impl Into<String>, collection_type: impl Into<String>) -> Self {
        Self {
            collection: collection.into(),
            collection_type: collection_type.into(),
            ..Default::default()
        }
    }

    /// Sets the primary search term.
    pub fn with_free_text(mut self, free_text: impl Into<FreeText>) -> Self {
        self.free_text = free_text.into();
        self
    }

    /// Sets a plain text search term.
    pub fn with_text(self, text: impl Into<String>) -> Self {
        self.with_free_text(FreeText::Text(text.into()))
    }

    /// Adds (or replaces) a field filter.
    pub fn with_filter(mut self, field: impl Into<String>, value: impl Into<FilterValue>) -> Self {
        self.filters.insert(field, value);
        self
    }

    /// Adds a raw engine-native fragment.
    ///
    /// Non-object values are ignored; only objects can be merged into the
    /// boolean query. Each key replaces the compiled clause list under the
    /// same key rather than extending it, so a raw `filter` also drops the
    /// geo-distance filter.
    pub fn with_raw_fragment(mut self, fragment: Value) -> Self {
        if let Value::Object(map) = fragment {
            self.raw_fragments.push(map);
        }
        self
    }

    /// Adds a sort key.
    pub fn with_order(mut self, order: SortOrder) -> Self {
        self.orders.push(order);
        self
    }

    /// Sets the window size.
    pub fn with_limit(mut self, limit: u64) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Sets the window offset.
    pub fn with_offset(mut self, offset: u64) -> Self {
        self.offset = Some(offset);
        self
    }

    /// Sets whether soft-deleted records may be hydrated for this request.
    pub fn with_trashed_visible(mut self, visible: bool) -> Self {
        self.trashed_visible = Some(visible);
        self
    }

    /// Routes the compiled query to a handler instead of the default search path.
    pub fn with_response_handler(mut self, handler: Arc<dyn ResponseHandler>) -> Self {
        self.response_handler = Some(handler);
        self
    }
}
