//! Query compiler.
//!
//! Translates a [`SearchRequest`] into the engine's boolean-combination query,
//! sort list and result window.

use serde_json::{Map, Value, json};

use crate::config::BridgeConfig;
use crate::types::{FreeText, SearchRequest};

use super::clauses;

/// A compiled search, ready to hand to a transport.
#[derive(Debug, Clone, PartialEq)]
pub struct CompiledQuery {
    /// The collection (index) to search.
    pub index: String,
    /// The collection type tag, when mapping types are in use.
    pub doc_type: Option<String>,
    /// The boolean-combination object (`must`, `filter`, `should`,
    /// `must_not` and any raw fragment keys).
    pub bool_query: Map<String, Value>,
    /// Sort list; `None` leaves the engine's relevance order.
    pub sort: Option<Vec<Value>>,
    /// Window offset.
    pub from: Option<u64>,
    /// Window size.
    pub size: Option<u64>,
}

impl CompiledQuery {
    /// Returns the positive clauses.
    pub fn must(&self) -> &[Value] {
        self.clause_list("must")
    }

    /// Returns the non-scoring filter clauses.
    pub fn filter(&self) -> &[Value] {
        self.clause_list("filter")
    }

    fn clause_list(&self, key: &str) -> &[Value] {
        self.bool_query
            .get(key)
            .and_then(|v| v.as_array())
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Builds the search body.
    ///
    /// The `filter` entry of the boolean object is lifted into the `filtered`
    /// wrapper; everything else stays under `bool`.
    pub fn body(&self) -> Value {
        let mut bool_query = self.bool_query.clone();
        let filter = bool_query.remove("filter").unwrap_or_else(|| json!([]));

        let mut body = json!({
            "query": {
                "filtered": {
                    "filter": filter,
                    "query": { "bool": Value::Object(bool_query) }
                }
            }
        });

        if let Some(ref sort) = self.sort {
            body["sort"] = json!(sort);
        }

        body
    }

    /// Builds the full search request envelope.
    pub fn to_request(&self) -> Value {
        let mut request = json!({ "index": self.index });
        if let Some(ref doc_type) = self.doc_type {
            request["type"] = json!(doc_type);
        }
        if let Some(from) = self.from {
            request["from"] = json!(from);
        }
        if let Some(size) = self.size {
            request["size"] = json!(size);
        }
        request["body"] = self.body();
        request
    }
}

/// Compiles search requests for one collection.
pub struct QueryCompiler<'a> {
    collection: &'a str,
    collection_type: &'a str,
    config: &'a BridgeConfig,
}

impl<'a> QueryCompiler<'a> {
    /// Creates a new compiler.
    pub fn new(collection: &'a str, collection_type: &'a str, config: &'a BridgeConfig) -> Self {
        Self {
            collection,
            collection_type,
            config,
        }
    }

    /// Creates a compiler targeting the collection named by the request.
    pub fn for_request(request: &'a SearchRequest, config: &'a BridgeConfig) -> Self {
        Self::new(&request.collection, &request.collection_type, config)
    }

    /// Compiles a request.
    pub fn compile(&self, request: &SearchRequest) -> CompiledQuery {
        let mut must: Vec<Value> = Vec::new();
        let mut filter: Vec<Value> = Vec::new();
        let mut from: Option<u64> = None;
        let mut size: Option<u64> = None;

        match &request.free_text {
            FreeText::None => must.push(clauses::match_all()),
            FreeText::Text(text) if text.is_empty() => must.push(clauses::match_all()),
            FreeText::Text(text) => must.push(clauses::full_text(text, self.config.fuzziness)),
            FreeText::Structured(query) => {
                from = query.skip;
                size = query.limit;

                for field_match in &query.matches {
                    must.push(clauses::field_match(&field_match.field, &field_match.value));
                }

                if let Some(ref geo) = query.geo_distance {
                    filter.push(clauses::geo_distance(geo, self.config));
                }
            }
        }

        for (field, value) in request.filters.iter() {
            must.push(clauses::filter_clause(field, value));
        }

        let mut bool_query = Map::new();
        bool_query.insert("must".to_string(), Value::Array(must));
        bool_query.insert("filter".to_string(), Value::Array(filter));
        bool_query.insert("should".to_string(), json!([]));
        bool_query.insert("must_not".to_string(), json!([]));

        // Raw fragments replace colliding keys wholesale
        for fragment in &request.raw_fragments {
            for (key, value) in fragment {
                bool_query.insert(key.clone(), value.clone());
            }
        }

        let sort = if request.orders.is_empty() {
            None
        } else {
            Some(request.orders.iter().map(clauses::sort_clause).collect())
        };

        // Request options win over the structured query's window
        if let Some(offset) = request.offset {
            from = Some(offset);
        }
        if let Some(limit) = request.limit {
            size = Some(limit);
        }
        let size = size.or(Some(self.config.default_size));

        tracing::debug!(
            index = self.collection,
            raw_fragments = request.raw_fragments.len(),
            from = ?from,
            size = ?size,
            "compiled search query"
        );

        CompiledQuery {
            index: self.collection.to_string(),
            doc_type: self
                .config
                .mapping_types
                .then(|| self.collection_type.to_string()),
            bool_query,
            sort,
            from,
            size,
        }
    }
}
