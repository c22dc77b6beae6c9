//! Bulk operation builder.
//!
//! Turns batches of [`Searchable`] records into the paired header/body
//! entries of a single bulk request. Every bulk request asks the engine to
//! refresh before answering, so writes are visible to the next search.

use serde_json::{Map, Value, json};

use crate::config::BridgeConfig;
use crate::record::Searchable;

/// The action named by a bulk header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BulkAction {
    /// Index (create or replace) a document.
    Index,
    /// Partially update a document, creating it if missing.
    Update,
    /// Delete a document.
    Delete,
}

impl BulkAction {
    /// Returns the header key for this action.
    pub fn as_str(&self) -> &'static str {
        match self {
            BulkAction::Index => "index",
            BulkAction::Update => "update",
            BulkAction::Delete => "delete",
        }
    }
}

/// An ordered sequence of bulk entries.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BulkOperation {
    entries: Vec<Value>,
    actions: usize,
}

impl BulkOperation {
    /// Builds an index operation for a batch.
    ///
    /// Records serializing to an empty document are skipped entirely.
    pub fn index_batch<R: Searchable>(records: &[R], config: &BridgeConfig) -> Self {
        let mut op = Self::default();
        for record in records {
            let document = record.to_searchable_document();
            if document.is_empty() {
                tracing::debug!(id = %record.identifier(), "skipping record with empty document");
                continue;
            }
            op.push(BulkAction::Index, record, config, Some(Value::Object(document)));
        }
        op
    }

    /// Builds an upsert operation for a batch.
    ///
    /// Each record becomes an `update` header followed by its document marked
    /// `doc_as_upsert`. Records serializing to an empty document are skipped.
    pub fn upsert_batch<R: Searchable>(records: &[R], config: &BridgeConfig) -> Self {
        let mut op = Self::default();
        for record in records {
            let document = record.to_searchable_document();
            if document.is_empty() {
                tracing::debug!(id = %record.identifier(), "skipping record with empty document");
                continue;
            }
            let body = json!({
                "doc": Value::Object(document),
                "doc_as_upsert": true
            });
            op.push(BulkAction::Update, record, config, Some(body));
        }
        op
    }

    /// Builds a delete operation for a batch; one header per record.
    pub fn delete_batch<R: Searchable>(records: &[R], config: &BridgeConfig) -> Self {
        let mut op = Self::default();
        for record in records {
            op.push(BulkAction::Delete, record, config, None);
        }
        op
    }

    fn push<R: Searchable>(
        &mut self,
        action: BulkAction,
        record: &R,
        config: &BridgeConfig,
        body: Option<Value>,
    ) {
        let mut target = Map::new();
        target.insert("_index".to_string(), json!(record.collection_name()));
        if config.mapping_types {
            target.insert("_type".to_string(), json!(record.collection_type()));
        }
        target.insert("_id".to_string(), json!(record.identifier()));

        let mut header = Map::with_capacity(1);
        header.insert(action.as_str().to_string(), Value::Object(target));

        self.entries.push(Value::Object(header));
        if let Some(body) = body {
            self.entries.push(body);
        }
        self.actions += 1;
    }

    /// Returns the raw entries (headers interleaved with bodies).
    pub fn entries(&self) -> &[Value] {
        &self.entries
    }

    /// Returns the number of actions (headers).
    pub fn action_count(&self) -> usize {
        self.actions
    }

    /// Returns true if the operation has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether the engine must refresh before responding. Always true.
    pub fn refresh(&self) -> bool {
        true
    }

    /// Builds the bulk request envelope.
    pub fn to_request(&self) -> Value {
        json!({
            "refresh": self.refresh(),
            "body": self.entries,
        })
    }
}
