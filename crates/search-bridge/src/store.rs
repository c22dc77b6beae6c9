//! Record store trait used for hydration.

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::BridgeResult;

/// Resolves identifiers back into application records.
#[async_trait]
pub trait RecordStore<R>: Send + Sync {
    /// Fetches the records matching `ids` in a single batch.
    ///
    /// Ids with no matching record are simply absent from the result; order
    /// is not significant. When `with_trashed` is set, soft-deleted records
    /// are eligible.
    async fn fetch_by_ids(&self, ids: &[String], with_trashed: bool) -> BridgeResult<Vec<R>>;
}

/// A dynamically typed record store.
pub type DynRecordStore<R> = Arc<dyn RecordStore<R>>;
