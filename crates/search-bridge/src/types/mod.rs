//! Core request types.
//!
//! - [`SearchRequest`] - everything a caller can ask of a search
//! - [`FreeText`] / [`StructuredQuery`] / [`GeoDistance`] - the primary term
//! - [`Filters`] / [`FilterValue`] - typed field filters
//! - [`SortOrder`] - sort keys

mod filter;
mod free_text;
mod request;
mod sort;

pub use filter::{FilterValue, Filters};
pub use free_text::{FieldMatch, FreeText, GeoDistance, StructuredQuery};
pub use request::SearchRequest;
pub use sort::{SortDirection, SortOrder};
