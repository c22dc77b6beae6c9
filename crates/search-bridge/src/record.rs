//! The record capability required for indexing and hydration.

use serde_json::{Map, Value};

/// A record that can be written to, and resolved back from, a search collection.
///
/// # Example
///
/// ```
/// use helios_search_bridge::record::Searchable;
/// use serde_json::{Map, Value, json};
///
/// struct Restaurant {
///     id: u64,
///     name: String,
/// }
///
/// impl Searchable for Restaurant {
///     fn to_searchable_document(&self) -> Map<String, Value> {
///         let mut doc = Map::new();
///         doc.insert("name".to_string(), json!(self.name));
///         doc
///     }
///
///     fn collection_name(&self) -> &str {
///         "restaurants"
///     }
///
///     fn collection_type(&self) -> &str {
///         "restaurant"
///     }
///
///     fn identifier(&self) -> String {
///         self.id.to_string()
///     }
/// }
/// ```
pub trait Searchable {
    /// Serializes the record into its searchable document.
    ///
    /// An empty document means the record should not be indexed.
    fn to_searchable_document(&self) -> Map<String, Value>;

    /// The collection (index) the record lives in.
    fn collection_name(&self) -> &str;

    /// The record's type tag within the collection.
    fn collection_type(&self) -> &str;

    /// The record's identifier, used as the document id.
    fn identifier(&self) -> String;
}
