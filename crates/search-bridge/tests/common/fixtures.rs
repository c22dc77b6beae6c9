//! Record fixtures and canned engine responses.

use serde_json::{Map, Value, json};

use helios_search_bridge::record::Searchable;

/// A restaurant record used across tests.
#[derive(Debug, Clone, PartialEq)]
pub struct Restaurant {
    /// Record id.
    pub id: u64,
    /// Display name. Restaurants without a name serialize to an empty document.
    pub name: Option<String>,
    /// City.
    pub city: String,
    /// Whether the record is soft-deleted.
    pub trashed: bool,
}

impl Restaurant {
    /// Creates a live, named restaurant.
    pub fn new(id: u64, name: &str) -> Self {
        Self {
            id,
            name: Some(name.to_string()),
            city: "Paris".to_string(),
            trashed: false,
        }
    }

    /// Creates a restaurant that serializes to an empty document.
    pub fn unnamed(id: u64) -> Self {
        Self {
            id,
            name: None,
            city: "Paris".to_string(),
            trashed: false,
        }
    }

    /// Marks the restaurant as soft-deleted.
    pub fn trashed(mut self) -> Self {
        self.trashed = true;
        self
    }
}

impl Searchable for Restaurant {
    fn to_searchable_document(&self) -> Map<String, Value> {
        let mut doc = Map::new();
        if let Some(ref name) = self.name {
            doc.insert("name".to_string(), json!(name));
            doc.insert("city".to_string(), json!(self.city));
        }
        doc
    }

    fn collection_name(&self) -> &str {
        "restaurants"
    }

    fn collection_type(&self) -> &str {
        "restaurant"
    }

    fn identifier(&self) -> String {
        self.id.to_string()
    }
}

/// Builds a search response listing `ids` in order, reporting `total` hits.
pub fn hits_response(ids: &[u64], total: u64) -> Value {
    let hits: Vec<Value> = ids
        .iter()
        .map(|id| json!({ "_id": id.to_string(), "_source": { "id": id } }))
        .collect();

    json!({
        "took": 3,
        "hits": {
            "total": total,
            "hits": hits
        }
    })
}

/// A bulk response acknowledging every item.
pub fn bulk_ack() -> Value {
    json!({ "took": 5, "errors": false, "items": [] })
}
