//! Query DSL clause builders.

use serde_json::{Map, Value, json};

use crate::config::BridgeConfig;
use crate::types::{FilterValue, GeoDistance, SortOrder};

/// Wraps `value` in a single-key object.
pub(crate) fn keyed(key: &str, value: Value) -> Value {
    let mut map = Map::with_capacity(1);
    map.insert(key.to_string(), value);
    Value::Object(map)
}

/// Matches every document.
pub fn match_all() -> Value {
    json!({ "match_all": {} })
}

/// Fuzzy full-text match against all fields.
pub fn full_text(text: &str, fuzziness: u32) -> Value {
    json!({
        "match": {
            "_all": {
                "query": text,
                "fuzziness": fuzziness
            }
        }
    })
}

/// Match on a single named field.
pub fn field_match(field: &str, value: &FilterValue) -> Value {
    keyed("match", keyed(field, value.to_json()))
}

/// Builds the clause for one structured filter.
///
/// Exact values (numbers, booleans) become `term` clauses and are not
/// analyzed. Strings become `match` clauses with the `and` operator, so every
/// term of the value must be present.
pub fn filter_clause(field: &str, value: &FilterValue) -> Value {
    match value {
        FilterValue::Text(text) => keyed(
            "match",
            keyed(
                field,
                json!({
                    "query": text,
                    "operator": "and"
                }),
            ),
        ),
        exact => keyed("term", keyed(field, exact.to_json())),
    }
}

/// Non-scoring geo-distance filter using plane distance calculation.
pub fn geo_distance(geo: &GeoDistance, config: &BridgeConfig) -> Value {
    let attribute = geo.attribute.as_deref().unwrap_or(&config.geo_attribute);
    let distance = geo.distance.as_deref().unwrap_or(&config.geo_distance);

    let mut inner = Map::new();
    inner.insert("distance".to_string(), json!(distance));
    inner.insert("distance_type".to_string(), json!("plane"));
    inner.insert(
        attribute.to_string(),
        json!({ "lat": geo.lat, "lon": geo.lng }),
    );

    keyed("geo_distance", Value::Object(inner))
}

/// One entry of the sort list.
pub fn sort_clause(order: &SortOrder) -> Value {
    keyed(&order.field, json!({ "order": order.direction.as_str() }))
}
