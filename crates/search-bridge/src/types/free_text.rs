//! The primary search term of a request.

use serde::{Deserialize, Serialize};

use super::filter::FilterValue;

/// What the caller is searching for.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum FreeText {
    /// No search term; every document matches.
    #[default]
    None,
    /// Unstructured text matched against all fields.
    Text(String),
    /// A structured object carrying window overrides, geo constraints and
    /// named field matches.
    Structured(StructuredQuery),
}

impl FreeText {
    /// Returns true if the term matches everything (absent or empty text).
    pub fn is_match_all(&self) -> bool {
        match self {
            FreeText::None => true,
            FreeText::Text(text) => text.is_empty(),
            FreeText::Structured(_) => false,
        }
    }
}

impl From<&str> for FreeText {
    fn from(s: &str) -> Self {
        FreeText::Text(s.to_string())
    }
}

impl From<String> for FreeText {
    fn from(s: String) -> Self {
        FreeText::Text(s)
    }
}

impl From<StructuredQuery> for FreeText {
    fn from(query: StructuredQuery) -> Self {
        FreeText::Structured(query)
    }
}

/// A structured search term.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StructuredQuery {
    /// Window offset override.
    #[serde(default)]
    pub skip: Option<u64>,

    /// Window size override.
    #[serde(default)]
    pub limit: Option<u64>,

    /// Geo-distance constraint.
    #[serde(default)]
    pub geo_distance: Option<GeoDistance>,

    /// Named field matches, in order.
    #[serde(default)]
    pub matches: Vec<FieldMatch>,
}

impl StructuredQuery {
    /// Creates an empty structured query.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the window offset.
    pub fn with_skip(mut self, skip: u64) -> Self {
        self.skip = Some(skip);
        self
    }

    /// Sets the window size.
    pub fn with_limit(mut self, limit: u64) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Sets the geo-distance constraint.
    pub fn with_geo_distance(mut self, geo: GeoDistance) -> Self {
        self.geo_distance = Some(geo);
        self
    }

    /// Adds a named field match.
    pub fn with_match(mut self, field: impl Into<String>, value: impl Into<FilterValue>) -> Self {
        self.matches.push(FieldMatch {
            field: field.into(),
            value: value.into(),
        });
        self
    }
}

/// A single field/value pair to match.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldMatch {
    /// The field name.
    pub field: String,
    /// The value to match.
    pub value: FilterValue,
}

/// A geo-distance constraint around a point.
///
/// `attribute` and `distance` fall back to the configured defaults
/// (`location` and `3km` unless overridden) when left unset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeoDistance {
    /// The geo-point attribute of the document.
    #[serde(default)]
    pub attribute: Option<String>,
    /// The radius, in engine distance syntax (e.g. `"3km"`).
    #[serde(default)]
    pub distance: Option<String>,
    /// Latitude of the center.
    pub lat: f64,
    /// Longitude of the center.
    pub lng: f64,
}

impl GeoDistance {
    /// Creates a constraint around a point with default attribute and radius.
    pub fn new(lat: f64, lng: f64) -> Self {
        Self {
            attribute: None,
            distance: None,
            lat,
            lng,
        }
    }

    /// Sets the geo-point attribute.
    pub fn with_attribute(mut self, attribute: impl Into<String>) -> Self {
        self.attribute = Some(attribute.into());
        self
    }

    /// Sets the radius.
    pub fn with_distance(mut self, distance: impl Into<String>) -> Self {
        self.distance = Some(distance.into());
        self
    }
}
