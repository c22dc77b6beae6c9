//! Sort ordering.

use serde::{Deserialize, Serialize};

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    /// Ascending order.
    #[default]
    Asc,
    /// Descending order.
    Desc,
}

impl SortDirection {
    /// Returns the engine keyword for this direction.
    pub fn as_str(&self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }
}

/// A single sort key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortOrder {
    /// The field to sort by.
    pub field: String,
    /// The sort direction.
    pub direction: SortDirection,
}

impl SortOrder {
    /// Creates an ascending sort on a field.
    pub fn asc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            direction: SortDirection::Asc,
        }
    }

    /// Creates a descending sort on a field.
    pub fn desc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            direction: SortDirection::Desc,
        }
    }

    /// Parses a sort key (e.g., "-created_at" for descending).
    pub fn parse(s: &str) -> Self {
        match s.strip_prefix('-') {
            Some(stripped) => Self::desc(stripped),
            None => Self::asc(s),
        }
    }
}
