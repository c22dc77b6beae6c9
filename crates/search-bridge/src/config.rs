//! Bridge configuration.

use serde::{Deserialize, Serialize};

/// Configuration shared by the query compiler and the bulk builder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BridgeConfig {
    /// Window size used when a request sets no limit (default: 10000).
    ///
    /// Keeps unpaginated searches from asking the engine for an unbounded
    /// result set.
    #[serde(default = "default_size")]
    pub default_size: u64,

    /// Edit distance tolerated by plain free-text matches (default: 1).
    #[serde(default = "default_fuzziness")]
    pub fuzziness: u32,

    /// Document attribute used by geo-distance filters that name none
    /// (default: `"location"`).
    #[serde(default = "default_geo_attribute")]
    pub geo_attribute: String,

    /// Radius used by geo-distance filters that set none (default: `"3km"`).
    #[serde(default = "default_geo_distance")]
    pub geo_distance: String,

    /// Whether requests carry mapping type tags (`_type` / `type`).
    ///
    /// Engines that dropped mapping types reject them; set to `false` there.
    #[serde(default = "default_mapping_types")]
    pub mapping_types: bool,
}

fn default_size() -> u64 {
    10000
}

fn default_fuzziness() -> u32 {
    1
}

fn default_geo_attribute() -> String {
    "location".to_string()
}

fn default_geo_distance() -> String {
    "3km".to_string()
}

fn default_mapping_types() -> bool {
    true
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            default_size: default_size(),
            fuzziness: default_fuzziness(),
            geo_attribute: default_geo_attribute(),
            geo_distance: default_geo_distance(),
            mapping_types: default_mapping_types(),
        }
    }
}
