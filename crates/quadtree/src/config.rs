//! Quadtree configuration.

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Subdivision settings, fixed when the tree is constructed.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct QuadtreeConfig {
    /// Leaves created by a split have a half-extent strictly greater than
    /// this on both axes.
    /// Takes priority over `max_objects`.
    #[serde(default = "default_min_leaf_size")]
    pub min_leaf_size: f32,
    /// Number of objects a leaf holds before the next insertion splits it.
    #[serde(default = "default_max_objects")]
    pub max_objects: usize,
    /// Maximum depth. Recorded but not enforced: only `min_leaf_size`
    /// bounds subdivision.
    #[serde(default = "default_max_depth")]
    pub max_depth: u32,
}

impl QuadtreeConfig {
    /// Parse a configuration from a TOML document. Missing keys take defaults.
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }
}

impl Default for QuadtreeConfig {
    fn default() -> Self {
        Self {
            min_leaf_size: default_min_leaf_size(),
            max_objects: default_max_objects(),
            max_depth: default_max_depth(),
        }
    }
}

fn default_min_leaf_size() -> f32 {
    10.0
}
fn default_max_objects() -> usize {
    2
}
fn default_max_depth() -> u32 {
    5
}
