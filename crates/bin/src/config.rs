//! Bench configuration.

use quadtree::QuadtreeConfig;
use serde::{Deserialize, Serialize};
use anyhow::bail;
use std::path::Path;
use tracing::info;

/// Root configuration structure.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub tree: TreeConfig,
    #[serde(default)]
    pub quadtree: QuadtreeConfig,
    #[serde(default)]
    pub workload: WorkloadConfig,
}

impl Config {
    /// Load configuration from `path`, writing a default file if it is missing.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        if path.exists() {
            let contents = std::fs::read_to_string(path)?;
            let config: Self = toml::from_str(&contents)?;
            config.validate()?;
            Ok(config)
        } else {
            info!("No {} found, creating default config", path.display());
            let default_config = Self::default();
            std::fs::write(path, toml::to_string_pretty(&default_config)?)?;
            Ok(default_config)
        }
    }

    /// Reject values the workload cannot sample from.
    pub fn validate(&self) -> anyhow::Result<()> {
        let tree = &self.tree;
        let positive = |v: f32| v.is_finite() && v > 0.0;
        if !(positive(tree.width) && positive(tree.height)) {
            bail!("tree size must be positive, got {}x{}", tree.width, tree.height);
        }
        if !(tree.x.is_finite() && tree.y.is_finite()) {
            bail!("tree position must be finite, got ({}, {})", tree.x, tree.y);
        }
        let workload = &self.workload;
        for (name, value) in [
            ("min_object_size", workload.min_object_size),
            ("max_object_size", workload.max_object_size),
            ("query_size", workload.query_size),
        ] {
            if !(value.is_finite() && value >= 0.0) {
                bail!("workload.{name} must be a non-negative number, got {value}");
            }
        }
        if workload.remove_ratio.is_nan() {
            bail!("workload.remove_ratio must be a number");
        }
        Ok(())
    }
}

/// Area covered by the tree.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TreeConfig {
    #[serde(default = "default_tree_size")]
    pub width: f32,
    #[serde(default = "default_tree_size")]
    pub height: f32,
    #[serde(default)]
    pub x: f32,
    #[serde(default)]
    pub y: f32,
}

impl Default for TreeConfig {
    fn default() -> Self {
        Self {
            width: default_tree_size(),
            height: default_tree_size(),
            x: 0.0,
            y: 0.0,
        }
    }
}

fn default_tree_size() -> f32 {
    1000.0
}

/// Random workload settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct WorkloadConfig {
    /// Objects to insert.
    #[serde(default = "default_objects")]
    pub objects: usize,
    #[serde(default = "default_min_object_size")]
    pub min_object_size: f32,
    #[serde(default = "default_max_object_size")]
    pub max_object_size: f32,
    /// Point and area queries to run, each.
    #[serde(default = "default_queries")]
    pub queries: usize,
    /// Side length of area queries.
    #[serde(default = "default_query_size")]
    pub query_size: f32,
    /// Share of objects removed after the queries, in `0.0..=1.0`.
    #[serde(default = "default_remove_ratio")]
    pub remove_ratio: f64,
    /// Fixed RNG seed; random when unset.
    #[serde(default)]
    pub seed: Option<u64>,
}

impl Default for WorkloadConfig {
    fn default() -> Self {
        Self {
            objects: default_objects(),
            min_object_size: default_min_object_size(),
            max_object_size: default_max_object_size(),
            queries: default_queries(),
            query_size: default_query_size(),
            remove_ratio: default_remove_ratio(),
            seed: None,
        }
    }
}

fn default_objects() -> usize {
    10_000
}
fn default_min_object_size() -> f32 {
    1.0
}
fn default_max_object_size() -> f32 {
    20.0
}
fn default_queries() -> usize {
    1_000
}
fn default_query_size() -> f32 {
    100.0
}
fn default_remove_ratio() -> f64 {
    0.5
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sections_default_independently() {
        let config: Config = toml::from_str(
            "[quadtree]\nmax_objects = 16\n\n[workload]\nobjects = 10\nseed = 3\n",
        )
        .unwrap();
        assert_eq!(config.quadtree.max_objects, 16);
        assert_eq!(config.quadtree.min_leaf_size, 10.0);
        assert_eq!(config.workload.objects, 10);
        assert_eq!(config.workload.seed, Some(3));
        assert_eq!(config.workload.queries, 1_000);
        assert_eq!(config.tree.width, 1000.0);
    }

    #[test]
    fn test_default_serializes() {
        let text = toml::to_string_pretty(&Config::default()).unwrap();
        let back: Config = toml::from_str(&text).unwrap();
        assert_eq!(back.workload.objects, default_objects());
        assert_eq!(back.quadtree, QuadtreeConfig::default());
    }

    #[test]
    fn test_default_is_valid() {
        Config::default().validate().unwrap();
    }

    #[test]
    fn test_rejects_negative_tree_size() {
        let config: Config = toml::from_str("[tree]\nwidth = -100.0\n").unwrap();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("tree size"));
    }

    #[test]
    fn test_rejects_nan_object_size() {
        let config: Config = toml::from_str("[workload]\nmax_object_size = nan\n").unwrap();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("max_object_size"));
    }

    #[test]
    fn test_load_rejects_invalid_file() {
        let path = std::env::temp_dir().join(format!("quadtree-bench-{}.toml", std::process::id()));
        std::fs::write(&path, "[workload]\nmin_object_size = -1.0\n").unwrap();
        let result = Config::load(&path);
        std::fs::remove_file(&path).unwrap();
        assert!(result.is_err());
    }
}
