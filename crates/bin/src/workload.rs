//! Random insert/query/remove workload.

use std::time::{Duration, Instant};

use glam::Vec2;
use quadtree::{ObjectId, Quadtree};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use tracing::debug;

use crate::config::Config;

/// Summary of one workload run.
#[derive(Debug, Default)]
pub struct Report {
    pub inserted: usize,
    pub removed: usize,
    pub remaining: usize,
    pub nodes: usize,
    pub leaves: usize,
    pub depth: u32,
    /// Candidates returned by point queries, summed.
    pub point_hits: usize,
    /// Candidates returned by area queries, summed (duplicates included).
    pub area_hits: usize,
    pub insert_time: Duration,
    pub query_time: Duration,
    pub remove_time: Duration,
}

/// Run the workload described by `config`.
pub fn run(config: &Config) -> anyhow::Result<Report> {
    let mut rng = match config.workload.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };
    let size = Vec2::new(config.tree.width, config.tree.height);
    let center = Vec2::new(config.tree.x, config.tree.y);
    let mut tree = Quadtree::with_config(size, center, config.quadtree.clone());
    let mut report = Report::default();

    let workload = &config.workload;
    let (min_size, max_size) = if workload.min_object_size <= workload.max_object_size {
        (workload.min_object_size, workload.max_object_size)
    } else {
        (workload.max_object_size, workload.min_object_size)
    };

    let start = Instant::now();
    let mut ids: Vec<ObjectId> = Vec::with_capacity(workload.objects);
    for i in 0..workload.objects {
        let position = random_point(&mut rng, center, size);
        let side = rng.random_range(min_size..=max_size);
        ids.push(tree.insert(i, position, Vec2::splat(side)));
    }
    report.inserted = ids.len();
    report.insert_time = start.elapsed();
    debug!(?tree, "populated");

    let start = Instant::now();
    let query = Vec2::splat(workload.query_size);
    for _ in 0..workload.queries {
        report.point_hits += tree.objects_at(random_point(&mut rng, center, size)).len();
        report.area_hits += tree
            .objects_in_area(random_point(&mut rng, center, size), query)
            .len();
    }
    report.query_time = start.elapsed();

    let start = Instant::now();
    ids.shuffle(&mut rng);
    let to_remove = (ids.len() as f64 * workload.remove_ratio.clamp(0.0, 1.0)) as usize;
    for id in ids.drain(..to_remove) {
        if tree.remove(id).is_some() {
            report.removed += 1;
        }
    }
    report.remove_time = start.elapsed();

    tree.validate()?;

    report.remaining = tree.len();
    report.nodes = tree.node_count();
    report.leaves = tree.leaves().count();
    report.depth = tree.depth();
    Ok(report)
}

fn random_point(rng: &mut impl Rng, center: Vec2, size: Vec2) -> Vec2 {
    let half = size / 2.0;
    Vec2::new(
        center.x + rng.random_range(-half.x..=half.x),
        center.y + rng.random_range(-half.y..=half.y),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{TreeConfig, WorkloadConfig};

    fn small_config() -> Config {
        Config {
            tree: TreeConfig {
                width: 200.0,
                height: 200.0,
                x: 50.0,
                y: -50.0,
            },
            quadtree: Default::default(),
            workload: WorkloadConfig {
                objects: 300,
                queries: 50,
                query_size: 40.0,
                seed: Some(9),
                ..Default::default()
            },
        }
    }

    #[test]
    fn test_run_counts() {
        let report = run(&small_config()).unwrap();
        assert_eq!(report.inserted, 300);
        assert_eq!(report.removed, 150);
        assert_eq!(report.remaining, 150);
        assert!(report.depth > 1);
        assert_eq!((report.nodes - 1) % 4, 0);
        assert!(report.leaves > 4);
    }

    #[test]
    fn test_seeded_runs_repeat() {
        let a = run(&small_config()).unwrap();
        let b = run(&small_config()).unwrap();
        assert_eq!(a.point_hits, b.point_hits);
        assert_eq!(a.area_hits, b.area_hits);
        assert_eq!(a.nodes, b.nodes);
    }

    #[test]
    fn test_swapped_size_range() {
        let mut config = small_config();
        config.workload.min_object_size = 10.0;
        config.workload.max_object_size = 2.0;
        config.workload.remove_ratio = 1.0;
        let report = run(&config).unwrap();
        assert_eq!(report.remaining, 0);
    }
}
