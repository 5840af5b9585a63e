//! quadtree-bench - run a random workload against the quadtree and report.

use std::path::PathBuf;

use tracing::info;
use tracing_subscriber::EnvFilter;

mod config;
mod workload;

fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    info!("quadtree-bench v{}", env!("CARGO_PKG_VERSION"));

    let path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("quadtree.toml"));
    let config = config::Config::load(&path)?;
    info!("Loaded configuration from {}", path.display());
    info!("  Tree: {}x{} at ({}, {})", config.tree.width, config.tree.height, config.tree.x, config.tree.y);
    info!(
        "  Leaves: min size {}, split at {} objects",
        config.quadtree.min_leaf_size, config.quadtree.max_objects
    );
    info!("  Workload: {} objects, {} queries", config.workload.objects, config.workload.queries);

    let report = workload::run(&config)?;
    info!(
        "Inserted {} objects in {:?} ({} nodes, {} leaves, depth {})",
        report.inserted, report.insert_time, report.nodes, report.leaves, report.depth
    );
    info!(
        "Queries took {:?}: {} point candidates, {} area candidates",
        report.query_time, report.point_hits, report.area_hits
    );
    info!(
        "Removed {} objects in {:?}, {} remain",
        report.removed, report.remove_time, report.remaining
    );

    Ok(())
}
