//! Mesh generation pipeline
//!
//! Runs the full chain from seeded random points to the final planar graph:
//! point distribution, Lloyd's relaxation, Voronoi construction, boundary
//! trimming and arena compaction.

pub mod lloyd;
pub mod points;
pub mod prune;
pub mod voronoi;

use std::time::Instant;

use crate::cell::{Corner, Edge, Region};
use crate::config::MapConfig;
use crate::error::Result;

pub use points::generate_unit_points;

/// Build the compacted region/corner/edge arenas for a configuration
///
/// # Errors
///
/// Returns `MapError::Geometry` when the site set is too small or degenerate
/// for a Voronoi diagram, or when a surviving region has a degenerate hull.
pub fn generate_graph(config: &MapConfig) -> Result<(Vec<Region>, Vec<Corner>, Vec<Edge>)> {
    let start = Instant::now();

    let sites = generate_unit_points(config.point_count, config.seed);
    let sites = lloyd::relax(sites, config.relaxation_iterations)?;
    let diagram = voronoi::build_diagram(&sites)?;
    let graph = voronoi::build_raw_graph(&diagram, config.map_size);
    let arenas = prune::prune_and_compact(graph)?;

    eprintln!(
        "[generation] graph built from {} points in {:?}",
        config.point_count,
        start.elapsed()
    );

    Ok(arenas)
}
