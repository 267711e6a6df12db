//! Boundary trimming and arena compaction
//!
//! The unclipped diagram extends past the map square. The trim removes the
//! open outer ring: regions touching an out-of-bounds corner (or left with
//! fewer than 3 edges) are deleted and their corners marked as border,
//! edges with a pruned endpoint or no surviving region are dropped, and
//! orphaned corners are removed. Every deletion symmetrically unlinks the
//! node from its neighbors' sets, so no dangling references remain. The
//! surviving nodes are then compacted into dense, re-indexed arenas and each
//! region gets its convex boundary hull.

use crate::cell::{Corner, Edge, Region, TerrainType};
use crate::error::{MapError, Result};
use crate::generation::voronoi::RawGraph;
use crate::geometry;

/// Trim out-of-bounds topology and compact into final arenas
///
/// # Errors
///
/// Returns `MapError::Geometry` when a surviving region's corners are
/// collinear (degenerate hull), which means the generation parameters are
/// incompatible and the mesh must be rebuilt.
pub fn prune_and_compact(
    mut graph: RawGraph,
) -> Result<(Vec<Region>, Vec<Corner>, Vec<Edge>)> {
    remove_out_of_bounds_regions(&mut graph);
    remove_out_of_bounds_edges(&mut graph);
    remove_orphan_corners(&mut graph);
    compact(graph)
}

fn remove_out_of_bounds_regions(graph: &mut RawGraph) {
    let doomed: Vec<usize> = graph
        .regions
        .iter()
        .enumerate()
        .filter(|(_, region)| {
            region
                .corners
                .iter()
                .any(|&c| graph.corners[c].out_of_bounds)
                || region.edges.len() < 3
        })
        .map(|(id, _)| id)
        .collect();

    for id in doomed {
        // Border corners persist even though their owning region does not.
        let corners = graph.regions[id].corners.clone();
        for &c in &corners {
            graph.corners[c].is_border = true;
            graph.corners[c].regions.retain(|&r| r != id);
        }
        let neighbors = graph.regions[id].neighbors.clone();
        for &n in &neighbors {
            graph.regions[n].neighbors.retain(|&r| r != id);
        }
        graph.regions[id].alive = false;
    }
}

fn remove_out_of_bounds_edges(graph: &mut RawGraph) {
    let doomed: Vec<usize> = graph
        .edges
        .iter()
        .enumerate()
        .filter(|(_, edge)| {
            let [ca, cb] = edge.corners;
            let [ra, rb] = edge.regions;
            graph.corners[ca].out_of_bounds
                || graph.corners[cb].out_of_bounds
                || (!graph.regions[ra].alive && !graph.regions[rb].alive)
        })
        .map(|(id, _)| id)
        .collect();

    for id in doomed {
        let [ca, cb] = graph.edges[id].corners;
        let [ra, rb] = graph.edges[id].regions;
        graph.corners[ca].edges.retain(|&e| e != id);
        graph.corners[cb].edges.retain(|&e| e != id);
        graph.regions[ra].edges.retain(|&e| e != id);
        graph.regions[rb].edges.retain(|&e| e != id);
        graph.edges[id].alive = false;
    }
}

fn remove_orphan_corners(graph: &mut RawGraph) {
    let doomed: Vec<usize> = graph
        .corners
        .iter()
        .enumerate()
        .filter(|(_, corner)| {
            let has_edge = corner.edges.iter().any(|&e| graph.edges[e].alive);
            let has_region = corner.regions.iter().any(|&r| graph.regions[r].alive);
            !has_edge && !has_region
        })
        .map(|(id, _)| id)
        .collect();

    for id in doomed {
        let neighbors = graph.corners[id].neighbors.clone();
        for &n in &neighbors {
            graph.corners[n].neighbors.retain(|&c| c != id);
        }
        let regions = graph.corners[id].regions.clone();
        for &r in &regions {
            graph.regions[r].corners.retain(|&c| c != id);
        }
        graph.corners[id].alive = false;
    }
}

/// Re-index survivors into dense arenas and build region hulls
fn compact(graph: RawGraph) -> Result<(Vec<Region>, Vec<Corner>, Vec<Edge>)> {
    let mut region_remap: Vec<Option<usize>> = vec![None; graph.regions.len()];
    let mut next = 0;
    for (old, region) in graph.regions.iter().enumerate() {
        if region.alive {
            region_remap[old] = Some(next);
            next += 1;
        }
    }

    let mut corner_remap: Vec<Option<usize>> = vec![None; graph.corners.len()];
    let mut next = 0;
    for (old, corner) in graph.corners.iter().enumerate() {
        if corner.alive {
            corner_remap[old] = Some(next);
            next += 1;
        }
    }

    let remap_list = |list: &[usize], remap: &[Option<usize>]| -> Vec<usize> {
        let mut mapped: Vec<usize> = list.iter().filter_map(|&i| remap[i]).collect();
        mapped.sort_unstable();
        mapped
    };

    let mut corners: Vec<Corner> = Vec::new();
    for (old, raw) in graph.corners.iter().enumerate() {
        let Some(id) = corner_remap[old] else { continue };
        corners.push(Corner {
            id,
            position: raw.position,
            terrain: if raw.is_border {
                TerrainType::Border
            } else {
                TerrainType::Water
            },
            noise_factor: 0.0,
            elevation: 0.0,
            steps_from_ocean: 0,
            steps_from_water: 0,
            is_border: raw.is_border,
            neighbors: remap_list(&raw.neighbors, &corner_remap),
            regions: remap_list(&raw.regions, &region_remap),
            landmass: None,
        });
    }

    let mut regions: Vec<Region> = Vec::new();
    for (old, raw) in graph.regions.iter().enumerate() {
        let Some(id) = region_remap[old] else { continue };
        regions.push(Region {
            id,
            center: raw.center,
            terrain: TerrainType::Water,
            elevation: 0.0,
            steps_from_ocean: 0,
            steps_from_water: 0,
            hull: Vec::new(),
            corners: remap_list(&raw.corners, &corner_remap),
            neighbors: remap_list(&raw.neighbors, &region_remap),
            landmass: None,
        });
    }

    let mut edges: Vec<Edge> = Vec::new();
    for raw in graph.edges.iter().filter(|e| e.alive) {
        let (Some(start_corner), Some(end_corner)) =
            (corner_remap[raw.corners[0]], corner_remap[raw.corners[1]])
        else {
            return Err(MapError::InvariantViolation(
                "surviving edge references a pruned corner".to_string(),
            ));
        };
        edges.push(Edge {
            id: edges.len(),
            start_region: region_remap[raw.regions[0]],
            end_region: region_remap[raw.regions[1]],
            start_corner,
            end_corner,
        });
    }

    let mut hull_less = 0;
    for region in regions.iter_mut() {
        if region.corners.len() < 3 {
            hull_less += 1;
            continue;
        }
        let positions: Vec<_> = region
            .corners
            .iter()
            .map(|&c| corners[c].position)
            .collect();
        region.hull = geometry::convex_hull(&positions)?;
    }

    eprintln!(
        "[graph] kept {} regions, {} corners, {} edges ({} without hull)",
        regions.len(),
        corners.len(),
        edges.len(),
        hull_less
    );

    Ok((regions, corners, edges))
}
