//! Distance fields and elevation
//!
//! Two multi-source BFS passes measure how many graph steps each node is
//! from the ocean and from the nearest water of any kind. Elevation then
//! blends the noise factor with the normalized ocean distance, so interiors
//! rise and coasts stay low.

use crate::cell::{Corner, Region, TerrainType};
use crate::geography::landmass::LandMass;

/// Flat elevation assigned to ocean and border nodes
pub const OCEAN_FLOOR_ELEVATION: f32 = 0.2;

/// Multi-source BFS step counts over an adjacency relation
///
/// Seeds get step 0; every `expandable` node reachable from a seed gets the
/// step count of its discovery. Unreachable nodes stay at 0.
fn multi_source_steps<'a, N, E>(count: usize, neighbors: N, seeds: &[usize], expandable: E) -> Vec<u32>
where
    N: Fn(usize) -> &'a [usize],
    E: Fn(usize) -> bool,
{
    let mut steps = vec![0u32; count];
    let mut visited = vec![false; count];
    let mut frontier: Vec<usize> = Vec::new();

    for &s in seeds {
        if !visited[s] {
            visited[s] = true;
            frontier.push(s);
        }
    }

    let mut step = 0u32;
    while !frontier.is_empty() {
        step += 1;
        let mut next: Vec<usize> = Vec::new();
        for &node in &frontier {
            for &n in neighbors(node) {
                if !visited[n] && expandable(n) {
                    visited[n] = true;
                    steps[n] = step;
                    next.push(n);
                }
            }
        }
        frontier = next;
    }

    steps
}

/// Fill `steps_from_ocean` and `steps_from_water` on regions and corners
///
/// The ocean pass seeds at the coast and walks inland through land and
/// lakes. The water pass additionally seeds at lake shores, so lakeside
/// nodes read as distance zero from water.
pub fn compute_distance_fields(regions: &mut [Region], corners: &mut [Corner]) {
    // Ocean pass over regions.
    let seeds: Vec<usize> = regions
        .iter()
        .filter(|r| r.terrain == TerrainType::Coast)
        .map(|r| r.id)
        .collect();
    let steps = multi_source_steps(
        regions.len(),
        |r| regions[r].neighbors.as_slice(),
        &seeds,
        |r| matches!(regions[r].terrain, TerrainType::Land | TerrainType::Water),
    );
    for (region, s) in regions.iter_mut().zip(&steps) {
        region.steps_from_ocean = *s;
    }

    // Ocean pass over corners.
    let seeds: Vec<usize> = corners
        .iter()
        .filter(|c| c.terrain == TerrainType::Coast)
        .map(|c| c.id)
        .collect();
    let steps = multi_source_steps(
        corners.len(),
        |c| corners[c].neighbors.as_slice(),
        &seeds,
        |c| matches!(corners[c].terrain, TerrainType::Land | TerrainType::Water),
    );
    for (corner, s) in corners.iter_mut().zip(&steps) {
        corner.steps_from_ocean = *s;
    }

    // Water pass over regions: coasts plus lake shores.
    let seeds: Vec<usize> = regions
        .iter()
        .filter(|r| {
            r.terrain == TerrainType::Coast
                || (r.terrain == TerrainType::Water
                    && r.neighbors
                        .iter()
                        .any(|&n| regions[n].terrain != TerrainType::Water))
        })
        .map(|r| r.id)
        .collect();
    let steps = multi_source_steps(
        regions.len(),
        |r| regions[r].neighbors.as_slice(),
        &seeds,
        |r| regions[r].terrain == TerrainType::Land,
    );
    for (region, s) in regions.iter_mut().zip(&steps) {
        region.steps_from_water = *s;
    }

    // Water pass over corners.
    let seeds: Vec<usize> = corners
        .iter()
        .filter(|c| {
            c.terrain == TerrainType::Coast
                || (c.terrain == TerrainType::Water
                    && c.neighbors
                        .iter()
                        .any(|&n| corners[n].terrain != TerrainType::Water))
        })
        .map(|c| c.id)
        .collect();
    let steps = multi_source_steps(
        corners.len(),
        |c| corners[c].neighbors.as_slice(),
        &seeds,
        |c| corners[c].terrain == TerrainType::Land,
    );
    for (corner, s) in corners.iter_mut().zip(&steps) {
        corner.steps_from_water = *s;
    }
}

/// Record per-mass maxima of the corner distance fields
pub fn update_landmass_extremes(masses: &mut [LandMass], corners: &[Corner]) {
    for mass in masses.iter_mut() {
        mass.max_steps_from_ocean = mass
            .corners
            .iter()
            .map(|&c| corners[c].steps_from_ocean)
            .max()
            .unwrap_or(0);
        mass.max_steps_from_water = mass
            .corners
            .iter()
            .map(|&c| corners[c].steps_from_water)
            .max()
            .unwrap_or(0);
    }
}

/// Assign elevation from noise and normalized ocean distance
///
/// Ocean and border corners sit at the flat ocean floor. Every other corner
/// blends its noise factor against its ocean distance normalized by its
/// landmass maximum; regions average their corners.
pub fn compute_elevation(
    regions: &mut [Region],
    corners: &mut [Corner],
    masses: &[LandMass],
    perlin_weight: f32,
    ocean_weight: f32,
) {
    for corner in corners.iter_mut() {
        if matches!(corner.terrain, TerrainType::Ocean | TerrainType::Border) {
            corner.elevation = OCEAN_FLOOR_ELEVATION;
            continue;
        }
        let normalized_steps = match corner.landmass {
            Some(m) if masses[m].max_steps_from_ocean > 0 => {
                corner.steps_from_ocean as f32 / masses[m].max_steps_from_ocean as f32
            }
            _ => 0.0,
        };
        corner.elevation =
            (corner.noise_factor * perlin_weight + normalized_steps * ocean_weight) / 2.0;
    }

    for region in regions.iter_mut() {
        if region.corners.is_empty() {
            region.elevation = 0.0;
            continue;
        }
        let sum: f32 = region.corners.iter().map(|&c| corners[c].elevation).sum();
        region.elevation = sum / region.corners.len() as f32;
    }
}
