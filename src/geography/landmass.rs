//! Landmass aggregation
//!
//! After terrain settles, connected land/coast regions (plus their enclosed
//! lakes) are grouped into landmasses by flood fill. Masses at or below the
//! cull size are sunk back into whatever surrounds them, so the final map
//! has no one-cell islands.

use std::collections::VecDeque;

use crate::cell::{Corner, Region, TerrainType};
use crate::error::{MapError, Result};
use crate::generation::voronoi::add_unique;

/// A connected group of land, coast and enclosed water regions
#[derive(Debug, Clone)]
pub struct LandMass {
    pub id: usize,
    /// Region the flood fill started from
    pub starting_region: usize,
    pub regions: Vec<usize>,
    pub corners: Vec<usize>,
    pub size: usize,
    /// Terrain of the first neighbor outside the mass, used when sinking
    pub surrounding_type: TerrainType,
    pub max_steps_from_ocean: u32,
    pub max_steps_from_water: u32,
}

/// Group regions into landmasses and sink the ones below the cull size
///
/// # Errors
///
/// Returns `MapError::InvariantViolation` if a region would be claimed by
/// two different flood fills, which indicates corrupted adjacency.
pub fn create_land_masses(
    regions: &mut [Region],
    corners: &mut [Corner],
    cull_size: usize,
) -> Result<Vec<LandMass>> {
    let mut masses: Vec<LandMass> = Vec::new();

    for start in 0..regions.len() {
        if !regions[start].terrain.joins_landmass() || regions[start].landmass.is_some() {
            continue;
        }
        let mass = flood_fill(start, masses.len(), regions, corners)?;
        masses.push(mass);
    }

    if cull_size > 0 {
        sink_small_masses(&mut masses, regions, corners, cull_size);
    }

    eprintln!("[landmass] {} landmasses after culling", masses.len());
    Ok(masses)
}

/// Claim every connected landmass-joining region reachable from `start`
fn flood_fill(
    start: usize,
    id: usize,
    regions: &mut [Region],
    corners: &mut [Corner],
) -> Result<LandMass> {
    let mut mass = LandMass {
        id,
        starting_region: start,
        regions: Vec::new(),
        corners: Vec::new(),
        size: 0,
        surrounding_type: TerrainType::Ocean,
        max_steps_from_ocean: 0,
        max_steps_from_water: 0,
    };
    let mut surrounding: Option<TerrainType> = None;

    let mut queue: VecDeque<usize> = VecDeque::new();
    regions[start].landmass = Some(id);
    queue.push_back(start);

    while let Some(r) = queue.pop_front() {
        mass.regions.push(r);
        mass.size += 1;

        for i in 0..regions[r].corners.len() {
            let c = regions[r].corners[i];
            add_unique(&mut mass.corners, c);
            // Last claim wins; shared corners end up on the mass
            // that visits them last, matching the region fill order.
            corners[c].landmass = Some(id);
        }

        for i in 0..regions[r].neighbors.len() {
            let n = regions[r].neighbors[i];
            if !regions[n].terrain.joins_landmass() {
                surrounding.get_or_insert(regions[n].terrain);
                continue;
            }
            match regions[n].landmass {
                None => {
                    regions[n].landmass = Some(id);
                    queue.push_back(n);
                }
                Some(owner) if owner != id => {
                    debug_assert!(false, "region {n} claimed by landmasses {owner} and {id}");
                    return Err(MapError::InvariantViolation(format!(
                        "region {n} claimed by landmasses {owner} and {id}"
                    )));
                }
                Some(_) => {}
            }
        }
    }

    if let Some(t) = surrounding {
        mass.surrounding_type = t;
    }
    mass.regions.sort_unstable();
    mass.corners.sort_unstable();
    Ok(mass)
}

/// Sink masses at or below the cull size and re-index the survivors
fn sink_small_masses(
    masses: &mut Vec<LandMass>,
    regions: &mut [Region],
    corners: &mut [Corner],
    cull_size: usize,
) {
    for mass in masses.iter() {
        if mass.size > cull_size {
            continue;
        }
        for &r in &mass.regions {
            regions[r].terrain = mass.surrounding_type;
            regions[r].landmass = None;
        }
        for &c in &mass.corners {
            // The corner may belong to a surviving neighbor mass too.
            if corners[c].landmass != Some(mass.id) {
                continue;
            }
            if !corners[c].is_border {
                corners[c].terrain = mass.surrounding_type;
            }
            corners[c].landmass = None;
        }
    }

    masses.retain(|m| m.size > cull_size);

    for (id, mass) in masses.iter_mut().enumerate() {
        let old = mass.id;
        mass.id = id;
        for &r in &mass.regions {
            regions[r].landmass = Some(id);
        }
        for &c in &mass.corners {
            if corners[c].landmass == Some(old) {
                corners[c].landmass = Some(id);
            }
        }
    }
}
