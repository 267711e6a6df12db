//! Terrain classification
//!
//! The classifier mutates region and corner types in place through a small
//! set of ordering-sensitive rules: noise/radial land seeding on corners,
//! corner-majority land inference on regions, ocean flood fill from the map
//! border, and coast inference. Reverting is exact: `unfinalize_types`
//! undoes a finalization, `reset_types` undoes land creation as well.

pub mod distance;
pub mod landmass;

use std::collections::VecDeque;

use glam::Vec2;
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use crate::cell::{Corner, Region, TerrainType};
use crate::config::MapConfig;

/// Seed land corners around an origin and re-infer the touched regions
///
/// Each non-border corner within `max_distance` of the origin scores
/// `noise * perlin_weight + (1 - distance/max_distance) * radial_weight`;
/// scores above the threshold turn the corner to land. Regions touching an
/// updated corner then settle by corner majority (ties resolve toward water,
/// undoing noise-only land slivers), and finally the touched corners align
/// with their regions. Idempotent for corners that are already land.
pub(crate) fn create_land(
    regions: &mut [Region],
    corners: &mut [Corner],
    rng: &mut ChaCha8Rng,
    config: &MapConfig,
    origin: Vec2,
    max_distance: f32,
) {
    let mut touched_corners: Vec<usize> = Vec::new();

    for corner in corners.iter_mut() {
        if corner.terrain == TerrainType::Border {
            continue;
        }
        let distance = corner.position.distance(origin);
        if distance >= max_distance {
            continue;
        }

        let land_factor = corner.noise_factor * config.land_perlin_weight
            + (1.0 - distance / max_distance) * config.land_radial_weight;
        if land_factor > config.land_threshold {
            corner.terrain = TerrainType::Land;
        }
        touched_corners.push(corner.id);
    }

    let mut touched_regions: Vec<usize> = touched_corners
        .iter()
        .flat_map(|&c| corners[c].regions.iter().copied())
        .collect();
    touched_regions.sort_unstable();
    touched_regions.dedup();

    for &r in &touched_regions {
        infer_region_land(r, regions, corners, rng, config);
    }
    for &c in &touched_corners {
        infer_corner_land(c, regions, corners);
    }
}

/// Settle a region's type by corner majority
///
/// Counts corners that are water-typed or randomly re-rolled as lake; below
/// the corner-majority threshold the region becomes land, otherwise its
/// non-border corners are forced back to water.
pub(crate) fn infer_region_land(
    id: usize,
    regions: &mut [Region],
    corners: &mut [Corner],
    rng: &mut ChaCha8Rng,
    config: &MapConfig,
) -> bool {
    if regions[id].terrain == TerrainType::Land {
        return false;
    }
    let corner_ids = regions[id].corners.clone();
    if corner_ids.is_empty() {
        return false;
    }

    let mut water_corners = 0usize;
    for &c in &corner_ids {
        if corners[c].terrain.is_water() || rng.gen::<f32>() < config.random_lake_factor {
            water_corners += 1;
        }
    }

    if (water_corners as f32) / (corner_ids.len() as f32) < config.land_corner_factor {
        regions[id].terrain = TerrainType::Land;
        true
    } else {
        for &c in &corner_ids {
            if corners[c].terrain != TerrainType::Border {
                corners[c].terrain = TerrainType::Water;
            }
        }
        false
    }
}

/// A corner becomes land if any bordering region is land or coast
pub(crate) fn infer_corner_land(id: usize, regions: &[Region], corners: &mut [Corner]) -> bool {
    if corners[id].terrain == TerrainType::Border {
        return false;
    }
    let touches_land = corners[id].regions.iter().any(|&r| {
        matches!(
            regions[r].terrain,
            TerrainType::Land | TerrainType::Coast
        )
    });
    if touches_land {
        corners[id].terrain = TerrainType::Land;
        true
    } else {
        false
    }
}

/// Flood water regions reachable from the map border into ocean
///
/// Worklist flood fill: seeds are water regions with a border corner; every
/// region entering ocean reclassifies its water corners to ocean and its
/// land corners to coast, then enqueues itself so its water neighbors
/// follow. Terminates at a true fixed point: afterwards no water region is
/// adjacent to an ocean region.
pub(crate) fn create_oceans(regions: &mut [Region], corners: &mut [Corner]) {
    let mut queue: VecDeque<usize> = VecDeque::new();

    for id in 0..regions.len() {
        if regions[id].terrain == TerrainType::Water
            && regions[id]
                .corners
                .iter()
                .any(|&c| corners[c].terrain == TerrainType::Border)
        {
            make_ocean(id, regions, corners);
            queue.push_back(id);
        }
    }

    while let Some(id) = queue.pop_front() {
        for i in 0..regions[id].neighbors.len() {
            let n = regions[id].neighbors[i];
            if regions[n].terrain == TerrainType::Water {
                make_ocean(n, regions, corners);
                queue.push_back(n);
            }
        }
    }
}

fn make_ocean(id: usize, regions: &mut [Region], corners: &mut [Corner]) {
    regions[id].terrain = TerrainType::Ocean;
    for i in 0..regions[id].corners.len() {
        let c = regions[id].corners[i];
        match corners[c].terrain {
            TerrainType::Water => corners[c].terrain = TerrainType::Ocean,
            TerrainType::Land => corners[c].terrain = TerrainType::Coast,
            _ => {}
        }
    }
}

/// A land region with a coast corner becomes coast
pub(crate) fn infer_coasts(regions: &mut [Region], corners: &[Corner]) {
    for region in regions.iter_mut() {
        if region.terrain == TerrainType::Land
            && region
                .corners
                .iter()
                .any(|&c| corners[c].terrain == TerrainType::Coast)
        {
            region.terrain = TerrainType::Coast;
        }
    }
}

/// Revert a finalization: coast back to land, ocean back to water
///
/// Border nodes are untouched; elevation and distance fields are zeroed.
pub(crate) fn unfinalize_types(regions: &mut [Region], corners: &mut [Corner]) {
    for region in regions.iter_mut() {
        match region.terrain {
            TerrainType::Coast => region.terrain = TerrainType::Land,
            TerrainType::Ocean => region.terrain = TerrainType::Water,
            _ => {}
        }
        region.elevation = 0.0;
        region.steps_from_ocean = 0;
        region.steps_from_water = 0;
    }
    for corner in corners.iter_mut() {
        match corner.terrain {
            TerrainType::Coast => corner.terrain = TerrainType::Land,
            TerrainType::Ocean => corner.terrain = TerrainType::Water,
            _ => {}
        }
        corner.elevation = 0.0;
        corner.steps_from_ocean = 0;
        corner.steps_from_water = 0;
    }
}

/// Force every non-border node back to water, undoing land creation
pub(crate) fn reset_types(regions: &mut [Region], corners: &mut [Corner]) {
    for region in regions.iter_mut() {
        region.terrain = TerrainType::Water;
        region.elevation = 0.0;
        region.steps_from_ocean = 0;
        region.steps_from_water = 0;
    }
    for corner in corners.iter_mut() {
        if !corner.is_border {
            corner.terrain = TerrainType::Water;
        }
        corner.elevation = 0.0;
        corner.steps_from_ocean = 0;
        corner.steps_from_water = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    /// Hand-built diamond of four regions around a 3x3 corner grid is
    /// overkill; these tests use a strip of three regions instead, each
    /// owning four corners, with the outer corners marked border.
    fn strip() -> (Vec<Region>, Vec<Corner>) {
        // corners 0..8: two rows of four, regions 0..3 between them
        //   0 - 1 - 2 - 3
        //   | r0| r1| r2|
        //   4 - 5 - 6 - 7
        let mut corners: Vec<Corner> = (0..8)
            .map(|id| Corner {
                id,
                position: Vec2::new((id % 4) as f32 * 10.0, if id < 4 { 0.0 } else { 10.0 }),
                terrain: TerrainType::Water,
                noise_factor: 0.5,
                elevation: 0.0,
                steps_from_ocean: 0,
                steps_from_water: 0,
                is_border: false,
                neighbors: Vec::new(),
                regions: Vec::new(),
                landmass: None,
            })
            .collect();

        let mut regions: Vec<Region> = (0..3)
            .map(|id| Region {
                id,
                center: Vec2::new(id as f32 * 10.0 + 5.0, 5.0),
                terrain: TerrainType::Water,
                elevation: 0.0,
                steps_from_ocean: 0,
                steps_from_water: 0,
                hull: Vec::new(),
                corners: vec![id, id + 1, id + 4, id + 5],
                neighbors: Vec::new(),
                landmass: None,
            })
            .collect();
        regions[0].neighbors = vec![1];
        regions[1].neighbors = vec![0, 2];
        regions[2].neighbors = vec![1];

        for region in &regions {
            for &c in &region.corners {
                corners[c].regions.push(region.id);
            }
        }
        // leftmost corners are the map border
        for &c in &[0usize, 4] {
            corners[c].is_border = true;
            corners[c].terrain = TerrainType::Border;
        }
        (regions, corners)
    }

    #[test]
    fn test_ocean_flood_reaches_fixed_point() {
        let (mut regions, mut corners) = strip();
        create_oceans(&mut regions, &mut corners);

        // Everything is water connected to the border: all ocean.
        for region in &regions {
            assert_eq!(region.terrain, TerrainType::Ocean);
        }
        for corner in &corners {
            if !corner.is_border {
                assert_eq!(corner.terrain, TerrainType::Ocean);
            }
        }

        // Re-running the pass changes nothing.
        let snapshot: Vec<_> = regions.iter().map(|r| r.terrain).collect();
        create_oceans(&mut regions, &mut corners);
        let after: Vec<_> = regions.iter().map(|r| r.terrain).collect();
        assert_eq!(snapshot, after);
    }

    #[test]
    fn test_ocean_stops_at_land() {
        let (mut regions, mut corners) = strip();
        // Make the rightmost region solid land.
        regions[2].terrain = TerrainType::Land;
        for &c in &[2usize, 3, 6, 7] {
            corners[c].terrain = TerrainType::Land;
        }

        create_oceans(&mut regions, &mut corners);

        assert_eq!(regions[0].terrain, TerrainType::Ocean);
        assert_eq!(regions[1].terrain, TerrainType::Ocean);
        assert_eq!(regions[2].terrain, TerrainType::Land);
        // Shared corners of the flooded middle region become coast.
        assert_eq!(corners[2].terrain, TerrainType::Coast);
        assert_eq!(corners[6].terrain, TerrainType::Coast);
        // Interior land corners are untouched.
        assert_eq!(corners[3].terrain, TerrainType::Land);
        assert_eq!(corners[7].terrain, TerrainType::Land);

        // Coast inference then converts the land region.
        infer_coasts(&mut regions, &corners);
        assert_eq!(regions[2].terrain, TerrainType::Coast);
    }

    #[test]
    fn test_region_land_majority() {
        let (mut regions, mut corners) = strip();
        let config = MapConfig {
            random_lake_factor: 0.0,
            ..MapConfig::default()
        };
        let mut rng = ChaCha8Rng::seed_from_u64(1);

        // Three of four corners land: region 1 becomes land.
        for &c in &[1usize, 2, 5] {
            corners[c].terrain = TerrainType::Land;
        }
        assert!(infer_region_land(1, &mut regions, &mut corners, &mut rng, &config));
        assert_eq!(regions[1].terrain, TerrainType::Land);

        // Region 2 has three water corners of four: stays water and drags
        // its land corner back.
        assert!(!infer_region_land(2, &mut regions, &mut corners, &mut rng, &config));
        assert_eq!(regions[2].terrain, TerrainType::Water);
        assert_eq!(corners[2].terrain, TerrainType::Water);
    }

    #[test]
    fn test_corner_follows_land_region() {
        let (mut regions, mut corners) = strip();
        regions[1].terrain = TerrainType::Land;

        assert!(infer_corner_land(5, &regions, &mut corners));
        assert_eq!(corners[5].terrain, TerrainType::Land);

        // Border corners never change.
        assert!(!infer_corner_land(0, &regions, &mut corners));
        assert_eq!(corners[0].terrain, TerrainType::Border);
    }

    #[test]
    fn test_create_land_respects_radius_and_border() {
        let (mut regions, mut corners) = strip();
        let config = MapConfig {
            land_perlin_weight: 0.0,
            land_radial_weight: 1.0,
            land_threshold: 0.1,
            land_corner_factor: 0.5,
            random_lake_factor: 0.0,
            ..MapConfig::default()
        };
        let mut rng = ChaCha8Rng::seed_from_u64(1);

        // Radius covers only the left half of the strip.
        create_land(
            &mut regions,
            &mut corners,
            &mut rng,
            &config,
            Vec2::new(5.0, 5.0),
            14.0,
        );

        assert_eq!(corners[0].terrain, TerrainType::Border);
        assert_eq!(corners[3].terrain, TerrainType::Water, "outside radius");
        assert_eq!(regions[2].terrain, TerrainType::Water);
    }

    #[test]
    fn test_unfinalize_and_reset() {
        let (mut regions, mut corners) = strip();
        regions[0].terrain = TerrainType::Ocean;
        regions[1].terrain = TerrainType::Coast;
        regions[2].terrain = TerrainType::Land;
        regions[2].elevation = 0.4;
        corners[5].terrain = TerrainType::Coast;
        corners[5].steps_from_ocean = 3;

        unfinalize_types(&mut regions, &mut corners);
        assert_eq!(regions[0].terrain, TerrainType::Water);
        assert_eq!(regions[1].terrain, TerrainType::Land);
        assert_eq!(regions[2].terrain, TerrainType::Land);
        assert_eq!(regions[2].elevation, 0.0);
        assert_eq!(corners[5].terrain, TerrainType::Land);
        assert_eq!(corners[5].steps_from_ocean, 0);
        assert_eq!(corners[0].terrain, TerrainType::Border);

        reset_types(&mut regions, &mut corners);
        assert_eq!(regions[1].terrain, TerrainType::Water);
        assert_eq!(regions[2].terrain, TerrainType::Water);
        assert_eq!(corners[5].terrain, TerrainType::Water);
        assert_eq!(corners[0].terrain, TerrainType::Border);
    }
}
