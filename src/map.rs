//! The generated island map
//!
//! `IslandMap` owns the compacted mesh arenas and drives the terrain
//! lifecycle: generate the mesh, raise land (automatically or through
//! repeated `create_land` calls), then `finalize` to run ocean flooding,
//! coast inference, landmass aggregation, distance fields and elevation.
//! `unfinalize` reverts the derived state so more land can be raised, and
//! `reset` clears terrain back to open water.

use glam::Vec2;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::cell::{Corner, Edge, Region};
use crate::config::MapConfig;
use crate::error::{MapError, Result};
use crate::generation;
use crate::geography;
use crate::geography::distance;
use crate::geography::landmass::LandMass;
use crate::noise::NoiseField;
#[cfg(feature = "spatial-index")]
use crate::spatial::SpatialIndex;

/// A procedurally generated island map over a Voronoi mesh
pub struct IslandMap {
    config: MapConfig,
    regions: Vec<Region>,
    corners: Vec<Corner>,
    edges: Vec<Edge>,
    land_masses: Vec<LandMass>,
    noise: NoiseField,
    rng: ChaCha8Rng,
    finalized: bool,
    #[cfg(feature = "spatial-index")]
    spatial_index: SpatialIndex,
}

impl IslandMap {
    /// Generate the mesh for a configuration and seed its noise field
    ///
    /// The map starts as open water. When `starting_land` is set, an initial
    /// patch of land is raised around `starting_land_pos` (map center by
    /// default); either way the map is not finalized yet.
    ///
    /// # Errors
    ///
    /// Propagates mesh construction failures, e.g. a degenerate site set.
    ///
    /// # Example
    ///
    /// ```rust
    /// use voronoi_island_map::{IslandMap, MapConfigBuilder};
    ///
    /// let config = MapConfigBuilder::new()
    ///     .seed(42)
    ///     .point_count(200)?
    ///     .starting_land(true)
    ///     .build();
    /// let mut map = IslandMap::generate(config)?;
    /// map.finalize()?;
    /// assert!(map.is_finalized());
    /// # Ok::<(), voronoi_island_map::MapError>(())
    /// ```
    pub fn generate(config: MapConfig) -> Result<Self> {
        let (regions, mut corners, edges) = generation::generate_graph(&config)?;

        let noise = NoiseField::new(config.seed as u32);
        for corner in corners.iter_mut() {
            corner.noise_factor = noise.sample(corner.position);
        }

        #[cfg(feature = "spatial-index")]
        let spatial_index = SpatialIndex::from_regions(&regions);

        let mut map = Self {
            config,
            regions,
            corners,
            edges,
            land_masses: Vec::new(),
            noise,
            rng: ChaCha8Rng::seed_from_u64(config.seed.wrapping_add(1)),
            finalized: false,
            #[cfg(feature = "spatial-index")]
            spatial_index,
        };

        if config.starting_land {
            let origin = config
                .starting_land_pos
                .unwrap_or_else(|| Vec2::splat(config.map_size * 0.5));
            map.create_land(origin, config.starting_land_size);
        }

        Ok(map)
    }

    /// Raise land around an origin
    ///
    /// Can be called repeatedly to grow several islands before finalizing.
    /// Calling this on a finalized map is allowed but the derived fields
    /// will be stale until the map is unfinalized and finalized again.
    pub fn create_land(&mut self, origin: Vec2, max_distance: f32) {
        geography::create_land(
            &mut self.regions,
            &mut self.corners,
            &mut self.rng,
            &self.config,
            origin,
            max_distance,
        );
    }

    /// Derive oceans, coasts, landmasses, distance fields and elevation
    ///
    /// Idempotent: finalizing an already finalized map is a no-op.
    ///
    /// # Errors
    ///
    /// Returns `MapError::Geometry` when the map has no regions, and
    /// propagates landmass invariant violations.
    pub fn finalize(&mut self) -> Result<()> {
        if self.finalized {
            return Ok(());
        }
        if self.regions.is_empty() {
            return Err(MapError::Geometry(
                "cannot finalize a map with no regions".to_string(),
            ));
        }

        geography::create_oceans(&mut self.regions, &mut self.corners);
        geography::infer_coasts(&mut self.regions, &self.corners);
        self.land_masses = geography::landmass::create_land_masses(
            &mut self.regions,
            &mut self.corners,
            self.config.landmass_cull_size,
        )?;
        distance::compute_distance_fields(&mut self.regions, &mut self.corners);
        distance::update_landmass_extremes(&mut self.land_masses, &self.corners);
        distance::compute_elevation(
            &mut self.regions,
            &mut self.corners,
            &self.land_masses,
            self.config.land_perlin_weight,
            self.config.land_radial_weight,
        );

        self.finalized = true;
        Ok(())
    }

    /// Revert the derived state so more land can be raised
    ///
    /// Coast becomes land again, ocean becomes water, landmasses and the
    /// distance and elevation fields are cleared. Terrain raised by
    /// `create_land` is kept. No-op on a map that is not finalized.
    pub fn unfinalize(&mut self) {
        if !self.finalized {
            return;
        }
        for region in self.regions.iter_mut() {
            region.landmass = None;
        }
        for corner in self.corners.iter_mut() {
            corner.landmass = None;
        }
        self.land_masses.clear();
        geography::unfinalize_types(&mut self.regions, &mut self.corners);
        self.finalized = false;
    }

    /// Clear all terrain back to open water, keeping the mesh
    pub fn reset(&mut self) {
        self.unfinalize();
        geography::reset_types(&mut self.regions, &mut self.corners);
        self.rng = ChaCha8Rng::seed_from_u64(self.config.seed.wrapping_add(1));
    }

    /// Region whose cell contains the query position
    ///
    /// Voronoi cells make this a nearest-center lookup.
    #[cfg(feature = "spatial-index")]
    pub fn find_region_at(&self, position: Vec2) -> Option<&Region> {
        let id = self.spatial_index.nearest(position)?;
        self.regions.get(id)
    }

    pub fn config(&self) -> &MapConfig {
        &self.config
    }

    pub fn regions(&self) -> &[Region] {
        &self.regions
    }

    pub fn corners(&self) -> &[Corner] {
        &self.corners
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn land_masses(&self) -> &[LandMass] {
        &self.land_masses
    }

    pub fn region(&self, id: usize) -> Option<&Region> {
        self.regions.get(id)
    }

    pub fn corner(&self, id: usize) -> Option<&Corner> {
        self.corners.get(id)
    }

    pub fn noise(&self) -> &NoiseField {
        &self.noise
    }

    pub fn is_finalized(&self) -> bool {
        self.finalized
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cell::TerrainType;

    fn island_config() -> MapConfig {
        MapConfig {
            seed: 42,
            point_count: 200,
            relaxation_iterations: 2,
            landmass_cull_size: 2,
            starting_land: true,
            starting_land_size: 200.0,
            ..MapConfig::default()
        }
    }

    #[test]
    fn test_generate_starts_unfinalized() {
        let map = IslandMap::generate(island_config()).unwrap();
        assert!(!map.is_finalized());
        assert!(map.land_masses().is_empty());
        assert!(!map.regions().is_empty());

        // Land was raised but not yet classified further.
        assert!(map.regions().iter().any(|r| r.terrain == TerrainType::Land));
        assert!(map.regions().iter().all(|r| r.terrain != TerrainType::Ocean));
    }

    #[test]
    fn test_finalized_island_map() {
        let mut map = IslandMap::generate(island_config()).unwrap();
        map.finalize().unwrap();

        assert!(map.is_finalized());
        assert!(!map.land_masses().is_empty(), "central island must survive");

        // Ocean flooding reached a fixed point.
        for region in map.regions() {
            if region.terrain == TerrainType::Water {
                for &n in &region.neighbors {
                    assert_ne!(
                        map.regions()[n].terrain,
                        TerrainType::Ocean,
                        "water region {} adjacent to ocean",
                        region.id
                    );
                }
            }
        }

        // Distance fields are monotone over land.
        for region in map.regions() {
            if region.terrain == TerrainType::Land {
                let min_neighbor = region
                    .neighbors
                    .iter()
                    .map(|&n| map.regions()[n].steps_from_ocean)
                    .min()
                    .unwrap();
                assert_eq!(region.steps_from_ocean, min_neighbor + 1);
            }
        }

        // Elevation stays in range.
        for corner in map.corners() {
            assert!(corner.elevation >= 0.0 && corner.elevation <= 1.0);
        }
    }

    #[test]
    fn test_default_config_island_scenario() {
        // 200 points, 2 relaxation rounds, starting land at the map center
        // with radius 20% of the map size; everything else at defaults.
        let config = MapConfig {
            seed: 42,
            point_count: 200,
            relaxation_iterations: 2,
            starting_land: true,
            starting_land_size: 200.0,
            ..MapConfig::default()
        };
        let mut map = IslandMap::generate(config).unwrap();
        map.finalize().unwrap();

        let cull = map.config().landmass_cull_size;
        assert!(
            map.land_masses().iter().any(|m| m.size > cull),
            "default tuning must produce a landmass above the cull size"
        );
    }

    #[test]
    fn test_finalize_is_idempotent() {
        let mut map = IslandMap::generate(island_config()).unwrap();
        map.finalize().unwrap();
        let terrains: Vec<TerrainType> = map.regions().iter().map(|r| r.terrain).collect();
        let mass_count = map.land_masses().len();

        map.finalize().unwrap();
        let after: Vec<TerrainType> = map.regions().iter().map(|r| r.terrain).collect();
        assert_eq!(terrains, after);
        assert_eq!(map.land_masses().len(), mass_count);
    }

    #[test]
    fn test_unfinalize_round_trip() {
        // Culling is destructive, so an exact round trip needs it off.
        let config = MapConfig {
            landmass_cull_size: 0,
            ..island_config()
        };
        let mut map = IslandMap::generate(config).unwrap();
        let before: Vec<TerrainType> = map.regions().iter().map(|r| r.terrain).collect();

        map.finalize().unwrap();
        map.unfinalize();

        assert!(!map.is_finalized());
        assert!(map.land_masses().is_empty());
        let after: Vec<TerrainType> = map.regions().iter().map(|r| r.terrain).collect();
        assert_eq!(before, after);
        for corner in map.corners() {
            assert_eq!(corner.elevation, 0.0);
            assert_eq!(corner.steps_from_ocean, 0);
            assert!(corner.landmass.is_none());
        }

        // Unfinalizing twice changes nothing.
        map.unfinalize();
        let twice: Vec<TerrainType> = map.regions().iter().map(|r| r.terrain).collect();
        assert_eq!(after, twice);
    }

    #[test]
    fn test_reset_clears_terrain() {
        let mut map = IslandMap::generate(island_config()).unwrap();
        map.finalize().unwrap();
        map.reset();

        assert!(!map.is_finalized());
        for region in map.regions() {
            assert_eq!(region.terrain, TerrainType::Water);
        }
        for corner in map.corners() {
            if corner.is_border {
                assert_eq!(corner.terrain, TerrainType::Border);
            } else {
                assert_eq!(corner.terrain, TerrainType::Water);
            }
        }
    }

    #[test]
    fn test_generation_determinism() {
        let mut a = IslandMap::generate(island_config()).unwrap();
        let mut b = IslandMap::generate(island_config()).unwrap();
        a.finalize().unwrap();
        b.finalize().unwrap();

        assert_eq!(a.regions().len(), b.regions().len());
        assert_eq!(a.land_masses().len(), b.land_masses().len());
        for (ra, rb) in a.regions().iter().zip(b.regions().iter()) {
            assert_eq!(ra.terrain, rb.terrain);
            assert_eq!(ra.elevation, rb.elevation);
        }
    }

    #[test]
    fn test_multiple_islands() {
        let mut config = island_config();
        config.starting_land = false;
        let mut map = IslandMap::generate(config).unwrap();

        map.create_land(Vec2::new(300.0, 300.0), 180.0);
        map.create_land(Vec2::new(700.0, 700.0), 180.0);
        map.finalize().unwrap();

        assert!(map.regions().iter().any(|r| {
            matches!(r.terrain, TerrainType::Land | TerrainType::Coast)
        }));
    }

    #[cfg(feature = "spatial-index")]
    #[test]
    fn test_find_region_at_center() {
        let map = IslandMap::generate(island_config()).unwrap();
        for region in map.regions().iter().take(10) {
            let found = map.find_region_at(region.center).unwrap();
            assert_eq!(found.id, region.id);
        }
    }
}
