//! Island Map Configuration and Builder
//!
//! This module provides configuration types for deterministic island map
//! generation. The same configuration always produces the identical map.

use glam::Vec2;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{MapError, Result};

/// Configuration for deterministic island map generation
///
/// Only the configuration is meant to be stored or shared; the map itself is
/// regenerated from it. With the `serde` feature enabled the config is
/// serializable.
///
/// # Example
///
/// ```rust
/// use voronoi_island_map::*;
///
/// let config = MapConfigBuilder::new()
///     .seed(42)
///     .point_count(500)
///     .unwrap()
///     .relaxation_iterations(2)
///     .unwrap()
///     .build();
///
/// assert_eq!(config.seed, 42);
/// ```
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapConfig {
    /// Random seed; fixes site placement, noise, and lake rolls
    pub seed: u64,

    /// Side length of the square map coordinate space
    pub map_size: f32,

    /// Number of Voronoi generator points before boundary trimming
    pub point_count: usize,

    /// Lloyd relaxation rounds applied to the generator points
    ///
    /// - 0: raw random Voronoi cells (irregular, thin slivers likely)
    /// - 2: decent uniformity (default)
    /// - 5+: diminishing returns
    pub relaxation_iterations: usize,

    /// Weight of the noise term in the corner land score
    pub land_perlin_weight: f32,

    /// Weight of the radial falloff term in the corner land score
    pub land_radial_weight: f32,

    /// Land score above which a corner becomes land
    ///
    /// The radial term dominates the score (default weights 0.7 vs 0.3), so
    /// the threshold effectively sets how far land reaches toward the seeding
    /// radius; much above ~0.4 only a handful of central corners qualify.
    pub land_threshold: f32,

    /// Water-corner fraction below which a region becomes land
    pub land_corner_factor: f32,

    /// Probability that a land corner is re-rolled as a lake corner during
    /// region land inference
    pub random_lake_factor: f32,

    /// Landmasses with at most this many regions are sunk back into their
    /// surroundings
    pub landmass_cull_size: usize,

    /// Create an initial patch of land automatically during generation
    pub starting_land: bool,

    /// Origin of the automatic starting land; `None` means the map center
    pub starting_land_pos: Option<Vec2>,

    /// Radius of the automatic starting land, in map units
    pub starting_land_size: f32,
}

impl Default for MapConfig {
    fn default() -> Self {
        MapConfigBuilder::new().build()
    }
}

/// Builder for creating a `MapConfig` with validation
///
/// # Example
///
/// ```rust
/// use voronoi_island_map::*;
///
/// // Use defaults with a fixed seed
/// let config = MapConfigBuilder::new().seed(7).build();
///
/// // Customize land seeding
/// let config = MapConfigBuilder::new()
///     .seed(7)
///     .land_threshold(0.4)
///     .unwrap()
///     .starting_land(true)
///     .build();
/// ```
#[derive(Debug, Clone)]
pub struct MapConfigBuilder {
    seed: Option<u64>,
    map_size: f32,
    point_count: usize,
    relaxation_iterations: usize,
    land_perlin_weight: f32,
    land_radial_weight: f32,
    land_threshold: f32,
    land_corner_factor: f32,
    random_lake_factor: f32,
    landmass_cull_size: usize,
    starting_land: bool,
    starting_land_pos: Option<Vec2>,
    starting_land_size: f32,
}

impl MapConfigBuilder {
    /// Create a new builder with default values
    ///
    /// Defaults:
    /// - seed: random
    /// - map_size: 1000.0
    /// - point_count: 1000
    /// - relaxation_iterations: 2
    /// - land weights: perlin 0.3, radial 0.7, threshold 0.25
    /// - land_corner_factor: 0.5, random_lake_factor: 0.05
    /// - landmass_cull_size: 4
    /// - starting_land: off (center, radius 250 when enabled)
    pub fn new() -> Self {
        Self {
            seed: None,
            map_size: 1000.0,
            point_count: 1000,
            relaxation_iterations: 2,
            land_perlin_weight: 0.3,
            land_radial_weight: 0.7,
            land_threshold: 0.25,
            land_corner_factor: 0.5,
            random_lake_factor: 0.05,
            landmass_cull_size: 4,
            starting_land: false,
            starting_land_pos: None,
            starting_land_size: 250.0,
        }
    }

    /// Set the random seed
    ///
    /// Using the same seed with the same other parameters produces an
    /// isomorphic map every time.
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set the side length of the square map
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if the size is not positive.
    pub fn map_size(mut self, size: f32) -> Result<Self> {
        if size <= 0.0 {
            return Err(MapError::InvalidConfig(format!(
                "map size must be positive (got {})",
                size
            )));
        }
        self.map_size = size;
        Ok(self)
    }

    /// Set the number of Voronoi generator points
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if the count is below 16; the boundary trim
    /// eats the outer ring of cells and too few points leave no interior.
    pub fn point_count(mut self, count: usize) -> Result<Self> {
        if count < 16 {
            return Err(MapError::InvalidConfig(format!(
                "point count must be >= 16 (got {})",
                count
            )));
        }
        self.point_count = count;
        Ok(self)
    }

    /// Set the number of Lloyd relaxation rounds
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if iterations > 20 (excessive and impractical)
    pub fn relaxation_iterations(mut self, iterations: usize) -> Result<Self> {
        if iterations > 20 {
            return Err(MapError::InvalidConfig(format!(
                "relaxation iterations must be <= 20 (got {})",
                iterations
            )));
        }
        self.relaxation_iterations = iterations;
        Ok(self)
    }

    /// Set the noise weight of the corner land score
    pub fn land_perlin_weight(mut self, weight: f32) -> Self {
        self.land_perlin_weight = weight;
        self
    }

    /// Set the radial falloff weight of the corner land score
    pub fn land_radial_weight(mut self, weight: f32) -> Self {
        self.land_radial_weight = weight;
        self
    }

    /// Set the land score cutoff
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if the threshold is negative.
    pub fn land_threshold(mut self, threshold: f32) -> Result<Self> {
        if threshold < 0.0 {
            return Err(MapError::InvalidConfig(format!(
                "land threshold must be >= 0 (got {})",
                threshold
            )));
        }
        self.land_threshold = threshold;
        Ok(self)
    }

    /// Set the water-corner fraction below which a region becomes land
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if the factor is outside [0, 1].
    pub fn land_corner_factor(mut self, factor: f32) -> Result<Self> {
        if !(0.0..=1.0).contains(&factor) {
            return Err(MapError::InvalidConfig(format!(
                "land corner factor must be in [0, 1] (got {})",
                factor
            )));
        }
        self.land_corner_factor = factor;
        Ok(self)
    }

    /// Set the probability of a corner re-rolling as a lake corner
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if the factor is outside [0, 1].
    pub fn random_lake_factor(mut self, factor: f32) -> Result<Self> {
        if !(0.0..=1.0).contains(&factor) {
            return Err(MapError::InvalidConfig(format!(
                "random lake factor must be in [0, 1] (got {})",
                factor
            )));
        }
        self.random_lake_factor = factor;
        Ok(self)
    }

    /// Set the minimum region count for a landmass to survive culling
    pub fn landmass_cull_size(mut self, size: usize) -> Self {
        self.landmass_cull_size = size;
        self
    }

    /// Enable or disable the automatic initial land patch
    pub fn starting_land(mut self, enabled: bool) -> Self {
        self.starting_land = enabled;
        self
    }

    /// Set the origin of the automatic starting land
    pub fn starting_land_pos(mut self, pos: Vec2) -> Self {
        self.starting_land_pos = Some(pos);
        self
    }

    /// Set the radius of the automatic starting land, in map units
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if the radius is not positive.
    pub fn starting_land_size(mut self, size: f32) -> Result<Self> {
        if size <= 0.0 {
            return Err(MapError::InvalidConfig(format!(
                "starting land size must be positive (got {})",
                size
            )));
        }
        self.starting_land_size = size;
        Ok(self)
    }

    /// Build the configuration
    ///
    /// If no seed was provided, generates a random seed. All validation
    /// happens in the setters, so building itself cannot fail.
    pub fn build(self) -> MapConfig {
        let seed = self.seed.unwrap_or_else(rand::random);

        MapConfig {
            seed,
            map_size: self.map_size,
            point_count: self.point_count,
            relaxation_iterations: self.relaxation_iterations,
            land_perlin_weight: self.land_perlin_weight,
            land_radial_weight: self.land_radial_weight,
            land_threshold: self.land_threshold,
            land_corner_factor: self.land_corner_factor,
            random_lake_factor: self.random_lake_factor,
            landmass_cull_size: self.landmass_cull_size,
            starting_land: self.starting_land,
            starting_land_pos: self.starting_land_pos,
            starting_land_size: self.starting_land_size,
        }
    }
}

impl Default for MapConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
