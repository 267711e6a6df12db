//! Voronoi-based island map generation
//!
//! A standalone library for generating 2D island and continent maps over a
//! relaxed Voronoi mesh, suitable for use with any game engine or renderer.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use voronoi_island_map::*;
//!
//! // Generate an island map
//! let config = MapConfigBuilder::new()
//!     .seed(42)
//!     .point_count(1000).unwrap()
//!     .starting_land(true)
//!     .build();
//!
//! let mut map = IslandMap::generate(config).unwrap();
//! map.finalize().unwrap();
//!
//! println!(
//!     "Generated {} regions across {} landmasses",
//!     map.regions().len(),
//!     map.land_masses().len()
//! );
//! ```
//!
//! # Features
//!
//! - `spatial-index` (default): Enables O(log n) position-to-region lookups using KD-tree
//! - `serde`: Enables serialization support for configuration and terrain types

// Modules
pub mod error;
pub mod config;
pub mod cell;
pub mod geometry;
pub mod noise;
pub mod generation;
pub mod geography;
pub mod map;

#[cfg(feature = "spatial-index")]
pub mod spatial;

// Re-export core types for convenience
pub use error::{MapError, Result};
pub use config::{MapConfig, MapConfigBuilder};
pub use cell::{Corner, Edge, Region, TerrainType};
pub use geography::landmass::LandMass;
pub use map::IslandMap;
pub use noise::NoiseField;

#[cfg(feature = "spatial-index")]
pub use spatial::SpatialIndex;

// Re-export glam::Vec2 for convenience
pub use glam::Vec2;
