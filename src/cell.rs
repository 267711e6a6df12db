//! Map graph node types
//!
//! Regions, corners and edges form the doubly-linked planar graph produced by
//! the mesh builder. Nodes live in dense arenas and reference each other by
//! stable integer index, so adjacency updates never chase live references.

use glam::Vec2;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Classification of a region or corner
///
/// Every node owns exactly one type at a time. `Border` is fixed at mesh
/// construction and never reassigned; everything else starts as `Water` and
/// moves through the land/ocean/coast inference rules.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TerrainType {
    /// Corner on the trimmed map boundary (regions never carry this type)
    Border,
    /// Water connected to the map edge
    Ocean,
    /// Initial state; after finalization, enclosed lakes
    #[default]
    Water,
    /// Dry land
    Land,
    /// Land adjacent to ocean
    Coast,
}

impl TerrainType {
    /// Check if this type is water of any kind
    #[inline]
    pub fn is_water(&self) -> bool {
        matches!(self, TerrainType::Water | TerrainType::Ocean)
    }

    /// Check if a region of this type belongs to a landmass
    ///
    /// Landmasses group everything that is not ocean or border, so enclosed
    /// lakes ride along with the land that surrounds them.
    #[inline]
    pub fn joins_landmass(&self) -> bool {
        matches!(
            self,
            TerrainType::Land | TerrainType::Coast | TerrainType::Water
        )
    }
}

/// A Voronoi vertex shared by up to three regions
///
/// Corners carry the per-vertex state the classifier and the distance passes
/// work on. `neighbors` and `regions` are kept mutually symmetric with the
/// corresponding sets on other nodes; edge registration is the only mechanism
/// that populates them.
#[derive(Debug, Clone)]
pub struct Corner {
    /// Stable arena index
    pub id: usize,
    /// Location in map coordinates
    pub position: Vec2,
    /// Current classification
    pub terrain: TerrainType,
    /// Seeded 2D noise at this location, normalized to [0, 1]
    ///
    /// Sampled once at creation and reused by land scoring and elevation.
    pub noise_factor: f32,
    /// Normalized elevation, valid after finalization
    pub elevation: f32,
    /// BFS hop count to the nearest coast (0 = coast itself or unreached)
    pub steps_from_ocean: u32,
    /// BFS hop count to the nearest water shore
    pub steps_from_water: u32,
    /// True if this corner sits on the trimmed map boundary
    pub is_border: bool,
    /// Corner ids sharing an edge with this corner (sorted)
    pub neighbors: Vec<usize>,
    /// Region ids this corner bounds (sorted)
    pub regions: Vec<usize>,
    /// Owning landmass, if any (weak back-reference, cleared on dissolve)
    pub landmass: Option<usize>,
}

/// A Voronoi cell / map tile, centered on a generator point
#[derive(Debug, Clone)]
pub struct Region {
    /// Stable arena index
    pub id: usize,
    /// Generator point in map coordinates
    pub center: Vec2,
    /// Current classification
    pub terrain: TerrainType,
    /// Mean of the corner elevations, valid after finalization
    pub elevation: f32,
    /// BFS hop count to the nearest coast region
    pub steps_from_ocean: u32,
    /// BFS hop count to the nearest water shore
    pub steps_from_water: u32,
    /// Boundary polygon, ordered counter-clockwise
    ///
    /// Empty when the region kept fewer than 3 corners after pruning.
    pub hull: Vec<Vec2>,
    /// Corner ids bounding this region (sorted)
    pub corners: Vec<usize>,
    /// Adjacent region ids (sorted)
    pub neighbors: Vec<usize>,
    /// Owning landmass, if any (weak back-reference, cleared on dissolve)
    pub landmass: Option<usize>,
}

/// A Voronoi ridge between two corners, separating up to two regions
///
/// Registering an edge during mesh building is what populates the neighbor
/// and membership sets on its endpoints. A side whose region was pruned at
/// the map boundary is `None`.
#[derive(Debug, Clone)]
pub struct Edge {
    /// Stable arena index
    pub id: usize,
    /// Region on one side, `None` if pruned
    pub start_region: Option<usize>,
    /// Region on the other side, `None` if pruned
    pub end_region: Option<usize>,
    /// First endpoint corner id
    pub start_corner: usize,
    /// Second endpoint corner id
    pub end_corner: usize,
}

impl Edge {
    /// True when both region sides survived boundary pruning
    #[inline]
    pub fn has_center_edge(&self) -> bool {
        self.start_region.is_some() && self.end_region.is_some()
    }
}
