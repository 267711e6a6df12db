//! Spatial indexing for fast position-to-region lookups
//!
//! This module is only available with the `spatial-index` feature.

use glam::Vec2;
use kiddo::immutable::float::kdtree::ImmutableKdTree;
use kiddo::SquaredEuclidean;

use crate::cell::Region;

/// KD-tree over region centers
///
/// A Voronoi cell contains a point exactly when its center is the nearest
/// of all centers, so position-to-region lookup is a single nearest-one
/// query: O(log n) instead of scanning every region.
#[derive(Clone)]
pub struct SpatialIndex {
    tree: Option<ImmutableKdTree<f32, usize, 2, 32>>,
}

impl SpatialIndex {
    /// Build the index from the compacted region arena
    ///
    /// Region ids equal their arena positions, so the tree item index is
    /// the region id directly.
    pub fn from_regions(regions: &[Region]) -> Self {
        if regions.is_empty() {
            return Self { tree: None };
        }
        let points: Vec<[f32; 2]> = regions.iter().map(|r| [r.center.x, r.center.y]).collect();

        Self {
            tree: Some(ImmutableKdTree::new_from_slice(&points)),
        }
    }

    /// Id of the region whose center is nearest to a position
    ///
    /// Returns `None` only when the index was built from an empty arena.
    pub fn nearest(&self, position: Vec2) -> Option<usize> {
        let tree = self.tree.as_ref()?;
        let result = tree.nearest_one::<SquaredEuclidean>(&[position.x, position.y]);
        Some(result.item)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cell::TerrainType;

    fn region_at(id: usize, x: f32, y: f32) -> Region {
        Region {
            id,
            center: Vec2::new(x, y),
            terrain: TerrainType::Water,
            elevation: 0.0,
            steps_from_ocean: 0,
            steps_from_water: 0,
            hull: Vec::new(),
            corners: Vec::new(),
            neighbors: Vec::new(),
            landmass: None,
        }
    }

    #[test]
    fn test_nearest_region() {
        let regions = vec![
            region_at(0, 100.0, 100.0),
            region_at(1, 900.0, 100.0),
            region_at(2, 500.0, 800.0),
        ];
        let index = SpatialIndex::from_regions(&regions);

        assert_eq!(index.nearest(Vec2::new(120.0, 90.0)), Some(0));
        assert_eq!(index.nearest(Vec2::new(850.0, 150.0)), Some(1));
        assert_eq!(index.nearest(Vec2::new(500.0, 790.0)), Some(2));
    }

    #[test]
    fn test_exact_center_match() {
        let regions = vec![region_at(0, 10.0, 20.0), region_at(1, 30.0, 40.0)];
        let index = SpatialIndex::from_regions(&regions);

        assert_eq!(index.nearest(regions[0].center), Some(0));
        assert_eq!(index.nearest(regions[1].center), Some(1));
    }

    #[test]
    fn test_empty_arena() {
        let index = SpatialIndex::from_regions(&[]);
        assert_eq!(index.nearest(Vec2::ZERO), None);
    }
}
