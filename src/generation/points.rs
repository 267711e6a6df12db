//! Seeded generator point distribution
//!
//! Generator points are drawn uniformly in the unit square and only scaled
//! into map coordinates after relaxation, so the diagram math stays in a
//! well-conditioned range regardless of map size.

use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use voronoice::Point;

/// Generate uniform random points in the unit square
///
/// # Arguments
///
/// * `count` - Number of points to generate
/// * `seed` - Seed for the deterministic RNG
///
/// # Example
///
/// ```rust
/// use voronoi_island_map::generation::generate_unit_points;
///
/// let points = generate_unit_points(200, 42);
/// assert_eq!(points.len(), 200);
/// ```
pub fn generate_unit_points(count: usize, seed: u64) -> Vec<Point> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);

    (0..count)
        .map(|_| Point {
            x: rng.gen::<f64>(),
            y: rng.gen::<f64>(),
        })
        .collect()
}
