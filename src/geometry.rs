//! 2D geometry helpers
//!
//! Convex hull extraction for region boundary polygons. The hull is the one
//! place mesh generation can fail: corners that are nearly collinear or
//! coincident mean the point density is incompatible with the map size.

use glam::Vec2;

use crate::error::{MapError, Result};

/// Two corners closer than this are treated as coincident
const DUPLICATE_EPSILON: f32 = 1e-6;

/// Cross product of (b - a) and (c - a)
///
/// Positive for a counter-clockwise turn at `b`.
#[inline]
fn cross(a: Vec2, b: Vec2, c: Vec2) -> f32 {
    (b - a).perp_dot(c - a)
}

/// Compute the convex hull of a point set, ordered counter-clockwise
///
/// Uses Andrew's monotone chain. Strictly collinear points are dropped from
/// the chain, so a degenerate input (all points on one line, or fewer than 3
/// distinct points) fails with a geometry error rather than returning a
/// polygon that cannot be drawn.
///
/// # Errors
///
/// Returns `MapError::Geometry` when no proper polygon can be formed.
pub fn convex_hull(points: &[Vec2]) -> Result<Vec<Vec2>> {
    if points.len() < 3 {
        return Err(MapError::Geometry(format!(
            "convex hull needs at least 3 points (got {})",
            points.len()
        )));
    }

    let mut sorted: Vec<Vec2> = points.to_vec();
    sorted.sort_by(|a, b| {
        a.x.partial_cmp(&b.x)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then(a.y.partial_cmp(&b.y).unwrap_or(std::cmp::Ordering::Equal))
    });
    sorted.dedup_by(|a, b| a.distance_squared(*b) < DUPLICATE_EPSILON);

    if sorted.len() < 3 {
        return Err(MapError::Geometry(
            "corners are too close together to form a polygon; \
             lower the point count or raise the map size"
                .to_string(),
        ));
    }

    // Lower and upper chains built separately so a pop never reaches back
    // into the finished half. Non-left turns are popped, which also discards
    // collinear points.
    let mut lower: Vec<Vec2> = Vec::with_capacity(sorted.len());
    for &p in &sorted {
        while lower.len() >= 2 && cross(lower[lower.len() - 2], lower[lower.len() - 1], p) <= 0.0 {
            lower.pop();
        }
        lower.push(p);
    }

    let mut upper: Vec<Vec2> = Vec::with_capacity(sorted.len());
    for &p in sorted.iter().rev() {
        while upper.len() >= 2 && cross(upper[upper.len() - 2], upper[upper.len() - 1], p) <= 0.0 {
            upper.pop();
        }
        upper.push(p);
    }

    // Each chain ends on the point the other starts with.
    lower.pop();
    upper.pop();
    let mut hull = lower;
    hull.extend(upper);

    if hull.len() < 3 {
        return Err(MapError::Geometry(
            "corners are collinear, cannot create convex hull to form a polygon; \
             lower the point count or raise the map size"
                .to_string(),
        ));
    }

    Ok(hull)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hull_of_square() {
        let points = vec![
            Vec2::new(0.0, 0.0),
            Vec2::new(1.0, 0.0),
            Vec2::new(1.0, 1.0),
            Vec2::new(0.0, 1.0),
            Vec2::new(0.5, 0.5), // interior
        ];
        let hull = convex_hull(&points).unwrap();
        assert_eq!(hull.len(), 4);
        assert!(!hull.contains(&Vec2::new(0.5, 0.5)));
    }

    #[test]
    fn test_hull_of_square_exact_ring() {
        // All four extremes must survive, in counter-clockwise order from
        // the lexicographic minimum.
        let points = vec![
            Vec2::new(1.0, 1.0),
            Vec2::new(0.0, 0.0),
            Vec2::new(0.5, 0.5),
            Vec2::new(1.0, 0.0),
            Vec2::new(0.0, 1.0),
        ];
        let hull = convex_hull(&points).unwrap();
        assert_eq!(
            hull,
            vec![
                Vec2::new(0.0, 0.0),
                Vec2::new(1.0, 0.0),
                Vec2::new(1.0, 1.0),
                Vec2::new(0.0, 1.0),
            ]
        );
    }

    #[test]
    fn test_hull_is_counter_clockwise() {
        let points = vec![
            Vec2::new(0.0, 0.0),
            Vec2::new(2.0, 0.0),
            Vec2::new(1.0, 2.0),
        ];
        let hull = convex_hull(&points).unwrap();
        assert_eq!(hull.len(), 3);

        // Shoelace area must be positive for CCW ordering
        let mut area = 0.0;
        for i in 0..hull.len() {
            let a = hull[i];
            let b = hull[(i + 1) % hull.len()];
            area += a.x * b.y - b.x * a.y;
        }
        assert!(area > 0.0);
    }

    #[test]
    fn test_hull_too_few_points() {
        let points = vec![Vec2::new(0.0, 0.0), Vec2::new(1.0, 0.0)];
        assert!(convex_hull(&points).is_err());
    }

    #[test]
    fn test_hull_collinear_points() {
        let points = vec![
            Vec2::new(0.0, 0.0),
            Vec2::new(1.0, 1.0),
            Vec2::new(2.0, 2.0),
            Vec2::new(3.0, 3.0),
        ];
        assert!(convex_hull(&points).is_err());
    }

    #[test]
    fn test_hull_coincident_points() {
        let points = vec![
            Vec2::new(1.0, 1.0),
            Vec2::new(1.0, 1.0),
            Vec2::new(1.0, 1.0),
        ];
        assert!(convex_hull(&points).is_err());
    }
}
