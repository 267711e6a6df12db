//! Lloyd's relaxation for uniform cell distribution
//!
//! Each round replaces every generator point with the centroid of its cell's
//! vertices (the circumcenters of its incident Delaunay triangles) and
//! recomputes the diagram. This evens out cell sizes and removes the
//! degenerate thin cells a raw random distribution produces.

use std::time::Instant;
use voronoice::Point;

use crate::error::Result;
use crate::generation::voronoi::build_diagram;

/// Apply Lloyd's relaxation to a set of unit-square sites
///
/// # Arguments
///
/// * `sites` - Initial generator points
/// * `iterations` - Number of relaxation rounds (typically 1-3)
///
/// # Errors
///
/// Propagates a geometry error if an intermediate diagram cannot be built
/// (degenerate site set).
pub fn relax(mut sites: Vec<Point>, iterations: usize) -> Result<Vec<Point>> {
    let total_start = Instant::now();

    for iteration in 0..iterations {
        let iter_start = Instant::now();
        let diagram = build_diagram(&sites)?;

        let (new_sites, max_displacement) = compute_centroids(&diagram);
        sites = new_sites;

        eprintln!(
            "[lloyd] iter {}: {:?}, max displacement {:.5}",
            iteration + 1,
            iter_start.elapsed(),
            max_displacement
        );
    }

    if iterations > 0 {
        eprintln!(
            "[lloyd] finished {} iterations in {:?}",
            iterations,
            total_start.elapsed()
        );
    }

    Ok(sites)
}

/// Compute per-site circumcenter centroids and track the maximum displacement
fn compute_centroids(diagram: &voronoice::Voronoi) -> (Vec<Point>, f64) {
    let sites = diagram.sites();
    let triangles = &diagram.triangulation().triangles;
    let circumcenters = diagram.vertices();

    // Accumulate each triangle's circumcenter into its three sites.
    let mut sums = vec![(0.0f64, 0.0f64, 0usize); sites.len()];
    for t in 0..triangles.len() / 3 {
        let c = &circumcenters[t];
        for k in 0..3 {
            let s = triangles[3 * t + k];
            sums[s].0 += c.x;
            sums[s].1 += c.y;
            sums[s].2 += 1;
        }
    }

    let mut max_displacement: f64 = 0.0;
    let new_sites = sites
        .iter()
        .enumerate()
        .map(|(i, old)| {
            let (sx, sy, n) = sums[i];
            if n == 0 {
                // Site not part of any triangle; keep it where it is
                return Point { x: old.x, y: old.y };
            }
            let new = Point {
                x: sx / n as f64,
                y: sy / n as f64,
            };
            let displacement = ((new.x - old.x).powi(2) + (new.y - old.y).powi(2)).sqrt();
            if displacement > max_displacement {
                max_displacement = displacement;
            }
            new
        })
        .collect();

    (new_sites, max_displacement)
}
