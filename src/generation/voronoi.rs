//! Raw graph construction from a Voronoi diagram
//!
//! Converts the diagram into the working form of the planar graph: one raw
//! region per generator point, one raw corner per Delaunay-triangle
//! circumcenter, and one raw edge per interior ridge. Registering an edge is
//! the sole mechanism that populates the neighbor and membership sets on its
//! endpoints, which keeps those relations symmetric by construction.

use delaunator::{next_halfedge, EMPTY};
use glam::Vec2;
use voronoice::{BoundingBox, ClipBehavior, Point, Voronoi, VoronoiBuilder};

use crate::error::{MapError, Result};

/// Working region node, pruned and compacted later
#[derive(Debug, Clone)]
pub struct RawRegion {
    pub center: Vec2,
    pub corners: Vec<usize>,
    pub neighbors: Vec<usize>,
    pub edges: Vec<usize>,
    pub alive: bool,
}

/// Working corner node, pruned and compacted later
#[derive(Debug, Clone)]
pub struct RawCorner {
    pub position: Vec2,
    pub out_of_bounds: bool,
    pub is_border: bool,
    pub neighbors: Vec<usize>,
    pub regions: Vec<usize>,
    pub edges: Vec<usize>,
    pub alive: bool,
}

/// Working edge: a ridge between two corners separating two regions
#[derive(Debug, Clone)]
pub struct RawEdge {
    pub regions: [usize; 2],
    pub corners: [usize; 2],
    pub alive: bool,
}

/// The mutable graph the boundary trim operates on
#[derive(Debug, Clone)]
pub struct RawGraph {
    pub regions: Vec<RawRegion>,
    pub corners: Vec<RawCorner>,
    pub edges: Vec<RawEdge>,
}

/// Build an unclipped Voronoi diagram from unit-square sites
///
/// Clipping is disabled: out-of-bounds circumcenters are wanted as-is so the
/// boundary trim can identify and remove the open outer ring of cells.
///
/// # Errors
///
/// Returns `MapError::Geometry` when the site set is too small or degenerate
/// (all collinear) for a triangulation to exist.
pub fn build_diagram(sites: &[Point]) -> Result<Voronoi> {
    if sites.len() < 3 {
        return Err(MapError::Geometry(format!(
            "voronoi diagram needs at least 3 sites (got {})",
            sites.len()
        )));
    }

    let diagram = VoronoiBuilder::default()
        .set_sites(sites.to_vec())
        .set_bounding_box(BoundingBox::new(Point { x: 0.5, y: 0.5 }, 1.0, 1.0))
        .set_clip_behavior(ClipBehavior::None)
        .build()
        .ok_or_else(|| {
            MapError::Geometry("voronoi construction failed (degenerate site set)".to_string())
        })?;

    if diagram.triangulation().triangles.is_empty() {
        return Err(MapError::Geometry(
            "voronoi construction produced no triangles (collinear sites)".to_string(),
        ));
    }

    Ok(diagram)
}

/// Materialize the raw graph from a diagram, scaled into map coordinates
///
/// Ridges whose twin halfedge does not exist are the open ridges at infinity
/// and are discarded; ridges between duplicate circumcenters are zero-length
/// and skipped as well.
pub fn build_raw_graph(diagram: &Voronoi, map_size: f32) -> RawGraph {
    let scale = f64::from(map_size);

    let regions: Vec<RawRegion> = diagram
        .sites()
        .iter()
        .map(|site| RawRegion {
            center: Vec2::new((site.x * scale) as f32, (site.y * scale) as f32),
            corners: Vec::new(),
            neighbors: Vec::new(),
            edges: Vec::new(),
            alive: true,
        })
        .collect();

    let triangulation = diagram.triangulation();
    let triangle_count = triangulation.triangles.len() / 3;

    let corners: Vec<RawCorner> = (0..triangle_count)
        .map(|t| {
            let circumcenter = &diagram.vertices()[t];
            let position = Vec2::new(
                (circumcenter.x * scale) as f32,
                (circumcenter.y * scale) as f32,
            );
            let out_of_bounds = position.x < 0.0
                || position.y < 0.0
                || position.x > map_size
                || position.y > map_size;
            RawCorner {
                position,
                out_of_bounds,
                is_border: false,
                neighbors: Vec::new(),
                regions: Vec::new(),
                edges: Vec::new(),
                alive: true,
            }
        })
        .collect();

    let mut graph = RawGraph {
        regions,
        corners,
        edges: Vec::new(),
    };

    for e in 0..triangulation.triangles.len() {
        let twin = triangulation.halfedges[e];
        if twin == EMPTY || e > twin {
            continue;
        }

        let start_region = triangulation.triangles[e];
        let end_region = triangulation.triangles[next_halfedge(e)];
        let start_corner = e / 3;
        let end_corner = twin / 3;
        if start_corner == end_corner {
            continue;
        }

        register_edge(&mut graph, [start_region, end_region], [start_corner, end_corner]);
    }

    graph
}

/// Append an edge and wire up every adjacency set it implies
fn register_edge(graph: &mut RawGraph, regions: [usize; 2], corners: [usize; 2]) {
    let id = graph.edges.len();
    graph.edges.push(RawEdge {
        regions,
        corners,
        alive: true,
    });

    let [ra, rb] = regions;
    let [ca, cb] = corners;

    graph.regions[ra].edges.push(id);
    graph.regions[rb].edges.push(id);
    graph.corners[ca].edges.push(id);
    graph.corners[cb].edges.push(id);

    add_unique(&mut graph.regions[ra].neighbors, rb);
    add_unique(&mut graph.regions[rb].neighbors, ra);

    add_unique(&mut graph.regions[ra].corners, ca);
    add_unique(&mut graph.regions[ra].corners, cb);
    add_unique(&mut graph.regions[rb].corners, ca);
    add_unique(&mut graph.regions[rb].corners, cb);

    add_unique(&mut graph.corners[ca].neighbors, cb);
    add_unique(&mut graph.corners[cb].neighbors, ca);

    add_unique(&mut graph.corners[ca].regions, ra);
    add_unique(&mut graph.corners[ca].regions, rb);
    add_unique(&mut graph.corners[cb].regions, ra);
    add_unique(&mut graph.corners[cb].regions, rb);
}

/// Push a value onto a small index list if not already present
pub(crate) fn add_unique(list: &mut Vec<usize>, value: usize) {
    if !list.contains(&value) {
        list.push(value);
    }
}
