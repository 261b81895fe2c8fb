/*
Implements a random planar map generator:
 - n distinct random points of the unit square
 - edges added by repeatedly linking a random vertex to its nearest not-yet-tried vertex,
   keeping the edge only if it does not cross any edge already in the graph
*/
use bit_set::BitSet;
use log::{debug, info, trace};
use ordered_float::OrderedFloat;
use rand::Rng;
use rand::seq::SliceRandom;

use crate::color::{Graph, VertexId};
use crate::error::ColoringError;
use crate::geometry::Point;


/** draws n points uniformly in the unit square, drawing again any point equal (within
tolerance) to a previous one. Points are not hashable (see [`Point`]): duplicates are found
by scanning the points already drawn. */
pub fn random_points<R:Rng>(n:usize, rng:&mut R) -> Vec<Point> {
    let mut res:Vec<Point> = Vec::with_capacity(n);
    while res.len() < n {
        let p = Point::new(rng.gen_range(0. ..1.), rng.gen_range(0. ..1.));
        if !res.iter().any(|q| *q == p) {
            res.push(p);
        }
    }
    res
}

/** nearest vertex of x (squared euclidean distance) that is neither x nor in `invalid`.
Ties are broken by the smallest id. Returns None if every other vertex is invalid. */
pub fn nearest_point(points:&[Point], x:VertexId, invalid:&BitSet) -> Option<VertexId> {
    let px = points[x];
    (0..points.len())
        .filter(|i| *i != x && !invalid.contains(*i))
        .min_by_key(|i| OrderedFloat(px.dist(&points[*i])))
}

/** true iff the segment x-y does not cross any edge of the graph. */
pub fn is_possible(g:&Graph, x:VertexId, y:VertexId) -> bool {
    let segment = g.segment(x, y);
    !g.edges().iter().any(|(u,v)| segment.intersects(&g.segment(*u, *v)))
}

/** builds a planar graph with the given vertex locations.
    1. keep a set of "valid" vertices (that may still gain an edge)
    2. pick a random valid vertex x and its nearest vertex y not tried with x yet
    3. add the edge (x,y) if it does not cross an existing edge
    4. mark (x,y) as tried, remove x or y from the valid set once it tried all others
    5. repeat until no vertex is valid

Each pair of vertices is tried at most once, so the procedure terminates.
*/
pub fn planar_graph_from_points<R:Rng>(points:Vec<Point>, rng:&mut R) -> Graph {
    let n = points.len();
    let mut g = Graph::with_points(points);
    // tried[v]: vertices already tried with v (as an edge)
    let mut tried:Vec<BitSet> = vec![BitSet::with_capacity(n) ; n];
    let mut valid_vertices:Vec<VertexId> = if n >= 2 { (0..n).collect() } else { Vec::new() };
    let mut nb_rejected:usize = 0;
    while let Some(&x) = valid_vertices.choose(rng) {
        let y = match nearest_point(g.points(), x, &tried[x]) {
            Some(y) => y,
            None => { // x tried everything already
                valid_vertices.retain(|v| *v != x);
                continue;
            }
        };
        if is_possible(&g, x, y) {
            trace!("adding edge ({},{})", x, y);
            g.add_edge(x, y);
        } else {
            nb_rejected += 1;
        }
        tried[x].insert(y);
        tried[y].insert(x);
        let exhausted_x = tried[x].len() >= n-1;
        let exhausted_y = tried[y].len() >= n-1;
        if exhausted_x || exhausted_y {
            valid_vertices.retain(|v| !(exhausted_x && *v == x) && !(exhausted_y && *v == y));
        }
    }
    debug!("planar generation: {} edges kept, {} rejected", g.nb_edges(), nb_rejected);
    g
}

/** generates a random planar graph of n vertices (see [`planar_graph_from_points`]).
Fails if n is 0. */
pub fn generate_planar_graph<R:Rng>(n:usize, rng:&mut R) -> Result<Graph, ColoringError> {
    if n == 0 { return Err(ColoringError::InvalidVertexCount); }
    let points = random_points(n, rng);
    let g = planar_graph_from_points(points, rng);
    info!("generated planar graph: {} vertices, {} edges", g.nb_vertices(), g.nb_edges());
    Ok(g)
}
