/*
Implements:
 - json instance files: {"vertices": [{"id", "x", "y"}], "edges": [{"u", "v"}]}
 - json solution files: {"found", "nb_colors", "colors": [label]}
*/
use std::fs;

use serde::{Serialize, Deserialize};

use crate::color::{ColorLabel, Graph, VertexId};
use crate::error::ColoringError;
use crate::geometry::Point;
use crate::search::Solution;

/** vertex entry of an instance file */
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct VertexRecord {
    /// vertex id
    pub id: VertexId,
    /// x coordinate in [0,1]
    pub x: f64,
    /// y coordinate in [0,1]
    pub y: f64,
}

/** edge entry of an instance file */
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct EdgeRecord {
    /// first endpoint
    pub u: VertexId,
    /// second endpoint
    pub v: VertexId,
}

/** data structure to represent a map coloring instance file */
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct InstanceFile {
    /// located vertices
    pub vertices: Vec<VertexRecord>,
    /// borders
    pub edges: Vec<EdgeRecord>,
}

impl From<&Graph> for InstanceFile {
    fn from(g:&Graph) -> Self {
        Self {
            vertices: g.vertices().map(|id| {
                let p = g.point(id);
                VertexRecord { id, x: p.x, y: p.y }
            }).collect(),
            edges: g.edges().iter().map(|(u,v)| EdgeRecord { u: *u, v: *v }).collect(),
        }
    }
}

impl InstanceFile {
    /** converts to a graph. Vertex ids must be a permutation of 0..n. */
    pub fn to_graph(&self) -> Result<Graph, ColoringError> {
        let n = self.vertices.len();
        let mut points:Vec<Option<Point>> = vec![None ; n];
        for r in &self.vertices {
            match points.get_mut(r.id).filter(|p| p.is_none()) {
                Some(p) => *p = Some(Point::new(r.x, r.y)),
                None => return Err(ColoringError::InvalidVertex(
                    r.id, format!("duplicated or not in 0..{}", n)
                )),
            }
        }
        // every slot is filled: n records, n distinct ids in 0..n
        let points:Vec<Point> = points.into_iter().flatten().collect();
        let edges:Vec<(VertexId,VertexId)> = self.edges.iter().map(|e| (e.u, e.v)).collect();
        Graph::from_edges(points, &edges)
    }
}

/** reads a graph from a json instance file */
pub fn read_instance(filename:&str) -> Result<Graph, ColoringError> {
    let content = fs::read_to_string(filename)?;
    let file:InstanceFile = serde_json::from_str(&content)?;
    file.to_graph()
}

/** writes a graph into a json instance file */
pub fn write_instance(filename:&str, g:&Graph) -> Result<(), ColoringError> {
    let content = serde_json::to_string(&InstanceFile::from(g))?;
    fs::write(filename, content)?;
    Ok(())
}


/** data structure to represent a solution file */
#[derive(Clone, Debug, Serialize)]
pub struct SolutionFile {
    /// true iff a coloring was found
    pub found: bool,
    /// number of colors used
    pub nb_colors: usize,
    /// colors[v]: color name of vertex v (gray if not found)
    pub colors: Vec<ColorLabel>,
}

impl From<&Solution> for SolutionFile {
    fn from(sol:&Solution) -> Self {
        Self { found: sol.found, nb_colors: sol.nb_colors(), colors: sol.labels() }
    }
}

/** writes a solution into a json file */
pub fn write_solution(filename:&str, sol:&Solution) -> Result<(), ColoringError> {
    let content = serde_json::to_string(&SolutionFile::from(sol))?;
    fs::write(filename, content)?;
    Ok(())
}
