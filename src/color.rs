use std::fmt;

use bit_set::BitSet;
use serde::{Serialize, Serializer};

use crate::error::ColoringError;
use crate::geometry::{Point, Segment};

/** Vertex Id */
pub type VertexId = usize;

/** Color (index in [0,k)) */
pub type Color = usize;

/** models a map-coloring instance: a set of located vertices and the borders between them.
Each edge is a "different colors" constraint between its endpoints.
*/
#[derive(Debug, Clone)]
pub struct Graph {
    /// location of each vertex (only meaningful for generated graphs)
    points: Vec<Point>,
    /// optional region names (toy instances)
    names: Option<Vec<String>>,
    /// edges of the graph (u < v)
    edges: Vec<(VertexId,VertexId)>,
    /// adj_list[i]: list of vertices adjacent to i
    adj_list: Vec<Vec<VertexId>>,
}


impl Graph {

    /// creates a graph with the given vertex locations and no edges
    pub fn with_points(points:Vec<Point>) -> Self {
        let n = points.len();
        Self { points, names: None, edges: Vec::new(), adj_list: vec![Vec::new() ; n] }
    }

    /** creates a graph from vertex locations and an edge list.
    Fails on self loops, duplicate edges, or edges referring to unknown vertices.
    */
    pub fn from_edges(points:Vec<Point>, edges:&[(VertexId,VertexId)]) -> Result<Self, ColoringError> {
        let mut res = Self::with_points(points);
        for (u,v) in edges {
            res.try_add_edge(*u, *v)?;
        }
        Ok(res)
    }

    /** classic 7 regions map of Australia (WA, NT, Q, NSW, V, SA, T).
    SA borders the 5 mainland regions, which form a path (WA and V do not touch):
    3 colors suffice, 2 do not.
    */
    pub fn australia() -> Self {
        let names = ["wa", "nt", "q", "nsw", "v", "sa", "t"];
        let borders = [
            ("wa","nt"), ("wa","sa"), ("nt","sa"), ("nt","q"), ("sa","q"),
            ("sa","nsw"), ("sa","v"), ("q","nsw"), ("v","nsw"),
        ];
        let id = |name:&str| names.iter().position(|e| *e == name).unwrap_or(0);
        // rough locations, for display purposes only
        let points = vec![
            Point::new(0.15, 0.5), Point::new(0.45, 0.8), Point::new(0.75, 0.75),
            Point::new(0.8, 0.4), Point::new(0.7, 0.2), Point::new(0.5, 0.4),
            Point::new(0.75, 0.02),
        ];
        let mut res = Self::with_points(points);
        for (a,b) in borders.iter() {
            res.add_edge(id(*a), id(*b));
        }
        res.names = Some(names.iter().map(|e| e.to_string()).collect());
        res
    }

    /// cycle of n vertices placed on a circle
    pub fn cycle(n:usize) -> Self {
        let mut res = Self::with_points(circle_points(n, 0.5, 0.5, 0.4));
        if n >= 2 {
            for i in 0..n-1 { res.add_edge(i, i+1); }
        }
        if n >= 3 { res.add_edge(n-1, 0); }
        res
    }

    /** wheel: a hub (vertex 0) adjacent to every vertex of a rim cycle of size `rim`
    (vertices 1..=rim). Odd rims need 4 colors.
    */
    pub fn wheel(rim:usize) -> Self {
        let mut points = vec![Point::new(0.5, 0.5)];
        points.extend(circle_points(rim, 0.5, 0.5, 0.4));
        let mut res = Self::with_points(points);
        for i in 1..=rim {
            res.add_edge(0, i);
            if rim >= 3 || i < rim {
                let next = if i == rim { 1 } else { i+1 };
                if !res.are_adjacent(i, next) && i != next { res.add_edge(i, next); }
            }
        }
        res
    }

    /// adds an isolated vertex at the given location, returns its id
    pub fn add_vertex(&mut self, p:Point) -> VertexId {
        self.points.push(p);
        self.adj_list.push(Vec::new());
        if let Some(names) = &mut self.names {
            names.push((self.points.len()-1).to_string());
        }
        self.points.len()-1
    }

    /// number of vertices
    pub fn nb_vertices(&self) -> usize { self.points.len() }

    /// number of edges
    pub fn nb_edges(&self) -> usize { self.edges.len() }

    /// iterator over the vertex ids
    pub fn vertices(&self) -> std::ops::Range<VertexId> { 0..self.nb_vertices() }

    /// location of vertex u
    pub fn point(&self, u:VertexId) -> Point { self.points[u] }

    /// locations of every vertex
    pub fn points(&self) -> &[Point] { &self.points }

    /// name of vertex u (its id if the graph has no names)
    pub fn name(&self, u:VertexId) -> String {
        match &self.names {
            None => u.to_string(),
            Some(names) => names[u].clone(),
        }
    }

    /// list of vertices adjacent to u
    pub fn neighbors(&self, u:VertexId) -> &[VertexId] { &self.adj_list[u] }

    /// number of neighbors of u
    pub fn degree(&self, u:VertexId) -> usize { self.adj_list[u].len() }

    /// edge list
    pub fn edges(&self) -> &[(VertexId,VertexId)] { &self.edges }

    /// true iff u and v are adjacent. O(Δ(G))
    pub fn are_adjacent(&self, u:VertexId, v:VertexId) -> bool {
        self.adj_list[u].iter().any(|c| *c == v)
    }

    /// segment drawn by the edge (u,v)
    pub fn segment(&self, u:VertexId, v:VertexId) -> Segment {
        Segment::new(self.points[u], self.points[v])
    }

    /// adds the edge (u,v). The caller guarantees it is new and not a loop.
    pub(crate) fn add_edge(&mut self, u:VertexId, v:VertexId) {
        debug_assert!(u != v && !self.are_adjacent(u, v));
        self.edges.push((u.min(v), u.max(v)));
        self.adj_list[u].push(v);
        self.adj_list[v].push(u);
    }

    fn try_add_edge(&mut self, u:VertexId, v:VertexId) -> Result<(), ColoringError> {
        let n = self.nb_vertices();
        if u >= n || v >= n {
            return Err(ColoringError::InvalidEdge(u, v, format!("unknown vertex (n={})", n)));
        }
        if u == v {
            return Err(ColoringError::InvalidEdge(u, v, "self loop".to_string()));
        }
        if self.are_adjacent(u, v) {
            return Err(ColoringError::InvalidEdge(u, v, "duplicate edge".to_string()));
        }
        self.add_edge(u, v);
        Ok(())
    }

    /// print statistics of the instance
    pub fn display_statistics(&self) {
        println!("\t{:>25}{:>10}", "nb vertices:", self.nb_vertices());
        println!("\t{:>25}{:>10}", "nb edges:", self.nb_edges());
        let degrees:Vec<usize> = self.vertices().map(|i| self.degree(i)).collect();
        if let (Some(min), Some(max)) = (degrees.iter().min(), degrees.iter().max()) {
            println!("\t{:>25}{:>10}", "min degree:", min);
            println!("\t{:>25}{:>10}", "max degree:", max);
        }
    }
}


/// n points evenly spread on the circle of center (cx,cy) and radius r
fn circle_points(n:usize, cx:f64, cy:f64, r:f64) -> Vec<Point> {
    (0..n).map(|i| {
        let angle = 2. * std::f64::consts::PI * (i as f64) / (n.max(1) as f64);
        Point::new(cx + r * angle.cos(), cy + r * angle.sin())
    }).collect()
}


/** search state of a coloring CSP: the color of each vertex (if any), and the colors
each vertex can still take (its domain).
A state is cloned for every branch of a search tree: backtracking drops the child state
instead of undoing its changes.
*/
#[derive(Debug, Clone, PartialEq)]
pub struct ColoringState {
    /// colors[v]: color assigned to vertex v
    colors: Vec<Option<Color>>,
    /// domains[v]: colors vertex v may take
    domains: Vec<BitSet>,
}

impl ColoringState {
    /// every vertex uncolored, every domain equal to [0,k)
    pub fn new(n:usize, k:usize) -> Self {
        let full:BitSet = (0..k).collect();
        Self { colors: vec![None ; n], domains: vec![full ; n] }
    }

    /// number of vertices
    pub fn nb_vertices(&self) -> usize { self.colors.len() }

    /// colors vertex v may take
    pub fn domain_of(&self, v:VertexId) -> &BitSet { &self.domains[v] }

    /// mutable access to the domain of v
    pub fn domain_mut(&mut self, v:VertexId) -> &mut BitSet { &mut self.domains[v] }

    /// all the domains
    pub fn domains(&self) -> &[BitSet] { &self.domains }

    /// moves the domains out of the state (to be replaced by [`Self::set_domains`])
    pub fn take_domains(&mut self) -> Vec<BitSet> { std::mem::take(&mut self.domains) }

    /// replaces all the domains (result of a propagation)
    pub fn set_domains(&mut self, domains:Vec<BitSet>) {
        debug_assert_eq!(domains.len(), self.colors.len());
        self.domains = domains;
    }

    /// color of v (None if unassigned)
    pub fn color_of(&self, v:VertexId) -> Option<Color> { self.colors[v] }

    /// assigns (Some) or unassigns (None) the color of v
    pub fn set_color(&mut self, v:VertexId, c:Option<Color>) { self.colors[v] = c; }

    /// true iff v has a color
    pub fn is_assigned(&self, v:VertexId) -> bool { self.colors[v].is_some() }

    /// true iff every vertex has a color
    pub fn is_fully_colored(&self) -> bool { self.colors.iter().all(|c| c.is_some()) }

    /// colors of every vertex
    pub fn colors(&self) -> &[Option<Color>] { &self.colors }

    /// consumes the state, returning the colors
    pub fn into_colors(self) -> Vec<Option<Color>> { self.colors }
}


/** human readable color name. Integers are only mapped to labels when a result leaves the
library. */
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorLabel {
    /// color 0
    Red,
    /// color 1
    Blue,
    /// color 2
    Green,
    /// color 3
    Orange,
    /// colors 4 and more
    Other(Color),
    /// no coloring found
    Gray,
}

impl From<Color> for ColorLabel {
    fn from(c:Color) -> Self {
        match c {
            0 => ColorLabel::Red,
            1 => ColorLabel::Blue,
            2 => ColorLabel::Green,
            3 => ColorLabel::Orange,
            _ => ColorLabel::Other(c),
        }
    }
}

impl fmt::Display for ColorLabel {
    fn fmt(&self, f:&mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColorLabel::Red => write!(f, "red"),
            ColorLabel::Blue => write!(f, "blue"),
            ColorLabel::Green => write!(f, "green"),
            ColorLabel::Orange => write!(f, "orange"),
            ColorLabel::Other(c) => write!(f, "color{}", c),
            ColorLabel::Gray => write!(f, "gray"),
        }
    }
}

impl Serialize for ColorLabel {
    fn serialize<S:Serializer>(&self, serializer:S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}


/** result of the solution checker */
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckerResult {
    /// feasible, uses this number of distinct colors
    Ok(usize),
    /// the coloring does not have one entry per vertex
    WrongSize(usize),
    /// vertex v has no color
    Unassigned(VertexId),
    /// vertex v uses a color outside [0,k)
    ColorOutOfRange(VertexId, Color),
    /// adjacent vertices share a color
    Conflict(VertexId, VertexId),
}

/**
checks that the coloring is complete, only uses colors of [0,k), and that the endpoints
of every edge have different colors.
*/
pub fn checker(inst:&Graph, colors:&[Option<Color>], k:usize) -> CheckerResult {
    if colors.len() != inst.nb_vertices() {
        return CheckerResult::WrongSize(colors.len());
    }
    let mut used = BitSet::with_capacity(k);
    for (v,c) in colors.iter().enumerate() {
        match c {
            None => return CheckerResult::Unassigned(v),
            Some(c) if *c >= k => return CheckerResult::ColorOutOfRange(v, *c),
            Some(c) => { used.insert(*c); }
        }
    }
    for (u,v) in inst.edges() {
        if colors[*u] == colors[*v] {
            return CheckerResult::Conflict(*u, *v);
        }
    }
    CheckerResult::Ok(used.len())
}
