use std::cmp::Reverse;

use fastrand::Rng;
use log::debug;
use priority_queue::PriorityQueue;

use crate::color::{checker, CheckerResult, Color, Graph, VertexId};
use crate::search::{SearchStats, Solution};

/// priority of a vertex: number of conflicting neighbors, then smallest id first
type ConflictPriority = (usize, Reverse<VertexId>);

/** Min-conflicts local search.
Starts from a random complete coloring and repairs it:
    1. pick the vertex involved in the most conflicts (smallest id on ties)
    2. give it the color used by the fewest of its neighbors (smallest color on ties,
       so an unused color is always preferred)
    3. repeat until no edge is conflicting or the iteration budget is exhausted

nb_neigh_colors and the conflict priorities are updated incrementally after each move.
*/
#[derive(Debug)]
pub struct MinConflicts<'a> {
    /// reference instance
    inst: &'a Graph,
    /// number of colors
    k: usize,
    /// colors[v]: color of the vertex v
    colors: Vec<Color>,
    /// nb_neigh_colors[v][c]: number of neighbors of v that are assigned color c
    nb_neigh_colors: Vec<Vec<usize>>,
    /// vertices ordered by number of conflicts
    conflicts: PriorityQueue<VertexId, ConflictPriority>,
    /// number of conflicting edges
    nb_conflicting_edges: usize,
}

impl<'a> MinConflicts<'a> {
    /// creates a search state from a given complete coloring (colors in [0,k), k > 0)
    pub fn from_colors(inst:&'a Graph, k:usize, colors:Vec<Color>) -> Self {
        debug_assert!(colors.iter().all(|c| *c < k));
        let n = inst.nb_vertices();
        let mut nb_neigh_colors = vec![vec![0 ; k] ; n];
        for u in inst.vertices() {
            for v in inst.neighbors(u) {
                nb_neigh_colors[*v][colors[u]] += 1;
            }
        }
        let nb_conflicting_edges = inst.edges().iter()
            .filter(|(u,v)| colors[*u] == colors[*v])
            .count();
        let mut conflicts = PriorityQueue::with_capacity(n);
        for v in inst.vertices() {
            conflicts.push(v, (nb_neigh_colors[v][colors[v]], Reverse(v)));
        }
        Self { inst, k, colors, nb_neigh_colors, conflicts, nb_conflicting_edges }
    }

    /// creates a search state where every vertex gets a random color (k > 0)
    pub fn random(inst:&'a Graph, k:usize, rng:&mut Rng) -> Self {
        let colors = inst.vertices().map(|_| rng.usize(0..k)).collect();
        Self::from_colors(inst, k, colors)
    }

    /// number of edges whose endpoints share a color
    pub fn nb_conflicting_edges(&self) -> usize { self.nb_conflicting_edges }

    /// current colors
    pub fn colors(&self) -> &[Color] { &self.colors }

    /// number of neighbors of v sharing its color
    pub fn nb_conflicts(&self, v:VertexId) -> usize { self.nb_neigh_colors[v][self.colors[v]] }

    /// vertex with the most conflicts (smallest id on ties)
    pub fn most_conflicted(&self) -> Option<VertexId> {
        self.conflicts.peek().map(|(v,_)| *v)
    }

    /// color used by the fewest neighbors of x (smallest color on ties)
    pub fn min_conflict_value(&self, x:VertexId) -> Color {
        let counts = &self.nb_neigh_colors[x];
        (0..self.k).min_by_key(|c| counts[*c]).unwrap_or(0)
    }

    /// changes the color of x to c, updating the conflict information
    pub fn recolor(&mut self, x:VertexId, c:Color) {
        let previous = self.colors[x];
        if previous == c { return; }
        let inst = self.inst;
        for u in inst.neighbors(x) {
            let u = *u;
            self.nb_neigh_colors[u][previous] -= 1;
            self.nb_neigh_colors[u][c] += 1;
            if self.colors[u] == previous { self.nb_conflicting_edges -= 1; }
            if self.colors[u] == c { self.nb_conflicting_edges += 1; }
            let nb_conflicts = self.nb_conflicts(u);
            self.conflicts.change_priority(&u, (nb_conflicts, Reverse(u)));
        }
        self.colors[x] = c;
        let nb_conflicts = self.nb_conflicts(x);
        self.conflicts.change_priority(&x, (nb_conflicts, Reverse(x)));
    }

    /// performs at most max_steps repairs. Returns the number of repairs performed
    pub fn run(&mut self, max_steps:usize) -> usize {
        for step in 0..max_steps {
            if self.nb_conflicting_edges == 0 { return step; }
            let x = match self.most_conflicted() {
                Some(x) => x,
                None => return step,
            };
            let c = self.min_conflict_value(x);
            self.recolor(x, c);
        }
        max_steps
    }
}

/** min-conflicts local search with a budget of 10 × (number of vertices) repairs.
Incomplete: may fail even if a k-coloring exists. k must be positive.
*/
pub fn min_conflicts(inst:&Graph, k:usize, rng:&mut Rng) -> Solution {
    debug_assert!(k > 0);
    let n = inst.nb_vertices();
    let mut search = MinConflicts::random(inst, k, rng);
    let nb_iterations = search.run(10 * n);
    let stats = SearchStats { nb_iterations, ..SearchStats::default() };
    let found = search.nb_conflicting_edges() == 0;
    debug!(
        "min-conflicts: found={} iterations={} conflicting edges={}",
        found, nb_iterations, search.nb_conflicting_edges()
    );
    if found {
        let colors:Vec<Option<Color>> = search.colors().iter().map(|c| Some(*c)).collect();
        debug_assert!(matches!(checker(inst, &colors, k), CheckerResult::Ok(_)));
        Solution::found(colors, stats)
    } else {
        Solution::not_found(n, stats)
    }
}
