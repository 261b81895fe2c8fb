use std::cmp::Reverse;
use std::fmt;
use std::str::FromStr;

use bit_set::BitSet;
use log::{debug, trace};

use crate::color::{checker, CheckerResult, Color, ColoringState, Graph, VertexId};
use crate::error::ColoringError;
use crate::search::ac3::{ac3, all_arcs};
use crate::search::{SearchStats, Solution};


/** inference performed by the backtracking after each assignment.
Also defines the goal test, as it depends on what the inference guarantees.
*/
pub trait Inference: fmt::Debug {
    /// called once before the search. None if the instance is proven infeasible.
    fn preprocess(&self, _inst:&Graph, state:ColoringState) -> Option<ColoringState> {
        Some(state)
    }

    /// called after vertex v received its color. None if some domain became empty.
    fn infer(&self, inst:&Graph, state:ColoringState, v:VertexId) -> Option<ColoringState>;

    /// true iff the state is a solution
    fn is_goal(&self, inst:&Graph, state:&ColoringState, k:usize) -> bool;
}

/** no inference: colors are tried blindly, complete colorings are checked against every
edge. */
#[derive(Debug, Clone, Copy, Default)]
pub struct NoInference;

impl Inference for NoInference {
    fn infer(&self, _inst:&Graph, state:ColoringState, _v:VertexId) -> Option<ColoringState> {
        Some(state)
    }

    fn is_goal(&self, inst:&Graph, state:&ColoringState, k:usize) -> bool {
        state.is_fully_colored() && matches!(checker(inst, state.colors(), k), CheckerResult::Ok(_))
    }
}

/** forward checking: the color of v is removed from its uncolored neighbors' domains. */
#[derive(Debug, Clone, Copy, Default)]
pub struct ForwardChecking;

impl Inference for ForwardChecking {
    fn infer(&self, inst:&Graph, mut state:ColoringState, v:VertexId) -> Option<ColoringState> {
        let c = state.color_of(v)?;
        *state.domain_mut(v) = singleton(c);
        for u in inst.neighbors(v) {
            if !state.is_assigned(*u) && state.domain_mut(*u).remove(c)
            && state.domain_of(*u).is_empty() {
                return None;
            }
        }
        Some(state)
    }

    fn is_goal(&self, _inst:&Graph, state:&ColoringState, _k:usize) -> bool {
        state.is_fully_colored()
    }
}

/** maintaining arc consistency: AC-3 runs on the whole graph before the search, and
after each assignment starting from the arcs pointing to the colored vertex. */
#[derive(Debug, Clone, Copy, Default)]
pub struct MaintainArcConsistency;

impl Inference for MaintainArcConsistency {
    fn preprocess(&self, inst:&Graph, mut state:ColoringState) -> Option<ColoringState> {
        let domains = ac3(inst, state.take_domains(), all_arcs(inst))?;
        state.set_domains(domains);
        Some(state)
    }

    fn infer(&self, inst:&Graph, mut state:ColoringState, v:VertexId) -> Option<ColoringState> {
        let c = state.color_of(v)?;
        *state.domain_mut(v) = singleton(c);
        let arcs:Vec<(VertexId,VertexId)> = inst.neighbors(v).iter()
            .filter(|u| !state.is_assigned(**u))
            .map(|u| (*u, v))
            .collect();
        let domains = ac3(inst, state.take_domains(), arcs)?;
        state.set_domains(domains);
        Some(state)
    }

    fn is_goal(&self, _inst:&Graph, state:&ColoringState, _k:usize) -> bool {
        state.is_fully_colored()
    }
}

fn singleton(c:Color) -> BitSet {
    let mut res = BitSet::with_capacity(c+1);
    res.insert(c);
    res
}


/** inference strategy selection. Accepts both the historical keywords (`""`,
`"forward checking"`, `"MAC"`) and the snake case ones (`plain`, `forward_checking`, `mac`).
*/
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InferenceType {
    /// plain backtracking
    Plain,
    /// backtracking with forward checking
    ForwardChecking,
    /// backtracking maintaining arc consistency
    Mac,
}

impl InferenceType {
    /// inference implementation of this strategy
    pub fn build(&self) -> Box<dyn Inference> {
        match self {
            InferenceType::Plain => Box::new(NoInference),
            InferenceType::ForwardChecking => Box::new(ForwardChecking),
            InferenceType::Mac => Box::new(MaintainArcConsistency),
        }
    }
}

impl FromStr for InferenceType {
    type Err = ColoringError;

    fn from_str(s:&str) -> Result<Self, Self::Err> {
        match s {
            "" | "plain" => Ok(InferenceType::Plain),
            "forward checking" | "forward_checking" => Ok(InferenceType::ForwardChecking),
            "MAC" | "mac" => Ok(InferenceType::Mac),
            _ => Err(ColoringError::InvalidMethod(s.to_string())),
        }
    }
}

impl fmt::Display for InferenceType {
    fn fmt(&self, f:&mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InferenceType::Plain => write!(f, "plain"),
            InferenceType::ForwardChecking => write!(f, "forward_checking"),
            InferenceType::Mac => write!(f, "mac"),
        }
    }
}


/** depth first search over partial colorings.
    1. pick the uncolored vertex with the largest degree (smallest id on ties)
    2. try each color of its domain in increasing order
    3. run the inference on a copy of the state, recurse if no domain became empty
    4. the first complete solution stops the search
*/
#[derive(Debug)]
pub struct Backtracking<'a> {
    /// instance
    inst: &'a Graph,
    /// number of colors
    k: usize,
    /// inference (and goal test)
    inference: &'a dyn Inference,
    /// search statistics
    stats: SearchStats,
}

impl<'a> Backtracking<'a> {
    /// creates a backtracking search
    pub fn new(inst:&'a Graph, k:usize, inference:&'a dyn Inference) -> Self {
        Self { inst, k, inference, stats: SearchStats::default() }
    }

    /// search statistics
    pub fn stats(&self) -> &SearchStats { &self.stats }

    /// uncolored vertex with the largest degree
    fn select_vertex(&self, state:&ColoringState) -> Option<VertexId> {
        self.inst.vertices()
            .filter(|v| !state.is_assigned(*v))
            .min_by_key(|v| Reverse(self.inst.degree(*v)))
    }

    fn search(&mut self, state:ColoringState) -> Option<ColoringState> {
        self.stats.nb_nodes += 1;
        if self.inference.is_goal(self.inst, &state, self.k) {
            return Some(state);
        }
        let v = self.select_vertex(&state)?;
        let candidates:Vec<Color> = state.domain_of(v).iter().collect();
        for c in candidates {
            trace!("trying {} := {}", v, c);
            let mut child = state.clone();
            child.set_color(v, Some(c));
            match self.inference.infer(self.inst, child, v) {
                None => self.stats.nb_wipeouts += 1,
                Some(child) => {
                    if let Some(res) = self.search(child) {
                        return Some(res);
                    }
                }
            }
            self.stats.nb_backtracks += 1;
        }
        None
    }

    /// runs the search from an empty coloring
    pub fn run(&mut self) -> Solution {
        let n = self.inst.nb_vertices();
        let initial = ColoringState::new(n, self.k);
        let res = match self.inference.preprocess(self.inst, initial) {
            None => {
                self.stats.nb_wipeouts += 1;
                None
            },
            Some(state) => self.search(state),
        };
        debug!(
            "backtracking: found={} nodes={} wipeouts={} backtracks={}",
            res.is_some(), self.stats.nb_nodes, self.stats.nb_wipeouts, self.stats.nb_backtracks
        );
        match res {
            None => Solution::not_found(n, self.stats.clone()),
            Some(state) => {
                debug_assert!(matches!(checker(self.inst, state.colors(), self.k), CheckerResult::Ok(_)));
                Solution::found(state.into_colors(), self.stats.clone())
            }
        }
    }
}

/** backtracking search for a k-coloring of the graph with the given inference */
pub fn backtrack(inst:&Graph, k:usize, inference:InferenceType) -> Solution {
    let inference = inference.build();
    let mut search = Backtracking::new(inst, k, inference.as_ref());
    search.run()
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Point;

    const ALL:[InferenceType ; 3] = [
        InferenceType::Plain, InferenceType::ForwardChecking, InferenceType::Mac
    ];

    /// odd wheel (hub + 5-cycle) and an island: 7 regions, 4 colors needed
    fn four_chromatic_map() -> Graph {
        let mut res = Graph::wheel(5);
        res.add_vertex(Point::new(0.95, 0.05));
        res
    }

    #[test]
    fn test_parse_inference() {
        assert_eq!("".parse::<InferenceType>().unwrap(), InferenceType::Plain);
        assert_eq!("forward checking".parse::<InferenceType>().unwrap(), InferenceType::ForwardChecking);
        assert_eq!("MAC".parse::<InferenceType>().unwrap(), InferenceType::Mac);
        assert_eq!("mac".parse::<InferenceType>().unwrap(), InferenceType::Mac);
        assert!(matches!(
            "dfs".parse::<InferenceType>(), Err(ColoringError::InvalidMethod(_))
        ));
        for t in ALL.iter() {
            assert_eq!(t.to_string().parse::<InferenceType>().unwrap(), *t);
        }
    }

    #[test]
    fn test_four_chromatic_map() {
        let inst = four_chromatic_map();
        for t in ALL.iter() {
            assert!(!backtrack(&inst, 3, *t).found, "{} found a 3-coloring", t);
            let sol = backtrack(&inst, 4, *t);
            assert!(sol.found, "{} found no 4-coloring", t);
            assert_eq!(checker(&inst, &sol.colors, 4), CheckerResult::Ok(4));
        }
    }

    #[test]
    fn test_australia() {
        let inst = Graph::australia();
        for t in ALL.iter() {
            assert!(!backtrack(&inst, 2, *t).found);
            let sol = backtrack(&inst, 3, *t);
            assert!(sol.found);
            assert_eq!(checker(&inst, &sol.colors, 3), CheckerResult::Ok(3));
            // sa has the largest degree: colored first, with the first color
            assert_eq!(sol.colors[5], Some(0));
        }
    }

    #[test]
    fn test_failure_marks_every_vertex_unassigned() {
        let inst = Graph::cycle(5);
        let sol = backtrack(&inst, 2, InferenceType::ForwardChecking);
        assert!(!sol.found);
        assert!(sol.colors.iter().all(|c| c.is_none()));
    }

    #[test]
    fn test_mac_preprocessing_failure() {
        // k=1 on an edge: AC-3 fails before any assignment
        let inst = Graph::cycle(2);
        let sol = backtrack(&inst, 1, InferenceType::Mac);
        assert!(!sol.found);
        assert_eq!(sol.stats.nb_nodes, 0);
    }

    #[test]
    fn test_forward_checking_prunes() {
        let inst = Graph::cycle(4);
        let mut state = ColoringState::new(4, 2);
        state.set_color(0, Some(0));
        let state = ForwardChecking.infer(&inst, state, 0).unwrap();
        assert_eq!(state.domain_of(1).iter().collect::<Vec<_>>(), vec![1]);
        assert_eq!(state.domain_of(3).iter().collect::<Vec<_>>(), vec![1]);
        assert_eq!(state.domain_of(2).len(), 2);
        // mac goes further: 2 must differ from 1 and 3
        let mut state = ColoringState::new(4, 2);
        state.set_color(0, Some(0));
        let state = MaintainArcConsistency.infer(&inst, state, 0).unwrap();
        assert_eq!(state.domain_of(2).iter().collect::<Vec<_>>(), vec![0]);
    }

    #[test]
    fn test_empty_and_edgeless() {
        let inst = Graph::with_points(vec![]);
        for t in ALL.iter() {
            assert!(backtrack(&inst, 1, *t).found);
        }
        let inst = Graph::with_points(vec![Point::new(0.1, 0.1), Point::new(0.9, 0.9)]);
        for t in ALL.iter() {
            let sol = backtrack(&inst, 1, *t);
            assert!(sol.found);
            assert_eq!(sol.colors, vec![Some(0), Some(0)]);
        }
    }

    #[test]
    fn test_deterministic() {
        let inst = four_chromatic_map();
        for t in ALL.iter() {
            let a = backtrack(&inst, 4, *t);
            let b = backtrack(&inst, 4, *t);
            assert_eq!(a.found, b.found);
            assert_eq!(a.colors, b.colors);
        }
    }
}
