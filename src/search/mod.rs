//! Search algorithms for the map coloring problem.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::color::{Color, ColorLabel, Graph};
use crate::error::ColoringError;

/// AC-3 arc consistency
pub mod ac3;

/// backtracking search (plain, forward checking, MAC)
pub mod backtracking;

/// min-conflicts local search
pub mod min_conflicts;

use backtracking::{backtrack, InferenceType};
use min_conflicts::min_conflicts;


/** statistics of a solver run */
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SearchStats {
    /// number of search tree nodes explored (backtracking)
    pub nb_nodes: usize,
    /// number of assignments rejected by the inference (backtracking)
    pub nb_wipeouts: usize,
    /// number of assignments undone (backtracking)
    pub nb_backtracks: usize,
    /// number of repairs performed (min-conflicts)
    pub nb_iterations: usize,
}

/** outcome of a solver: a complete coloring if found, every vertex uncolored otherwise */
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Solution {
    /// true iff a k-coloring was found
    pub found: bool,
    /// colors[v]: color of v (all None if not found)
    pub colors: Vec<Option<Color>>,
    /// solver statistics
    pub stats: SearchStats,
}

impl Solution {
    /// successful outcome
    pub fn found(colors:Vec<Option<Color>>, stats:SearchStats) -> Self {
        Self { found: true, colors, stats }
    }

    /// unsuccessful outcome for a graph of n vertices
    pub fn not_found(n:usize, stats:SearchStats) -> Self {
        Self { found: false, colors: vec![None ; n], stats }
    }

    /// color names of every vertex (all gray if no coloring was found)
    pub fn labels(&self) -> Vec<ColorLabel> {
        self.colors.iter().map(|c| match c {
            Some(c) if self.found => ColorLabel::from(*c),
            _ => ColorLabel::Gray,
        }).collect()
    }

    /// number of distinct colors used
    pub fn nb_colors(&self) -> usize {
        let mut used:Vec<Color> = self.colors.iter().filter_map(|c| *c).collect();
        used.sort_unstable();
        used.dedup();
        used.len()
    }
}


/** solving method */
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    /// backtracking with the given inference
    Backtracking(InferenceType),
    /// min-conflicts local search
    MinConflicts,
}

impl FromStr for Method {
    type Err = ColoringError;

    fn from_str(s:&str) -> Result<Self, Self::Err> {
        match s {
            "min_conflicts" | "min conflicts" => Ok(Method::MinConflicts),
            _ => Ok(Method::Backtracking(s.parse()?)),
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f:&mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Method::Backtracking(inference) => write!(f, "{}", inference),
            Method::MinConflicts => write!(f, "min_conflicts"),
        }
    }
}

impl Method {
    /// every method, in benchmark order
    pub fn all() -> [Method ; 4] {
        [
            Method::Backtracking(InferenceType::Plain),
            Method::Backtracking(InferenceType::ForwardChecking),
            Method::Backtracking(InferenceType::Mac),
            Method::MinConflicts,
        ]
    }

    /// solves the instance with this method (rng only used by min-conflicts)
    pub fn solve(&self, inst:&Graph, k:usize, rng:&mut fastrand::Rng) -> Result<Solution, ColoringError> {
        match self {
            Method::Backtracking(inference) => solve_with(inst, k, *inference),
            Method::MinConflicts => solve_min_conflicts(inst, k, rng),
        }
    }
}


/** systematic search for a k-coloring.
`strategy` is one of `plain`, `forward_checking`, `mac` (or `""`, `"forward checking"`,
`"MAC"`). Fails on an unknown strategy or k = 0.
*/
pub fn solve(inst:&Graph, k:usize, strategy:&str) -> Result<Solution, ColoringError> {
    solve_with(inst, k, strategy.parse()?)
}

/// systematic search for a k-coloring with the given inference
pub fn solve_with(inst:&Graph, k:usize, inference:InferenceType) -> Result<Solution, ColoringError> {
    if k == 0 { return Err(ColoringError::InvalidColorCount); }
    Ok(backtrack(inst, k, inference))
}

/// min-conflicts search for a k-coloring. Fails on k = 0.
pub fn solve_min_conflicts(inst:&Graph, k:usize, rng:&mut fastrand::Rng) -> Result<Solution, ColoringError> {
    if k == 0 { return Err(ColoringError::InvalidColorCount); }
    Ok(min_conflicts(inst, k, rng))
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::{checker, CheckerResult};

    #[test]
    fn test_solve_keywords() {
        let inst = Graph::australia();
        for strategy in ["", "forward checking", "MAC", "plain", "forward_checking", "mac"].iter() {
            let sol = solve(&inst, 3, strategy).unwrap();
            assert!(sol.found);
            assert_eq!(checker(&inst, &sol.colors, 3), CheckerResult::Ok(3));
        }
        assert!(matches!(solve(&inst, 3, "bfs"), Err(ColoringError::InvalidMethod(_))));
        assert!(matches!(solve(&inst, 0, "mac"), Err(ColoringError::InvalidColorCount)));
        let mut rng = fastrand::Rng::with_seed(0);
        assert!(solve_min_conflicts(&inst, 0, &mut rng).is_err());
    }

    #[test]
    fn test_zero_colors_rejected_on_empty_graph() {
        let inst = Graph::with_points(vec![]);
        let mut rng = fastrand::Rng::with_seed(0);
        assert!(matches!(
            solve_min_conflicts(&inst, 0, &mut rng), Err(ColoringError::InvalidColorCount)
        ));
        assert!(matches!(solve(&inst, 0, "plain"), Err(ColoringError::InvalidColorCount)));
        assert!(solve_min_conflicts(&inst, 1, &mut rng).unwrap().found);
    }

    #[test]
    fn test_labels() {
        let inst = Graph::australia();
        let sol = solve(&inst, 3, "mac").unwrap();
        let labels = sol.labels();
        assert_eq!(labels[5], ColorLabel::Red);
        assert!(labels.iter().all(|l| *l != ColorLabel::Gray));
        assert_eq!(sol.nb_colors(), 3);
        let sol = solve(&inst, 2, "mac").unwrap();
        assert!(sol.labels().iter().all(|l| *l == ColorLabel::Gray));
        assert_eq!(sol.nb_colors(), 0);
    }

    #[test]
    fn test_method_parsing() {
        for m in Method::all().iter() {
            assert_eq!(m.to_string().parse::<Method>().unwrap(), *m);
        }
        assert_eq!("MAC".parse::<Method>().unwrap(), Method::Backtracking(InferenceType::Mac));
        assert!("tabu".parse::<Method>().is_err());
    }

    #[test]
    fn test_result_independent_of_call_order() {
        let inst = Graph::wheel(5);
        let mut rng = fastrand::Rng::with_seed(3);
        let first = solve(&inst, 3, "forward_checking").unwrap().found;
        for m in Method::all().iter() {
            m.solve(&inst, 4, &mut rng).unwrap();
        }
        assert_eq!(solve(&inst, 3, "forward_checking").unwrap().found, first);
    }
}
