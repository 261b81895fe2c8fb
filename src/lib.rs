//! DOGS implementation of the map coloring problem: random planar maps, and k-coloring
//! solvers (backtracking with/without inference, min-conflicts)

// #![warn(clippy::all, clippy::pedantic)]
// useful additional warnings if docs are missing, or crates imported but unused, etc.
#![warn(missing_debug_implementations)]
#![warn(missing_docs)]
#![warn(trivial_casts, trivial_numeric_casts)]
#![warn(unsafe_code)]
#![warn(unused_extern_crates)]
#![warn(variant_size_differences)]

// not sure if already by default in clippy
#![warn(clippy::similar_names)]
#![warn(clippy::shadow_unrelated)]
#![warn(clippy::shadow_same)]
#![warn(clippy::shadow_reuse)]


/// points, segments and the segment crossing test
pub mod geometry;

/// random planar graph generator
pub mod planar;

/// map coloring instance, search state, solution checker
pub mod color;

/// error types
pub mod error;

/// read/write json instances & solutions
pub mod instance;

/// helper and utility methods for executables
pub mod util;

/// search algorithms for the map coloring problem
pub mod search;

pub use color::{Graph, ColorLabel};
pub use error::ColoringError;
pub use planar::generate_planar_graph;
pub use search::{solve, solve_min_conflicts, Method, Solution};
