use thiserror::Error;

use crate::color::VertexId;

/** errors raised by the library.
Domain wipeouts and exhausted searches are not errors: they are reported as
an unsuccessful [`Solution`](crate::search::Solution).
*/
#[derive(Debug, Error)]
pub enum ColoringError {
    /// unrecognized inference strategy / solving method keyword
    #[error("invalid method '{0}' (valid: plain, forward_checking, mac, min_conflicts)")]
    InvalidMethod(String),
    /// a coloring needs at least one color
    #[error("the number of colors must be positive")]
    InvalidColorCount,
    /// a generated graph needs at least one vertex
    #[error("the number of vertices must be positive")]
    InvalidVertexCount,
    /// an instance vertex id is duplicated or out of range
    #[error("invalid vertex {0}: {1}")]
    InvalidVertex(VertexId, String),
    /// an instance refers to an edge that cannot exist
    #[error("invalid edge ({0},{1}): {2}")]
    InvalidEdge(VertexId, VertexId, String),
    /// unable to read or write an instance / solution file
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
    /// malformed json instance / solution
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}
