use thiserror::Error;

use crate::math::Point2;

/// Top-level error type for the triangulation engine.
#[derive(Debug, Error)]
pub enum DelaunayError {
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error(transparent)]
    Topology(#[from] TopologyError),

    #[error(transparent)]
    Operation(#[from] OperationError),
}

/// Errors related to geometric computations.
#[derive(Debug, Error)]
pub enum GeometryError {
    /// The perpendicular bisectors of the triangle are parallel.
    #[error("degenerate triangle {a} {b} {c}: points are collinear")]
    DegenerateTriangle { a: Point2, b: Point2, c: Point2 },

    #[error("degenerate geometry: {0}")]
    Degenerate(String),
}

/// Errors related to the vertex/edge graph.
#[derive(Debug, Error)]
pub enum TopologyError {
    #[error("entity not found: {0}")]
    EntityNotFound(&'static str),

    #[error("edge {a} - {b} already exists")]
    DuplicateEdge { a: usize, b: usize },

    #[error("edge {a} - {b} does not exist")]
    EdgeNotFound { a: usize, b: usize },

    #[error("edges do not form a triangle")]
    NotATriangle,

    #[error("invalid topology: {0}")]
    InvalidTopology(String),
}

/// Errors related to the triangulation operation itself.
#[derive(Debug, Error)]
pub enum OperationError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

/// Convenience type alias for results using [`DelaunayError`].
pub type Result<T> = std::result::Result<T, DelaunayError>;
