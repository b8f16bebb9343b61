//! Divide-and-conquer Delaunay triangulation of 2D point sets.
//!
//! [`Triangulator`] sorts the input, triangulates halves recursively, merges
//! them with a zipper sweep under the empty-circumcircle criterion, and
//! finally extracts triangles from the edge graph.

pub mod error;
pub mod math;
pub mod topology;
pub mod triangulation;

pub use error::{DelaunayError, Result};
pub use math::Point2;
pub use triangulation::{
    Checkpoint, Continuous, StepControl, StepGate, Triangulator, TriangulationParams,
    TriangulationSummary,
};
