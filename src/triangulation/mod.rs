mod divide;
mod extract;
mod merge;
mod step;

pub use step::{Checkpoint, Continuous, StepControl, StepGate};

use tracing::info;

use crate::error::{OperationError, Result};
use crate::math::{sort_xy, Point2};
use crate::topology::{MeshStore, Triangle, VertexData, VertexId};

/// Parameters controlling triangle quality reporting.
#[derive(Debug, Clone, Copy)]
pub struct TriangulationParams {
    /// Interior angles below this (degrees) flag a triangle as abnormal.
    pub min_angle_deg: f64,
    /// Interior angles above this (degrees) flag a triangle as abnormal.
    pub max_angle_deg: f64,
}

impl Default for TriangulationParams {
    fn default() -> Self {
        Self {
            min_angle_deg: 0.01,
            max_angle_deg: 179.001,
        }
    }
}

/// Counts describing a finished run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TriangulationSummary {
    /// Number of input vertices.
    pub vertices: usize,
    /// Number of edges in the final graph.
    pub edges: usize,
    /// Number of extracted triangles.
    pub triangles: usize,
    /// Number of triangles flagged as abnormal.
    pub degenerate: usize,
}

/// Divide-and-conquer Delaunay triangulation of a static point set.
///
/// Vertices are sorted by x then y, split in halves recursively, and the
/// sub-triangulations are stitched together bottom-up. Faces are recovered
/// from the final edge graph in a separate pass.
///
/// Points whose x coordinates differ by less than [`crate::math::TOLERANCE`]
/// share a column ordered by y, and topology decisions near that tolerance
/// depend on input order. Duplicate points are not merged.
#[derive(Debug, Clone)]
pub struct Triangulator {
    store: MeshStore,
    sorted: Vec<VertexId>,
    triangles: Vec<Triangle>,
    degenerate: Vec<Triangle>,
    params: TriangulationParams,
}

impl Triangulator {
    /// Creates a triangulator over `points`, indexed `0..points.len()` in
    /// input order.
    ///
    /// # Errors
    ///
    /// Returns `OperationError::InvalidInput` if `points` is empty or holds a
    /// non-finite coordinate.
    pub fn new(points: &[Point2]) -> Result<Self> {
        if points.is_empty() {
            return Err(OperationError::InvalidInput("no points to triangulate".into()).into());
        }
        let mut store = MeshStore::new();
        let mut keyed = Vec::with_capacity(points.len());
        for (index, point) in points.iter().enumerate() {
            if !point.x.is_finite() || !point.y.is_finite() {
                return Err(OperationError::InvalidInput(format!(
                    "point {index} has a non-finite coordinate"
                ))
                .into());
            }
            keyed.push((*point, store.add_vertex(VertexData::new(index, *point))));
        }
        sort_xy(&mut keyed);
        Ok(Self {
            store,
            sorted: keyed.into_iter().map(|(_, id)| id).collect(),
            triangles: Vec::new(),
            degenerate: Vec::new(),
            params: TriangulationParams::default(),
        })
    }

    /// Replaces the quality parameters.
    #[must_use]
    pub fn with_params(mut self, params: TriangulationParams) -> Self {
        self.params = params;
        self
    }

    /// Runs the full triangulation without suspending.
    ///
    /// # Errors
    ///
    /// Returns `GeometryError::DegenerateTriangle` if a legality test meets
    /// collinear points, or a topology error on an internal inconsistency.
    pub fn run(&mut self) -> Result<()> {
        self.run_stepwise(&mut Continuous)
    }

    /// Runs the full triangulation, handing control to `control` at every
    /// [`Checkpoint`].
    ///
    /// Any previous result is discarded first.
    ///
    /// # Errors
    ///
    /// See [`Triangulator::run`].
    pub fn run_stepwise<C>(&mut self, control: &mut C) -> Result<()>
    where
        C: StepControl + ?Sized,
    {
        self.store.clear_edges();
        self.triangles.clear();
        self.degenerate.clear();

        let sorted = self.sorted.clone();
        self.divide(&sorted, control)?;
        self.extract_triangles()?;
        self.flag_degenerate()?;

        let summary = self.summary();
        info!(
            vertices = summary.vertices,
            edges = summary.edges,
            triangles = summary.triangles,
            degenerate = summary.degenerate,
            "triangulation finished"
        );
        Ok(())
    }

    /// Flattened corner indices, three per triangle.
    #[must_use]
    pub fn triangle_indices(&self) -> Vec<usize> {
        self.triangles.iter().flat_map(Triangle::indices).collect()
    }

    /// Extracted triangles.
    #[must_use]
    pub fn triangles(&self) -> &[Triangle] {
        &self.triangles
    }

    /// Triangles with an interior angle outside the configured range.
    #[must_use]
    pub fn degenerate_triangles(&self) -> &[Triangle] {
        &self.degenerate
    }

    /// The vertex/edge graph, for inspection.
    #[must_use]
    pub fn store(&self) -> &MeshStore {
        &self.store
    }

    /// Quality parameters in use.
    #[must_use]
    pub fn params(&self) -> &TriangulationParams {
        &self.params
    }

    /// Edges as index pairs, smaller index first.
    #[must_use]
    pub fn edge_pairs(&self) -> Vec<(usize, usize)> {
        self.store.snapshot().edges
    }

    /// Counts of the current result.
    #[must_use]
    pub fn summary(&self) -> TriangulationSummary {
        TriangulationSummary {
            vertices: self.store.num_vertices(),
            edges: self.store.num_edges(),
            triangles: self.triangles.len(),
            degenerate: self.degenerate.len(),
        }
    }
}
