use crate::error::{Result, TopologyError};
use crate::math::angle_between;
use crate::triangulation::TriangulationParams;

use super::edge::EdgeId;
use super::vertex::VertexId;
use super::MeshStore;

/// A face bounded by three pairwise adjacent edges.
///
/// Two triangles are equal when they are bounded by the same three edges,
/// whatever the order.
#[derive(Debug, Clone, Copy)]
pub struct Triangle {
    edges: [EdgeId; 3],
    vertices: [VertexId; 3],
    indices: [usize; 3],
}

impl Triangle {
    /// Builds a triangle from three edges forming a vertex cycle.
    ///
    /// Vertex `i + 1` is the one shared by edges `i` and `i + 1` (mod 3).
    ///
    /// # Errors
    ///
    /// Returns `TopologyError::NotATriangle` if some pair of edges shares no
    /// vertex or the shared vertices are not distinct.
    pub fn new(store: &MeshStore, e1: EdgeId, e2: EdgeId, e3: EdgeId) -> Result<Self> {
        let shared = |x, y| -> Result<VertexId> {
            store
                .common_vertex(x, y)?
                .ok_or_else(|| TopologyError::NotATriangle.into())
        };
        let v2 = shared(e1, e2)?;
        let v3 = shared(e2, e3)?;
        let v1 = shared(e3, e1)?;
        if v1 == v2 || v2 == v3 || v3 == v1 {
            return Err(TopologyError::NotATriangle.into());
        }
        Ok(Self {
            edges: [e1, e2, e3],
            vertices: [v1, v2, v3],
            indices: [
                store.vertex(v1)?.index,
                store.vertex(v2)?.index,
                store.vertex(v3)?.index,
            ],
        })
    }

    /// The bounding edges, in construction order.
    #[must_use]
    pub fn edges(&self) -> [EdgeId; 3] {
        self.edges
    }

    /// The corner vertices.
    #[must_use]
    pub fn vertices(&self) -> [VertexId; 3] {
        self.vertices
    }

    /// Edge IDs in sorted order, identifying the triangle.
    #[must_use]
    pub fn key(&self) -> [EdgeId; 3] {
        let mut key = self.edges;
        key.sort_unstable();
        key
    }

    /// Stable input indices of the corners, in vertex order.
    #[must_use]
    pub fn indices(&self) -> [usize; 3] {
        self.indices
    }

    /// Corner indices in ascending order.
    #[must_use]
    pub fn sorted_indices(&self) -> [usize; 3] {
        let mut sorted = self.indices;
        sorted.sort_unstable();
        sorted
    }

    /// Interior angles in degrees at `vertices[1]`, `vertices[2]`,
    /// `vertices[0]`.
    ///
    /// # Errors
    ///
    /// Returns an error if an edge is not in the store.
    pub fn angles_deg(&self, store: &MeshStore) -> Result<[f64; 3]> {
        let mut angles = [0.0; 3];
        for (i, angle) in angles.iter_mut().enumerate() {
            let x = self.edges[i];
            let y = self.edges[(i + 1) % 3];
            let corner = self.vertices[(i + 1) % 3];
            *angle = angle_between(&store.vector_from(x, corner)?, &store.vector_from(y, corner)?)
                .to_degrees();
        }
        Ok(angles)
    }

    /// Returns `true` if any interior angle is below `min_angle_deg` or above
    /// `max_angle_deg`.
    ///
    /// # Errors
    ///
    /// Returns an error if an edge is not in the store.
    pub fn is_degenerate(&self, store: &MeshStore, params: &TriangulationParams) -> Result<bool> {
        Ok(self
            .angles_deg(store)?
            .iter()
            .any(|&a| a < params.min_angle_deg || a > params.max_angle_deg))
    }
}

impl PartialEq for Triangle {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for Triangle {}
