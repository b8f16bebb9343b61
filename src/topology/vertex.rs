use std::fmt;

use crate::error::Result;
use crate::math::{angle_between, Point2, TOLERANCE};

use super::edge::EdgeId;
use super::MeshStore;

slotmap::new_key_type! {
    /// Unique identifier for a vertex in the mesh store.
    pub struct VertexId;
}

/// Data associated with a mesh vertex.
#[derive(Debug, Clone)]
pub struct VertexData {
    /// Stable index, assigned from the input order.
    pub index: usize,
    /// The 2D position of the vertex.
    pub point: Point2,
    /// Edges currently incident to this vertex, in insertion order.
    pub(crate) edges: Vec<EdgeId>,
}

impl VertexData {
    /// Creates a new isolated vertex.
    #[must_use]
    pub fn new(index: usize, point: Point2) -> Self {
        Self {
            index,
            point,
            edges: Vec::new(),
        }
    }

    /// Edges incident to this vertex, in insertion order.
    #[must_use]
    pub fn edges(&self) -> &[EdgeId] {
        &self.edges
    }

    /// Registers an incident edge. Adding an edge twice is a no-op.
    pub(crate) fn add_edge(&mut self, edge: EdgeId) {
        if !self.edges.contains(&edge) {
            self.edges.push(edge);
        }
    }

    pub(crate) fn remove_edge(&mut self, edge: EdgeId) {
        self.edges.retain(|&e| e != edge);
    }
}

impl fmt::Display for VertexData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.index)
    }
}

impl MeshStore {
    /// Candidate vertices for extending `edge` from `vertex`, in sweep order.
    ///
    /// Keeps the incident edges of `vertex` that point into the open side of
    /// `edge` (positive projection on [`MeshStore::outward_direction`]),
    /// sorts them by angle to `edge` measured at `vertex`, and returns their
    /// far endpoints. The endpoints of `edge` itself are never candidates.
    ///
    /// # Errors
    ///
    /// Returns an error if `vertex` or `edge` is not in the store.
    pub fn ordered_potentials(&self, vertex: VertexId, edge: EdgeId) -> Result<Vec<VertexId>> {
        let base = self.edge(edge)?;
        let base_vector = self.vector_from(edge, vertex)?;
        let outward = self.outward_direction(edge)?;

        let mut scored = Vec::new();
        for &id in self.vertex(vertex)?.edges() {
            let v = self.vector_from(id, vertex)?;
            if v.dot(&outward) <= TOLERANCE {
                continue;
            }
            let other = self.edge(id)?.other(vertex);
            if base.has_vertex(other) {
                continue;
            }
            scored.push((angle_between(&v, &base_vector), other));
        }
        scored.sort_by(|a, b| a.0.total_cmp(&b.0));
        Ok(scored.into_iter().map(|(_, v)| v).collect())
    }

    /// All edges incident to `vertex`, sorted by angle to `edge` measured
    /// at `vertex`. `edge` itself comes first at angle zero.
    ///
    /// # Errors
    ///
    /// Returns an error if `vertex` or `edge` is not in the store.
    pub fn ordered_edges_by_angle(&self, vertex: VertexId, edge: EdgeId) -> Result<Vec<EdgeId>> {
        let base_vector = self.vector_from(edge, vertex)?;
        let incident = self.vertex(vertex)?.edges();
        let mut scored = Vec::with_capacity(incident.len());
        for &id in incident {
            scored.push((angle_between(&self.vector_from(id, vertex)?, &base_vector), id));
        }
        scored.sort_by(|a, b| a.0.total_cmp(&b.0));
        Ok(scored.into_iter().map(|(_, id)| id).collect())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn fan() -> (MeshStore, Vec<VertexId>, Vec<EdgeId>) {
        // Center vertex 0 with spokes to the right, up-right, up, left and down.
        let mut store = MeshStore::new();
        let pts = [(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0), (-1.0, 0.0), (0.0, -1.0)];
        let v: Vec<_> = pts
            .iter()
            .enumerate()
            .map(|(i, &(x, y))| store.add_vertex(VertexData::new(i, Point2::new(x, y))))
            .collect();
        let e = (1..pts.len())
            .map(|i| store.add_edge(v[0], v[i]).unwrap())
            .collect();
        (store, v, e)
    }

    #[test]
    fn add_edge_is_idempotent() {
        let (store, v, e) = fan();
        let mut data = store.vertex(v[0]).unwrap().clone();
        let before = data.edges().len();
        data.add_edge(e[0]);
        assert_eq!(data.edges().len(), before);
        data.remove_edge(e[0]);
        assert_eq!(data.edges().len(), before - 1);
    }

    #[test]
    fn display_is_index() {
        let data = VertexData::new(7, Point2::new(1.0, 2.0));
        assert_eq!(data.to_string(), "7");
    }

    #[test]
    fn edges_ordered_by_angle() {
        let (store, v, e) = fan();
        let ordered = store.ordered_edges_by_angle(v[0], e[0]).unwrap();
        assert_eq!(ordered[0], e[0]);
        assert_eq!(ordered[1], e[1]);
        // Up and down are both at 90 degrees; insertion order breaks the tie.
        assert_eq!(ordered[2], e[2]);
        assert_eq!(ordered[3], e[4]);
        assert_eq!(ordered[4], e[3]);
    }

    #[test]
    fn potentials_only_on_open_side() {
        let mut store = MeshStore::new();
        let pts = [(0.0, 0.0), (4.0, 0.0), (-1.0, 2.0), (1.0, 1.0), (5.0, 3.0)];
        let v: Vec<_> = pts
            .iter()
            .enumerate()
            .map(|(i, &(x, y))| store.add_vertex(VertexData::new(i, Point2::new(x, y))))
            .collect();
        store.add_edge(v[0], v[2]).unwrap();
        store.add_edge(v[0], v[3]).unwrap();
        store.add_edge(v[1], v[4]).unwrap();
        let base = store.add_edge(v[0], v[1]).unwrap();

        // All neighbors lie above the base, so the open side is up and the
        // sweep visits the shallower spoke first.
        let left = store.ordered_potentials(v[0], base).unwrap();
        assert_eq!(left, vec![v[3], v[2]]);
        let right = store.ordered_potentials(v[1], base).unwrap();
        assert_eq!(right, vec![v[4]]);
    }
}
