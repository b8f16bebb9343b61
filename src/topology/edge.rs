use std::fmt;

use crate::error::Result;
use crate::math::intersect_2d::segment_intersection;
use crate::math::{Point2, Vector2, TOLERANCE};

use super::vertex::VertexId;
use super::MeshStore;

slotmap::new_key_type! {
    /// Unique identifier for an edge in the mesh store.
    pub struct EdgeId;
}

/// Data associated with a mesh edge.
///
/// An edge is an unordered pair of vertices. Queries that need a direction
/// take the vertex to measure from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EdgeData {
    /// First endpoint.
    pub a: VertexId,
    /// Second endpoint.
    pub b: VertexId,
}

impl EdgeData {
    /// Creates edge data between two vertices.
    #[must_use]
    pub fn new(a: VertexId, b: VertexId) -> Self {
        Self { a, b }
    }

    /// Returns the endpoint opposite to `vertex`.
    #[must_use]
    pub fn other(&self, vertex: VertexId) -> VertexId {
        if self.a == vertex {
            self.b
        } else {
            self.a
        }
    }

    /// Returns `true` if `vertex` is an endpoint.
    #[must_use]
    pub fn has_vertex(&self, vertex: VertexId) -> bool {
        self.a == vertex || self.b == vertex
    }

    /// Returns `true` if this edge connects `v1` and `v2`, in either order.
    #[must_use]
    pub fn connects(&self, v1: VertexId, v2: VertexId) -> bool {
        (self.a == v1 && self.b == v2) || (self.a == v2 && self.b == v1)
    }

    /// Returns the endpoint shared with `other`, if any.
    ///
    /// Pairings are tried as a–a, b–b, a–b, b–a.
    #[must_use]
    pub fn common_vertex(&self, other: &EdgeData) -> Option<VertexId> {
        if self.a == other.a {
            Some(self.a)
        } else if self.b == other.b {
            Some(self.b)
        } else if self.a == other.b {
            Some(self.a)
        } else if self.b == other.a {
            Some(self.b)
        } else {
            None
        }
    }
}

/// Index pair of an edge, for logs and diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EdgeLabel {
    /// Input index of the first endpoint.
    pub a: usize,
    /// Input index of the second endpoint.
    pub b: usize,
}

impl fmt::Display for EdgeLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.a, self.b)
    }
}

impl MeshStore {
    /// Index label of an edge in endpoint order.
    ///
    /// # Errors
    ///
    /// Returns an error if the edge or an endpoint is not found.
    pub fn edge_label(&self, id: EdgeId) -> Result<EdgeLabel> {
        let edge = self.edge(id)?;
        Ok(EdgeLabel {
            a: self.vertex(edge.a)?.index,
            b: self.vertex(edge.b)?.index,
        })
    }

    /// Direction of the edge measured from `from`.
    ///
    /// The vector runs from `a` to `b`, negated when `from` is `b`.
    ///
    /// # Errors
    ///
    /// Returns an error if the edge or an endpoint is not found.
    pub fn vector_from(&self, id: EdgeId, from: VertexId) -> Result<Vector2> {
        let edge = self.edge(id)?;
        let v = self.point(edge.b)? - self.point(edge.a)?;
        Ok(if from == edge.b { -v } else { v })
    }

    /// Squared length of the edge.
    ///
    /// # Errors
    ///
    /// Returns an error if the edge or an endpoint is not found.
    pub fn sqr_length(&self, id: EdgeId) -> Result<f64> {
        let edge = self.edge(id)?;
        Ok(self.vector_from(id, edge.a)?.norm_squared())
    }

    /// The orthogonal of the edge that points toward the side not yet
    /// enclosed by a triangle.
    ///
    /// If an edge at `a` and an edge at `b` already meet in a third vertex,
    /// a triangle exists on that side and the orthogonal pointing away from
    /// it is returned. Otherwise every other edge at both endpoints votes
    /// with its projection onto each orthogonal, and the one with the larger
    /// sum wins (the second orthogonal on a tie).
    ///
    /// The result has the edge's length, it is not normalized.
    ///
    /// # Errors
    ///
    /// Returns an error if the edge or an endpoint is not found.
    pub fn outward_direction(&self, id: EdgeId) -> Result<Vector2> {
        let edge = *self.edge(id)?;
        let vector = self.vector_from(id, edge.a)?;
        let ortho1 = Vector2::new(-vector.y, vector.x);
        let ortho2 = Vector2::new(vector.y, -vector.x);

        let at_a = self.vertex(edge.a)?.edges();
        let at_b = self.vertex(edge.b)?.edges();

        for &e1 in at_a.iter().filter(|&&e| e != id) {
            let data1 = self.edge(e1)?;
            for &e2 in at_b.iter().filter(|&&e| e != id) {
                if data1.common_vertex(self.edge(e2)?).is_some() {
                    let side = self.vector_from(e1, edge.a)?;
                    return Ok(if side.dot(&ortho1) < 0.0 { ortho1 } else { ortho2 });
                }
            }
        }

        let mut sum1 = 0.0;
        let mut sum2 = 0.0;
        for (endpoint, incident) in [(edge.a, at_a), (edge.b, at_b)] {
            for &e in incident.iter().filter(|&&e| e != id) {
                let v = self.vector_from(e, endpoint)?;
                sum1 += v.dot(&ortho1);
                sum2 += v.dot(&ortho2);
            }
        }
        Ok(if sum1 > sum2 { ortho1 } else { ortho2 })
    }

    /// Returns `true` if the edge supports both endpoint neighborhoods from
    /// the same side.
    ///
    /// Every other edge at `a` must lie on one side of the edge's line, every
    /// other edge at `b` likewise, and both on the same side. An edge lying
    /// along the line counts as on it unless it overlaps this edge.
    ///
    /// # Errors
    ///
    /// Returns an error if the edge or an endpoint is not found.
    pub fn is_convex(&self, id: EdgeId) -> Result<bool> {
        let edge = *self.edge(id)?;
        let orthogonal = self.outward_direction(id)?;

        let mut sums = [0.0; 2];
        for (slot, endpoint) in [edge.a, edge.b].into_iter().enumerate() {
            let along = self.vector_from(id, endpoint)?;
            let mut dot_sum = 0.0;
            let mut abs_sum = 0.0;
            for &e in self.vertex(endpoint)?.edges().iter().filter(|&&e| e != id) {
                let v = self.vector_from(e, endpoint)?;
                let mut dot = orthogonal.dot(&v);
                if dot.abs() < TOLERANCE {
                    dot = 0.0;
                    if along.dot(&v) > 0.0 {
                        // Overlaps this edge.
                        return Ok(false);
                    }
                }
                dot_sum += dot;
                abs_sum += f64::abs(dot);
            }
            if (f64::abs(dot_sum) - abs_sum).abs() > TOLERANCE {
                return Ok(false);
            }
            sums[slot] = dot_sum;
        }

        Ok((sums[0] >= 0.0 && sums[1] >= 0.0) || (sums[0] <= 0.0 && sums[1] <= 0.0))
    }

    /// Returns `true` if the infinite line through `l1`, `l2` crosses the
    /// interior of the edge.
    ///
    /// # Errors
    ///
    /// Returns an error if the edge or an endpoint is not found.
    pub fn is_crossed_by_line(&self, id: EdgeId, l1: &Point2, l2: &Point2) -> Result<bool> {
        let edge = self.edge(id)?;
        let s1 = self.point(edge.a)?;
        let s2 = self.point(edge.b)?;
        Ok(segment_intersection(l1, l2, &s1, &s2).is_some())
    }

    /// Returns the vertex shared by two edges, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if either edge is not found.
    pub fn common_vertex(&self, e1: EdgeId, e2: EdgeId) -> Result<Option<VertexId>> {
        Ok(self.edge(e1)?.common_vertex(self.edge(e2)?))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::topology::VertexData;

    fn store_with(points: &[(f64, f64)]) -> (MeshStore, Vec<VertexId>) {
        let mut store = MeshStore::new();
        let ids = points
            .iter()
            .enumerate()
            .map(|(i, &(x, y))| store.add_vertex(VertexData::new(i, Point2::new(x, y))))
            .collect();
        (store, ids)
    }

    #[test]
    fn vector_from_is_negated_at_second_endpoint() {
        let (mut store, v) = store_with(&[(0.0, 0.0), (3.0, 4.0)]);
        let e = store.add_edge(v[0], v[1]).unwrap();
        assert_eq!(store.vector_from(e, v[0]).unwrap(), Vector2::new(3.0, 4.0));
        assert_eq!(store.vector_from(e, v[1]).unwrap(), Vector2::new(-3.0, -4.0));
        assert_relative_eq!(store.sqr_length(e).unwrap(), 25.0);
    }

    #[test]
    fn common_vertex_pairings() {
        let (_, v) = store_with(&[(0.0, 0.0), (1.0, 0.0), (0.0, 1.0), (2.0, 2.0)]);
        let e01 = EdgeData::new(v[0], v[1]);
        let e12 = EdgeData::new(v[1], v[2]);
        let e20 = EdgeData::new(v[2], v[0]);
        let e23 = EdgeData::new(v[2], v[3]);
        assert_eq!(e01.common_vertex(&e12), Some(v[1]));
        assert_eq!(e12.common_vertex(&e20), Some(v[2]));
        assert_eq!(e20.common_vertex(&e01), Some(v[0]));
        assert_eq!(e01.common_vertex(&e23), None);
    }

    #[test]
    fn outward_points_away_from_existing_triangle() {
        let (mut store, v) = store_with(&[(0.0, 0.0), (2.0, 0.0), (1.0, -1.0)]);
        store.add_edge(v[0], v[2]).unwrap();
        store.add_edge(v[1], v[2]).unwrap();
        let e = store.add_edge(v[0], v[1]).unwrap();
        let out = store.outward_direction(e).unwrap();
        assert!(out.y > 0.0);
        assert_relative_eq!(out.x, 0.0);
    }

    #[test]
    fn outward_votes_toward_neighbors_on_open_frontier() {
        let (mut store, v) = store_with(&[(0.0, 0.0), (2.0, 0.0), (-1.0, -1.0), (3.0, -2.0)]);
        store.add_edge(v[0], v[2]).unwrap();
        store.add_edge(v[1], v[3]).unwrap();
        let e = store.add_edge(v[0], v[1]).unwrap();
        let out = store.outward_direction(e).unwrap();
        assert!(out.y < 0.0);
    }

    #[test]
    fn tangent_edge_is_convex() {
        // Two vertical segments; the bottom and top bridges are tangents,
        // the diagonal is not.
        let (mut store, v) = store_with(&[(0.0, 0.0), (0.0, 1.0), (2.0, 0.0), (2.0, 1.0)]);
        store.add_edge(v[0], v[1]).unwrap();
        store.add_edge(v[2], v[3]).unwrap();

        let bottom = store.add_edge(v[0], v[2]).unwrap();
        assert!(store.is_convex(bottom).unwrap());
        store.remove_edge(bottom).unwrap();

        let diagonal = store.add_edge(v[0], v[3]).unwrap();
        assert!(!store.is_convex(diagonal).unwrap());
    }

    #[test]
    fn overlapping_neighbor_is_not_convex() {
        let (mut store, v) = store_with(&[(0.0, 0.0), (1.0, 0.0), (3.0, 0.0), (3.0, 1.0)]);
        store.add_edge(v[0], v[1]).unwrap();
        store.add_edge(v[2], v[3]).unwrap();
        let e = store.add_edge(v[0], v[2]).unwrap();
        assert!(!store.is_convex(e).unwrap());
    }

    #[test]
    fn crossed_by_line() {
        let (mut store, v) = store_with(&[(0.0, 0.0), (2.0, 2.0)]);
        let e = store.add_edge(v[0], v[1]).unwrap();
        assert!(store
            .is_crossed_by_line(e, &Point2::new(0.0, 2.0), &Point2::new(2.0, 0.0))
            .unwrap());
        assert!(!store
            .is_crossed_by_line(e, &Point2::new(0.0, 1.0), &Point2::new(1.0, 2.0))
            .unwrap());
    }

    #[test]
    fn label_uses_indices() {
        let (mut store, v) = store_with(&[(0.0, 0.0), (1.0, 0.0)]);
        let e = store.add_edge(v[1], v[0]).unwrap();
        assert_eq!(store.edge_label(e).unwrap().to_string(), "1 - 0");
    }
}
