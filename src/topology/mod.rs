pub mod edge;
pub mod triangle;
pub mod vertex;

pub use edge::{EdgeData, EdgeId};
pub use triangle::Triangle;
pub use vertex::{VertexData, VertexId};

use std::collections::HashSet;

use slotmap::SlotMap;

use crate::error::{Result, TopologyError};
use crate::math::intersect_2d::point_on_segment;
use crate::math::Point2;

/// Central arena that owns the vertices and edges of a triangulation.
///
/// Vertices and edges reference each other via typed IDs (generational
/// indices). Edge insertion and removal keep the incident-edge lists of both
/// endpoints in sync, so the graph never holds a dangling edge reference.
#[derive(Debug, Default, Clone)]
pub struct MeshStore {
    vertices: SlotMap<VertexId, VertexData>,
    edges: SlotMap<EdgeId, EdgeData>,
}

/// Read-only copy of a mesh in terms of stable vertex indices.
///
/// Handed to visualization harnesses at suspension points.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MeshSnapshot {
    /// `(index, position)` for every vertex.
    pub vertices: Vec<(usize, Point2)>,
    /// `(index, index)` for every edge.
    pub edges: Vec<(usize, usize)>,
}

impl MeshStore {
    /// Creates a new, empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // --- Vertex operations ---

    /// Inserts a vertex and returns its ID.
    pub fn add_vertex(&mut self, data: VertexData) -> VertexId {
        self.vertices.insert(data)
    }

    /// Returns a reference to the vertex data, or an error if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is not found in the store.
    pub fn vertex(&self, id: VertexId) -> Result<&VertexData> {
        Ok(self
            .vertices
            .get(id)
            .ok_or(TopologyError::EntityNotFound("vertex"))?)
    }

    fn vertex_mut(&mut self, id: VertexId) -> Result<&mut VertexData> {
        Ok(self
            .vertices
            .get_mut(id)
            .ok_or(TopologyError::EntityNotFound("vertex"))?)
    }

    /// Position of a vertex.
    ///
    /// # Errors
    ///
    /// Returns an error if the vertex is not in the store.
    pub fn point(&self, id: VertexId) -> Result<Point2> {
        Ok(self.vertex(id)?.point)
    }

    /// Iterates over all vertices.
    pub fn vertices(&self) -> impl Iterator<Item = (VertexId, &VertexData)> {
        self.vertices.iter()
    }

    /// Number of vertices.
    #[must_use]
    pub fn num_vertices(&self) -> usize {
        self.vertices.len()
    }

    // --- Edge operations ---

    /// Creates an edge between `a` and `b` and registers it on both endpoints.
    ///
    /// # Errors
    ///
    /// Returns `TopologyError::DuplicateEdge` if the two vertices are already
    /// connected, or an error if either vertex is not found.
    pub fn add_edge(&mut self, a: VertexId, b: VertexId) -> Result<EdgeId> {
        if a == b {
            return Err(TopologyError::InvalidTopology("edge endpoints must differ".into()).into());
        }
        if self.find_edge(a, b)?.is_some() {
            return Err(TopologyError::DuplicateEdge {
                a: self.vertex(a)?.index,
                b: self.vertex(b)?.index,
            }
            .into());
        }
        let id = self.edges.insert(EdgeData::new(a, b));
        self.vertex_mut(a)?.add_edge(id);
        self.vertex_mut(b)?.add_edge(id);
        Ok(id)
    }

    /// Detaches an edge from both endpoints and drops it from the store.
    ///
    /// # Errors
    ///
    /// Returns an error if the edge is not found.
    pub fn remove_edge(&mut self, id: EdgeId) -> Result<EdgeData> {
        let data = self
            .edges
            .remove(id)
            .ok_or(TopologyError::EntityNotFound("edge"))?;
        self.vertex_mut(data.a)?.remove_edge(id);
        self.vertex_mut(data.b)?.remove_edge(id);
        Ok(data)
    }

    /// Removes the edge connecting `a` and `b`.
    ///
    /// # Errors
    ///
    /// Returns `TopologyError::EdgeNotFound` if the vertices are not connected.
    pub fn remove_edge_between(&mut self, a: VertexId, b: VertexId) -> Result<EdgeData> {
        match self.find_edge(a, b)? {
            Some(id) => self.remove_edge(id),
            None => Err(TopologyError::EdgeNotFound {
                a: self.vertex(a)?.index,
                b: self.vertex(b)?.index,
            }
            .into()),
        }
    }

    /// Returns a reference to the edge data, or an error if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is not found in the store.
    pub fn edge(&self, id: EdgeId) -> Result<&EdgeData> {
        Ok(self
            .edges
            .get(id)
            .ok_or(TopologyError::EntityNotFound("edge"))?)
    }

    /// Returns the edge connecting `a` and `b`, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if `a` is not found.
    pub fn find_edge(&self, a: VertexId, b: VertexId) -> Result<Option<EdgeId>> {
        for &id in &self.vertex(a)?.edges {
            if self.edge(id)?.connects(a, b) {
                return Ok(Some(id));
            }
        }
        Ok(None)
    }

    /// Returns `true` if the store contains the edge.
    #[must_use]
    pub fn contains_edge(&self, id: EdgeId) -> bool {
        self.edges.contains_key(id)
    }

    /// Iterates over all edges.
    pub fn edges(&self) -> impl Iterator<Item = (EdgeId, &EdgeData)> {
        self.edges.iter()
    }

    /// Number of edges.
    #[must_use]
    pub fn num_edges(&self) -> usize {
        self.edges.len()
    }

    /// Removes every edge, leaving the vertices isolated.
    pub fn clear_edges(&mut self) {
        self.edges.clear();
        for vertex in self.vertices.values_mut() {
            vertex.edges.clear();
        }
    }

    /// Endpoint indices of an edge, smaller index first.
    ///
    /// # Errors
    ///
    /// Returns an error if the edge or an endpoint is not found.
    pub fn edge_indices(&self, id: EdgeId) -> Result<(usize, usize)> {
        let edge = self.edge(id)?;
        let a = self.vertex(edge.a)?.index;
        let b = self.vertex(edge.b)?.index;
        Ok((a.min(b), a.max(b)))
    }

    // --- Whole-graph queries ---

    /// Returns `true` if the infinite line through `l1`, `l2` crosses the
    /// interior of any edge.
    ///
    /// # Errors
    ///
    /// Returns an error if an edge endpoint is missing.
    pub fn is_line_crossing_any_edge(&self, l1: &Point2, l2: &Point2) -> Result<bool> {
        for id in self.edges.keys() {
            if self.is_crossed_by_line(id, l1, l2)? {
                return Ok(true);
            }
        }
        Ok(false)
    }

    /// Returns `true` if any vertex other than the endpoints lies strictly
    /// inside the edge.
    ///
    /// # Errors
    ///
    /// Returns an error if the edge is not found.
    pub fn is_any_vertex_inside_edge(&self, id: EdgeId) -> Result<bool> {
        let edge = self.edge(id)?;
        let s1 = self.point(edge.a)?;
        let s2 = self.point(edge.b)?;
        Ok(self
            .vertices
            .iter()
            .filter(|(vid, _)| !edge.has_vertex(*vid))
            .any(|(_, v)| point_on_segment(&v.point, &s1, &s2)))
    }

    /// Verifies the adjacency invariants of the graph.
    ///
    /// Every edge is registered on both endpoints, every registered edge is
    /// in the store, no vertex pair is connected twice, and no edge passes
    /// through another vertex.
    ///
    /// # Errors
    ///
    /// Returns `TopologyError::InvalidTopology` describing the first violation.
    pub fn check_consistency(&self) -> Result<()> {
        let mut pairs = HashSet::with_capacity(self.edges.len());
        for (id, edge) in &self.edges {
            let (a, b) = self.edge_indices(id)?;
            for endpoint in [edge.a, edge.b] {
                if !self.vertex(endpoint)?.edges.contains(&id) {
                    return Err(TopologyError::InvalidTopology(format!(
                        "edge {edge_a} - {edge_b} is not registered on vertex {v}",
                        edge_a = a,
                        edge_b = b,
                        v = self.vertex(endpoint)?.index,
                    ))
                    .into());
                }
            }
            if !pairs.insert((a, b)) {
                return Err(TopologyError::DuplicateEdge { a, b }.into());
            }
            if self.is_any_vertex_inside_edge(id)? {
                return Err(TopologyError::InvalidTopology(format!(
                    "edge {a} - {b} passes through another vertex"
                ))
                .into());
            }
        }
        for (vid, vertex) in &self.vertices {
            for &eid in &vertex.edges {
                let registered = self.edges.get(eid).is_some_and(|e| e.has_vertex(vid));
                if !registered {
                    return Err(TopologyError::InvalidTopology(format!(
                        "vertex {} references an edge that is not incident to it",
                        vertex.index
                    ))
                    .into());
                }
            }
        }
        Ok(())
    }

    /// Copies the current graph into index-based form.
    #[must_use]
    pub fn snapshot(&self) -> MeshSnapshot {
        let mut vertices: Vec<_> = self.vertices.values().map(|v| (v.index, v.point)).collect();
        vertices.sort_by_key(|(index, _)| *index);
        let edges = self
            .edges
            .keys()
            .filter_map(|id| self.edge_indices(id).ok())
            .collect();
        MeshSnapshot { vertices, edges }
    }
}
