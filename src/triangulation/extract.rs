use std::collections::HashSet;

use tracing::warn;

use crate::error::Result;
use crate::math::circle_2d::circumcircle;
use crate::math::Point2;
use crate::topology::{EdgeId, Triangle};

use super::Triangulator;

impl Triangulator {
    /// Rebuilds the triangle list from the current edge graph.
    ///
    /// For every edge, the third vertices shared by its endpoints are visited
    /// in angular order. A third vertex is accepted unless an earlier one
    /// visited for the same edge, accepted or not, lies inside its
    /// circumcircle, which rules out triangles that enclose other vertices.
    /// Triangles are deduplicated by their edges.
    ///
    /// # Errors
    ///
    /// Returns `GeometryError::DegenerateTriangle` if an edge and a shared
    /// neighbor are collinear.
    pub fn extract_triangles(&mut self) -> Result<()> {
        self.triangles.clear();
        let mut seen = HashSet::new();

        let edge_ids: Vec<EdgeId> = self.store.edges().map(|(id, _)| id).collect();
        for id in edge_ids {
            let edge = *self.store.edge(id)?;
            let pa = self.store.point(edge.a)?;
            let pb = self.store.point(edge.b)?;
            let at_a = self.store.ordered_edges_by_angle(edge.a, id)?;
            let at_b = self.store.ordered_edges_by_angle(edge.b, id)?;

            let mut visited: Vec<Point2> = Vec::new();
            for &e1 in at_a.iter().filter(|&&e| e != id) {
                let data1 = *self.store.edge(e1)?;
                for &e2 in at_b.iter().filter(|&&e| e != id) {
                    let Some(apex) = data1.common_vertex(self.store.edge(e2)?) else {
                        continue;
                    };
                    let pc = self.store.point(apex)?;
                    let circle = circumcircle(&pc, &pa, &pb)?;
                    if !visited.iter().any(|p| circle.contains(p)) {
                        let triangle = Triangle::new(&self.store, id, e1, e2)?;
                        if seen.insert(triangle.key()) {
                            self.triangles.push(triangle);
                        }
                    }
                    visited.push(pc);
                    break;
                }
            }
        }
        Ok(())
    }

    /// Records every triangle with an abnormal interior angle.
    pub(super) fn flag_degenerate(&mut self) -> Result<()> {
        self.degenerate.clear();
        for triangle in &self.triangles {
            if triangle.is_degenerate(&self.store, &self.params)? {
                warn!(triangle = ?triangle.indices(), "abnormal triangle");
                self.degenerate.push(*triangle);
            }
        }
        Ok(())
    }
}
