use tracing::debug;

use crate::error::{GeometryError, Result};
use crate::math::circle_2d::point_in_circumcircle;
use crate::topology::{EdgeId, VertexId};

use super::{Checkpoint, StepControl, Triangulator};

impl Triangulator {
    /// Stitches two adjacent sub-triangulations together.
    ///
    /// Starts from a common tangent of the two halves and zips cross edges
    /// across until no side offers a candidate.
    pub(super) fn merge<C>(
        &mut self,
        left: &[VertexId],
        right: &[VertexId],
        control: &mut C,
    ) -> Result<()>
    where
        C: StepControl + ?Sized,
    {
        let base = self.find_base_edge(left, right)?.ok_or_else(|| {
            GeometryError::Degenerate(format!(
                "no common tangent between halves of {} and {} vertices",
                left.len(),
                right.len()
            ))
        })?;
        let label = self.store.edge_label(base)?;
        debug!(edge = %label, "base edge");
        control.checkpoint(Checkpoint::BaseEdge(label), &self.store);

        self.zip(base, control)
    }

    /// Finds the first left-right edge that supports both halves from the
    /// same side.
    ///
    /// Pairs are tried in sorted order; rejected trial edges are removed.
    fn find_base_edge(&mut self, left: &[VertexId], right: &[VertexId]) -> Result<Option<EdgeId>> {
        for &l in left {
            for &r in right {
                let trial = self.store.add_edge(l, r)?;
                if self.store.is_convex(trial)? {
                    return Ok(Some(trial));
                }
                self.store.remove_edge(trial)?;
            }
        }
        Ok(None)
    }

    /// Advances the base edge one triangle at a time.
    fn zip<C>(&mut self, mut base: EdgeId, control: &mut C) -> Result<()>
    where
        C: StepControl + ?Sized,
    {
        loop {
            let edge = *self.store.edge(base)?;
            let left = self.find_candidate(base, edge.a)?;
            let right = self.find_candidate(base, edge.b)?;

            let (a, b) = match (left, right) {
                (Some(l), Some(r)) => {
                    let right_wins = point_in_circumcircle(
                        &self.store.point(r)?,
                        &self.store.point(l)?,
                        &self.store.point(edge.a)?,
                        &self.store.point(edge.b)?,
                    )?;
                    if right_wins {
                        (edge.a, r)
                    } else {
                        (l, edge.b)
                    }
                }
                (Some(l), None) => (l, edge.b),
                (None, Some(r)) => (edge.a, r),
                (None, None) => return Ok(()),
            };

            base = self.store.add_edge(a, b)?;
            let label = self.store.edge_label(base)?;
            debug!(edge = %label, "zipper advanced");
            control.checkpoint(Checkpoint::ZipperAdvance(label), &self.store);
        }
    }

    /// Picks the next vertex to connect from `vertex`, an endpoint of `base`.
    ///
    /// Walks the candidates in sweep order; while the next candidate lies
    /// inside the circumcircle of `base` and the current one, the edge to the
    /// current one is illegal and gets removed.
    fn find_candidate(&mut self, base: EdgeId, vertex: VertexId) -> Result<Option<VertexId>> {
        let potentials = self.store.ordered_potentials(vertex, base)?;
        let Some(&last) = potentials.last() else {
            return Ok(None);
        };

        let edge = *self.store.edge(base)?;
        let pa = self.store.point(edge.a)?;
        let pb = self.store.point(edge.b)?;

        for pair in potentials.windows(2) {
            let (potential, next) = (pair[0], pair[1]);
            let illegal = point_in_circumcircle(
                &self.store.point(next)?,
                &pa,
                &pb,
                &self.store.point(potential)?,
            )?;
            if !illegal {
                return Ok(Some(potential));
            }
            let removed = self.store.remove_edge_between(vertex, potential)?;
            debug!(
                from = self.store.vertex(removed.a)?.index,
                to = self.store.vertex(removed.b)?.index,
                "removed illegal edge"
            );
        }
        Ok(Some(last))
    }
}
