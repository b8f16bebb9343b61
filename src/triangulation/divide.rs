use tracing::debug;

use crate::error::Result;
use crate::math::collinear;
use crate::topology::{EdgeId, VertexId};

use super::{Checkpoint, StepControl, Triangulator};

impl Triangulator {
    /// Triangulates `vertices` (sorted by x then y) recursively.
    pub(super) fn divide<C>(&mut self, vertices: &[VertexId], control: &mut C) -> Result<()>
    where
        C: StepControl + ?Sized,
    {
        match *vertices {
            [] | [_] => Ok(()),
            [a, b] => {
                control.checkpoint(Checkpoint::BaseCase { size: 2 }, &self.store);
                self.connect(a, b).map(|_| ())
            }
            [a, b, c] => {
                control.checkpoint(Checkpoint::BaseCase { size: 3 }, &self.store);
                self.connect_triple(a, b, c)
            }
            _ => {
                let (left, right) = vertices.split_at(vertices.len() / 2);
                self.divide(left, control)?;
                self.divide(right, control)?;
                control.checkpoint(
                    Checkpoint::BeforeMerge {
                        left: left.len(),
                        right: right.len(),
                    },
                    &self.store,
                );
                self.merge(left, right, control)
            }
        }
    }

    /// Returns the edge between `a` and `b`, creating it if needed.
    fn connect(&mut self, a: VertexId, b: VertexId) -> Result<EdgeId> {
        match self.store.find_edge(a, b)? {
            Some(id) => Ok(id),
            None => self.store.add_edge(a, b),
        }
    }

    /// Connects three vertices pairwise. If they are collinear the longest
    /// edge is dropped, leaving a chain.
    fn connect_triple(&mut self, a: VertexId, b: VertexId, c: VertexId) -> Result<()> {
        let is_collinear = collinear(
            &self.store.point(a)?,
            &self.store.point(b)?,
            &self.store.point(c)?,
        );

        let edges = [self.connect(a, b)?, self.connect(b, c)?, self.connect(c, a)?];
        if !is_collinear {
            return Ok(());
        }

        let mut longest = edges[0];
        let mut longest_len = self.store.sqr_length(longest)?;
        for &id in &edges[1..] {
            let len = self.store.sqr_length(id)?;
            if len > longest_len {
                longest = id;
                longest_len = len;
            }
        }
        debug!(edge = %self.store.edge_label(longest)?, "collinear points, removing longest edge");
        self.store.remove_edge(longest)?;
        Ok(())
    }
}
