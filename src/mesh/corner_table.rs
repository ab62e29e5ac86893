//! Opposite-corner discovery.
//!
//! Two faces incident to a vertex `v` share an edge `(v, s)` exactly when
//! their remaining vertex pairs have one id `s` in common. The corners facing
//! that edge (the third vertex of each face) become mutual opposites.
//!
//! Cost is `O(sum over v of degree(v)^2)`; the table is rebuilt once per
//! batch of edits, never per frame.
//!
//! When three or more faces share an edge, the first pair found claims the
//! edge and every later face on it keeps no opposite. No diagnostic is raised here;
//! see [`crate::mesh::analysis`] for edge classification.

use std::collections::HashSet;
use std::time::Instant;

use tracing::debug;

use super::Mesh;
use super::navigation::{next_corner, previous_corner};
use crate::error::{EntityKind, MeshError, Result, check_index};
use crate::types::{CornerId, CornerTableState, Edge, FaceId, VertexId};

impl Mesh {
    /// Rebuild every corner's opposite from scratch and mark the table computed.
    pub fn compute_corner_table(&mut self) {
        let start = Instant::now();

        for corner in &mut self.corners {
            corner.opposite_corner_id = None;
        }

        let incident = self.incident_faces();
        let mut claimed: HashSet<Edge> = HashSet::new();
        let mut paired = 0usize;

        for (v, faces) in incident.iter().enumerate() {
            for (i, &fa) in faces.iter().enumerate() {
                for &fb in &faces[i + 1..] {
                    let Some((shared, ca, cb)) = self.facing_corners(v, fa, fb) else {
                        continue;
                    };
                    // Seen from the edge's other endpoint, or taken by an
                    // earlier pair on a non-manifold edge.
                    if !claimed.insert(Edge::new(v, shared)) {
                        continue;
                    }
                    // Faces repeating a vertex id can reach a corner twice.
                    if self.corners[ca].opposite_corner_id.is_some()
                        || self.corners[cb].opposite_corner_id.is_some()
                    {
                        continue;
                    }
                    self.corners[ca].opposite_corner_id = Some(cb);
                    self.corners[cb].opposite_corner_id = Some(ca);
                    paired += 2;
                }
            }
        }

        self.corner_table = CornerTableState::Computed;

        debug!(
            faces = self.faces.len(),
            paired_corners = paired,
            boundary_corners = self.corners.len() - paired,
            elapsed = ?start.elapsed(),
            "Computed corner table"
        );
    }

    /// Faces bucketed by each of their (distinct) vertex ids.
    pub(crate) fn incident_faces(&self) -> Vec<Vec<FaceId>> {
        let mut incident: Vec<Vec<FaceId>> = vec![Vec::new(); self.vertices.len()];
        for (f, face) in self.faces.iter().enumerate() {
            for &v in &face.vertex_ids {
                // A face repeating a vertex id is listed once for it.
                if incident[v].last() != Some(&f) {
                    incident[v].push(f);
                }
            }
        }
        incident
    }

    /// For two faces around `v`, the other endpoint of their common edge and
    /// the corners facing it, if they have exactly one other vertex in common.
    fn facing_corners(
        &self,
        v: VertexId,
        fa: FaceId,
        fb: FaceId,
    ) -> Option<(VertexId, CornerId, CornerId)> {
        let a = self.corner_of_face_and_vertex(fa, v)?;
        let b = self.corner_of_face_and_vertex(fb, v)?;
        let others_a = [next_corner(a), previous_corner(a)];
        let others_b = [next_corner(b), previous_corner(b)];

        let mut shared = None;
        let mut matches = 0;
        for (i, &oa) in others_a.iter().enumerate() {
            for (j, &ob) in others_b.iter().enumerate() {
                if self.vertex_of(oa) == self.vertex_of(ob) {
                    matches += 1;
                    shared = Some((i, j));
                }
            }
        }

        match (matches, shared) {
            (1, Some((i, j))) => Some((
                self.vertex_of(others_a[i]),
                others_a[1 - i],
                others_b[1 - j],
            )),
            _ => None,
        }
    }

    /// Fail unless the corner table reflects the current topology.
    pub fn require_corner_table(&self) -> Result<()> {
        if self.corner_table.is_computed() {
            Ok(())
        } else {
            Err(MeshError::StaleCornerTable)
        }
    }

    /// Corner across the edge that `c` faces, `None` on a boundary.
    pub fn opposite_corner(&self, c: CornerId) -> Result<Option<CornerId>> {
        self.require_corner_table()?;
        check_index(EntityKind::Corner, c, self.corners.len())?;
        Ok(self.corners[c].opposite_corner_id)
    }

    /// Whether the edge `c` faces belongs to only one face.
    pub fn is_boundary_corner(&self, c: CornerId) -> Result<bool> {
        Ok(self.opposite_corner(c)?.is_none())
    }

    /// Raw cached opposite. Callers must have checked the cache state.
    #[inline]
    pub(crate) fn opposite_unchecked(&self, c: CornerId) -> Option<CornerId> {
        self.corners[c].opposite_corner_id
    }
}
