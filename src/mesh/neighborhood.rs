//! One-ring traversal around a vertex.
//!
//! The walk steps from corner `c` to `next(opposite(next(c)))`, which is the
//! corner on the same vertex in the neighbouring face. On a closed fan it
//! comes back to the seed corner. On an open fan it stops at the first
//! missing opposite, then walks the other way from the seed with
//! `previous(opposite(previous(c)))` so the whole fan is collected.

use super::Mesh;
use super::navigation::{face_of, next_corner, previous_corner};
use crate::error::{EntityKind, Result, check_index};
use crate::types::{CornerId, FaceId, VertexId};

/// Corners around one vertex, in walk order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct VertexRing {
    pub corners: Vec<CornerId>,
    /// `true` when the walk returned to its seed (interior vertex).
    pub closed: bool,
}

impl Mesh {
    /// Corners incident to `v`, starting at the seed face's corner for a
    /// closed ring, or at one boundary end of an open fan.
    ///
    /// A vertex referenced by no face has an empty ring.
    pub fn vertex_corners(&self, v: VertexId) -> Result<Vec<CornerId>> {
        Ok(self.vertex_ring(v)?.corners)
    }

    pub fn vertex_ring(&self, v: VertexId) -> Result<VertexRing> {
        self.require_corner_table()?;
        check_index(EntityKind::Vertex, v, self.vertices.len())?;
        Ok(self.walk_ring(v))
    }

    /// Vertices joined to `v` by an edge, one per ring corner plus the far
    /// end of the trailing boundary edge on an open fan.
    pub fn neighbor_vertices(&self, v: VertexId) -> Result<Vec<VertexId>> {
        let ring = self.vertex_ring(v)?;
        let mut neighbors: Vec<VertexId> = ring
            .corners
            .iter()
            .map(|&c| self.vertex_of(next_corner(c)))
            .collect();
        if !ring.closed {
            if let Some(&last) = ring.corners.last() {
                neighbors.push(self.vertex_of(previous_corner(last)));
            }
        }
        Ok(neighbors)
    }

    /// Faces incident to `v`, in walk order.
    pub fn neighbor_faces(&self, v: VertexId) -> Result<Vec<FaceId>> {
        Ok(self.vertex_corners(v)?.into_iter().map(face_of).collect())
    }

    /// Whether `v` sits on an open fan (or on no face at all).
    pub fn is_boundary_vertex(&self, v: VertexId) -> Result<bool> {
        Ok(!self.vertex_ring(v)?.closed)
    }

    /// Same-vertex corner in the face across the edge `(v, previous)`.
    #[inline]
    fn swing_forward(&self, c: CornerId) -> Option<CornerId> {
        self.opposite_unchecked(next_corner(c)).map(next_corner)
    }

    /// Same-vertex corner in the face across the edge `(v, next)`.
    #[inline]
    fn swing_backward(&self, c: CornerId) -> Option<CornerId> {
        self.opposite_unchecked(previous_corner(c)).map(previous_corner)
    }

    /// Ring walk without cache or range checks.
    pub(crate) fn walk_ring(&self, v: VertexId) -> VertexRing {
        let seed_face = self.vertices[v].face_id;
        let start = match self.faces.get(seed_face) {
            Some(_) => self.corner_of_face_and_vertex(seed_face, v),
            None => None,
        };
        let Some(start) = start else {
            return VertexRing::default();
        };

        // Both swings are injective, so every walk ends at the seed or at a
        // missing opposite; the corner count only bounds malformed input.
        let limit = self.corners.len();

        let mut forward = vec![start];
        let mut current = start;
        while let Some(c) = self.swing_forward(current) {
            if c == start {
                return VertexRing {
                    corners: forward,
                    closed: true,
                };
            }
            if forward.len() >= limit {
                break;
            }
            forward.push(c);
            current = c;
        }

        let mut backward = Vec::new();
        current = start;
        while let Some(c) = self.swing_backward(current) {
            if c == start || backward.len() + forward.len() >= limit {
                break;
            }
            backward.push(c);
            current = c;
        }

        backward.reverse();
        backward.extend(forward);
        VertexRing {
            corners: backward,
            closed: false,
        }
    }
}
