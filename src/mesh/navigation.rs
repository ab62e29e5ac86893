//! Corner/face/vertex id arithmetic.
//!
//! None of these consult the corner table, so they are valid in either
//! cache state.

use super::Mesh;
use crate::types::{CornerId, FaceId, VertexId};

/// Face that owns corner `c`.
#[inline]
pub fn face_of(c: CornerId) -> FaceId {
    c / 3
}

/// Position of `c` within its face, in `0..3`.
#[inline]
pub fn internal_of(c: CornerId) -> usize {
    c % 3
}

/// First corner of face `f`.
#[inline]
pub fn first_corner(f: FaceId) -> CornerId {
    f * 3
}

/// Following corner in the same face (wraps 2 -> 0).
#[inline]
pub fn next_corner(c: CornerId) -> CornerId {
    face_of(c) * 3 + (internal_of(c) + 1) % 3
}

/// Preceding corner in the same face (wraps 0 -> 2).
#[inline]
pub fn previous_corner(c: CornerId) -> CornerId {
    face_of(c) * 3 + (internal_of(c) + 2) % 3
}

impl Mesh {
    /// Vertex that corner `c` sits on.
    ///
    /// Panics if `c` is out of range.
    #[inline]
    pub fn vertex_of(&self, c: CornerId) -> VertexId {
        debug_assert!(c < self.corners.len(), "corner {c} out of range");
        self.faces[face_of(c)].vertex_ids[internal_of(c)]
    }

    /// Corner of face `f` that sits on vertex `v`, if `v` belongs to `f`.
    ///
    /// Panics if `f` is out of range.
    pub fn corner_of_face_and_vertex(&self, f: FaceId, v: VertexId) -> Option<CornerId> {
        debug_assert!(f < self.faces.len(), "face {f} out of range");
        self.faces[f]
            .vertex_ids
            .iter()
            .position(|&id| id == v)
            .map(|internal| first_corner(f) + internal)
    }

    /// The three corners of face `f`.
    pub fn face_corners(&self, f: FaceId) -> [CornerId; 3] {
        debug_assert!(f < self.faces.len(), "face {f} out of range");
        let c = first_corner(f);
        [c, c + 1, c + 2]
    }
}
