//! Face and corner normals.
//!
//! Face normals follow `cross(v2 - v1, v0 - v1)`, which points toward a
//! viewer that sees the face counter-clockwise. Zero-area faces get a zero
//! normal instead of NaN.

use std::time::Instant;

use glam::Vec3;
use tracing::debug;

use super::Mesh;
use super::navigation::face_of;
use crate::error::Result;
use crate::mesh::Triangle;
use crate::types::FaceId;

/// Unit vector along `v`, or zero when `v` has no usable length.
#[inline]
pub fn safe_normalize(v: Vec3) -> Vec3 {
    v.normalize_or_zero()
}

/// Unit normal of a triangle, zero for a degenerate one.
pub fn triangle_normal(t: &Triangle) -> Vec3 {
    safe_normalize((t.c - t.b).cross(t.a - t.b))
}

impl Mesh {
    /// Recompute and store every face normal.
    pub fn compute_face_normals(&mut self) {
        for f in 0..self.faces.len() {
            let normal = triangle_normal(&self.triangle_unchecked(f));
            self.faces[f].normal = normal;
        }
    }

    /// Give every corner its face's normal (faceted shading).
    ///
    /// Needs no corner table.
    pub fn compute_flat_corner_normals(&mut self) {
        self.compute_face_normals();
        for (c, corner) in self.corners.iter_mut().enumerate() {
            corner.normal = self.faces[face_of(c)].normal;
        }
    }

    /// Smooth corner normals across edges whose dihedral angle is at most
    /// `min_edge_angle_to_smooth` radians.
    ///
    /// For a corner of face `f` on vertex `v`, every face around `v` whose
    /// normal is within the angle of `f`'s normal contributes its (unit)
    /// normal to the sum. A threshold of 0 gives faceted shading, π smooths
    /// the whole fan. Face normals are recomputed first.
    pub fn compute_corner_normals(&mut self, min_edge_angle_to_smooth: f32) -> Result<()> {
        self.require_corner_table()?;
        let start = Instant::now();

        self.compute_face_normals();
        let cos_threshold = min_edge_angle_to_smooth.cos();

        let mut rings: Vec<Option<Vec<FaceId>>> = vec![None; self.vertices.len()];

        for c in 0..self.corners.len() {
            let f = face_of(c);
            let v = self.vertex_of(c);
            let face_normal = self.faces[f].normal;

            let ring = rings[v].get_or_insert_with(|| {
                self.walk_ring(v).corners.into_iter().map(face_of).collect()
            });

            let sum = ring
                .iter()
                .filter(|&&g| g != f)
                .map(|&g| self.faces[g].normal)
                .filter(|n| face_normal.dot(*n) >= cos_threshold)
                .fold(face_normal, |acc, n| acc + n);

            self.corners[c].normal = safe_normalize(sum);
        }

        debug!(
            corners = self.corners.len(),
            threshold_rad = min_edge_angle_to_smooth,
            elapsed = ?start.elapsed(),
            "Computed smoothed corner normals"
        );

        Ok(())
    }
}
