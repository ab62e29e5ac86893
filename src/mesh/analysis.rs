//! Edge and vertex classification for reports.
//!
//! This only counts; it never changes the opposite-corner assignment.

use std::collections::HashMap;

use serde::Serialize;

use super::Mesh;
use crate::error::Result;
use crate::types::Edge;

/// Summary of a mesh's connectivity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct TopologyStats {
    pub vertices: usize,
    pub faces: usize,
    pub corners: usize,
    /// Corners with no opposite after the last corner-table build.
    pub boundary_corners: usize,
    /// Edges used by exactly two faces.
    pub interior_edges: usize,
    /// Edges used by exactly one face.
    pub boundary_edges: usize,
    /// Edges used by three or more faces.
    pub non_manifold_edges: usize,
    /// Faces repeating a vertex id.
    pub degenerate_faces: usize,
    /// Vertices referenced by no face.
    pub isolated_vertices: usize,
}

impl TopologyStats {
    pub fn is_closed(&self) -> bool {
        self.faces > 0 && self.boundary_edges == 0 && self.non_manifold_edges == 0
    }

    pub fn is_manifold(&self) -> bool {
        self.non_manifold_edges == 0
    }
}

impl Mesh {
    /// Face count per canonical edge.
    pub fn edge_face_counts(&self) -> HashMap<Edge, usize> {
        let mut counts = HashMap::with_capacity(self.faces.len() * 3 / 2);
        for face in &self.faces {
            let [v0, v1, v2] = face.vertex_ids;
            for (a, b) in [(v0, v1), (v1, v2), (v2, v0)] {
                if a != b {
                    *counts.entry(Edge::new(a, b)).or_insert(0) += 1;
                }
            }
        }
        counts
    }

    /// Classify edges and vertices. Requires a computed corner table.
    pub fn topology_stats(&self) -> Result<TopologyStats> {
        self.require_corner_table()?;

        let mut stats = TopologyStats {
            vertices: self.vertices.len(),
            faces: self.faces.len(),
            corners: self.corners.len(),
            ..Default::default()
        };

        stats.boundary_corners = self
            .corners
            .iter()
            .filter(|c| c.opposite_corner_id.is_none())
            .count();

        for count in self.edge_face_counts().into_values() {
            match count {
                1 => stats.boundary_edges += 1,
                2 => stats.interior_edges += 1,
                _ => stats.non_manifold_edges += 1,
            }
        }

        stats.degenerate_faces = self
            .faces
            .iter()
            .filter(|face| {
                let [a, b, c] = face.vertex_ids;
                a == b || b == c || c == a
            })
            .count();

        let mut referenced = vec![false; self.vertices.len()];
        for face in &self.faces {
            for &v in &face.vertex_ids {
                referenced[v] = true;
            }
        }
        stats.isolated_vertices = referenced.iter().filter(|&&r| !r).count();

        Ok(stats)
    }
}
