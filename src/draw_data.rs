//! Flattening corner attributes into GPU-ready buffers.
//!
//! Normals and UVs live on corners, so each corner becomes its own vertex.
//! The index buffer is then just `0..corner_count`, kept explicit because
//! upload code expects an indexed draw.

use bytemuck::{Pod, Zeroable};

use crate::mesh::Mesh;
use crate::types::IndexedMesh;

/// One interleaved vertex as laid out in the vertex buffer.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct DrawVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub uv: [f32; 2],
}

/// Vertex and index buffers for one mesh.
#[derive(Debug, Clone, Default)]
pub struct DrawData {
    pub vertices: Vec<DrawVertex>,
    pub indices: Vec<u32>,
}

impl DrawData {
    pub fn from_mesh(mesh: &Mesh) -> Self {
        let vertices: Vec<DrawVertex> = mesh
            .corners()
            .iter()
            .enumerate()
            .map(|(c, corner)| DrawVertex {
                position: mesh.vertices()[mesh.vertex_of(c)].position.to_array(),
                normal: corner.normal.to_array(),
                uv: corner.texture_coordinates.to_array(),
            })
            .collect();
        let indices = (0..vertices.len() as u32).collect();

        Self { vertices, indices }
    }

    pub fn vertex_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }

    pub fn index_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.indices)
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Same data as flat interchange buffers.
    pub fn to_indexed(&self) -> IndexedMesh {
        IndexedMesh {
            positions: self.vertices.iter().flat_map(|v| v.position).collect(),
            normals: self.vertices.iter().flat_map(|v| v.normal).collect(),
            uvs: self.vertices.iter().flat_map(|v| v.uv).collect(),
            corner_uvs: Vec::new(),
            indices: self.indices.clone(),
            name: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::factory;
    use glam::Vec3;

    #[test]
    fn vertex_layout_is_tightly_packed() {
        assert_eq!(std::mem::size_of::<DrawVertex>(), 32);
    }

    #[test]
    fn one_vertex_per_corner() {
        let mut mesh = factory::cube();
        mesh.compute_flat_corner_normals();
        let draw = DrawData::from_mesh(&mesh);

        assert_eq!(draw.vertices.len(), 36);
        assert_eq!(draw.triangle_count(), 12);
        assert_eq!(draw.vertex_bytes().len(), 36 * 32);
        assert_eq!(draw.index_bytes().len(), 36 * 4);

        // Corner 0 of face 0 sits on vertex 0 with the face's normal.
        assert_eq!(draw.vertices[0].position, [0.0, 0.0, 0.0]);
        assert_eq!(draw.vertices[0].normal, [0.0, 0.0, -1.0]);
    }

    #[test]
    fn uvs_follow_corners() {
        let mesh = factory::grid(2);
        let draw = DrawData::from_mesh(&mesh);
        for v in &draw.vertices {
            assert_eq!(v.uv, [v.position[0], v.position[1]]);
        }
    }

    #[test]
    fn indexed_round_trip_rebuilds_same_faces() {
        let mut mesh = factory::tetrahedron();
        mesh.compute_flat_corner_normals();
        let indexed = DrawData::from_mesh(&mesh).to_indexed();

        assert_eq!(indexed.vertex_count(), 12);
        assert_eq!(indexed.triangle_count(), 4);
        let rebuilt = Mesh::from_indexed(&indexed).unwrap();
        for f in 0..4 {
            let a = mesh.face_triangle(f).unwrap();
            let b = rebuilt.face_triangle(f).unwrap();
            assert_eq!(a, b);
        }
        assert_eq!(rebuilt.corner_normal(0).unwrap(), mesh.corner_normal(0).unwrap());
        assert_ne!(rebuilt.corner_normal(0).unwrap(), Vec3::ZERO);
    }

    #[test]
    fn empty_mesh_yields_empty_buffers() {
        let draw = DrawData::from_mesh(&Mesh::new());
        assert!(draw.vertices.is_empty());
        assert!(draw.indices.is_empty());
    }
}
