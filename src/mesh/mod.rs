//! Corner-table triangle mesh.
//!
//! `Mesh` owns three flat arrays (vertices, faces, corners) and addresses
//! everything by integer id. Adjacency (the opposite-corner relation) is a
//! derived cache rebuilt by [`Mesh::compute_corner_table`]; any topology edit
//! marks it stale again.

pub mod analysis;
pub mod corner_table;
pub mod navigation;
pub mod neighborhood;
pub mod normals;

use glam::{Vec2, Vec3};
use tracing::debug;

use crate::error::{EntityKind, Result, check_index};
use crate::types::{
    BoundingBox, CornerData, CornerId, CornerTableState, FaceData, FaceId, IndexedMesh,
    VertexData, VertexId,
};

/// Triangle mesh with corner-table adjacency.
#[derive(Debug, Clone, Default)]
pub struct Mesh {
    pub(crate) vertices: Vec<VertexData>,
    pub(crate) faces: Vec<FaceData>,
    pub(crate) corners: Vec<CornerData>,
    corner_table: CornerTableState,
}

/// One face's corner positions, as handed to ray tracers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangle {
    pub a: Vec3,
    pub b: Vec3,
    pub c: Vec3,
}

impl Mesh {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a mesh from importer output.
    ///
    /// Trailing indices that do not form a whole triangle are ignored.
    /// Per-vertex UVs and normals, when present, are copied onto every
    /// corner that references the vertex; per-index UVs override them.
    pub fn from_indexed(indexed: &IndexedMesh) -> Result<Self> {
        let mut mesh = Mesh::new();
        mesh.reserve(indexed.vertex_count(), indexed.triangle_count());

        for p in indexed.positions.chunks_exact(3) {
            mesh.add_vertex(Vec3::new(p[0], p[1], p[2]));
        }

        let uvs: Vec<Vec2> = indexed
            .uvs
            .chunks_exact(2)
            .map(|uv| Vec2::new(uv[0], uv[1]))
            .collect();
        let normals: Vec<Vec3> = indexed
            .normals
            .chunks_exact(3)
            .map(|n| Vec3::new(n[0], n[1], n[2]))
            .collect();

        let corner_uvs: Vec<Vec2> = indexed
            .corner_uvs
            .chunks_exact(2)
            .map(|uv| Vec2::new(uv[0], uv[1]))
            .collect();

        for tri in indexed.indices.chunks_exact(3) {
            let ids = [tri[0] as usize, tri[1] as usize, tri[2] as usize];
            let face = mesh.add_face(ids[0], ids[1], ids[2])?;
            for (internal, &v) in ids.iter().enumerate() {
                let c = face * 3 + internal;
                let corner = &mut mesh.corners[c];
                if let Some(uv) = corner_uvs.get(c).or_else(|| uvs.get(v)) {
                    corner.texture_coordinates = *uv;
                }
                if let Some(n) = normals.get(v) {
                    corner.normal = *n;
                }
            }
        }

        debug!(
            vertices = mesh.vertex_count(),
            faces = mesh.face_count(),
            name = ?indexed.name,
            "Built mesh from indexed geometry"
        );

        Ok(mesh)
    }

    pub fn reserve(&mut self, vertices: usize, faces: usize) {
        self.vertices.reserve(vertices);
        self.faces.reserve(faces);
        self.corners.reserve(faces * 3);
    }

    /// Append a vertex. Its seed face is 0 until a face references it.
    pub fn add_vertex(&mut self, position: Vec3) -> VertexId {
        self.vertices.push(VertexData {
            face_id: 0,
            position,
        });
        self.corner_table = CornerTableState::Stale;
        self.vertices.len() - 1
    }

    /// Append a triangle over three existing vertices.
    pub fn add_face(&mut self, v0: VertexId, v1: VertexId, v2: VertexId) -> Result<FaceId> {
        for v in [v0, v1, v2] {
            check_index(EntityKind::Vertex, v, self.vertices.len())?;
        }

        Ok(self.push_face([v0, v1, v2]))
    }

    /// Append a face whose vertex ids are already known to be in range.
    pub(crate) fn push_face(&mut self, vertex_ids: [VertexId; 3]) -> FaceId {
        debug_assert!(vertex_ids.iter().all(|&v| v < self.vertices.len()));

        let face_id = self.faces.len();
        self.faces.push(FaceData {
            vertex_ids,
            normal: Vec3::ZERO,
        });
        self.corners
            .extend(std::iter::repeat_n(CornerData::default(), 3));

        // Last writer wins; any incident face works as a walk seed.
        for v in vertex_ids {
            self.vertices[v].face_id = face_id;
        }

        self.corner_table = CornerTableState::Stale;
        face_id
    }

    /// Remove every vertex, face and corner.
    pub fn clear(&mut self) {
        self.vertices.clear();
        self.faces.clear();
        self.corners.clear();
        self.corner_table = CornerTableState::Stale;
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    pub fn corner_count(&self) -> usize {
        self.corners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.faces.is_empty() && self.vertices.is_empty()
    }

    pub fn vertices(&self) -> &[VertexData] {
        &self.vertices
    }

    pub fn faces(&self) -> &[FaceData] {
        &self.faces
    }

    pub fn corners(&self) -> &[CornerData] {
        &self.corners
    }

    pub fn corner_table_state(&self) -> CornerTableState {
        self.corner_table
    }

    pub fn vertex_position(&self, v: VertexId) -> Result<Vec3> {
        check_index(EntityKind::Vertex, v, self.vertices.len())?;
        Ok(self.vertices[v].position)
    }

    /// Move a vertex. Connectivity is untouched, so the corner table stays valid.
    pub fn set_vertex_position(&mut self, v: VertexId, position: Vec3) -> Result<()> {
        check_index(EntityKind::Vertex, v, self.vertices.len())?;
        self.vertices[v].position = position;
        Ok(())
    }

    /// Positions of the three vertices of `f`, in face order.
    pub fn face_triangle(&self, f: FaceId) -> Result<Triangle> {
        check_index(EntityKind::Face, f, self.faces.len())?;
        Ok(self.triangle_unchecked(f))
    }

    pub(crate) fn triangle_unchecked(&self, f: FaceId) -> Triangle {
        let [v0, v1, v2] = self.faces[f].vertex_ids;
        Triangle {
            a: self.vertices[v0].position,
            b: self.vertices[v1].position,
            c: self.vertices[v2].position,
        }
    }

    /// Every face with its triangle, for ray-tracer triangle lists.
    pub fn triangles(&self) -> impl Iterator<Item = (FaceId, Triangle)> + '_ {
        (0..self.faces.len()).map(|f| (f, self.triangle_unchecked(f)))
    }

    pub fn face_area(&self, f: FaceId) -> Result<f32> {
        let t = self.face_triangle(f)?;
        Ok((t.b - t.a).cross(t.c - t.a).length() * 0.5)
    }

    /// Bounds of all vertex positions, `None` for a mesh without vertices.
    pub fn bounds(&self) -> Option<BoundingBox> {
        BoundingBox::from_points(self.vertices.iter().map(|v| v.position))
    }

    pub fn set_corner_texture_coordinates(&mut self, c: CornerId, uv: Vec2) -> Result<()> {
        check_index(EntityKind::Corner, c, self.corners.len())?;
        self.corners[c].texture_coordinates = uv;
        Ok(())
    }

    pub fn corner_texture_coordinates(&self, c: CornerId) -> Result<Vec2> {
        check_index(EntityKind::Corner, c, self.corners.len())?;
        Ok(self.corners[c].texture_coordinates)
    }

    pub fn set_corner_normal(&mut self, c: CornerId, normal: Vec3) -> Result<()> {
        check_index(EntityKind::Corner, c, self.corners.len())?;
        self.corners[c].normal = normal;
        Ok(())
    }

    pub fn corner_normal(&self, c: CornerId) -> Result<Vec3> {
        check_index(EntityKind::Corner, c, self.corners.len())?;
        Ok(self.corners[c].normal)
    }

    pub fn face_normal(&self, f: FaceId) -> Result<Vec3> {
        check_index(EntityKind::Face, f, self.faces.len())?;
        Ok(self.faces[f].normal)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MeshError;
    use approx::assert_relative_eq;

    fn single_triangle() -> Mesh {
        let mut mesh = Mesh::new();
        mesh.add_vertex(Vec3::new(0.0, 0.0, 0.0));
        mesh.add_vertex(Vec3::new(1.0, 0.0, 0.0));
        mesh.add_vertex(Vec3::new(0.0, 1.0, 0.0));
        mesh.add_face(0, 1, 2).unwrap();
        mesh
    }

    #[test]
    fn empty_mesh() {
        let mesh = Mesh::new();
        assert!(mesh.is_empty());
        assert_eq!(mesh.vertex_count(), 0);
        assert_eq!(mesh.face_count(), 0);
        assert_eq!(mesh.corner_count(), 0);
        assert_eq!(mesh.corner_table_state(), CornerTableState::Stale);
        assert_eq!(mesh.bounds(), None);
    }

    #[test]
    fn add_face_appends_three_corners() {
        let mesh = single_triangle();
        assert_eq!(mesh.face_count(), 1);
        assert_eq!(mesh.corner_count(), 3);
        assert_eq!(mesh.faces()[0].vertex_ids, [0, 1, 2]);
        assert!(mesh.corners().iter().all(|c| c.opposite_corner_id.is_none()));
    }

    #[test]
    fn ids_are_sequential() {
        let mut mesh = Mesh::new();
        assert_eq!(mesh.add_vertex(Vec3::ZERO), 0);
        assert_eq!(mesh.add_vertex(Vec3::X), 1);
        assert_eq!(mesh.add_vertex(Vec3::Y), 2);
        assert_eq!(mesh.add_vertex(Vec3::Z), 3);
        assert_eq!(mesh.add_face(0, 1, 2).unwrap(), 0);
        assert_eq!(mesh.add_face(0, 2, 3).unwrap(), 1);
    }

    #[test]
    fn add_face_rejects_missing_vertex() {
        let mut mesh = single_triangle();
        let err = mesh.add_face(0, 1, 3).unwrap_err();
        assert!(matches!(
            err,
            MeshError::InvalidIndex {
                kind: EntityKind::Vertex,
                index: 3,
                len: 3
            }
        ));
        assert_eq!(mesh.face_count(), 1);
        assert_eq!(mesh.corner_count(), 3);
    }

    #[test]
    fn seed_face_is_last_writer() {
        let mut mesh = single_triangle();
        mesh.add_vertex(Vec3::new(1.0, 1.0, 0.0));
        mesh.add_face(1, 3, 2).unwrap();
        assert_eq!(mesh.vertices()[0].face_id, 0);
        assert_eq!(mesh.vertices()[1].face_id, 1);
        assert_eq!(mesh.vertices()[2].face_id, 1);
        assert_eq!(mesh.vertices()[3].face_id, 1);
    }

    #[test]
    fn edits_invalidate_corner_table() {
        let mut mesh = single_triangle();
        mesh.compute_corner_table();
        assert_eq!(mesh.corner_table_state(), CornerTableState::Computed);

        mesh.add_vertex(Vec3::ONE);
        assert_eq!(mesh.corner_table_state(), CornerTableState::Stale);

        mesh.compute_corner_table();
        mesh.add_face(0, 2, 3).unwrap();
        assert_eq!(mesh.corner_table_state(), CornerTableState::Stale);
    }

    #[test]
    fn moving_a_vertex_keeps_corner_table() {
        let mut mesh = single_triangle();
        mesh.compute_corner_table();
        mesh.set_vertex_position(2, Vec3::new(0.0, 2.0, 0.0)).unwrap();
        assert_eq!(mesh.corner_table_state(), CornerTableState::Computed);
        assert_eq!(mesh.vertex_position(2).unwrap(), Vec3::new(0.0, 2.0, 0.0));
    }

    #[test]
    fn clear_resets_everything() {
        let mut mesh = single_triangle();
        mesh.compute_corner_table();
        mesh.clear();
        assert!(mesh.is_empty());
        assert_eq!(mesh.corner_count(), 0);
        assert_eq!(mesh.corner_table_state(), CornerTableState::Stale);
    }

    #[test]
    fn face_triangle_and_area() {
        let mesh = single_triangle();
        let t = mesh.face_triangle(0).unwrap();
        assert_eq!(t.a, Vec3::ZERO);
        assert_eq!(t.b, Vec3::X);
        assert_eq!(t.c, Vec3::Y);
        assert_relative_eq!(mesh.face_area(0).unwrap(), 0.5);
        assert!(mesh.face_triangle(1).is_err());
        assert_eq!(mesh.triangles().count(), 1);
    }

    #[test]
    fn corner_attributes_round_trip() {
        let mut mesh = single_triangle();
        mesh.set_corner_texture_coordinates(2, Vec2::new(0.25, 0.75))
            .unwrap();
        mesh.set_corner_normal(1, Vec3::Z).unwrap();
        assert_eq!(
            mesh.corner_texture_coordinates(2).unwrap(),
            Vec2::new(0.25, 0.75)
        );
        assert_eq!(mesh.corner_normal(1).unwrap(), Vec3::Z);
        assert!(mesh.set_corner_normal(3, Vec3::Z).is_err());
        assert!(mesh.corner_texture_coordinates(3).is_err());
    }

    #[test]
    fn from_indexed_copies_vertex_attributes_to_corners() {
        let indexed = IndexedMesh {
            positions: vec![0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 1.0, 1.0, 0.0],
            normals: vec![],
            uvs: vec![0.0, 0.0, 1.0, 0.0, 0.0, 1.0, 1.0, 1.0],
            corner_uvs: vec![],
            indices: vec![0, 1, 2, 1, 3, 2, 0],
            name: None,
        };
        let mesh = Mesh::from_indexed(&indexed).unwrap();
        assert_eq!(mesh.vertex_count(), 4);
        assert_eq!(mesh.face_count(), 2);
        // Face 1 corner 1 sits on vertex 3.
        assert_eq!(
            mesh.corner_texture_coordinates(4).unwrap(),
            Vec2::new(1.0, 1.0)
        );
    }

    #[test]
    fn from_indexed_prefers_corner_uvs() {
        let indexed = IndexedMesh {
            positions: vec![0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0],
            uvs: vec![9.0; 6],
            corner_uvs: vec![0.0, 0.0, 1.0, 0.0, 0.0, 1.0],
            indices: vec![0, 1, 2],
            ..Default::default()
        };
        let mesh = Mesh::from_indexed(&indexed).unwrap();
        assert_eq!(mesh.corner_texture_coordinates(1).unwrap(), Vec2::X);
        assert_eq!(mesh.corner_texture_coordinates(2).unwrap(), Vec2::Y);
    }

    #[test]
    fn from_indexed_rejects_bad_index() {
        let indexed = IndexedMesh {
            positions: vec![0.0; 9],
            indices: vec![0, 1, 5],
            ..Default::default()
        };
        assert!(matches!(
            Mesh::from_indexed(&indexed),
            Err(MeshError::InvalidIndex { index: 5, .. })
        ));
    }
}
