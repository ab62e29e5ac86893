//! Procedural meshes.
//!
//! All faces are wound counter-clockwise seen from outside (or from +Z for
//! the grid).

use glam::{Vec2, Vec3};

use crate::mesh::Mesh;

/// Regular-ish tetrahedron on the unit axes.
pub fn tetrahedron() -> Mesh {
    let mut mesh = Mesh::new();
    mesh.reserve(4, 4);
    for p in [Vec3::ZERO, Vec3::X, Vec3::Y, Vec3::Z] {
        mesh.add_vertex(p);
    }
    for face in [[0, 2, 1], [0, 1, 3], [0, 3, 2], [1, 2, 3]] {
        mesh.push_face(face);
    }
    mesh
}

/// Open `n x n` quad grid over the unit square in z = 0, two triangles per
/// quad, with UVs equal to the xy position.
pub fn grid(n: usize) -> Mesh {
    let n = n.max(1);
    let verts_per_side = n + 1;
    let mut mesh = Mesh::new();
    mesh.reserve(verts_per_side * verts_per_side, n * n * 2);

    for y in 0..verts_per_side {
        for x in 0..verts_per_side {
            let fx = x as f32 / n as f32;
            let fy = y as f32 / n as f32;
            mesh.add_vertex(Vec3::new(fx, fy, 0.0));
        }
    }

    for y in 0..n {
        for x in 0..n {
            let tl = y * verts_per_side + x;
            let tr = tl + 1;
            let bl = tl + verts_per_side;
            let br = bl + 1;
            mesh.push_face([tl, tr, bl]);
            mesh.push_face([tr, br, bl]);
        }
    }

    for c in 0..mesh.corner_count() {
        let p = mesh.vertices()[mesh.vertex_of(c)].position;
        mesh.corners[c].texture_coordinates = Vec2::new(p.x, p.y);
    }

    mesh
}

/// Closed unit cube with corners at 0 and 1, twelve triangles.
pub fn cube() -> Mesh {
    let mut mesh = Mesh::new();
    mesh.reserve(8, 12);
    // Vertex i sits at (i & 1, (i >> 1) & 1, (i >> 2) & 1).
    for i in 0..8u32 {
        mesh.add_vertex(Vec3::new(
            (i & 1) as f32,
            ((i >> 1) & 1) as f32,
            ((i >> 2) & 1) as f32,
        ));
    }
    let faces = [
        [0, 2, 3],
        [0, 3, 1],
        [4, 5, 7],
        [4, 7, 6],
        [0, 1, 5],
        [0, 5, 4],
        [2, 6, 7],
        [2, 7, 3],
        [0, 4, 6],
        [0, 6, 2],
        [1, 3, 7],
        [1, 7, 5],
    ];
    for face in faces {
        mesh.push_face(face);
    }
    mesh
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn tetrahedron_counts() {
        let mesh = tetrahedron();
        assert_eq!(mesh.vertex_count(), 4);
        assert_eq!(mesh.face_count(), 4);
        assert_eq!(mesh.corner_count(), 12);
    }

    #[test]
    fn grid_counts_and_uvs() {
        let mesh = grid(4);
        assert_eq!(mesh.vertex_count(), 25);
        assert_eq!(mesh.face_count(), 32);
        let last = mesh.corner_count() - 1;
        let p = mesh.vertices()[mesh.vertex_of(last)].position;
        assert_eq!(mesh.corner_texture_coordinates(last).unwrap(), p.truncate());
    }

    #[test]
    fn grid_zero_is_clamped() {
        assert_eq!(grid(0).face_count(), 2);
    }

    #[test]
    fn cube_faces_point_outward() {
        let mut mesh = cube();
        mesh.compute_face_normals();
        let center = Vec3::splat(0.5);
        for (f, t) in mesh.triangles() {
            let n = mesh.face_normal(f).unwrap();
            let centroid = (t.a + t.b + t.c) / 3.0;
            assert!(n.dot(centroid - center) > 0.0, "face {f}");
        }
        let area: f32 = (0..mesh.face_count())
            .map(|f| mesh.face_area(f).unwrap())
            .sum();
        assert_relative_eq!(area, 6.0, epsilon = 1e-5);
    }
}
