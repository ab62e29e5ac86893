use std::path::Path;

use tracing::debug;

use crate::error::{MeshError, Result};
use crate::types::IndexedMesh;

/// Load every object of an OBJ file.
///
/// Positions keep their own index stream so faces that share a position
/// share a vertex, even across UV seams; UVs travel per corner.
pub fn load_obj(path: &Path) -> Result<Vec<IndexedMesh>> {
    let options = tobj::LoadOptions {
        triangulate: true,
        single_index: false,
        ignore_points: true,
        ignore_lines: true,
        ..Default::default()
    };
    let (models, _materials) = tobj::load_obj(path, &options)
        .map_err(|e| MeshError::Input(format!("Failed to load OBJ: {e}")))?;

    debug!(model_count = models.len(), "Loaded OBJ models");

    Ok(models
        .into_iter()
        .map(|model| convert_mesh(model.mesh, model.name))
        .collect())
}

/// Convert a `tobj::Mesh` into our `IndexedMesh`.
fn convert_mesh(mesh: tobj::Mesh, name: String) -> IndexedMesh {
    // V-flip: OBJ uses a bottom-left origin
    let corner_uvs: Vec<f32> = if mesh.texcoord_indices.len() == mesh.indices.len() {
        mesh.texcoord_indices
            .iter()
            .filter_map(|&t| {
                let t = t as usize;
                mesh.texcoords.get(t * 2..t * 2 + 2)
            })
            .flat_map(|uv| [uv[0], 1.0 - uv[1]])
            .collect()
    } else {
        Vec::new()
    };

    // Only keep the streams if every corner resolved.
    let corner_uvs = if corner_uvs.len() == mesh.indices.len() * 2 {
        corner_uvs
    } else {
        Vec::new()
    };

    // Normals indexed separately from positions cannot be kept per vertex.
    let normals = if mesh.normal_indices.is_empty() && mesh.normals.len() == mesh.positions.len() {
        mesh.normals
    } else {
        Vec::new()
    };

    IndexedMesh {
        positions: mesh.positions,
        normals,
        uvs: Vec::new(),
        corner_uvs,
        indices: mesh.indices,
        name: Some(name).filter(|n| !n.is_empty()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn tobj_mesh() -> tobj::Mesh {
        tobj::Mesh {
            positions: vec![0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0],
            normals: vec![],
            texcoords: vec![0.0, 0.0, 1.0, 0.3, 0.5, 1.0],
            indices: vec![0, 1, 2],
            vertex_color: vec![],
            face_arities: vec![],
            texcoord_indices: vec![0, 1, 2],
            normal_indices: vec![],
            material_id: None,
        }
    }

    #[test]
    fn convert_mesh_basic() {
        let indexed = convert_mesh(tobj_mesh(), "tri".into());
        assert_eq!(indexed.vertex_count(), 3);
        assert_eq!(indexed.triangle_count(), 1);
        assert!(indexed.has_uvs());
        assert!(!indexed.has_normals());
        assert_eq!(indexed.name.as_deref(), Some("tri"));
    }

    #[test]
    fn convert_mesh_uv_vflip() {
        let indexed = convert_mesh(tobj_mesh(), String::new());
        // Original UVs: (0.0,0.0), (1.0,0.3), (0.5,1.0)
        // Flipped UVs:  (0.0,1.0), (1.0,0.7), (0.5,0.0)
        assert!((indexed.corner_uvs[1] - 1.0).abs() < f32::EPSILON);
        assert!((indexed.corner_uvs[3] - 0.7).abs() < 1e-6);
        assert!((indexed.corner_uvs[5] - 0.0).abs() < f32::EPSILON);
        assert_eq!(indexed.name, None);
    }

    #[test]
    fn convert_mesh_drops_partial_uvs() {
        let mut mesh = tobj_mesh();
        mesh.texcoord_indices = vec![0, 1, 7];
        let indexed = convert_mesh(mesh, String::new());
        assert!(indexed.corner_uvs.is_empty());
    }

    #[test]
    fn load_obj_shares_positions_across_uv_seam() {
        let mut file = NamedTempFile::with_suffix(".obj").unwrap();
        file.write_all(
            b"o quad
v 0 0 0
v 1 0 0
v 0 1 0
v 1 1 0
vt 0 0
vt 1 0
vt 0 1
vt 1 1
vt 0.5 0.5
f 1/1 2/2 3/3
f 2/5 4/4 3/3
",
        )
        .unwrap();
        file.flush().unwrap();

        let meshes = load_obj(file.path()).unwrap();
        assert_eq!(meshes.len(), 1);
        let quad = &meshes[0];
        assert_eq!(quad.vertex_count(), 4);
        assert_eq!(quad.indices, vec![0, 1, 2, 1, 3, 2]);
        assert_eq!(quad.corner_uvs.len(), 12);
        assert_eq!(quad.name.as_deref(), Some("quad"));
    }

    #[test]
    fn load_obj_missing_file() {
        let err = load_obj(Path::new("/nonexistent/model.obj")).unwrap_err();
        assert!(err.to_string().contains("Failed to load OBJ"));
    }
}
