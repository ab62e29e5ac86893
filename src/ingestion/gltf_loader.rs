use std::path::Path;

use tracing::{debug, warn};

use crate::error::{MeshError, Result};
use crate::types::IndexedMesh;

/// Load every triangle primitive of a glTF or GLB file.
pub fn load_gltf(path: &Path) -> Result<Vec<IndexedMesh>> {
    let (document, buffers, _images) = gltf::import(path)
        .map_err(|e| MeshError::Input(format!("Failed to load glTF: {e}")))?;

    debug!(meshes = document.meshes().len(), "Loaded glTF document");

    let mut meshes = Vec::new();

    for mesh in document.meshes() {
        for primitive in mesh.primitives() {
            if primitive.mode() != gltf::mesh::Mode::Triangles {
                warn!(mesh = ?mesh.name(), mode = ?primitive.mode(), "Skipping non-triangle primitive");
                continue;
            }
            match extract_primitive(&primitive, &buffers) {
                Ok(mut indexed) => {
                    indexed.name = mesh.name().map(str::to_string);
                    meshes.push(indexed);
                }
                Err(e) => {
                    warn!(mesh = ?mesh.name(), "Skipping primitive: {e}");
                }
            }
        }
    }

    Ok(meshes)
}

/// Extract geometry from a single glTF primitive.
fn extract_primitive(
    primitive: &gltf::Primitive<'_>,
    buffers: &[gltf::buffer::Data],
) -> Result<IndexedMesh> {
    let reader = primitive.reader(|buffer| Some(&buffers[buffer.index()]));

    let positions: Vec<f32> = reader
        .read_positions()
        .ok_or_else(|| MeshError::Input("Primitive missing positions".into()))?
        .flatten()
        .collect();

    let normals: Vec<f32> = reader
        .read_normals()
        .map(|iter| iter.flatten().collect())
        .unwrap_or_default();

    // No V-flip needed for glTF
    let uvs: Vec<f32> = reader
        .read_tex_coords(0)
        .map(|iter| iter.into_f32().flatten().collect())
        .unwrap_or_default();

    // Non-indexed primitives draw vertices in order.
    let indices: Vec<u32> = match reader.read_indices() {
        Some(iter) => iter.into_u32().collect(),
        None => (0..(positions.len() / 3) as u32).collect(),
    };

    Ok(IndexedMesh {
        positions,
        normals,
        uvs,
        corner_uvs: Vec::new(),
        indices,
        name: None,
    })
}
