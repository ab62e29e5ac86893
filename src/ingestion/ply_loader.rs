use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use ply_rs::parser::Parser;
use ply_rs::ply::{DefaultElement, Property};
use tracing::debug;

use crate::error::{MeshError, Result};
use crate::types::IndexedMesh;

/// Property name pairs recognised as texture coordinates.
const UV_KEYS: [(&str, &str); 3] = [("s", "t"), ("u", "v"), ("texture_u", "texture_v")];

/// Load a PLY file into an `IndexedMesh`.
pub fn load_ply(path: &Path) -> Result<IndexedMesh> {
    let file = File::open(path)
        .map_err(|e| MeshError::Input(format!("Failed to open PLY: {e}")))?;
    let mut reader = BufReader::new(file);

    let parser = Parser::<DefaultElement>::new();
    let ply = parser
        .read_ply(&mut reader)
        .map_err(|e| MeshError::Input(format!("Failed to parse PLY: {e}")))?;

    let vertices = ply
        .payload
        .get("vertex")
        .ok_or_else(|| MeshError::Input("PLY file missing 'vertex' element".into()))?;

    debug!(vertex_count = vertices.len(), "Parsing PLY vertices");

    let has_normals = vertices
        .first()
        .map(|v| v.contains_key("nx"))
        .unwrap_or(false);
    let uv_keys = vertices.first().and_then(|first| {
        UV_KEYS
            .into_iter()
            .find(|(u, v)| first.contains_key(*u) && first.contains_key(*v))
    });

    let mut positions = Vec::with_capacity(vertices.len() * 3);
    let mut normals = Vec::new();
    let mut uvs = Vec::new();

    for vertex in vertices {
        positions.push(get_float_property(vertex, "x")?);
        positions.push(get_float_property(vertex, "y")?);
        positions.push(get_float_property(vertex, "z")?);

        if has_normals {
            normals.push(get_float_property(vertex, "nx")?);
            normals.push(get_float_property(vertex, "ny")?);
            normals.push(get_float_property(vertex, "nz")?);
        }

        if let Some((u, v)) = uv_keys {
            uvs.push(get_float_property(vertex, u)?);
            uvs.push(get_float_property(vertex, v)?);
        }
    }

    let mut indices = Vec::new();
    if let Some(faces) = ply.payload.get("face") {
        debug!(face_count = faces.len(), "Parsing PLY faces");
        for face in faces {
            let face_indices = get_index_list(face)?;
            // Fan-triangulate polygons with >3 vertices
            if face_indices.len() >= 3 {
                for i in 1..face_indices.len() - 1 {
                    indices.push(face_indices[0]);
                    indices.push(face_indices[i]);
                    indices.push(face_indices[i + 1]);
                }
            }
        }
    }

    Ok(IndexedMesh {
        positions,
        normals,
        uvs,
        corner_uvs: Vec::new(),
        indices,
        name: None,
    })
}

/// Extract a float property, handling Float/Double/integer types.
fn get_float_property(element: &DefaultElement, key: &str) -> Result<f32> {
    let prop = element
        .get(key)
        .ok_or_else(|| MeshError::Input(format!("PLY vertex missing property '{key}'")))?;

    match prop {
        Property::Float(v) => Ok(*v),
        Property::Double(v) => Ok(*v as f32),
        Property::Int(v) => Ok(*v as f32),
        Property::Short(v) => Ok(*v as f32),
        Property::UInt(v) => Ok(*v as f32),
        Property::UShort(v) => Ok(*v as f32),
        Property::Char(v) => Ok(*v as f32),
        Property::UChar(v) => Ok(*v as f32),
        _ => Err(MeshError::Input(format!(
            "PLY property '{key}' has unsupported type"
        ))),
    }
}

/// Extract the index list from a face element.
fn get_index_list(face: &DefaultElement) -> Result<Vec<u32>> {
    let key = if face.contains_key("vertex_indices") {
        "vertex_indices"
    } else {
        "vertex_index"
    };

    let prop = face
        .get(key)
        .ok_or_else(|| MeshError::Input("PLY face missing vertex_indices property".into()))?;

    match prop {
        Property::ListInt(v) => to_indices(v.iter().map(|&i| i as i64)),
        Property::ListUInt(v) => Ok(v.clone()),
        Property::ListUChar(v) => Ok(v.iter().map(|&i| i as u32).collect()),
        Property::ListShort(v) => to_indices(v.iter().map(|&i| i as i64)),
        Property::ListUShort(v) => Ok(v.iter().map(|&i| i as u32).collect()),
        _ => Err(MeshError::Input(
            "PLY face vertex_indices has unsupported type".into(),
        )),
    }
}

/// Signed index lists must not contain negatives.
fn to_indices(values: impl Iterator<Item = i64>) -> Result<Vec<u32>> {
    values
        .map(|i| {
            u32::try_from(i)
                .map_err(|_| MeshError::Input(format!("PLY face has negative index {i}")))
        })
        .collect()
}
