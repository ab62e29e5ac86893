pub mod gltf_loader;
pub mod obj_loader;
pub mod ply_loader;

use std::path::Path;

use tracing::{debug, info};

use crate::error::{MeshError, Result};
use crate::types::IndexedMesh;

/// Supported input formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    Obj,
    Gltf,
    Glb,
    Ply,
}

impl InputFormat {
    /// Detect format from file extension (case-insensitive).
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase())
            .unwrap_or_default();

        match ext.as_str() {
            "obj" => Ok(InputFormat::Obj),
            "gltf" => Ok(InputFormat::Gltf),
            "glb" => Ok(InputFormat::Glb),
            "ply" => Ok(InputFormat::Ply),
            _ => Err(MeshError::Input(format!("Unsupported file format: .{ext}"))),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            InputFormat::Obj => "OBJ",
            InputFormat::Gltf => "glTF",
            InputFormat::Glb => "GLB",
            InputFormat::Ply => "PLY",
        }
    }
}

impl std::fmt::Display for InputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Load every mesh in `path`, dispatching on the file extension.
pub fn load(path: &Path) -> Result<(InputFormat, Vec<IndexedMesh>)> {
    if !path.exists() {
        return Err(MeshError::Input(format!(
            "Input file not found: {}",
            path.display()
        )));
    }

    let format = InputFormat::from_path(path)?;
    info!(format = %format, path = %path.display(), "Detected input format");

    let meshes = match format {
        InputFormat::Obj => obj_loader::load_obj(path)?,
        InputFormat::Gltf | InputFormat::Glb => gltf_loader::load_gltf(path)?,
        InputFormat::Ply => vec![ply_loader::load_ply(path)?],
    };

    debug!(
        meshes = meshes.len(),
        vertices = meshes.iter().map(IndexedMesh::vertex_count).sum::<usize>(),
        triangles = meshes.iter().map(IndexedMesh::triangle_count).sum::<usize>(),
        "Loaded meshes"
    );

    Ok((format, meshes))
}
