/// Flat, importer-facing geometry container.
///
/// This is the shape mesh loaders produce before the data is fed through
/// `Mesh::from_indexed`. All buffers are contiguous so loader output can be
/// moved in without per-element conversion.
#[derive(Debug, Clone, Default)]
pub struct IndexedMesh {
    /// Interleaved positions: [x, y, z, x, y, z, ...]
    pub positions: Vec<f32>,
    /// Interleaved normals: [nx, ny, nz, ...] or empty
    pub normals: Vec<f32>,
    /// Interleaved UVs: [u, v, u, v, ...] or empty
    pub uvs: Vec<f32>,
    /// Per-index UVs [u, v, ...], one pair per entry of `indices`, or empty.
    /// Takes precedence over `uvs` for formats that index UVs separately.
    pub corner_uvs: Vec<f32>,
    /// Triangle indices into the vertex buffers
    pub indices: Vec<u32>,
    /// Source object or primitive name, if the format carries one
    pub name: Option<String>,
}

impl IndexedMesh {
    /// Number of vertices (positions / 3).
    pub fn vertex_count(&self) -> usize {
        self.positions.len() / 3
    }

    /// Number of whole triangles (indices / 3).
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Whether normals are present.
    pub fn has_normals(&self) -> bool {
        !self.normals.is_empty()
    }

    /// Whether UV coordinates are present, per vertex or per corner.
    pub fn has_uvs(&self) -> bool {
        !self.uvs.is_empty() || !self.corner_uvs.is_empty()
    }

    /// Whether the mesh contains no geometry.
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}
