use glam::{Vec2, Vec3};

/// Index into `Mesh` vertex storage.
pub type VertexId = usize;
/// Index into `Mesh` face storage.
pub type FaceId = usize;
/// `face_id * 3 + internal_corner_id`, with the internal id in `0..3`.
pub type CornerId = usize;

/// Per-vertex record.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct VertexData {
    /// Some incident face, used as the seed of one-ring walks.
    pub face_id: FaceId,
    pub position: Vec3,
}

/// Per-face record.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FaceData {
    pub vertex_ids: [VertexId; 3],
    pub normal: Vec3,
}

/// Per-corner record. One (face, vertex) incidence.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CornerData {
    /// Corner across the edge this corner faces, `None` on a boundary.
    pub opposite_corner_id: Option<CornerId>,
    pub normal: Vec3,
    pub texture_coordinates: Vec2,
}

/// Unordered vertex pair, stored as `(min, max)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Edge {
    pub a: VertexId,
    pub b: VertexId,
}

impl Edge {
    pub fn new(v0: VertexId, v1: VertexId) -> Self {
        Self {
            a: v0.min(v1),
            b: v0.max(v1),
        }
    }
}

/// Validity of the cached opposite-corner assignments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CornerTableState {
    /// Topology changed since the last build (or never built).
    #[default]
    Stale,
    Computed,
}

impl CornerTableState {
    pub fn is_computed(self) -> bool {
        self == CornerTableState::Computed
    }
}
