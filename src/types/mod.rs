pub mod bounds;
pub mod mesh;
pub mod topology;

pub use bounds::BoundingBox;
pub use mesh::IndexedMesh;
pub use topology::{
    CornerData, CornerId, CornerTableState, Edge, FaceData, FaceId, VertexData, VertexId,
};
