pub mod config;
pub mod draw_data;
pub mod error;
pub mod factory;
pub mod ingestion;
pub mod mesh;
pub mod pipeline;
pub mod types;

pub use config::{InspectConfig, NormalConfig, NormalMode};
pub use draw_data::{DrawData, DrawVertex};
pub use error::{MeshError, Result};
pub use mesh::analysis::TopologyStats;
pub use mesh::neighborhood::VertexRing;
pub use mesh::{Mesh, Triangle};
pub use pipeline::Pipeline;
pub use types::{CornerId, CornerTableState, FaceId, IndexedMesh, VertexId};
