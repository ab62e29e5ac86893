use std::io;

/// Which entity array an out-of-range id referred to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Vertex,
    Face,
    Corner,
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EntityKind::Vertex => write!(f, "vertex"),
            EntityKind::Face => write!(f, "face"),
            EntityKind::Corner => write!(f, "corner"),
        }
    }
}

/// All error types for the mesh library.
#[derive(thiserror::Error, Debug)]
pub enum MeshError {
    #[error("Invalid {kind} index {index} (count is {len})")]
    InvalidIndex {
        kind: EntityKind,
        index: usize,
        len: usize,
    },
    #[error("Corner table is stale; call compute_corner_table() after editing topology")]
    StaleCornerTable,
    #[error("Input error: {0}")]
    Input(String),
    #[error("Report encoding error: {0}")]
    Report(#[from] serde_json::Error),
    #[error(transparent)]
    Io(#[from] io::Error),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, MeshError>;

/// Fail with `InvalidIndex` unless `index < len`.
pub(crate) fn check_index(kind: EntityKind, index: usize, len: usize) -> Result<()> {
    if index < len {
        Ok(())
    } else {
        Err(MeshError::InvalidIndex { kind, index, len })
    }
}
