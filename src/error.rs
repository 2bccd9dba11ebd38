use crate::alignable::StructureType;

#[derive(Debug, thiserror::Error)]
pub enum AlignError {
    #[error("component index ({index}) out of range, {size} components")]
    OutOfRange { index: usize, size: usize },
    #[error("{0} must be built from at least one component")]
    EmptyComposite(StructureType),
    #[error("rotation of unit {id} is not orthonormal")]
    InvalidRotation { id: u32 },
    #[error("could not parse geometry description\n  - {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, AlignError>;
