use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::alignable::{Alignable, Composite, DetUnit, Dimensions, StructureType};
use crate::error::{AlignError, Result};
use crate::prelude::*;

//------------------------------------------------------------------------------
// Description
//------------------------------------------------------------------------------

/// Serialized form of an alignable tree, as handed over by a geometry service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeDescription {
    Composite(CompositeDescription),
    Unit(UnitDescription),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompositeDescription {
    pub structure: StructureType,
    pub components: Vec<NodeDescription>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnitDescription {
    pub id: u32,
    pub position: [f64; 3],
    /// Rotation matrix, row by row
    #[serde(default = "identity_rows")]
    pub rotation: [[f64; 3]; 3],
    #[serde(default)]
    pub dimensions: Dimensions,
}

fn identity_rows() -> [[f64; 3]; 3] {
    [[1., 0., 0.], [0., 1., 0.], [0., 0., 1.]]
}

//------------------------------------------------------------------------------
// Building
//------------------------------------------------------------------------------

/// Tolerance on `R * R^T - I` for accepting a rotation matrix
const ORTHONORMAL_TOLERANCE: f64 = 1e-6;

/// Parse a JSON geometry description and build the tree it describes.
pub fn from_json(json: &str) -> Result<Box<dyn Alignable>> {
    let description: NodeDescription = serde_json::from_str(json)?;
    build(&description)
}

/// Build the tree described by `description`, children in the listed order.
pub fn build(description: &NodeDescription) -> Result<Box<dyn Alignable>> {
    match description {
        NodeDescription::Composite(desc) => {
            let components = desc
                .components
                .iter()
                .map(build)
                .collect::<Result<Vec<Box<dyn Alignable>>>>()?;
            let composite = Composite::new(desc.structure, components).map_err(|e| {
                warn!("rejected geometry description: {}", e);
                e
            })?;
            Ok(Box::new(composite))
        }
        NodeDescription::Unit(desc) => Ok(Box::new(build_unit(desc)?)),
    }
}

fn build_unit(desc: &UnitDescription) -> Result<DetUnit> {
    let r = &desc.rotation;
    let m = Matrix3::new(
        r[0][0], r[0][1], r[0][2], r[1][0], r[1][1], r[1][2], r[2][0], r[2][1], r[2][2],
    );
    let orthonormal = (m * m.transpose() - Matrix3::identity()).norm() < ORTHONORMAL_TOLERANCE;
    if !orthonormal || m.determinant() <= 0. {
        warn!("rejected geometry description: unit {} rotation {:?}", desc.id, r);
        return Err(AlignError::InvalidRotation { id: desc.id });
    }
    let position = Vector3::new(desc.position[0], desc.position[1], desc.position[2]);
    Ok(
        DetUnit::new(desc.id, position, Rotation3::from_matrix_unchecked(m))
            .with_dimensions(desc.dimensions),
    )
}
