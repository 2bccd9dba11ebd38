use std::fmt;

use serde::{Deserialize, Serialize};

use crate::prelude::*;

//------------------------------------------------------------------------------
// Surface
//------------------------------------------------------------------------------

/// Global position and orientation of an alignable.
///
/// A surface is a value: it is never modified in place, a node that needs a
/// different surface replaces it with a new one.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Surface {
    position: Vector3,
    rotation: Rotation3,
}

impl Surface {
    pub fn new(position: Vector3, rotation: Rotation3) -> Self {
        Surface { position, rotation }
    }

    pub fn position(&self) -> Vector3 {
        self.position
    }

    pub fn rotation(&self) -> Rotation3 {
        self.rotation
    }

    /// Local z axis expressed in the global frame
    pub fn normal_vector(&self) -> Vector3 {
        self.rotation * Vector3::z()
    }

    /// Local point to global frame
    pub fn to_global(&self, local: &Vector3) -> Vector3 {
        self.rotation * local + self.position
    }

    /// Global point to local frame
    pub fn to_local(&self, global: &Vector3) -> Vector3 {
        self.rotation.inverse() * (global - self.position)
    }

    /// Same orientation, position shifted by `displacement`
    pub fn translated(&self, displacement: &Vector3) -> Self {
        Surface::new(self.position + displacement, self.rotation)
    }

    /// Same position, rotated about its own z axis
    pub fn twisted(&self, rad: f64) -> Self {
        Surface::new(self.position, self.rotation.rotated_about_local_z(rad))
    }
}

impl Default for Surface {
    fn default() -> Self {
        Surface::new(Vector3::zeros(), Rotation3::identity())
    }
}

impl fmt::Display for Surface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "(phi, r, z) =  ({},{},{}),  orientation:",
            self.position.phi(),
            self.position.rho(),
            self.position[2]
        )?;
        write!(f, "{}", self.rotation.matrix())
    }
}
