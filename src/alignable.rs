use std::fmt;
use std::io::{self, Write};

use serde::{Deserialize, Serialize};

use crate::prelude::*;
use crate::surface::Surface;

pub mod composite;
pub mod det_unit;

pub use composite::{Barrel, Composite, Wheel};
pub use det_unit::{DetUnit, Dimensions};

//------------------------------------------------------------------------------
// Structure type
//------------------------------------------------------------------------------

/// Level of a node in the mechanical hierarchy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StructureType {
    Muon,
    Barrel,
    Wheel,
    Station,
    Chamber,
    Endcap,
    Disk,
    Ring,
    DetUnit,
}

impl fmt::Display for StructureType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            StructureType::Muon => "Muon",
            StructureType::Barrel => "Barrel",
            StructureType::Wheel => "Wheel",
            StructureType::Station => "Station",
            StructureType::Chamber => "Chamber",
            StructureType::Endcap => "Endcap",
            StructureType::Disk => "Disk",
            StructureType::Ring => "Ring",
            StructureType::DetUnit => "DetUnit",
        };
        f.write_str(name)
    }
}

//------------------------------------------------------------------------------
// Alignable
//------------------------------------------------------------------------------

/// Capabilities shared by every node of the alignable tree, leaf or composite.
pub trait Alignable {
    fn structure_type(&self) -> StructureType;

    /// Current surface. Composites return their stored aggregate.
    fn surface(&self) -> Surface;

    fn global_position(&self) -> Vector3 {
        self.surface().position()
    }

    fn global_rotation(&self) -> Rotation3 {
        self.surface().rotation()
    }

    /// Rotate in place about the local z axis
    fn twist(&mut self, rad: f64);

    /// Shift in place by a global displacement
    fn translate(&mut self, displacement: &Vector3);

    /// Direct components, in order. Empty for leaves.
    fn components(&self) -> Vec<&dyn Alignable> {
        Vec::new()
    }

    fn size(&self) -> usize {
        self.components().len()
    }

    /// Leaf payload, if this node is a detector unit
    fn as_unit(&self) -> Option<&DetUnit> {
        None
    }

    /// Recursive diagnostic rendering
    fn dump(&self, out: &mut dyn Write) -> io::Result<()>;
}

impl<T: Alignable + ?Sized> Alignable for Box<T> {
    fn structure_type(&self) -> StructureType {
        (**self).structure_type()
    }
    fn surface(&self) -> Surface {
        (**self).surface()
    }
    fn global_position(&self) -> Vector3 {
        (**self).global_position()
    }
    fn global_rotation(&self) -> Rotation3 {
        (**self).global_rotation()
    }
    fn twist(&mut self, rad: f64) {
        (**self).twist(rad)
    }
    fn translate(&mut self, displacement: &Vector3) {
        (**self).translate(displacement)
    }
    fn components(&self) -> Vec<&dyn Alignable> {
        (**self).components()
    }
    fn size(&self) -> usize {
        (**self).size()
    }
    fn as_unit(&self) -> Option<&DetUnit> {
        (**self).as_unit()
    }
    fn dump(&self, out: &mut dyn Write) -> io::Result<()> {
        (**self).dump(out)
    }
}
