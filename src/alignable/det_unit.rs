use std::fmt;
use std::io::{self, Write};

use serde::{Deserialize, Serialize};

use crate::prelude::*;
use crate::surface::Surface;

use super::{Alignable, StructureType};

/// Bounds of a detector unit in its local frame
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Dimensions {
    pub length: f64,
    pub width: f64,
    pub thickness: f64,
}

/// Single physical alignment unit (a chamber or detector layer).
#[derive(Debug, Clone, PartialEq)]
pub struct DetUnit {
    id: u32,
    surface: Surface,
    dimensions: Dimensions,
}

impl DetUnit {
    pub fn new(id: u32, position: Vector3, rotation: Rotation3) -> Self {
        DetUnit {
            id,
            surface: Surface::new(position, rotation),
            dimensions: Dimensions::default(),
        }
    }

    pub fn with_dimensions(mut self, dimensions: Dimensions) -> Self {
        self.dimensions = dimensions;
        self
    }

    pub fn id(&self) -> u32 {
        self.id
    }

    pub fn dimensions(&self) -> Dimensions {
        self.dimensions
    }
}

impl Alignable for DetUnit {
    fn structure_type(&self) -> StructureType {
        StructureType::DetUnit
    }

    fn surface(&self) -> Surface {
        self.surface
    }

    fn twist(&mut self, rad: f64) {
        self.surface = self.surface.twisted(rad);
    }

    fn translate(&mut self, displacement: &Vector3) {
        self.surface = self.surface.translated(displacement);
    }

    fn as_unit(&self) -> Option<&DetUnit> {
        Some(self)
    }

    fn dump(&self, out: &mut dyn Write) -> io::Result<()> {
        write!(out, "{}", self)
    }
}

impl fmt::Display for DetUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "DetUnit {}", self.id)?;
        writeln!(f, "{}", self.surface)
    }
}
