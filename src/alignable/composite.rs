use std::fmt;
use std::io::{self, Write};

use tracing::{debug, trace};

use crate::error::{AlignError, Result};
use crate::prelude::*;
use crate::surface::Surface;

use super::{Alignable, DetUnit, StructureType};

/// Wheel built from detector units
pub type Wheel = Composite<DetUnit>;

/// Barrel built from wheels
pub type Barrel = Composite<Wheel>;

//------------------------------------------------------------------------------
// Composite
//------------------------------------------------------------------------------

/// Node grouping an ordered, non-empty list of owned components.
///
/// The surface is computed once, when the composite is built:
/// - position is `(0, 0, mean z)` of the components, the components being
///   arranged around the z axis
/// - orientation is the identity, the composite frame follows the global one
///
/// [`Alignable::twist`] is propagated to the components but leaves the stored
/// surface as it was. Call [`Composite::recompute_surface`] to refresh it.
pub struct Composite<C = Box<dyn Alignable>> {
    structure: StructureType,
    components: Vec<C>,
    surface: Surface,
}

impl<C: Alignable> Composite<C> {
    /// Take ownership of `components` and freeze the aggregate surface.
    ///
    /// Fails with [`AlignError::EmptyComposite`] if `components` is empty.
    pub fn new(structure: StructureType, components: Vec<C>) -> Result<Self> {
        if components.is_empty() {
            return Err(AlignError::EmptyComposite(structure));
        }
        let surface = compute_surface(&components);
        debug!(
            "built {} from {} components, z = {}",
            structure,
            components.len(),
            surface.position()[2]
        );
        Ok(Composite {
            structure,
            components,
            surface,
        })
    }

    pub fn child_count(&self) -> usize {
        self.components.len()
    }

    /// Component at `index`, in construction order
    pub fn child(&self, index: usize) -> Result<&C> {
        let size = self.components.len();
        self.components
            .get(index)
            .ok_or(AlignError::OutOfRange { index, size })
    }

    pub fn child_mut(&mut self, index: usize) -> Result<&mut C> {
        let size = self.components.len();
        self.components
            .get_mut(index)
            .ok_or(AlignError::OutOfRange { index, size })
    }

    pub fn children(&self) -> std::slice::Iter<'_, C> {
        self.components.iter()
    }

    /// Replace the stored surface with one computed from the current
    /// component positions.
    pub fn recompute_surface(&mut self) {
        let surface = compute_surface(&self.components);
        debug!(
            "recomputed {} surface, z {} -> {}",
            self.structure,
            self.surface.position()[2],
            surface.position()[2]
        );
        self.surface = surface;
    }
}

fn compute_surface<C: Alignable>(components: &[C]) -> Surface {
    Surface::new(compute_position(components), compute_orientation())
}

/// Average z of the components, x and y forced to 0
fn compute_position<C: Alignable>(components: &[C]) -> Vector3 {
    let z = components
        .iter()
        .map(|c| c.global_position()[2])
        .sum::<f64>()
        / components.len() as f64;
    Vector3::new(0., 0., z)
}

fn compute_orientation() -> Rotation3 {
    Rotation3::identity()
}

impl<C: Alignable> Alignable for Composite<C> {
    fn structure_type(&self) -> StructureType {
        self.structure
    }

    fn surface(&self) -> Surface {
        self.surface
    }

    /// Twist every component by `rad`. The stored surface is not updated.
    fn twist(&mut self, rad: f64) {
        trace!(
            "twisting {} components of {} by {}",
            self.components.len(),
            self.structure,
            rad
        );
        for c in self.components.iter_mut() {
            c.twist(rad);
        }
    }

    /// Move every component by `displacement`. The stored surface follows
    /// along z only, so it stays on the axis.
    fn translate(&mut self, displacement: &Vector3) {
        trace!(
            "translating {} components of {} by {:?}",
            self.components.len(),
            self.structure,
            displacement.as_slice()
        );
        for c in self.components.iter_mut() {
            c.translate(displacement);
        }
        self.surface = self
            .surface
            .translated(&Vector3::new(0., 0., displacement[2]));
    }

    fn components(&self) -> Vec<&dyn Alignable> {
        self.components.iter().map(|c| c as &dyn Alignable).collect()
    }

    fn size(&self) -> usize {
        self.components.len()
    }

    fn dump(&self, out: &mut dyn Write) -> io::Result<()> {
        write!(out, "{}", self)?;
        for c in self.components.iter() {
            c.dump(out)?;
        }
        Ok(())
    }
}

impl<C: Alignable> fmt::Debug for Composite<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Composite")
            .field("structure", &self.structure)
            .field("components", &self.components.len())
            .field("surface", &self.surface)
            .finish()
    }
}

impl<C: Alignable> fmt::Display for Composite<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "This {} contains {} components",
            self.structure,
            self.components.len()
        )?;
        writeln!(f, "{}", self.surface)
    }
}
