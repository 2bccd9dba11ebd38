use std::fmt;
use std::io::Write;

use serde::{Deserialize, Serialize};

use crate::alignable::Alignable;
use crate::error::Result;
use crate::prelude::*;

//------------------------------------------------------------------------------
// Traversal
//------------------------------------------------------------------------------

/// Depth-first, pre-order walk. The visitor receives the depth (0 for `root`)
/// and each node, components visited in order.
pub fn walk<'a, F>(root: &'a dyn Alignable, visitor: &mut F)
where
    F: FnMut(usize, &'a dyn Alignable),
{
    walk_at(0, root, visitor);
}

fn walk_at<'a, F>(depth: usize, node: &'a dyn Alignable, visitor: &mut F)
where
    F: FnMut(usize, &'a dyn Alignable),
{
    visitor(depth, node);
    for c in node.components() {
        walk_at(depth + 1, c, visitor);
    }
}

/// Recursive rendering of the whole tree into `out`
pub fn dump_tree(root: &dyn Alignable, out: &mut dyn Write) -> Result<()> {
    root.dump(out)?;
    Ok(())
}

/// Number of detector units below (or at) `root`
pub fn count_units(root: &dyn Alignable) -> usize {
    let mut count = 0;
    walk(root, &mut |_, node| {
        if node.as_unit().is_some() {
            count += 1;
        }
    });
    count
}

//------------------------------------------------------------------------------
// Outline
//------------------------------------------------------------------------------

/// One line per node, indented by depth
pub struct Outline<'a>(pub &'a dyn Alignable);

impl fmt::Display for Outline<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut lines = Vec::new();
        walk(self.0, &mut |depth, node| {
            let label = match node.as_unit() {
                Some(unit) => format!("{}", unit.id()),
                None => format!("{} components", node.size()),
            };
            lines.push(format!(
                "{}- [{}] {}, z = {}",
                "  ".repeat(depth),
                node.structure_type(),
                label,
                node.global_position()[2]
            ));
        });
        for line in lines {
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}

//------------------------------------------------------------------------------
// Unit records
//------------------------------------------------------------------------------

/// Geometry snapshot of one detector unit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnitRecord {
    pub id: u32,
    pub x: f64,
    pub y: f64,
    pub z: f64,
    /// Azimuth of the surface normal
    pub phi: f64,
    /// Polar angle of the surface normal
    pub theta: f64,
    pub length: f64,
    pub width: f64,
    pub thickness: f64,
    /// Rotation matrix, row by row
    pub rotation: [[f64; 3]; 3],
}

/// Snapshot of every detector unit, in traversal order
pub fn unit_records(root: &dyn Alignable) -> Vec<UnitRecord> {
    let mut records = Vec::new();
    walk(root, &mut |_, node| {
        if let Some(unit) = node.as_unit() {
            let surface = unit.surface();
            let position = surface.position();
            let normal = surface.normal_vector();
            let dims = unit.dimensions();
            records.push(UnitRecord {
                id: unit.id(),
                x: position[0],
                y: position[1],
                z: position[2],
                phi: normal.phi(),
                theta: normal.theta(),
                length: dims.length,
                width: dims.width,
                thickness: dims.thickness,
                rotation: surface.rotation().rows(),
            });
        }
    });
    records
}

//------------------------------------------------------------------------------
// Alignment payloads
//------------------------------------------------------------------------------

/// Global placement of one detector unit, as stored by alignment databases
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlignTransform {
    pub id: u32,
    pub translation: Vector3,
    pub rotation: UnitQuaternion,
}

/// Alignment payload of every detector unit, in traversal order
pub fn alignments(root: &dyn Alignable) -> Vec<AlignTransform> {
    let mut transforms = Vec::new();
    walk(root, &mut |_, node| {
        if let Some(unit) = node.as_unit() {
            transforms.push(AlignTransform {
                id: unit.id(),
                translation: unit.global_position(),
                rotation: UnitQuaternion::from_rotation_matrix(&unit.global_rotation()),
            });
        }
    });
    transforms
}
