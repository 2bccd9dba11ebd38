use nalgebra;

pub use itertools::Itertools;

//------------------------------------------------------------------------------
// Types
//------------------------------------------------------------------------------

/// Matrix (3 x 3)
pub type Matrix3 = nalgebra::Matrix3<f64>;

pub type Vector3 = nalgebra::Vector3<f64>;

pub type UnitQuaternion = nalgebra::UnitQuaternion<f64>;

pub type Rotation3 = nalgebra::Rotation3<f64>;

//------------------------------------------------------------------------------
// Traits
//------------------------------------------------------------------------------

/// Cylindrical/spherical views of a global position.
pub trait SphericalExt {
    /// Azimuth around the z axis, in (-pi, pi]
    fn phi(&self) -> f64;
    /// Distance from the z axis
    fn rho(&self) -> f64;
    /// Polar angle from the +z axis, in [0, pi]
    fn theta(&self) -> f64;
}

impl SphericalExt for Vector3 {
    fn phi(&self) -> f64 {
        if self[0] == 0. && self[1] == 0. {
            0.
        } else {
            self[1].atan2(self[0])
        }
    }
    fn rho(&self) -> f64 {
        self[0].hypot(self[1])
    }
    fn theta(&self) -> f64 {
        if self.rho() == 0. && self[2] == 0. {
            0.
        } else {
            self.rho().atan2(self[2])
        }
    }
}

pub trait RotationExt {
    /// Rotation about the local z axis of this frame: R * Rz(rad)
    fn rotated_about_local_z(&self, rad: f64) -> Rotation3;
    /// Rows of the matrix, xx xy xz / yx yy yz / zx zy zz
    fn rows(&self) -> [[f64; 3]; 3];
}

impl RotationExt for Rotation3 {
    fn rotated_about_local_z(&self, rad: f64) -> Rotation3 {
        self * Rotation3::from_axis_angle(&Vector3::z_axis(), rad)
    }
    fn rows(&self) -> [[f64; 3]; 3] {
        let m = self.matrix();
        [
            [m[(0, 0)], m[(0, 1)], m[(0, 2)]],
            [m[(1, 0)], m[(1, 1)], m[(1, 2)]],
            [m[(2, 0)], m[(2, 1)], m[(2, 2)]],
        ]
    }
}
