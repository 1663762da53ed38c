use std::fmt;
use std::ops::{Index, IndexMut};

use crate::vec3::Vec3;

/// A 3x3 matrix used for rotations and reflections.
///
/// Elements are stored row-wise in an `[f64; 9]` array.
///
/// # Example
/// ```rust
/// use patchymc_numerical::Matrix3x3;
///
/// let unit = Matrix3x3::identity();
/// assert_eq!(unit[0], 1.0); assert_eq!(unit[4], 1.0); assert_eq!(unit[8], 1.0);
/// ```
#[derive(Clone, Copy, Default, PartialEq)]
pub struct Matrix3x3 {
    array: [f64; 9],
}

impl Index<usize> for Matrix3x3 {
    type Output = f64;
    fn index(&self, i: usize) -> &f64 {
        &self.array[i]
    }
}

impl IndexMut<usize> for Matrix3x3 {
    fn index_mut(&mut self, i: usize) -> &mut f64 {
        &mut self.array[i]
    }
}

impl fmt::Debug for Matrix3x3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[ [{:.4}, {:.4}, {:.4}], [{:.4}, {:.4}, {:.4}], [{:.4}, {:.4}, {:.4}] ]",
            self.array[0], self.array[1], self.array[2],
            self.array[3], self.array[4], self.array[5],
            self.array[6], self.array[7], self.array[8]
        )
    }
}

impl Matrix3x3 {
    /// Constructs a matrix from an array of 9 elements given row-wise.
    pub fn from_array(m: [f64; 9]) -> Matrix3x3 {
        Matrix3x3 { array: m }
    }

    /// The identity transformation
    pub fn identity() -> Matrix3x3 {
        Matrix3x3::from_array([1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0])
    }

    /// Builds the rotation by `angle` radians about an axis through the origin.
    ///
    /// The axis is normalised internally; the rotation follows the right-hand rule.
    ///
    /// # Arguments
    /// * `axis` - direction of the rotation axis
    /// * `angle` - rotation angle in radians
    pub fn rotation_about_axis(axis: &Vec3, angle: f64) -> Matrix3x3 {
        let u = axis.versor();
        let c = angle.cos();
        let s = angle.sin();
        let t = 1.0 - c;
        Matrix3x3::from_array([
            t * u.x * u.x + c,
            t * u.x * u.y - s * u.z,
            t * u.x * u.z + s * u.y,
            t * u.x * u.y + s * u.z,
            t * u.y * u.y + c,
            t * u.y * u.z - s * u.x,
            t * u.x * u.z - s * u.y,
            t * u.y * u.z + s * u.x,
            t * u.z * u.z + c,
        ])
    }

    /// Builds the Householder reflection in the plane with unit normal `n`.
    ///
    /// The result is `I - 2 n n^T`; the normal is normalised internally.
    pub fn reflection_in_plane(normal: &Vec3) -> Matrix3x3 {
        let n = normal.versor();
        Matrix3x3::from_array([
            1.0 - 2.0 * n.x * n.x,
            -2.0 * n.x * n.y,
            -2.0 * n.x * n.z,
            -2.0 * n.y * n.x,
            1.0 - 2.0 * n.y * n.y,
            -2.0 * n.y * n.z,
            -2.0 * n.z * n.x,
            -2.0 * n.z * n.y,
            1.0 - 2.0 * n.z * n.z,
        ])
    }

    /// Multiplies this matrix by a vector, returning `M v`
    pub fn mul_vec(&self, v: &Vec3) -> Vec3 {
        let m = &self.array;
        Vec3::new(
            m[0] * v.x + m[1] * v.y + m[2] * v.z,
            m[3] * v.x + m[4] * v.y + m[5] * v.z,
            m[6] * v.x + m[7] * v.y + m[8] * v.z,
        )
    }

    /// Multiplies this matrix by another matrix, returning `self * rhs`
    pub fn mul_mat(&self, rhs: &Matrix3x3) -> Matrix3x3 {
        let a = &self.array;
        let b = &rhs.array;
        Matrix3x3::from_array([
            a[0] * b[0] + a[1] * b[3] + a[2] * b[6],
            a[0] * b[1] + a[1] * b[4] + a[2] * b[7],
            a[0] * b[2] + a[1] * b[5] + a[2] * b[8],
            a[3] * b[0] + a[4] * b[3] + a[5] * b[6],
            a[3] * b[1] + a[4] * b[4] + a[5] * b[7],
            a[3] * b[2] + a[4] * b[5] + a[5] * b[8],
            a[6] * b[0] + a[7] * b[3] + a[8] * b[6],
            a[6] * b[1] + a[7] * b[4] + a[8] * b[7],
            a[6] * b[2] + a[7] * b[5] + a[8] * b[8],
        ])
    }

    /// Returns the transpose of this matrix.
    ///
    /// For a rotation matrix the transpose is its inverse.
    pub fn transposed(&self) -> Matrix3x3 {
        let m = &self.array;
        Matrix3x3::from_array([m[0], m[3], m[6], m[1], m[4], m[7], m[2], m[5], m[8]])
    }

    /// Determinant of this matrix
    pub fn det(&self) -> f64 {
        let m = &self.array;
        m[0] * (m[4] * m[8] - m[5] * m[7]) - m[1] * (m[3] * m[8] - m[5] * m[6])
            + m[2] * (m[3] * m[7] - m[4] * m[6])
    }
}
