use std::fmt;
use std::ops::{Add, AddAssign, Div, Index, Mul, Neg, Sub, SubAssign};

use rand::Rng;

/// A vector in a 3D Cartesian space.
///
/// Positions, displacements and patch directions are all stored as `Vec3` values.
#[derive(Clone, Copy, Default, PartialEq)]
pub struct Vec3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vec3 {
    pub fn new(x: f64, y: f64, z: f64) -> Vec3 {
        Vec3 { x, y, z }
    }

    /// Length of this vector
    pub fn length(&self) -> f64 {
        self.length_squared().sqrt()
    }

    /// Squared length of this vector
    #[inline(always)]
    pub fn length_squared(&self) -> f64 {
        self.x * self.x + self.y * self.y + self.z * self.z
    }

    /// Dot product between this vector and `rhs`
    #[inline(always)]
    pub fn dot(&self, rhs: &Vec3) -> f64 {
        self.x * rhs.x + self.y * rhs.y + self.z * rhs.z
    }

    /// Rescales this vector to unit length.
    ///
    /// A zero vector is left unchanged.
    pub fn normalize(&mut self) {
        let l = self.length();
        if l > 0.0 {
            self.x /= l;
            self.y /= l;
            self.z /= l;
        }
    }

    /// Returns a unit-length copy of this vector
    pub fn versor(&self) -> Vec3 {
        let mut v = *self;
        v.normalize();
        v
    }
}

impl fmt::Debug for Vec3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{:.4}, {:.4}, {:.4}]", self.x, self.y, self.z)
    }
}

impl Index<usize> for Vec3 {
    type Output = f64;
    fn index(&self, i: usize) -> &f64 {
        match i {
            0 => &self.x,
            1 => &self.y,
            2 => &self.z,
            _ => panic!("Vec3 index out of range: {}", i),
        }
    }
}

impl Add<Vec3> for Vec3 {
    type Output = Vec3;
    fn add(self, rhs: Vec3) -> Vec3 {
        Vec3::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl AddAssign<Vec3> for Vec3 {
    fn add_assign(&mut self, rhs: Vec3) {
        self.x += rhs.x;
        self.y += rhs.y;
        self.z += rhs.z;
    }
}

impl Sub<Vec3> for Vec3 {
    type Output = Vec3;
    fn sub(self, rhs: Vec3) -> Vec3 {
        Vec3::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl SubAssign<Vec3> for Vec3 {
    fn sub_assign(&mut self, rhs: Vec3) {
        self.x -= rhs.x;
        self.y -= rhs.y;
        self.z -= rhs.z;
    }
}

impl Neg for Vec3 {
    type Output = Vec3;
    fn neg(self) -> Vec3 {
        Vec3::new(-self.x, -self.y, -self.z)
    }
}

impl Mul<f64> for Vec3 {
    type Output = Vec3;
    fn mul(self, rhs: f64) -> Vec3 {
        Vec3::new(self.x * rhs, self.y * rhs, self.z * rhs)
    }
}

impl Mul<Vec3> for f64 {
    type Output = Vec3;
    fn mul(self, rhs: Vec3) -> Vec3 {
        rhs * self
    }
}

impl Div<f64> for Vec3 {
    type Output = Vec3;
    fn div(self, rhs: f64) -> Vec3 {
        Vec3::new(self.x / rhs, self.y / rhs, self.z / rhs)
    }
}

/// Draws a random vector uniformly distributed on the unit sphere.
///
/// Uses the Marsaglia rejection method: a pair `(u, v)` is drawn from the unit
/// disk and mapped onto the sphere without any trigonometric calls.
///
/// # Example
/// ```rust
/// use rand::SeedableRng;
/// use rand::rngs::SmallRng;
/// use patchymc_numerical::random_unit_versor;
///
/// let mut rng = SmallRng::seed_from_u64(42);
/// let v = random_unit_versor(&mut rng);
/// assert!((v.length() - 1.0).abs() < 1e-12);
/// ```
pub fn random_unit_versor<R: Rng>(rng: &mut R) -> Vec3 {
    loop {
        let ran1: f64 = 1.0 - 2.0 * rng.gen_range(0.0..1.0);
        let ran2: f64 = 1.0 - 2.0 * rng.gen_range(0.0..1.0);
        let ransq = ran1 * ran1 + ran2 * ran2;
        if ransq < 1.0 {
            let ranh = 2.0 * (1.0 - ransq).sqrt();
            return Vec3::new(ran1 * ranh, ran2 * ranh, 1.0 - 2.0 * ransq);
        }
    }
}
