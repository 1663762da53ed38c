mod matrix;
mod testing_macros;
mod vec3;

pub use matrix::Matrix3x3;
pub use vec3::{random_unit_versor, Vec3};
