
// Import the classes from the separate files
mod configuration;
mod monomer;
mod particle;
mod space;

// Re-export the classes to make them accessible from outside the module
pub use configuration::*;
pub use monomer::*;
pub use particle::*;
pub use space::*;
