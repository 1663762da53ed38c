
// Import the classes from the separate files
mod evaluator;
mod potentials;

// Re-export the classes to make them accessible from outside the module
pub use evaluator::*;
pub use potentials::*;
