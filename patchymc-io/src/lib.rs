
// Import the classes from the separate files
mod input;
mod trajectory;
mod utils;

// Re-export the classes to make them accessible from outside the module
pub use input::*;
pub use trajectory::*;
pub use utils::*;
