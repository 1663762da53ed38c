
// Import the classes from the separate files
mod acceptance_statistics;
mod metropolis;
mod movemaps;
mod nvt;
mod trait_movetype;
mod vmmc;

// Re-export the classes to make them accessible from outside the module
pub use acceptance_statistics::*;
pub use metropolis::*;
pub use movemaps::*;
pub use nvt::*;
pub use trait_movetype::*;
pub use vmmc::*;
