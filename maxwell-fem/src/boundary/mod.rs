//! Essential boundary conditions and DOF elimination

mod essential;

pub use essential::{EssentialBoundary, ReducedSystem};
