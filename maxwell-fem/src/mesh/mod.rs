//! Mesh types, generators, and uniform refinement
//!
//! Simplicial meshes (triangles in 2D, tetrahedra in 3D) with boundary
//! detection and red uniform refinement.

mod generators;
mod refinement;
mod types;

pub use generators::*;
pub use refinement::*;
pub use types::*;
