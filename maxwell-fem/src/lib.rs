//! Frequency-domain Maxwell solver with a Perfectly Matched Layer
//!
//! Solves the second-order indefinite Maxwell equation
//! `curl curl E - ω² E = f` on a truncated domain surrounded by a PML:
//! an artificial absorbing region implemented via complex coordinate
//! stretching that attenuates outgoing waves so a finite mesh
//! approximates an unbounded one.
//!
//! # Pipeline
//!
//! 1. Extract the domain bounding box and derive the absorbing-layer
//!    geometry for the selected problem variant ([`pml`]).
//! 2. Classify mesh elements as interior or PML ([`pml::classify_elements`]).
//! 3. Assemble the complex curl-curl + mass system from the PML
//!    coefficient fields ([`assembly`]).
//! 4. Eliminate essential boundary DOFs against the closed-form
//!    excitation data ([`boundary`], [`excitation`]).
//! 5. Convert to one monolithic sparse matrix, direct-solve, and recover
//!    the full complex field ([`pipeline`]).
//!
//! # Example
//!
//! ```ignore
//! use maxwell_fem::mesh::unit_square_triangles;
//! use maxwell_fem::pipeline::{run, PipelineConfig};
//! use maxwell_fem::problem::ProblemVariant;
//!
//! let mesh = unit_square_triangles(8);
//! let config = PipelineConfig::new(ProblemVariant::Scattering, 1.0);
//! let solution = run(mesh, &config)?;
//! ```

pub mod assembly;
pub mod boundary;
pub mod excitation;
pub mod mesh;
pub mod pipeline;
pub mod pml;
pub mod problem;
