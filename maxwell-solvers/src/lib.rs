//! Direct solver backend for the frequency-domain Maxwell PML solver
//!
//! This crate provides the linear-algebra layer consumed by `maxwell-fem`:
//! a CSR sparse matrix for the assembled monolithic complex operator and a
//! dense LU factorization used as the one-shot direct solve.
//!
//! The system matrices arising from the PML formulation are complex
//! symmetric but not Hermitian, so the solve path makes no symmetry
//! assumptions (non-symmetric pattern throughout).
//!
//! # Example
//!
//! ```ignore
//! use solvers::{CsrMatrix, lu_solve};
//! use num_complex::Complex64;
//!
//! let matrix = CsrMatrix::from_triplets(n, n, triplets);
//! let x = lu_solve(&matrix.to_dense(), &rhs)?;
//! ```

pub mod direct;
pub mod sparse;
pub mod traits;

pub use direct::{lu_factorize, lu_solve, LuError, LuFactorization};
pub use sparse::CsrMatrix;
pub use traits::{ComplexField, LinearOperator};
