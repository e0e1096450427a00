//! Direct solvers
//!
//! LU factorization with partial pivoting. This is the only solve path:
//! the PML pipeline is a one-shot batch computation and uses no
//! iterative methods.

mod lu;

pub use lu::{lu_factorize, lu_solve, LuError, LuFactorization};
