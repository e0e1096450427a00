//! Sparse matrix storage
//!
//! CSR is the single unified matrix interface the direct solver accepts;
//! the FEM layer converts its block-complex operator into one of these.

mod csr;

pub use csr::CsrMatrix;
