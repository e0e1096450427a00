//! Perfectly Matched Layer construction
//!
//! Complex coordinate stretching that attenuates outgoing waves inside
//! an absorbing layer surrounding the computational domain:
//!
//! - [`geometry`]: domain bounding box, layer widths, computational box
//! - [`stretch`]: per-axis complex stretching factor
//! - [`coefficients`]: the coefficient fields consumed by the weak form
//! - [`classify`]: interior vs. absorbing-layer element labels

mod classify;
mod coefficients;
mod geometry;
mod stretch;

pub use classify::{classify_elements, ElementLabel};
pub use coefficients::PmlCoefficients;
pub use geometry::{DomainBox, PmlLayer};
pub use stretch::stretching;
