//! Problem variants and the run-wide immutable configuration
//!
//! Everything derived once from the mesh geometry at startup (angular
//! frequency, domain box, layer widths, computational box) is bundled
//! into [`PmlProblem`] and passed by reference into every component.
//! Nothing mutates it after construction; every cooperating process
//! performs the same deterministic derivation from globally-consistent
//! mesh bounds.

use crate::mesh::Mesh;
use crate::pml::{DomainBox, PmlLayer};
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// The problem variant, selected once at startup
///
/// Determines both the PML placement policy and the closed-form
/// excitation used for boundary data and sources.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProblemVariant {
    /// Volumetric Gaussian load, PML on all sides
    VolumetricLoad,
    /// Point-source scattering, PML on all sides
    Scattering,
    /// Rectangular waveguide, PML on the high side of axis 0 only
    Waveguide,
    /// Cylindrical waveguide, PML on the high side of the last axis only
    CylindricalWaveguide,
}

/// Run-wide immutable problem configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PmlProblem {
    /// Problem variant
    pub variant: ProblemVariant,
    /// Spatial dimension (2 or 3)
    pub dim: usize,
    /// Angular frequency ω = 2π·f
    pub omega: f64,
    /// Physical extent of the full mesh including the PML
    pub domain: DomainBox,
    /// Absorbing-layer width per axis and side
    pub layer: PmlLayer,
    /// Domain box shrunk inward by the layer widths
    pub computational: DomainBox,
}

impl PmlProblem {
    /// Derive the configuration from a mesh and a user frequency
    ///
    /// Bounds are taken from the given mesh; when called after
    /// partitioning, the caller must merge per-partition boxes with
    /// [`DomainBox::merge`] before constructing the problem.
    pub fn new(variant: ProblemVariant, mesh: &Mesh, frequency: f64) -> Self {
        let domain = DomainBox::from_mesh(mesh);
        Self::from_domain(variant, mesh.dimension, domain, frequency)
    }

    /// Derive the configuration from pre-computed (possibly merged) bounds
    pub fn from_domain(
        variant: ProblemVariant,
        dim: usize,
        domain: DomainBox,
        frequency: f64,
    ) -> Self {
        let omega = 2.0 * PI * frequency;
        let layer = PmlLayer::for_variant(variant, &domain, dim);
        let computational = layer.computational_box(&domain);

        Self {
            variant,
            dim,
            omega,
            domain,
            layer,
            computational,
        }
    }
}
