//! PML coefficient fields for the weak form
//!
//! From the per-axis stretching factors `dxs` the weak form needs three
//! quantities, each split into real and imaginary parts at the
//! assembler boundary:
//!
//! - `1 / det(J)`: the scalar 2D curl-curl coefficient
//! - `det(J)·(JᵀJ)⁻¹`: the diagonal tensor `det / dxs_i²`, used as the
//!   3D curl-curl coefficient
//! - `det(J)⁻¹·(JᵀJ)`: the diagonal tensor `dxs_i² / det`, the mass
//!   coefficient in both dimensions
//!
//! Every evaluation recomputes the stretching vector fresh from the
//! query point, so repeated queries at the same point are bit-identical.

use crate::mesh::Point;
use crate::pml::stretch::stretching;
use crate::problem::PmlProblem;
use num_complex::Complex64;

/// Complex coefficient evaluator bound to a problem configuration
///
/// The complex-valued methods are the single source of truth; the
/// `_re`/`_im` projections are the thin wrappers the real-valued
/// assembler integrators consume.
#[derive(Debug, Clone, Copy)]
pub struct PmlCoefficients<'a> {
    problem: &'a PmlProblem,
}

impl<'a> PmlCoefficients<'a> {
    pub fn new(problem: &'a PmlProblem) -> Self {
        Self { problem }
    }

    fn det(&self, dxs: &[Complex64; 3]) -> Complex64 {
        let mut det = Complex64::new(1.0, 0.0);
        for dx in dxs.iter().take(self.problem.dim) {
            det *= dx;
        }
        det
    }

    /// `1 / det(J)`, the scalar curl-curl coefficient in 2D
    pub fn det_inv(&self, x: &Point) -> Complex64 {
        let dxs = stretching(self.problem, x);
        self.det(&dxs).inv()
    }

    /// `det(J)·(JᵀJ)⁻¹`, the diagonal curl-curl tensor in 3D
    pub fn det_jtj_inv(&self, x: &Point) -> [Complex64; 3] {
        let dxs = stretching(self.problem, x);
        let det = self.det(&dxs);

        let mut diag = [Complex64::new(0.0, 0.0); 3];
        for (i, dx) in dxs.iter().enumerate().take(self.problem.dim) {
            diag[i] = det / (dx * dx);
        }
        diag
    }

    /// `det(J)⁻¹·(JᵀJ)`, the diagonal mass tensor
    pub fn det_inv_jtj(&self, x: &Point) -> [Complex64; 3] {
        let dxs = stretching(self.problem, x);
        let det = self.det(&dxs);

        let mut diag = [Complex64::new(0.0, 0.0); 3];
        for (i, dx) in dxs.iter().enumerate().take(self.problem.dim) {
            diag[i] = (dx * dx) / det;
        }
        diag
    }

    pub fn det_inv_re(&self, x: &Point) -> f64 {
        self.det_inv(x).re
    }

    pub fn det_inv_im(&self, x: &Point) -> f64 {
        self.det_inv(x).im
    }

    pub fn det_jtj_inv_re(&self, x: &Point) -> [f64; 3] {
        self.det_jtj_inv(x).map(|v| v.re)
    }

    pub fn det_jtj_inv_im(&self, x: &Point) -> [f64; 3] {
        self.det_jtj_inv(x).map(|v| v.im)
    }

    pub fn det_inv_jtj_re(&self, x: &Point) -> [f64; 3] {
        self.det_inv_jtj(x).map(|v| v.re)
    }

    pub fn det_inv_jtj_im(&self, x: &Point) -> [f64; 3] {
        self.det_inv_jtj(x).map(|v| v.im)
    }
}
