//! Per-axis complex stretching factor
//!
//! Inside the computational box every axis stretches by exactly
//! `1 + 0i`. Inside the layer the imaginary part grows polynomially
//! with the distance into the layer:
//!
//! ```text
//! s_i(x) = 1 + i · (n·c / (ω · d_i^n)) · |x_i − b_i|^(n−1)
//! ```
//!
//! where `d_i` is the layer width on the triggered side, `b_i` the
//! computational-box bound on that side, `n = 2` the polynomial order
//! and `c = 10` the damping strength. Evaluated per quadrature point
//! during assembly; pure and allocation-free.

use crate::mesh::Point;
use crate::problem::PmlProblem;
use num_complex::Complex64;

/// Polynomial order of the stretching profile
const STRETCH_ORDER: f64 = 2.0;
/// Damping strength
const STRETCH_DAMPING: f64 = 10.0;

/// Evaluate the complex stretching factor on every axis at a point
///
/// Axes beyond the problem dimension stay at `1 + 0i`. At most one side
/// can trigger per axis since the computational box is disjoint from
/// both layer sides. Sides with zero width never trigger: their
/// computational bound coincides with the domain bound, so no mesh
/// point lies beyond it.
pub fn stretching(problem: &PmlProblem, x: &Point) -> [Complex64; 3] {
    let one = Complex64::new(1.0, 0.0);
    let mut dxs = [one; 3];

    let n = STRETCH_ORDER;
    let c = STRETCH_DAMPING;
    let comp = &problem.computational;
    let layer = &problem.layer;

    for (axis, dx) in dxs.iter_mut().enumerate().take(problem.dim) {
        let coord = x.coord(axis);

        if layer.width_hi[axis] > 0.0 && coord >= comp.max[axis] {
            let coeff = n * c / (problem.omega * layer.width_hi[axis].powf(n));
            *dx = one + Complex64::i() * coeff * (coord - comp.max[axis]).abs().powf(n - 1.0);
        }
        if layer.width_lo[axis] > 0.0 && coord <= comp.min[axis] {
            let coeff = n * c / (problem.omega * layer.width_lo[axis].powf(n));
            *dx = one + Complex64::i() * coeff * (coord - comp.min[axis]).abs().powf(n - 1.0);
        }
    }

    dxs
}
