//! Closed-form excitation and essential boundary data
//!
//! Per problem variant, an exact complex field used as Dirichlet data on
//! the truncation boundary and, for the load variant, a volumetric
//! source:
//!
//! - *Scattering, 2D*: dyadic Green's function built from Hankel
//!   functions of the first kind `Hₙ = Jₙ + i·Yₙ`, with its mixed second
//!   derivatives obtained by explicit chain-rule differentiation of the
//!   radial quantities.
//! - *Scattering, 3D*: outgoing spherical wave `exp(iωr)/r` and its
//!   derivatives.
//! - *Waveguide*: a single propagating mode
//!   `sin(π·z)·exp(i·k₁₀·x)` scaled by the mode impedance, forced to
//!   zero on the far (PML-side) face.
//! - *Cylindrical waveguide*: both tangential components set to one on
//!   the `z = 0` face.
//!
//! The scattering forms divide by the radial distance `r`; the singular
//! point `r = 0` is deliberately not guarded and yields non-finite
//! values there.

use crate::mesh::Point;
use crate::problem::{PmlProblem, ProblemVariant};
use num_complex::Complex64;
use spec_math::Bessel;
use std::f64::consts::PI;

/// Absolute tolerance for "on the outer domain boundary" comparisons
const BOUNDARY_TOL: f64 = 1e-13;

/// Hankel function of the first kind, `Hₙ¹(x) = Jₙ(x) + i·Yₙ(x)`
fn hankel1(order: f64, x: f64) -> Complex64 {
    Complex64::new(x.bessel_jv(order), x.bessel_yv(order))
}

/// Exact complex field of the active variant at a point
pub fn exact_field(x: &Point, problem: &PmlProblem) -> [Complex64; 3] {
    let zero = Complex64::new(0.0, 0.0);
    let mut field = [zero; 3];
    let zi = Complex64::i();
    let omega = problem.omega;

    match problem.variant {
        ProblemVariant::VolumetricLoad => {}
        ProblemVariant::Waveguide => {
            // T_10 mode, normalized by the characteristic impedance ω/π
            let k10 = (omega * omega - PI * PI).sqrt();
            let h0 = omega / PI;
            field[1] = -zi * omega / PI
                * (PI * x.z).sin()
                * (zi * k10 * x.x).exp()
                / h0;
        }
        ProblemVariant::CylindricalWaveguide => {
            if x.z == 0.0 {
                field[0] = Complex64::new(1.0, 0.0);
                field[1] = Complex64::new(1.0, 0.0);
            }
        }
        ProblemVariant::Scattering => {
            // source point at the domain-box centre
            if problem.dim == 2 {
                let x0 = x.x - problem.domain.center(0);
                let x1 = x.y - problem.domain.center(1);
                let r = (x0 * x0 + x1 * x1).sqrt();
                let beta = omega * r;

                // H₀ = J₀ + iY₀, H₀' = -H₁, H₀'' = H₂ - H₁/β  (scaled by ω)
                let h1 = hankel1(1.0, beta);
                let ho = hankel1(0.0, beta);
                let ho_r = -omega * h1;
                let ho_rr = -omega * omega * (h1 / beta - hankel1(2.0, beta));

                let r_x = x0 / r;
                let r_y = x1 / r;
                let r_xy = -(r_x / r) * r_y;
                let r_xx = (1.0 / r) * (1.0 - r_x * r_x);

                let val = 0.25 * zi * ho;
                let val_xx = 0.25 * zi * (r_xx * ho_r + r_x * r_x * ho_rr);
                let val_xy = 0.25 * zi * (r_xy * ho_r + r_x * r_y * ho_rr);

                field[0] = zi / omega * (omega * omega * val + val_xx);
                field[1] = zi / omega * val_xy;
            } else {
                let x0 = x.x - problem.domain.center(0);
                let x1 = x.y - problem.domain.center(1);
                let x2 = x.z - problem.domain.center(2);
                let r = (x0 * x0 + x1 * x1 + x2 * x2).sqrt();

                let r_x = x0 / r;
                let r_y = x1 / r;
                let r_z = x2 / r;
                let r_xx = (1.0 / r) * (1.0 - r_x * r_x);
                let r_yx = -(r_y / r) * r_x;
                let r_zx = -(r_z / r) * r_x;

                let val = (zi * omega * r).exp() / r;
                let val_r = val / r * (zi * omega - 1.0);
                let val_rr =
                    val / (r * r) * (-omega * omega * r * r - 2.0 * zi * omega * r + 2.0);

                let val_xx = val_rr * r_x * r_x + val_r * r_xx;
                let val_yx = val_rr * r_x * r_y + val_r * r_yx;
                let val_zx = val_rr * r_x * r_z + val_r * r_zx;

                let alpha = zi / (4.0 * PI * omega);
                field[0] = alpha * (omega * omega * val + val_xx);
                field[1] = alpha * val_yx;
                field[2] = alpha * val_zx;
            }
        }
    }

    field
}

/// Essential boundary data at a point
///
/// The closed-form value, suppressed on faces that coincide with the
/// outer PML-side domain boundary: scattering zeroes any point within
/// tolerance of the domain box on any axis, the waveguide zeroes the
/// far face `x₀ = domain_max₀`.
pub fn boundary_field(x: &Point, problem: &PmlProblem) -> [Complex64; 3] {
    let zero = [Complex64::new(0.0, 0.0); 3];

    match problem.variant {
        ProblemVariant::VolumetricLoad => zero,
        ProblemVariant::Scattering => {
            let on_outer = (0..problem.dim).any(|axis| {
                let c = x.coord(axis);
                (c - problem.domain.min[axis]).abs() < BOUNDARY_TOL
                    || (c - problem.domain.max[axis]).abs() < BOUNDARY_TOL
            });
            if on_outer {
                zero
            } else {
                exact_field(x, problem)
            }
        }
        ProblemVariant::Waveguide => {
            if (x.x - problem.domain.max[0]).abs() < BOUNDARY_TOL {
                zero
            } else {
                exact_field(x, problem)
            }
        }
        ProblemVariant::CylindricalWaveguide => exact_field(x, problem),
    }
}

/// Real part of the boundary data
pub fn boundary_field_re(x: &Point, problem: &PmlProblem) -> [f64; 3] {
    boundary_field(x, problem).map(|v| v.re)
}

/// Imaginary part of the boundary data
pub fn boundary_field_im(x: &Point, problem: &PmlProblem) -> [f64; 3] {
    boundary_field(x, problem).map(|v| v.im)
}

/// Volumetric source term (imaginary part)
///
/// Nonzero only for the load variant: a Gaussian centred on the
/// computational box, `f₀ = (n²/π)·exp(−n²·r²)` with `n = 5ω/π`.
pub fn volume_source_im(x: &Point, problem: &PmlProblem) -> [f64; 3] {
    let mut f = [0.0; 3];
    if problem.variant != ProblemVariant::VolumetricLoad {
        return f;
    }

    let mut r2 = 0.0;
    for axis in 0..problem.dim {
        let d = x.coord(axis) - problem.computational.center(axis);
        r2 += d * d;
    }

    let n = 5.0 * problem.omega / PI;
    let coeff = n * n / PI;
    f[0] = coeff * (-n * n * r2).exp();
    f
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::{unit_cube_tetrahedra, unit_square_triangles};
    use crate::problem::{PmlProblem, ProblemVariant};
    use approx::assert_relative_eq;

    #[test]
    fn test_hankel_matches_bessel_parts() {
        let h = hankel1(0.0, 1.5);
        assert_relative_eq!(h.re, 1.5_f64.bessel_jv(0.0));
        assert_relative_eq!(h.im, 1.5_f64.bessel_yv(0.0));
    }

    #[test]
    fn test_scattering_2d_finite_off_center() {
        let mesh = unit_square_triangles(4);
        let problem = PmlProblem::new(ProblemVariant::Scattering, &mesh, 1.0);

        let field = exact_field(&Point::new_2d(0.3, 0.6), &problem);
        assert!(field[0].norm().is_finite());
        assert!(field[1].norm().is_finite());
        assert!(field[0].norm() > 0.0);
        // z component untouched in 2D
        assert_relative_eq!(field[2].norm(), 0.0);
    }

    #[test]
    fn test_scattering_singular_at_center() {
        // the closed form divides by r; the singular point is unguarded
        let mesh = unit_square_triangles(4);
        let problem = PmlProblem::new(ProblemVariant::Scattering, &mesh, 1.0);

        let field = exact_field(&Point::new_2d(0.5, 0.5), &problem);
        assert!(!field[0].norm().is_finite());
    }

    #[test]
    fn test_scattering_boundary_data_suppressed_on_outer_boundary() {
        let mesh = unit_square_triangles(4);
        let problem = PmlProblem::new(ProblemVariant::Scattering, &mesh, 1.0);

        for p in [
            Point::new_2d(0.0, 0.0),
            Point::new_2d(1.0, 0.3),
            Point::new_2d(0.7, 1.0),
        ] {
            let field = boundary_field(&p, &problem);
            assert_relative_eq!(field[0].norm(), 0.0);
            assert_relative_eq!(field[1].norm(), 0.0);
        }

        // interior truncation points keep the closed form
        let field = boundary_field(&Point::new_2d(0.3, 0.6), &problem);
        assert!(field[0].norm() > 0.0);
    }

    #[test]
    fn test_waveguide_far_face_override() {
        let mesh = unit_cube_tetrahedra(2);
        // omega = 2π > π so the mode propagates
        let problem = PmlProblem::new(ProblemVariant::Waveguide, &mesh, 1.0);

        // mode value at the far face is nonzero...
        let p = Point::new_3d(1.0, 0.5, 0.5);
        assert!(exact_field(&p, &problem)[1].norm() > 0.0);
        // ...but the boundary data there is exactly zero
        let field = boundary_field(&p, &problem);
        for comp in field {
            assert_eq!(comp, Complex64::new(0.0, 0.0));
        }

        // elsewhere the mode survives
        let field = boundary_field(&Point::new_3d(0.0, 0.5, 0.5), &problem);
        assert!(field[1].norm() > 0.0);
    }

    #[test]
    fn test_waveguide_mode_shape() {
        let mesh = unit_cube_tetrahedra(2);
        let problem = PmlProblem::new(ProblemVariant::Waveguide, &mesh, 1.0);

        // sin(π z) vanishes at z = 0 and z = 1
        for z in [0.0, 1.0] {
            let field = exact_field(&Point::new_3d(0.2, 0.5, z), &problem);
            assert_relative_eq!(field[1].norm(), 0.0, epsilon = 1e-12);
        }
        // normalized amplitude: |E₁| = |sin(π z)|
        let field = exact_field(&Point::new_3d(0.2, 0.5, 0.5), &problem);
        assert_relative_eq!(field[1].norm(), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_cylindrical_unit_face() {
        let mesh = unit_cube_tetrahedra(2);
        let problem = PmlProblem::new(ProblemVariant::CylindricalWaveguide, &mesh, 1.0);

        let on_face = exact_field(&Point::new_3d(0.3, 0.4, 0.0), &problem);
        assert_eq!(on_face[0], Complex64::new(1.0, 0.0));
        assert_eq!(on_face[1], Complex64::new(1.0, 0.0));

        let off_face = exact_field(&Point::new_3d(0.3, 0.4, 0.5), &problem);
        assert_relative_eq!(off_face[0].norm(), 0.0);
        assert_relative_eq!(off_face[1].norm(), 0.0);
    }

    #[test]
    fn test_volume_source_load_only() {
        let mesh = unit_square_triangles(4);

        let load = PmlProblem::new(ProblemVariant::VolumetricLoad, &mesh, 1.0);
        let center = Point::new_2d(0.5, 0.5);
        let f = volume_source_im(&center, &load);
        let n = 5.0 * load.omega / PI;
        assert_relative_eq!(f[0], n * n / PI);
        assert_relative_eq!(f[1], 0.0);

        // decays away from the centre
        let f_off = volume_source_im(&Point::new_2d(0.7, 0.5), &load);
        assert!(f_off[0] < f[0]);

        let scatter = PmlProblem::new(ProblemVariant::Scattering, &mesh, 1.0);
        assert_relative_eq!(volume_source_im(&center, &scatter)[0], 0.0);
    }
}
