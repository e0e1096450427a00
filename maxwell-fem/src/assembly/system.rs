//! Global complex system assembly
//!
//! Combines the four real matrices (curl-curl and mass, each against
//! the real and imaginary part of its PML coefficient) into one complex
//! sparse operator `A = K − ω²·M` and assembles the load vector. The
//! volumetric Gaussian source is purely imaginary; the other variants
//! are driven entirely through their boundary data and keep a zero load
//! vector.

use super::{
    assemble_curl_curl_2d, assemble_curl_curl_3d, assemble_vector_mass, element_geometry,
};
use crate::excitation::volume_source_im;
use crate::mesh::Mesh;
use crate::pml::PmlCoefficients;
use crate::problem::{PmlProblem, ProblemVariant};
use ndarray::Array1;
use num_complex::Complex64;
use solvers::CsrMatrix;

/// The assembled global system `A·x = b`
#[derive(Debug, Clone)]
pub struct MaxwellSystem {
    pub num_dofs: usize,
    pub matrix: CsrMatrix<Complex64>,
    pub rhs: Array1<Complex64>,
}

impl MaxwellSystem {
    /// Assemble the full complex system for a problem configuration
    pub fn assemble(mesh: &Mesh, problem: &PmlProblem) -> Self {
        let dim = problem.dim;
        let num_dofs = mesh.num_nodes() * dim;
        let coeffs = PmlCoefficients::new(problem);

        let (k_re, k_im) = if dim == 2 {
            (
                assemble_curl_curl_2d(mesh, |x| coeffs.det_inv_re(x)),
                assemble_curl_curl_2d(mesh, |x| coeffs.det_inv_im(x)),
            )
        } else {
            (
                assemble_curl_curl_3d(mesh, |x| coeffs.det_jtj_inv_re(x)),
                assemble_curl_curl_3d(mesh, |x| coeffs.det_jtj_inv_im(x)),
            )
        };
        let m_re = assemble_vector_mass(mesh, |x| coeffs.det_inv_jtj_re(x));
        let m_im = assemble_vector_mass(mesh, |x| coeffs.det_inv_jtj_im(x));

        let omega2 = problem.omega * problem.omega;
        let mut triplets = Vec::with_capacity(
            k_re.triplets.len() + k_im.triplets.len() + m_re.triplets.len() + m_im.triplets.len(),
        );
        for &(r, c, v) in &k_re.triplets {
            triplets.push((r, c, Complex64::new(v, 0.0)));
        }
        for &(r, c, v) in &k_im.triplets {
            triplets.push((r, c, Complex64::new(0.0, v)));
        }
        for &(r, c, v) in &m_re.triplets {
            triplets.push((r, c, Complex64::new(-omega2 * v, 0.0)));
        }
        for &(r, c, v) in &m_im.triplets {
            triplets.push((r, c, Complex64::new(0.0, -omega2 * v)));
        }

        let matrix = CsrMatrix::from_triplets(num_dofs, num_dofs, triplets);
        let rhs = Self::assemble_rhs(mesh, problem, num_dofs);

        Self {
            num_dofs,
            matrix,
            rhs,
        }
    }

    fn assemble_rhs(mesh: &Mesh, problem: &PmlProblem, num_dofs: usize) -> Array1<Complex64> {
        let mut rhs = Array1::from_elem(num_dofs, Complex64::new(0.0, 0.0));
        if problem.variant != ProblemVariant::VolumetricLoad {
            return rhs;
        }

        let dim = problem.dim;
        for elem in &mesh.elements {
            let geo = element_geometry(mesh, elem);
            let f_im = volume_source_im(&geo.centroid, problem);
            let verts = elem.vertices();
            // ∫ N_i over the element is measure / num_vertices
            let weight = geo.measure / verts.len() as f64;

            for &v in verts {
                for comp in 0..dim {
                    rhs[v * dim + comp] += Complex64::new(0.0, f_im[comp] * weight);
                }
            }
        }

        rhs
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::{unit_cube_tetrahedra, unit_square_triangles};
    use crate::problem::{PmlProblem, ProblemVariant};
    use approx::assert_relative_eq;
    use std::f64::consts::PI;

    #[test]
    fn test_dimensions_2d() {
        let mesh = unit_square_triangles(4);
        let problem = PmlProblem::new(ProblemVariant::Scattering, &mesh, 1.0);
        let system = MaxwellSystem::assemble(&mesh, &problem);

        assert_eq!(system.num_dofs, mesh.num_nodes() * 2);
        assert_eq!(system.matrix.num_rows, system.num_dofs);
        assert_eq!(system.matrix.num_cols, system.num_dofs);
        assert_eq!(system.rhs.len(), system.num_dofs);
    }

    #[test]
    fn test_boundary_driven_variants_have_zero_rhs() {
        let mesh = unit_square_triangles(4);
        let problem = PmlProblem::new(ProblemVariant::Scattering, &mesh, 1.0);
        let system = MaxwellSystem::assemble(&mesh, &problem);

        for v in system.rhs.iter() {
            assert_eq!(*v, Complex64::new(0.0, 0.0));
        }
    }

    #[test]
    fn test_load_rhs_imaginary_first_component() {
        let mesh = unit_square_triangles(8);
        let problem = PmlProblem::new(ProblemVariant::VolumetricLoad, &mesh, 1.0);
        let system = MaxwellSystem::assemble(&mesh, &problem);

        let mut max_im = 0.0_f64;
        for (dof, v) in system.rhs.iter().enumerate() {
            assert_eq!(v.re, 0.0);
            if dof % 2 == 1 {
                // the Gaussian source only drives the first component
                assert_eq!(v.im, 0.0);
            }
            max_im = max_im.max(v.im.abs());
        }
        assert!(max_im > 0.0);
    }

    #[test]
    fn test_matrix_complex_symmetric() {
        // PML stretching produces complex symmetric, not Hermitian, operators
        let mesh = unit_square_triangles(4);
        let problem = PmlProblem::new(ProblemVariant::Scattering, &mesh, 1.0);
        let dense = MaxwellSystem::assemble(&mesh, &problem).matrix.to_dense();

        let mut saw_imaginary = false;
        for i in 0..dense.nrows() {
            for j in 0..i {
                assert_relative_eq!(dense[[i, j]].re, dense[[j, i]].re, epsilon = 1e-12);
                assert_relative_eq!(dense[[i, j]].im, dense[[j, i]].im, epsilon = 1e-12);
                if dense[[i, j]].im.abs() > 1e-12 {
                    saw_imaginary = true;
                }
            }
        }
        assert!(saw_imaginary, "PML must contribute imaginary entries");
    }

    #[test]
    fn test_interior_rows_match_unstretched_operator() {
        // with no stretching anywhere the operator is K - ω²M with real entries;
        // an interior DOF whose neighborhood avoids the layer sees exactly that
        let mesh = unit_cube_tetrahedra(4);
        let problem = PmlProblem::new(ProblemVariant::Waveguide, &mesh, 1.0);
        let system = MaxwellSystem::assemble(&mesh, &problem);

        // node at (0.25, 0.5, 0.5): all incident elements stay left of the layer
        let node = mesh
            .nodes
            .iter()
            .position(|p| {
                (p.x - 0.25).abs() < 1e-12 && (p.y - 0.5).abs() < 1e-12 && (p.z - 0.5).abs() < 1e-12
            })
            .expect("interior node");

        for comp in 0..3 {
            let row = node * 3 + comp;
            for (_, v) in system.matrix.row_entries(row) {
                assert_relative_eq!(v.im, 0.0, epsilon = 1e-12);
            }
        }
        assert_relative_eq!(problem.omega, 2.0 * PI);
    }
}
