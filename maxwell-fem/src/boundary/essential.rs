//! Essential (Dirichlet) boundary DOFs and true-reduction elimination
//!
//! All components at every boundary node are essential and take the
//! closed-form excitation value. Elimination builds a strictly smaller
//! system over the free DOFs: constrained columns move their known
//! contribution to the right-hand side and constrained rows drop out,
//! along with the index maps needed to scatter a reduced solution back
//! to full length.

use crate::excitation::boundary_field;
use crate::mesh::Mesh;
use crate::problem::PmlProblem;
use ndarray::Array1;
use num_complex::Complex64;
use solvers::CsrMatrix;
use std::collections::BTreeSet;

/// Constrained DOFs and their prescribed complex values
#[derive(Debug, Clone)]
pub struct EssentialBoundary {
    /// Constrained DOF indices, sorted ascending
    pub dofs: Vec<usize>,
    /// Prescribed value per constrained DOF, parallel to `dofs`
    pub values: Vec<Complex64>,
}

impl EssentialBoundary {
    /// Constrain every component at every boundary node
    ///
    /// The mesh must have its boundary faces detected; values come from
    /// the variant's closed-form excitation, already suppressed on the
    /// PML-side outer faces.
    pub fn from_mesh(mesh: &Mesh, problem: &PmlProblem) -> Self {
        let dim = problem.dim;

        let mut boundary_nodes = BTreeSet::new();
        for face in &mesh.boundaries {
            boundary_nodes.extend(face.nodes.iter().copied());
        }

        let mut dofs = Vec::with_capacity(boundary_nodes.len() * dim);
        let mut values = Vec::with_capacity(boundary_nodes.len() * dim);
        for node in boundary_nodes {
            let field = boundary_field(mesh.node(node), problem);
            for comp in 0..dim {
                dofs.push(node * dim + comp);
                values.push(field[comp]);
            }
        }

        Self { dofs, values }
    }

    pub fn num_constrained(&self) -> usize {
        self.dofs.len()
    }
}

/// The reduced free-DOF system and its recovery maps
#[derive(Debug, Clone)]
pub struct ReducedSystem {
    /// Reduced operator over free DOFs only
    pub matrix: CsrMatrix<Complex64>,
    /// Reduced right-hand side with constrained columns folded in
    pub rhs: Array1<Complex64>,
    /// Reduced index -> full index
    free_dofs: Vec<usize>,
    /// Full-length vector holding the prescribed values, zero on free DOFs
    essential_values: Array1<Complex64>,
}

impl ReducedSystem {
    /// Eliminate constrained DOFs from a full system
    pub fn eliminate(
        matrix: &CsrMatrix<Complex64>,
        rhs: &Array1<Complex64>,
        bc: &EssentialBoundary,
    ) -> Self {
        let num_dofs = matrix.num_rows;

        let mut essential_values = Array1::from_elem(num_dofs, Complex64::new(0.0, 0.0));
        let mut constrained = vec![false; num_dofs];
        for (&dof, &value) in bc.dofs.iter().zip(&bc.values) {
            constrained[dof] = true;
            essential_values[dof] = value;
        }

        let free_dofs: Vec<usize> = (0..num_dofs).filter(|&d| !constrained[d]).collect();
        let mut full_to_reduced = vec![usize::MAX; num_dofs];
        for (reduced, &full) in free_dofs.iter().enumerate() {
            full_to_reduced[full] = reduced;
        }

        let num_free = free_dofs.len();
        let mut reduced_rhs = Array1::from_elem(num_free, Complex64::new(0.0, 0.0));
        let mut triplets = Vec::with_capacity(matrix.nnz());

        for (reduced_row, &full_row) in free_dofs.iter().enumerate() {
            let mut b = rhs[full_row];
            for (col, value) in matrix.row_entries(full_row) {
                if constrained[col] {
                    b -= value * essential_values[col];
                } else {
                    triplets.push((reduced_row, full_to_reduced[col], value));
                }
            }
            reduced_rhs[reduced_row] = b;
        }

        Self {
            matrix: CsrMatrix::from_triplets(num_free, num_free, triplets),
            rhs: reduced_rhs,
            free_dofs,
            essential_values,
        }
    }

    pub fn num_free(&self) -> usize {
        self.free_dofs.len()
    }

    /// Scatter a reduced solution back to a full-length field
    pub fn recover(&self, reduced: &Array1<Complex64>) -> Array1<Complex64> {
        let mut full = self.essential_values.clone();
        for (reduced_idx, &full_idx) in self.free_dofs.iter().enumerate() {
            full[full_idx] = reduced[reduced_idx];
        }
        full
    }
}
