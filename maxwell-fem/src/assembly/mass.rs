//! Vector mass integrator with a diagonal tensor coefficient
//!
//! The mass coefficient is `det(J)⁻¹·(JᵀJ)`, diagonal in the stretched
//! frame, so components never couple: the block for component `c` is
//! the scalar nodal mass matrix scaled by the tensor's `c`-th diagonal
//! entry at the centroid. The scalar mass matrix of linear elements is
//! closed-form: `measure/6` diagonal and `measure/12` off-diagonal on
//! triangles, `measure/10` and `measure/20` on tetrahedra.

use super::{element_geometry, TripletMatrix};
use crate::mesh::{ElementType, Mesh, Point};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

fn mass_weights(element_type: ElementType, measure: f64) -> (f64, f64) {
    match element_type {
        ElementType::Triangle => (measure / 6.0, measure / 12.0),
        ElementType::Tetrahedron => (measure / 10.0, measure / 20.0),
    }
}

/// Assemble the vector mass matrix with a diagonal tensor coefficient
pub fn assemble_vector_mass<F>(mesh: &Mesh, coeff: F) -> TripletMatrix
where
    F: Fn(&Point) -> [f64; 3] + Sync,
{
    let dim = mesh.dimension;
    let num_dofs = mesh.num_nodes() * dim;

    let local = |elem_idx: usize| {
        let elem = mesh.element(elem_idx);
        let geo = element_geometry(mesh, elem);
        let diag = coeff(&geo.centroid);
        let (w_diag, w_off) = mass_weights(elem.element_type, geo.measure);
        let verts = elem.vertices();

        let mut entries = Vec::with_capacity(verts.len() * verts.len() * dim);
        for (i, &vi) in verts.iter().enumerate() {
            for (j, &vj) in verts.iter().enumerate() {
                let w = if i == j { w_diag } else { w_off };
                for comp in 0..dim {
                    entries.push((vi * dim + comp, vj * dim + comp, diag[comp] * w));
                }
            }
        }
        entries
    };

    let mut matrix = TripletMatrix::new(num_dofs, num_dofs);

    #[cfg(feature = "parallel")]
    {
        if mesh.num_elements() >= 64 {
            matrix.triplets = (0..mesh.num_elements())
                .into_par_iter()
                .flat_map_iter(local)
                .collect();
            return matrix;
        }
    }

    matrix.triplets = (0..mesh.num_elements()).flat_map(local).collect();
    matrix
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::{unit_cube_tetrahedra, unit_square_triangles};
    use approx::assert_relative_eq;
    use ndarray::Array1;

    #[test]
    fn test_total_mass_unit_square() {
        // sum of all entries is the domain measure per component
        let mesh = unit_square_triangles(4);
        let m = assemble_vector_mass(&mesh, |_| [1.0; 3]);

        let total: f64 = m.triplets.iter().map(|&(_, _, v)| v).sum();
        assert_relative_eq!(total, 2.0, epsilon = 1e-12);
    }

    #[test]
    fn test_total_mass_unit_cube() {
        let mesh = unit_cube_tetrahedra(2);
        let m = assemble_vector_mass(&mesh, |_| [1.0; 3]);

        let total: f64 = m.triplets.iter().map(|&(_, _, v)| v).sum();
        assert_relative_eq!(total, 3.0, epsilon = 1e-12);
    }

    #[test]
    fn test_components_never_couple() {
        let mesh = unit_square_triangles(3);
        let dense = assemble_vector_mass(&mesh, |_| [1.0, 2.0, 0.0])
            .to_csr()
            .to_dense();

        for i in 0..dense.nrows() {
            for j in 0..dense.ncols() {
                if i % 2 != j % 2 {
                    assert_relative_eq!(dense[[i, j]], 0.0);
                }
            }
        }
    }

    #[test]
    fn test_tensor_scales_per_component() {
        // component 1 carries twice the coefficient of component 0
        let mesh = unit_square_triangles(4);
        let m = assemble_vector_mass(&mesh, |_| [1.0, 2.0, 0.0]).to_csr();

        let ones_x: Array1<f64> = Array1::from_shape_fn(m.num_cols, |d| {
            if d % 2 == 0 {
                1.0
            } else {
                0.0
            }
        });
        let ones_y: Array1<f64> = Array1::from_shape_fn(m.num_cols, |d| {
            if d % 2 == 1 {
                1.0
            } else {
                0.0
            }
        });

        let mass_x: f64 = m.matvec(&ones_x).iter().sum();
        let mass_y: f64 = m.matvec(&ones_y).iter().sum();
        assert_relative_eq!(mass_x, 1.0, epsilon = 1e-12);
        assert_relative_eq!(mass_y, 2.0, epsilon = 1e-12);
    }
}
