//! Curl-curl integrator
//!
//! In 2D the curl of a vector field is scalar and the PML coefficient is
//! the scalar `1/det(J)`; in 3D the curl is a vector and the coefficient
//! the diagonal tensor `det(J)·(JᵀJ)⁻¹`. Both cases reduce to constant
//! per-element basis curls, so the integral is the coefficient at the
//! centroid times products of curls times the element measure.

use super::{element_geometry, TripletMatrix};
use crate::mesh::{Mesh, Point};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// `curl(N_i e_c)` in 2D, the scalar `∂_x(N e_y) − ∂_y(N e_x)`
fn curl_2d(grad: &[f64; 3], comp: usize) -> f64 {
    match comp {
        0 => -grad[1],
        _ => grad[0],
    }
}

/// `curl(N_i e_c) = ∇N_i × e_c` in 3D
fn curl_3d(grad: &[f64; 3], comp: usize) -> [f64; 3] {
    match comp {
        0 => [0.0, grad[2], -grad[1]],
        1 => [-grad[2], 0.0, grad[0]],
        _ => [grad[1], -grad[0], 0.0],
    }
}

fn collect_local<F>(mesh: &Mesh, local: F) -> Vec<(usize, usize, f64)>
where
    F: Fn(usize) -> Vec<(usize, usize, f64)> + Send + Sync,
{
    #[cfg(feature = "parallel")]
    {
        if mesh.num_elements() >= 64 {
            return (0..mesh.num_elements())
                .into_par_iter()
                .flat_map_iter(local)
                .collect();
        }
    }

    (0..mesh.num_elements()).flat_map(local).collect()
}

/// Assemble the 2D curl-curl matrix with a scalar coefficient field
pub fn assemble_curl_curl_2d<F>(mesh: &Mesh, coeff: F) -> TripletMatrix
where
    F: Fn(&Point) -> f64 + Sync,
{
    let dim = 2;
    let num_dofs = mesh.num_nodes() * dim;

    let local = |elem_idx: usize| {
        let elem = mesh.element(elem_idx);
        let geo = element_geometry(mesh, elem);
        let a = coeff(&geo.centroid);
        let verts = elem.vertices();

        let mut entries = Vec::with_capacity((verts.len() * dim).pow(2));
        for (i, &vi) in verts.iter().enumerate() {
            for ci in 0..dim {
                let curl_i = curl_2d(&geo.grads[i], ci);
                for (j, &vj) in verts.iter().enumerate() {
                    for cj in 0..dim {
                        let curl_j = curl_2d(&geo.grads[j], cj);
                        entries.push((
                            vi * dim + ci,
                            vj * dim + cj,
                            a * curl_i * curl_j * geo.measure,
                        ));
                    }
                }
            }
        }
        entries
    };

    let mut matrix = TripletMatrix::new(num_dofs, num_dofs);
    matrix.triplets = collect_local(mesh, local);
    matrix
}

/// Assemble the 3D curl-curl matrix with a diagonal tensor coefficient
pub fn assemble_curl_curl_3d<F>(mesh: &Mesh, coeff: F) -> TripletMatrix
where
    F: Fn(&Point) -> [f64; 3] + Sync,
{
    let dim = 3;
    let num_dofs = mesh.num_nodes() * dim;

    let local = |elem_idx: usize| {
        let elem = mesh.element(elem_idx);
        let geo = element_geometry(mesh, elem);
        let diag = coeff(&geo.centroid);
        let verts = elem.vertices();

        let mut entries = Vec::with_capacity((verts.len() * dim).pow(2));
        for (i, &vi) in verts.iter().enumerate() {
            for ci in 0..dim {
                let curl_i = curl_3d(&geo.grads[i], ci);
                for (j, &vj) in verts.iter().enumerate() {
                    for cj in 0..dim {
                        let curl_j = curl_3d(&geo.grads[j], cj);
                        let value: f64 = (0..3)
                            .map(|axis| diag[axis] * curl_i[axis] * curl_j[axis])
                            .sum();
                        entries.push((vi * dim + ci, vj * dim + cj, value * geo.measure));
                    }
                }
            }
        }
        entries
    };

    let mut matrix = TripletMatrix::new(num_dofs, num_dofs);
    matrix.triplets = collect_local(mesh, local);
    matrix
}
