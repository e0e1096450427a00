//! Finite element assembly for the complex curl-curl system
//!
//! Vector nodal elements on triangles and tetrahedra: each node carries
//! `dim` scalar components, and the global DOF of component `c` at node
//! `n` is `n·dim + c`. Shape function gradients are constant per
//! element, so one-point (centroid) quadrature is exact for the
//! curl-curl term and the coefficient fields are sampled at the
//! centroid throughout.
//!
//! Integrators are real-valued; the complex system is produced by
//! running each integrator twice, once against the real and once
//! against the imaginary part of the PML coefficient, and combining the
//! four real matrices in [`system`].

mod curl_curl;
mod mass;
mod system;

pub use curl_curl::{assemble_curl_curl_2d, assemble_curl_curl_3d};
pub use mass::assemble_vector_mass;
pub use system::MaxwellSystem;

use crate::mesh::{Element, ElementType, Mesh, Point};
use solvers::CsrMatrix;

/// Sparse matrix under construction, in coordinate (triplet) form
///
/// Assembly pushes one triplet per local matrix entry; duplicates are
/// summed on conversion to CSR.
#[derive(Debug, Clone)]
pub struct TripletMatrix {
    pub num_rows: usize,
    pub num_cols: usize,
    pub triplets: Vec<(usize, usize, f64)>,
}

impl TripletMatrix {
    pub fn new(num_rows: usize, num_cols: usize) -> Self {
        Self {
            num_rows,
            num_cols,
            triplets: Vec::new(),
        }
    }

    pub fn push(&mut self, row: usize, col: usize, value: f64) {
        debug_assert!(row < self.num_rows && col < self.num_cols);
        self.triplets.push((row, col, value));
    }

    pub fn to_csr(&self) -> CsrMatrix<f64> {
        CsrMatrix::from_triplets(self.num_rows, self.num_cols, self.triplets.clone())
    }
}

/// Per-element geometric quantities shared by all integrators
///
/// `grads[i]` is the (constant) gradient of the scalar shape function of
/// local vertex `i`, padded with zeros beyond the element dimension.
#[derive(Debug, Clone, Copy)]
pub(crate) struct ElementGeometry {
    pub grads: [[f64; 3]; 4],
    pub measure: f64,
    pub centroid: Point,
}

pub(crate) fn element_geometry(mesh: &Mesh, elem: &Element) -> ElementGeometry {
    match elem.element_type {
        ElementType::Triangle => triangle_geometry(mesh, elem),
        ElementType::Tetrahedron => tetrahedron_geometry(mesh, elem),
    }
}

fn triangle_geometry(mesh: &Mesh, elem: &Element) -> ElementGeometry {
    let v = elem.vertices();
    let p0 = mesh.node(v[0]);
    let p1 = mesh.node(v[1]);
    let p2 = mesh.node(v[2]);

    let two_area = (p1.x - p0.x) * (p2.y - p0.y) - (p2.x - p0.x) * (p1.y - p0.y);

    let mut grads = [[0.0; 3]; 4];
    grads[0] = [(p1.y - p2.y) / two_area, (p2.x - p1.x) / two_area, 0.0];
    grads[1] = [(p2.y - p0.y) / two_area, (p0.x - p2.x) / two_area, 0.0];
    grads[2] = [(p0.y - p1.y) / two_area, (p1.x - p0.x) / two_area, 0.0];

    ElementGeometry {
        grads,
        measure: 0.5 * two_area.abs(),
        centroid: Point::new_2d(
            (p0.x + p1.x + p2.x) / 3.0,
            (p0.y + p1.y + p2.y) / 3.0,
        ),
    }
}

fn cross(a: [f64; 3], b: [f64; 3]) -> [f64; 3] {
    [
        a[1] * b[2] - a[2] * b[1],
        a[2] * b[0] - a[0] * b[2],
        a[0] * b[1] - a[1] * b[0],
    ]
}

fn tetrahedron_geometry(mesh: &Mesh, elem: &Element) -> ElementGeometry {
    let v = elem.vertices();
    let p0 = mesh.node(v[0]);
    let p1 = mesh.node(v[1]);
    let p2 = mesh.node(v[2]);
    let p3 = mesh.node(v[3]);

    let e1 = [p1.x - p0.x, p1.y - p0.y, p1.z - p0.z];
    let e2 = [p2.x - p0.x, p2.y - p0.y, p2.z - p0.z];
    let e3 = [p3.x - p0.x, p3.y - p0.y, p3.z - p0.z];

    let c23 = cross(e2, e3);
    let det = e1[0] * c23[0] + e1[1] * c23[1] + e1[2] * c23[2];

    // rows of the inverse Jacobian are the barycentric gradients
    let c31 = cross(e3, e1);
    let c12 = cross(e1, e2);

    let mut grads = [[0.0; 3]; 4];
    for axis in 0..3 {
        grads[1][axis] = c23[axis] / det;
        grads[2][axis] = c31[axis] / det;
        grads[3][axis] = c12[axis] / det;
        grads[0][axis] = -(grads[1][axis] + grads[2][axis] + grads[3][axis]);
    }

    ElementGeometry {
        grads,
        measure: det.abs() / 6.0,
        centroid: Point::new_3d(
            (p0.x + p1.x + p2.x + p3.x) / 4.0,
            (p0.y + p1.y + p2.y + p3.y) / 4.0,
            (p0.z + p1.z + p2.z + p3.z) / 4.0,
        ),
    }
}
