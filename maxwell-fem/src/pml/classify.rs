//! Interior vs. absorbing-layer element classification
//!
//! Computed once after the final refinement; consumed read-only by the
//! error norms, which must exclude PML elements from physical-error
//! metrics. Labels index elements by local (per-partition) index.

use crate::mesh::Mesh;
use crate::problem::PmlProblem;
use serde::{Deserialize, Serialize};

/// Label for a mesh element
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ElementLabel {
    /// Entirely inside the computational box
    Interior,
    /// At least one vertex strictly outside the computational box
    Pml,
}

/// Classify every element of the (local) mesh
///
/// An element is `Pml` if any of its vertices has a coordinate on any
/// axis strictly outside the computational box.
pub fn classify_elements(mesh: &Mesh, problem: &PmlProblem) -> Vec<ElementLabel> {
    let comp = &problem.computational;

    mesh.elements
        .iter()
        .map(|elem| {
            let in_pml = elem.vertices().iter().any(|&v| {
                let node = &mesh.nodes[v];
                (0..problem.dim).any(|axis| {
                    let c = node.coord(axis);
                    c > comp.max[axis] || c < comp.min[axis]
                })
            });

            if in_pml {
                ElementLabel::Pml
            } else {
                ElementLabel::Interior
            }
        })
        .collect()
}
