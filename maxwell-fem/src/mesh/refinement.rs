//! Uniform mesh refinement
//!
//! Red refinement of every element: triangles split into 4 children,
//! tetrahedra into 8 (corner tets plus an octahedron split along the
//! m02-m13 diagonal). Edge midpoints are shared between neighbors, so
//! the refined mesh stays conforming.

use super::types::{Element, ElementType, Mesh};
use std::collections::HashMap;

/// Edge represented by sorted node indices
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct Edge(usize, usize);

impl Edge {
    fn new(a: usize, b: usize) -> Self {
        if a < b { Edge(a, b) } else { Edge(b, a) }
    }
}

/// Shared edge-midpoint cache across elements
struct MidpointManager {
    edge_midpoints: HashMap<Edge, usize>,
}

impl MidpointManager {
    fn new() -> Self {
        Self {
            edge_midpoints: HashMap::new(),
        }
    }

    fn get_midpoint(&mut self, mesh: &mut Mesh, a: usize, b: usize) -> usize {
        let edge = Edge::new(a, b);
        if let Some(&mid_idx) = self.edge_midpoints.get(&edge) {
            mid_idx
        } else {
            let mid = mesh.nodes[a].midpoint(&mesh.nodes[b]);
            let idx = mesh.add_node(mid);
            self.edge_midpoints.insert(edge, idx);
            idx
        }
    }
}

/// Uniformly refine every element of the mesh once
///
/// Boundary faces are re-detected afterwards since all element
/// connectivity changes.
pub fn uniform_refinement(mesh: &mut Mesh) {
    let parents: Vec<Element> = std::mem::take(&mut mesh.elements);
    let mut midpoint_mgr = MidpointManager::new();
    let mut children: Vec<Element> = Vec::with_capacity(parents.len() * 8);

    for elem in &parents {
        let child_nodes: Vec<Vec<usize>> = match elem.element_type {
            ElementType::Triangle => {
                let v = elem.vertices().to_vec();
                let m01 = midpoint_mgr.get_midpoint(mesh, v[0], v[1]);
                let m12 = midpoint_mgr.get_midpoint(mesh, v[1], v[2]);
                let m20 = midpoint_mgr.get_midpoint(mesh, v[2], v[0]);

                vec![
                    vec![v[0], m01, m20],
                    vec![m01, v[1], m12],
                    vec![m20, m12, v[2]],
                    vec![m01, m12, m20],
                ]
            }
            ElementType::Tetrahedron => {
                let v = elem.vertices().to_vec();
                let m01 = midpoint_mgr.get_midpoint(mesh, v[0], v[1]);
                let m02 = midpoint_mgr.get_midpoint(mesh, v[0], v[2]);
                let m03 = midpoint_mgr.get_midpoint(mesh, v[0], v[3]);
                let m12 = midpoint_mgr.get_midpoint(mesh, v[1], v[2]);
                let m13 = midpoint_mgr.get_midpoint(mesh, v[1], v[3]);
                let m23 = midpoint_mgr.get_midpoint(mesh, v[2], v[3]);

                vec![
                    vec![v[0], m01, m02, m03],
                    vec![m01, v[1], m12, m13],
                    vec![m02, m12, v[2], m23],
                    vec![m03, m13, m23, v[3]],
                    vec![m01, m02, m03, m13],
                    vec![m01, m02, m12, m13],
                    vec![m02, m03, m13, m23],
                    vec![m02, m12, m13, m23],
                ]
            }
        };

        for nodes in child_nodes {
            let mut child = Element::new(elem.element_type, nodes, mesh.next_element_id);
            mesh.next_element_id += 1;
            child.parent_id = Some(elem.id);
            child.level = elem.level + 1;
            children.push(child);
        }
    }

    mesh.elements = children;
    mesh.detect_boundaries();
}
