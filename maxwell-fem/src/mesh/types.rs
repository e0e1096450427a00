//! Mesh types for 2D and 3D finite element analysis

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A point in 2D or 3D space
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Point {
    /// Create a 2D point (z = 0)
    pub fn new_2d(x: f64, y: f64) -> Self {
        Self { x, y, z: 0.0 }
    }

    /// Create a 3D point
    pub fn new_3d(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Coordinate along a spatial axis (0 = x, 1 = y, 2 = z)
    pub fn coord(&self, axis: usize) -> f64 {
        match axis {
            0 => self.x,
            1 => self.y,
            2 => self.z,
            _ => panic!("axis out of range: {axis}"),
        }
    }

    /// Euclidean distance to another point
    pub fn distance(&self, other: &Point) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        let dz = self.z - other.z;
        (dx * dx + dy * dy + dz * dz).sqrt()
    }

    /// Midpoint between two points
    pub fn midpoint(&self, other: &Point) -> Point {
        Point {
            x: 0.5 * (self.x + other.x),
            y: 0.5 * (self.y + other.y),
            z: 0.5 * (self.z + other.z),
        }
    }
}

impl From<(f64, f64)> for Point {
    fn from(p: (f64, f64)) -> Self {
        Point::new_2d(p.0, p.1)
    }
}

impl From<(f64, f64, f64)> for Point {
    fn from(p: (f64, f64, f64)) -> Self {
        Point::new_3d(p.0, p.1, p.2)
    }
}

/// Element type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ElementType {
    /// 2D triangle
    Triangle,
    /// 3D tetrahedron
    Tetrahedron,
}

impl ElementType {
    /// Number of vertices for this element type
    pub fn num_vertices(&self) -> usize {
        match self {
            ElementType::Triangle => 3,
            ElementType::Tetrahedron => 4,
        }
    }

    /// Spatial dimension of this element
    pub fn dimension(&self) -> usize {
        match self {
            ElementType::Triangle => 2,
            ElementType::Tetrahedron => 3,
        }
    }
}

/// A finite element with node indices
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Element {
    /// Element type
    pub element_type: ElementType,
    /// Vertex node indices
    pub nodes: Vec<usize>,
    /// Element ID for refinement tracking
    pub id: usize,
    /// Parent element ID (for refined elements)
    pub parent_id: Option<usize>,
    /// Refinement level
    pub level: usize,
}

impl Element {
    /// Create a new element
    pub fn new(element_type: ElementType, nodes: Vec<usize>, id: usize) -> Self {
        Self {
            element_type,
            nodes,
            id,
            parent_id: None,
            level: 0,
        }
    }

    /// Vertex nodes
    pub fn vertices(&self) -> &[usize] {
        &self.nodes[..self.element_type.num_vertices()]
    }
}

/// A boundary face (edge in 2D, triangle in 3D)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoundaryFace {
    /// Node indices defining this boundary face/edge
    pub nodes: Vec<usize>,
    /// Boundary attribute (all faces carry essential data by default)
    pub attribute: i32,
    /// Owning element index
    pub element_idx: usize,
}

/// A finite element mesh
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Mesh {
    /// Mesh dimension (2 or 3)
    pub dimension: usize,
    /// Node coordinates
    pub nodes: Vec<Point>,
    /// Elements
    pub elements: Vec<Element>,
    /// Boundary faces/edges
    pub boundaries: Vec<BoundaryFace>,
    /// Next element ID for refinement
    pub(crate) next_element_id: usize,
}

impl Mesh {
    /// Create a new empty mesh
    pub fn new(dimension: usize) -> Self {
        assert!(dimension == 2 || dimension == 3, "Dimension must be 2 or 3");
        Self {
            dimension,
            nodes: Vec::new(),
            elements: Vec::new(),
            boundaries: Vec::new(),
            next_element_id: 0,
        }
    }

    /// Add a node and return its index
    pub fn add_node(&mut self, point: Point) -> usize {
        let idx = self.nodes.len();
        self.nodes.push(point);
        idx
    }

    /// Add an element and return its index
    pub fn add_element(&mut self, element_type: ElementType, nodes: Vec<usize>) -> usize {
        let idx = self.elements.len();
        let id = self.next_element_id;
        self.next_element_id += 1;
        self.elements.push(Element::new(element_type, nodes, id));
        idx
    }

    /// Number of nodes
    pub fn num_nodes(&self) -> usize {
        self.nodes.len()
    }

    /// Number of elements
    pub fn num_elements(&self) -> usize {
        self.elements.len()
    }

    /// Get node coordinates
    pub fn node(&self, idx: usize) -> &Point {
        &self.nodes[idx]
    }

    /// Get element
    pub fn element(&self, idx: usize) -> &Element {
        &self.elements[idx]
    }

    /// Faces of an element (edges in 2D, triangles in 3D)
    pub fn element_faces(&self, elem: &Element) -> Vec<Vec<usize>> {
        let v = elem.vertices();
        match elem.element_type {
            ElementType::Triangle => vec![
                vec![v[0], v[1]],
                vec![v[1], v[2]],
                vec![v[2], v[0]],
            ],
            ElementType::Tetrahedron => vec![
                vec![v[0], v[1], v[2]],
                vec![v[0], v[1], v[3]],
                vec![v[0], v[2], v[3]],
                vec![v[1], v[2], v[3]],
            ],
        }
    }

    /// Detect boundary faces: faces owned by exactly one element
    pub fn detect_boundaries(&mut self) {
        self.boundaries.clear();

        let mut face_count: HashMap<Vec<usize>, (usize, usize)> = HashMap::new();

        for (elem_idx, elem) in self.elements.iter().enumerate() {
            for mut face in self.element_faces(elem) {
                face.sort_unstable();
                face_count
                    .entry(face)
                    .and_modify(|e| e.1 += 1)
                    .or_insert((elem_idx, 1));
            }
        }

        for (face_nodes, (elem_idx, count)) in face_count {
            if count == 1 {
                self.boundaries.push(BoundaryFace {
                    nodes: face_nodes,
                    attribute: 1,
                    element_idx: elem_idx,
                });
            }
        }
    }
}
