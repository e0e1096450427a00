//! Domain and absorbing-layer geometry
//!
//! The domain box is the axis-aligned extent of the full mesh, PML
//! included. The layer widths depend on the problem variant:
//!
//! - scattering / volumetric load: every axis gets a layer on both
//!   sides, 25% of the axis extent each
//! - rectangular waveguide: axis 0 only, high side only, 25%
//! - cylindrical waveguide: last axis only, high side only, 12.5%
//!
//! The computational box is the domain box shrunk inward by the widths.

use crate::mesh::Mesh;
use crate::problem::ProblemVariant;
use serde::{Deserialize, Serialize};

/// Axis-aligned bounding box, per-axis `(min, max)`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DomainBox {
    pub min: [f64; 3],
    pub max: [f64; 3],
}

impl DomainBox {
    /// Extract the bounding box from the nodal coordinates of a mesh
    pub fn from_mesh(mesh: &Mesh) -> Self {
        let mut min = [f64::INFINITY; 3];
        let mut max = [f64::NEG_INFINITY; 3];

        for node in &mesh.nodes {
            for axis in 0..3 {
                let c = node.coord(axis);
                min[axis] = min[axis].min(c);
                max[axis] = max[axis].max(c);
            }
        }

        Self { min, max }
    }

    /// Merge with a box computed on another mesh partition
    ///
    /// When bounds are extracted after partitioning, every process must
    /// reduce its local box against all peers with this operation to
    /// recover the global extent.
    pub fn merge(&self, other: &DomainBox) -> DomainBox {
        let mut merged = *self;
        for axis in 0..3 {
            merged.min[axis] = merged.min[axis].min(other.min[axis]);
            merged.max[axis] = merged.max[axis].max(other.max[axis]);
        }
        merged
    }

    /// Extent of the box along an axis
    pub fn extent(&self, axis: usize) -> f64 {
        self.max[axis] - self.min[axis]
    }

    /// Centre of the box along an axis
    pub fn center(&self, axis: usize) -> f64 {
        0.5 * (self.min[axis] + self.max[axis])
    }
}

/// Absorbing-layer width per axis and side, zero where no layer exists
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PmlLayer {
    pub width_lo: [f64; 3],
    pub width_hi: [f64; 3],
}

impl PmlLayer {
    /// Layer placement policy for a problem variant
    pub fn for_variant(variant: ProblemVariant, domain: &DomainBox, dim: usize) -> Self {
        let mut width_lo = [0.0; 3];
        let mut width_hi = [0.0; 3];

        match variant {
            ProblemVariant::Scattering | ProblemVariant::VolumetricLoad => {
                for axis in 0..dim {
                    let w = 0.25 * domain.extent(axis);
                    width_lo[axis] = w;
                    width_hi[axis] = w;
                }
            }
            ProblemVariant::Waveguide => {
                width_hi[0] = 0.25 * domain.extent(0);
            }
            ProblemVariant::CylindricalWaveguide => {
                width_hi[dim - 1] = 0.125 * domain.extent(dim - 1);
            }
        }

        Self { width_lo, width_hi }
    }

    /// The computational (non-absorbing) sub-box
    pub fn computational_box(&self, domain: &DomainBox) -> DomainBox {
        let mut comp = *domain;
        for axis in 0..3 {
            comp.min[axis] = domain.min[axis] + self.width_lo[axis];
            comp.max[axis] = domain.max[axis] - self.width_hi[axis];
        }
        comp
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::{unit_cube_tetrahedra, unit_square_triangles};
    use approx::assert_relative_eq;

    #[test]
    fn test_bounds_from_mesh() {
        let mesh = unit_square_triangles(3);
        let domain = DomainBox::from_mesh(&mesh);

        assert_relative_eq!(domain.min[0], 0.0);
        assert_relative_eq!(domain.max[0], 1.0);
        assert_relative_eq!(domain.min[1], 0.0);
        assert_relative_eq!(domain.max[1], 1.0);
        // unused axis collapses to the z = 0 plane
        assert_relative_eq!(domain.extent(2), 0.0);
    }

    #[test]
    fn test_merge_partition_bounds() {
        let a = DomainBox {
            min: [0.0, 0.0, 0.0],
            max: [0.5, 1.0, 0.0],
        };
        let b = DomainBox {
            min: [0.5, -1.0, 0.0],
            max: [1.0, 1.0, 0.0],
        };
        let merged = a.merge(&b);

        assert_relative_eq!(merged.min[0], 0.0);
        assert_relative_eq!(merged.max[0], 1.0);
        assert_relative_eq!(merged.min[1], -1.0);
        assert_relative_eq!(merged.max[1], 1.0);
    }

    #[test]
    fn test_scattering_layer_both_sides() {
        let mesh = unit_square_triangles(2);
        let domain = DomainBox::from_mesh(&mesh);
        let layer = PmlLayer::for_variant(ProblemVariant::Scattering, &domain, 2);

        for axis in 0..2 {
            assert_relative_eq!(layer.width_lo[axis], 0.25);
            assert_relative_eq!(layer.width_hi[axis], 0.25);
        }

        let comp = layer.computational_box(&domain);
        assert_relative_eq!(comp.min[0], 0.25);
        assert_relative_eq!(comp.max[0], 0.75);
    }

    #[test]
    fn test_waveguide_layer_high_side_only() {
        let mesh = unit_cube_tetrahedra(2);
        let domain = DomainBox::from_mesh(&mesh);
        let layer = PmlLayer::for_variant(ProblemVariant::Waveguide, &domain, 3);

        assert_relative_eq!(layer.width_hi[0], 0.25);
        assert_relative_eq!(layer.width_lo[0], 0.0);
        for axis in 1..3 {
            assert_relative_eq!(layer.width_lo[axis], 0.0);
            assert_relative_eq!(layer.width_hi[axis], 0.0);
        }

        let comp = layer.computational_box(&domain);
        assert_relative_eq!(comp.max[0], 0.75);
        // axes without a layer are fully computational
        assert_relative_eq!(comp.max[1], domain.max[1]);
        assert_relative_eq!(comp.min[2], domain.min[2]);
    }

    #[test]
    fn test_cylindrical_layer_last_axis() {
        let mesh = unit_cube_tetrahedra(2);
        let domain = DomainBox::from_mesh(&mesh);
        let layer = PmlLayer::for_variant(ProblemVariant::CylindricalWaveguide, &domain, 3);

        assert_relative_eq!(layer.width_hi[2], 0.125);
        assert_relative_eq!(layer.width_lo[2], 0.0);
        assert_relative_eq!(layer.width_hi[0], 0.0);

        let comp = layer.computational_box(&domain);
        assert_relative_eq!(comp.max[2], 0.875);
    }
}
