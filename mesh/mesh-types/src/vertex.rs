//! Mesh vertices.

use nalgebra::Point3;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A corner of an [`IndexedMesh`](crate::IndexedMesh) face.
///
/// Extruded layers carry no per-vertex attributes: color lives on the
/// package object, not on the geometry.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Vertex {
    /// Position in millimeters.
    pub position: Point3<f64>,
}

impl Vertex {
    /// Vertex at `(x, y, z)`.
    #[inline]
    #[must_use]
    #[allow(clippy::missing_const_for_fn)] // Point3::new is not const in nalgebra
    pub fn from_coords(x: f64, y: f64, z: f64) -> Self {
        Self {
            position: Point3::new(x, y, z),
        }
    }
}

impl From<[f64; 3]> for Vertex {
    fn from([x, y, z]: [f64; 3]) -> Self {
        Self::from_coords(x, y, z)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn array_and_coords_agree() {
        let v: Vertex = [0.8, 1.6, 2.4].into();
        assert_eq!(v, Vertex::from_coords(0.8, 1.6, 2.4));
    }
}
