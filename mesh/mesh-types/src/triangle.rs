//! Triangles with resolved vertex positions.

use nalgebra::{Point3, Vector3};

/// A face with its three corner positions looked up.
///
/// Produced by [`MeshTopology::triangles`](crate::MeshTopology::triangles).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangle {
    /// First corner.
    pub v0: Point3<f64>,
    /// Second corner.
    pub v1: Point3<f64>,
    /// Third corner.
    pub v2: Point3<f64>,
}

impl Triangle {
    /// `(v1 - v0) × (v2 - v0)`: twice the area, pointing along the winding.
    fn scaled_normal(&self) -> Vector3<f64> {
        (self.v1 - self.v0).cross(&(self.v2 - self.v0))
    }

    /// Unit normal following the winding, `None` for a sliver.
    ///
    /// # Example
    ///
    /// ```
    /// use mesh_types::{Point3, Triangle};
    ///
    /// let floor = Triangle {
    ///     v0: Point3::new(0.0, 0.0, 0.0),
    ///     v1: Point3::new(1.0, 0.0, 0.0),
    ///     v2: Point3::new(0.0, 1.0, 0.0),
    /// };
    /// assert_eq!(floor.normal().map(|n| n.z), Some(1.0));
    /// ```
    #[must_use]
    pub fn normal(&self) -> Option<Vector3<f64>> {
        self.scaled_normal().try_normalize(f64::EPSILON)
    }

    /// Area of the face.
    #[inline]
    #[must_use]
    pub fn area(&self) -> f64 {
        0.5 * self.scaled_normal().norm()
    }

    /// Mean of the three corners.
    #[inline]
    #[must_use]
    pub fn centroid(&self) -> Point3<f64> {
        Point3::from((self.v0.coords + self.v1.coords + self.v2.coords) / 3.0)
    }
}
