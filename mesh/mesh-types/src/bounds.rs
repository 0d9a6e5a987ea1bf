//! Axis-aligned bounding box.

use nalgebra::Point3;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Extent of a point set along each axis.
///
/// Packaging only ever asks for the vertical extent, through
/// [`Aabb::z_range`], to compare a mesh against its declared placement.
///
/// # Example
///
/// ```
/// use mesh_types::{Aabb, Point3};
///
/// let corners = [Point3::new(0.0, 0.0, 1.0), Point3::new(10.0, 10.0, 1.6)];
/// let aabb = Aabb::from_points(corners.iter());
/// assert_eq!(aabb.z_range(), Some((1.0, 1.6)));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Aabb {
    /// Lowest coordinate on each axis.
    pub min: Point3<f64>,
    /// Highest coordinate on each axis.
    pub max: Point3<f64>,
}

impl Aabb {
    /// The box of no points; `min` is `+inf` and `max` is `-inf`.
    #[must_use]
    #[allow(clippy::missing_const_for_fn)] // Point3::new is not const in nalgebra
    pub fn empty() -> Self {
        Self {
            min: Point3::new(f64::INFINITY, f64::INFINITY, f64::INFINITY),
            max: Point3::new(f64::NEG_INFINITY, f64::NEG_INFINITY, f64::NEG_INFINITY),
        }
    }

    /// Smallest box holding every point of `points`.
    #[must_use]
    pub fn from_points<'a>(points: impl Iterator<Item = &'a Point3<f64>>) -> Self {
        points.fold(Self::empty(), |aabb, p| Self {
            min: aabb.min.inf(p),
            max: aabb.max.sup(p),
        })
    }

    /// True when no point has been folded in.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.min.x > self.max.x || self.min.y > self.max.y || self.min.z > self.max.z
    }

    /// Vertical extent `(min_z, max_z)`, or `None` for an empty box.
    #[inline]
    #[must_use]
    pub fn z_range(&self) -> Option<(f64, f64)> {
        (!self.is_empty()).then_some((self.min.z, self.max.z))
    }
}

impl Default for Aabb {
    fn default() -> Self {
        Self::empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_has_no_z_range() {
        let aabb = Aabb::default();
        assert!(aabb.is_empty());
        assert_eq!(aabb.z_range(), None);
        assert_eq!(Aabb::from_points(std::iter::empty()), aabb);
    }

    #[test]
    fn from_points_takes_extremes_per_axis() {
        let points = [
            Point3::new(0.0, 5.0, 1.6),
            Point3::new(-2.0, 4.0, 1.0),
            Point3::new(3.0, -1.0, 1.2),
        ];
        let aabb = Aabb::from_points(points.iter());

        assert_eq!(aabb.min, Point3::new(-2.0, -1.0, 1.0));
        assert_eq!(aabb.max, Point3::new(3.0, 5.0, 1.6));
        assert_eq!(aabb.z_range(), Some((1.0, 1.6)));
    }
}
