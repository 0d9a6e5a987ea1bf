//! Per-material pixel occupancy.

use mesh_types::IndexedMesh;

use crate::error::{RasterError, RasterResult};
use crate::extrude::{Extrusion, extrude_layer};

/// Largest corner count whose vertices (two levels, plus split corners) still
/// fit in `u32` indices.
const MAX_CORNERS: usize = (u32::MAX / 4) as usize;

/// A rectangular grid of occupied/unoccupied pixels for one material.
///
/// Dimensions are fixed at creation. Pixels can only be turned on; the
/// occupied set is then extruded into a solid with [`RasterLayer::extrude`].
///
/// Storage is a flat row-major arena of flags.
///
/// # Example
///
/// ```
/// use mesh_raster::{Extrusion, RasterLayer};
/// use mesh_types::MeshTopology;
///
/// let mut layer = RasterLayer::new(4, 4).unwrap();
/// layer.mark(1, 1).unwrap();
/// layer.mark(2, 1).unwrap();
///
/// let mesh = layer.extrude(&Extrusion::new(0.0, 1.0, 0.5, 0.5)).unwrap();
/// assert!((mesh.signed_volume() - 0.5).abs() < 1e-12);
/// assert_eq!(mesh.face_count(), 2 * (2 * 2 + 6));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RasterLayer {
    width: usize,
    height: usize,
    cells: Vec<bool>,
    occupied: usize,
}

impl RasterLayer {
    /// Create a layer with every pixel unoccupied.
    ///
    /// # Errors
    ///
    /// Returns [`RasterError::InvalidDimensions`] if either dimension is zero,
    /// or if the grid is too large for 32-bit vertex indices.
    pub fn new(width: usize, height: usize) -> RasterResult<Self> {
        if width == 0 || height == 0 {
            return Err(RasterError::InvalidDimensions {
                width,
                height,
                reason: "width and height must be at least 1",
            });
        }

        let corners = width
            .checked_add(1)
            .zip(height.checked_add(1))
            .and_then(|(w, h)| w.checked_mul(h))
            .filter(|&c| c <= MAX_CORNERS);
        if corners.is_none() {
            return Err(RasterError::InvalidDimensions {
                width,
                height,
                reason: "grid exceeds 32-bit vertex indexing",
            });
        }

        Ok(Self {
            width,
            height,
            cells: vec![false; width * height],
            occupied: 0,
        })
    }

    /// Grid width in pixels.
    #[inline]
    #[must_use]
    pub const fn width(&self) -> usize {
        self.width
    }

    /// Grid height in pixels.
    #[inline]
    #[must_use]
    pub const fn height(&self) -> usize {
        self.height
    }

    /// Number of occupied pixels.
    #[inline]
    #[must_use]
    pub const fn occupied_count(&self) -> usize {
        self.occupied
    }

    /// Check if no pixel is occupied.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.occupied == 0
    }

    /// Mark pixel `(x, y)` as occupied. Marking twice is a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`RasterError::OutOfBounds`] if the coordinate lies outside
    /// `[0, width) × [0, height)`.
    pub fn mark(&mut self, x: i64, y: i64) -> RasterResult<()> {
        let index = self.index(x, y).ok_or(RasterError::OutOfBounds {
            x,
            y,
            width: self.width,
            height: self.height,
        })?;

        if !self.cells[index] {
            self.cells[index] = true;
            self.occupied += 1;
        }
        Ok(())
    }

    /// Check if pixel `(x, y)` is occupied.
    ///
    /// Coordinates outside the grid read as unoccupied, which is what the
    /// extruder needs at the border.
    #[inline]
    #[must_use]
    pub fn is_marked(&self, x: i64, y: i64) -> bool {
        self.index(x, y).is_some_and(|i| self.cells[i])
    }

    /// Iterate over occupied pixels in row-major order.
    pub fn occupied(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter(|&(_, &on)| on)
            .map(|(i, _)| (i % self.width, i / self.width))
    }

    /// Extrude the occupied pixels into a closed solid.
    ///
    /// Pixel `(x, y)` becomes the box
    /// `[x·sx, (x+1)·sx] × [y·sy, (y+1)·sy] × [base_z, base_z + thickness]`.
    /// Faces between two occupied neighbors are never emitted, so the result
    /// is a single manifold surface per connected region.
    ///
    /// # Errors
    ///
    /// - [`RasterError::InvalidThickness`], [`RasterError::InvalidScale`] or
    ///   [`RasterError::InvalidElevation`] for bad parameters
    /// - [`RasterError::EmptyLayer`] if no pixel is occupied
    pub fn extrude(&self, params: &Extrusion) -> RasterResult<IndexedMesh> {
        params.validate()?;
        if self.is_empty() {
            return Err(RasterError::EmptyLayer);
        }
        Ok(extrude_layer(self, params))
    }

    /// Flat index of an in-bounds coordinate.
    #[inline]
    fn index(&self, x: i64, y: i64) -> Option<usize> {
        let x = usize::try_from(x).ok().filter(|&x| x < self.width)?;
        let y = usize::try_from(y).ok().filter(|&y| y < self.height)?;
        Some(y * self.width + x)
    }
}
