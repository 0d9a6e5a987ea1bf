//! Error types for raster layers.

use thiserror::Error;

/// Result type for raster layer operations.
pub type RasterResult<T> = Result<T, RasterError>;

/// Errors that can occur while marking or extruding a raster layer.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RasterError {
    /// Width or height is zero, or the grid is too large to index.
    #[error("invalid raster dimensions {width}x{height}: {reason}")]
    InvalidDimensions {
        /// Requested width in pixels.
        width: usize,
        /// Requested height in pixels.
        height: usize,
        /// Why the dimensions were rejected.
        reason: &'static str,
    },

    /// Pixel coordinate outside the grid.
    #[error("pixel ({x}, {y}) is outside the {width}x{height} raster")]
    OutOfBounds {
        /// Column that was addressed.
        x: i64,
        /// Row that was addressed.
        y: i64,
        /// Grid width.
        width: usize,
        /// Grid height.
        height: usize,
    },

    /// Thickness is zero, negative or not finite.
    #[error("invalid layer thickness {thickness}: must be positive and finite")]
    InvalidThickness {
        /// The rejected thickness.
        thickness: f64,
    },

    /// A pixel scale is zero, negative or not finite.
    #[error("invalid {axis} scale {scale}: must be positive and finite")]
    InvalidScale {
        /// Axis name, `'x'` or `'y'`.
        axis: char,
        /// The rejected scale.
        scale: f64,
    },

    /// Base elevation is not finite.
    #[error("invalid base elevation {base_z}: must be finite")]
    InvalidElevation {
        /// The rejected elevation.
        base_z: f64,
    },

    /// No pixel is occupied, so there is nothing to extrude.
    ///
    /// Callers assembling several layers may skip the object instead of
    /// aborting.
    #[error("raster layer has no occupied pixels")]
    EmptyLayer,
}

impl RasterError {
    /// Check whether this is the recoverable [`RasterError::EmptyLayer`] case.
    #[must_use]
    pub const fn is_empty_layer(&self) -> bool {
        matches!(self, Self::EmptyLayer)
    }
}
