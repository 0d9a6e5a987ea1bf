//! Error types for mosaic printing.

use mesh_package::PackageError;
use mesh_raster::RasterError;
use thiserror::Error;

/// Errors that can occur while laying out, plotting or packaging a mosaic.
#[derive(Debug, Error)]
pub enum PrintError {
    /// A print parameter is out of range.
    #[error("invalid print parameters: {details}")]
    InvalidParams {
        /// Which parameter and why.
        details: String,
    },

    /// The paletted image is inconsistent.
    #[error("invalid image: {details}")]
    InvalidImage {
        /// Description of the inconsistency.
        details: String,
    },

    /// The image does not have the resolution the layout expects.
    #[error(
        "image is {actual_width}x{actual_height} but the layout expects {expected_width}x{expected_height}"
    )]
    ResolutionMismatch {
        /// Layout width in pixels.
        expected_width: usize,
        /// Layout height in pixels.
        expected_height: usize,
        /// Image width in pixels.
        actual_width: usize,
        /// Image height in pixels.
        actual_height: usize,
    },

    /// Layer marking or extrusion failed.
    #[error(transparent)]
    Raster(#[from] RasterError),

    /// Package assembly or saving failed.
    #[error(transparent)]
    Package(#[from] PackageError),
}

impl PrintError {
    pub(crate) fn invalid_params(details: impl Into<String>) -> Self {
        Self::InvalidParams {
            details: details.into(),
        }
    }

    pub(crate) fn invalid_image(details: impl Into<String>) -> Self {
        Self::InvalidImage {
            details: details.into(),
        }
    }
}

/// Result type for mosaic printing.
pub type PrintResult<T> = Result<T, PrintError>;
