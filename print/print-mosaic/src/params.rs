//! Print parameters and presets.
//!
//! [`PrintParams`] carries the physical description of a mosaic: its
//! footprint, nominal pixel size, hole density and layer heights, plus how
//! assembly treats empty color layers.
//!
//! # Presets
//!
//! - [`PrintParams::default()`] - 70 mm square, 0.8 mm pixels, flat colors
//! - [`PrintParams::stacked()`] - Same, with colors stacked on each other
//! - [`PrintParams::solid()`] - No hole grid
//!
//! # Example
//!
//! ```
//! use print_mosaic::{EmptyLayerPolicy, PrintParams};
//!
//! let params = PrintParams::default()
//!     .with_size(50.0, 30.0)
//!     .with_empty_layers(EmptyLayerPolicy::Abort);
//! assert!(params.validate().is_ok());
//! ```

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{PrintError, PrintResult};

/// What assembly does with a color layer that ends up with no pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum EmptyLayerPolicy {
    /// Leave the object out of the package and log a warning.
    #[default]
    Skip,

    /// Fail the whole build with [`mesh_raster::RasterError::EmptyLayer`].
    Abort,
}

/// Physical parameters of a mosaic print.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PrintParams {
    /// Footprint `(width, depth)` in millimeters.
    pub size_mm: (f64, f64),

    /// Nominal pixel edge length in millimeters. The actual pixel pitch is
    /// adjusted so the odd resolution fills `size_mm` exactly.
    pub pixel_size_mm: f64,

    /// Fraction of rows and columns that carry holes, in `[0, 1)`.
    /// Zero disables the hole grid.
    pub grid_density: f64,

    /// Height of the shared base under every pixel, in millimeters.
    pub cohesion_layer_height: f64,

    /// Height of each color layer, in millimeters.
    pub color_layer_height: f64,

    /// Stack each color on top of every lower palette index instead of
    /// placing all colors side by side at one height.
    pub layered: bool,

    /// Handling of color layers with no pixels.
    pub empty_layers: EmptyLayerPolicy,

    /// Whether to extrude layers in parallel (via rayon).
    pub parallel: bool,
}

impl Default for PrintParams {
    fn default() -> Self {
        Self {
            size_mm: (70.0, 70.0),
            pixel_size_mm: 0.8,
            grid_density: 0.4,
            cohesion_layer_height: 1.0,
            color_layer_height: 0.6,
            layered: false,
            empty_layers: EmptyLayerPolicy::Skip,
            parallel: true,
        }
    }
}

impl PrintParams {
    /// Default parameters with colors stacked in palette order.
    ///
    /// # Example
    ///
    /// ```
    /// use print_mosaic::PrintParams;
    ///
    /// assert!(PrintParams::stacked().layered);
    /// ```
    #[must_use]
    pub fn stacked() -> Self {
        Self {
            layered: true,
            ..Self::default()
        }
    }

    /// Default parameters without the hole grid.
    #[must_use]
    pub fn solid() -> Self {
        Self {
            grid_density: 0.0,
            ..Self::default()
        }
    }

    /// Set the footprint in millimeters.
    #[must_use]
    pub const fn with_size(mut self, width_mm: f64, depth_mm: f64) -> Self {
        self.size_mm = (width_mm, depth_mm);
        self
    }

    /// Set the nominal pixel size in millimeters.
    #[must_use]
    pub const fn with_pixel_size(mut self, pixel_size_mm: f64) -> Self {
        self.pixel_size_mm = pixel_size_mm;
        self
    }

    /// Set the hole grid density.
    #[must_use]
    pub const fn with_grid_density(mut self, density: f64) -> Self {
        self.grid_density = density;
        self
    }

    /// Set cohesion and color layer heights in millimeters.
    #[must_use]
    pub const fn with_layer_heights(mut self, cohesion: f64, color: f64) -> Self {
        self.cohesion_layer_height = cohesion;
        self.color_layer_height = color;
        self
    }

    /// Enable or disable stacked colors.
    #[must_use]
    pub const fn with_layered(mut self, layered: bool) -> Self {
        self.layered = layered;
        self
    }

    /// Set the empty color layer policy.
    #[must_use]
    pub const fn with_empty_layers(mut self, policy: EmptyLayerPolicy) -> Self {
        self.empty_layers = policy;
        self
    }

    /// Enable or disable parallel extrusion.
    #[must_use]
    pub const fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Check every parameter.
    ///
    /// # Errors
    ///
    /// Returns [`PrintError::InvalidParams`] naming the first offending
    /// field.
    pub fn validate(&self) -> PrintResult<()> {
        positive("size_mm.0", self.size_mm.0)?;
        positive("size_mm.1", self.size_mm.1)?;
        positive("pixel_size_mm", self.pixel_size_mm)?;
        positive("cohesion_layer_height", self.cohesion_layer_height)?;
        positive("color_layer_height", self.color_layer_height)?;

        if !(self.grid_density.is_finite() && (0.0..1.0).contains(&self.grid_density)) {
            return Err(PrintError::invalid_params(format!(
                "grid_density must be in [0, 1), got {}",
                self.grid_density
            )));
        }
        Ok(())
    }
}

fn positive(field: &str, value: f64) -> PrintResult<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(PrintError::invalid_params(format!(
            "{field} must be positive and finite, got {value}"
        )))
    }
}
