//! Grid layout derived from physical print parameters.
//!
//! The image is resampled to an odd resolution per axis so the hole grid
//! can sit symmetrically around the center. Holes are a periodic lattice
//! of skipped pixels that keeps multi-color prints from curling.

use tracing::info;

use crate::error::{PrintError, PrintResult};
use crate::params::PrintParams;

/// Largest resolution accepted on either axis.
pub const MAX_RESOLUTION: usize = 1 << 15;

/// Layout of one axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisLayout {
    /// Pixel count along the axis. Always odd.
    pub resolution: usize,
    /// Millimeters per pixel.
    pub scale: f64,
    /// Number of hole rows or columns requested by the density.
    pub hole_count: usize,
    /// Period of the hole lattice, 0 when the axis has no holes.
    pub hole_frequency: usize,
    /// Phase of the hole lattice.
    pub hole_offset: usize,
}

impl AxisLayout {
    fn derive(size: f64, pixel_size: f64, density: f64) -> PrintResult<Self> {
        let raw = (size / pixel_size).floor();
        if !(raw.is_finite() && raw < to_f64(MAX_RESOLUTION)) {
            return Err(PrintError::invalid_params(format!(
                "{size} mm at {pixel_size} mm per pixel exceeds {MAX_RESOLUTION} pixels"
            )));
        }

        let mut resolution = to_usize(raw);
        if resolution % 2 == 0 {
            resolution += 1;
        }
        let res = to_f64(resolution);

        let hole_count = to_usize((res * density).floor());
        let scale = size / res;

        let hole_frequency = if hole_count > 0 {
            let count = to_f64(hole_count);
            let period = ((res - pixel_size * scale * count) / count).round_ties_even();
            // A non-positive period means the holes would not fit.
            if period >= 1.0 { to_usize(period) } else { 0 }
        } else {
            0
        };

        Ok(Self {
            resolution,
            scale,
            hole_count,
            hole_frequency,
            hole_offset: hole_frequency / 2,
        })
    }

    /// Check if coordinate `i` is on a hole row or column.
    #[inline]
    #[must_use]
    pub const fn on_hole_line(&self, i: usize) -> bool {
        self.hole_frequency > 0 && (i + self.hole_offset) % self.hole_frequency == 0
    }
}

/// Resolution, pixel pitch and hole lattice for a print.
///
/// # Example
///
/// ```
/// use print_mosaic::{GridLayout, PrintParams};
///
/// let layout = GridLayout::from_params(&PrintParams::default()).unwrap();
/// assert_eq!((layout.width(), layout.height()), (87, 87));
/// assert!(layout.is_hole(1, 1));
/// assert!(!layout.is_hole(0, 1));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridLayout {
    /// Column axis.
    pub x: AxisLayout,
    /// Row axis.
    pub y: AxisLayout,
}

impl GridLayout {
    /// Derive the layout from validated parameters.
    ///
    /// Each axis gets its own hole gate: an axis whose hole count is zero
    /// has no hole lines, which disables holes for the whole grid.
    ///
    /// # Errors
    ///
    /// Returns [`PrintError::InvalidParams`] if the parameters do not
    /// validate or the resolution would exceed [`MAX_RESOLUTION`].
    pub fn from_params(params: &PrintParams) -> PrintResult<Self> {
        params.validate()?;

        let layout = Self {
            x: AxisLayout::derive(params.size_mm.0, params.pixel_size_mm, params.grid_density)?,
            y: AxisLayout::derive(params.size_mm.1, params.pixel_size_mm, params.grid_density)?,
        };

        info!(
            width = layout.x.resolution,
            height = layout.y.resolution,
            scale_x = layout.x.scale,
            scale_y = layout.y.scale,
            hole_frequency_x = layout.x.hole_frequency,
            hole_frequency_y = layout.y.hole_frequency,
            "derived grid layout"
        );
        Ok(layout)
    }

    /// Pixel columns.
    #[inline]
    #[must_use]
    pub const fn width(&self) -> usize {
        self.x.resolution
    }

    /// Pixel rows.
    #[inline]
    #[must_use]
    pub const fn height(&self) -> usize {
        self.y.resolution
    }

    /// Check if any pixel is a hole.
    #[must_use]
    pub const fn has_holes(&self) -> bool {
        self.x.hole_frequency > 0 && self.y.hole_frequency > 0
    }

    /// Check if pixel `(x, y)` is skipped by the hole lattice.
    #[inline]
    #[must_use]
    pub const fn is_hole(&self, x: usize, y: usize) -> bool {
        self.x.on_hole_line(x) && self.y.on_hole_line(y)
    }
}

#[inline]
#[allow(clippy::cast_precision_loss)]
fn to_f64(v: usize) -> f64 {
    v as f64
}

/// Convert a non-negative, finite, already floored value.
#[inline]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn to_usize(v: f64) -> usize {
    v.max(0.0) as usize
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn layout(size: (f64, f64), pixel: f64, density: f64) -> GridLayout {
        let params = PrintParams::default()
            .with_size(size.0, size.1)
            .with_pixel_size(pixel)
            .with_grid_density(density);
        GridLayout::from_params(&params).unwrap()
    }

    #[test]
    fn default_layout() {
        let layout = GridLayout::from_params(&PrintParams::default()).unwrap();

        assert_eq!(layout.width(), 87);
        assert_eq!(layout.x.hole_count, 34);
        assert_eq!(layout.x.hole_frequency, 2);
        assert_eq!(layout.x.hole_offset, 1);
        assert_relative_eq!(layout.x.scale, 70.0 / 87.0);
        assert!(layout.has_holes());
    }

    #[test]
    fn even_resolution_bumped_to_odd() {
        let layout = layout((10.0, 9.0), 1.0, 0.0);

        assert_eq!(layout.width(), 11);
        assert_eq!(layout.height(), 9);
        assert_relative_eq!(layout.x.scale, 10.0 / 11.0);
        assert_relative_eq!(layout.y.scale, 1.0);
    }

    #[test]
    fn tiny_size_still_has_one_pixel() {
        let layout = layout((0.5, 0.5), 1.0, 0.4);

        assert_eq!((layout.width(), layout.height()), (1, 1));
        assert!(!layout.is_hole(0, 0));
    }

    #[test]
    fn zero_density_disables_holes() {
        let layout = layout((20.0, 20.0), 1.0, 0.0);

        assert!(!layout.has_holes());
        assert!((0..21).all(|i| !layout.is_hole(i, i)));
    }

    #[test]
    fn hole_lattice_positions() {
        // res 5, 2 holes, period round(1.5) = 2, offset 1
        let layout = layout((5.0, 5.0), 1.0, 0.4);

        let holes: Vec<_> = (0..5)
            .flat_map(|y| (0..5).map(move |x| (x, y)))
            .filter(|&(x, y)| layout.is_hole(x, y))
            .collect();
        assert_eq!(holes, vec![(1, 1), (3, 1), (1, 3), (3, 3)]);
    }

    #[test]
    fn period_rounds_half_to_even() {
        // (7 - 2) / 2 = 2.5 rounds to 2, not 3
        let layout = layout((7.0, 7.0), 1.0, 0.3);

        assert_eq!(layout.x.hole_count, 2);
        assert_eq!(layout.x.hole_frequency, 2);
        assert_eq!(layout.x.hole_offset, 1);
    }

    #[test]
    fn axes_are_gated_independently() {
        // Y has a single pixel and therefore no hole rows.
        let layout = layout((70.0, 0.8), 0.8, 0.4);

        assert!(layout.x.hole_frequency > 0);
        assert_eq!(layout.y.hole_count, 0);
        assert_eq!(layout.y.hole_frequency, 0);
        assert!(!layout.has_holes());
        assert!((0..layout.width()).all(|x| !layout.is_hole(x, 0)));
    }

    #[test]
    fn oversized_holes_disable_axis() {
        // Pixels so coarse the computed period is negative.
        let layout = layout((100.0, 100.0), 10.0, 0.4);

        assert_eq!(layout.width(), 11);
        assert_eq!(layout.x.hole_count, 4);
        assert_eq!(layout.x.hole_frequency, 0);
        assert!(!layout.has_holes());
    }

    #[test]
    fn absurd_resolution_rejected() {
        let params = PrintParams::default().with_pixel_size(1e-9);
        assert!(matches!(
            GridLayout::from_params(&params),
            Err(PrintError::InvalidParams { .. })
        ));
    }

    #[test]
    fn invalid_params_propagate() {
        let params = PrintParams::default().with_grid_density(1.5);
        assert!(GridLayout::from_params(&params).is_err());
    }
}
