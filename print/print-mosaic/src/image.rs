//! Palette-indexed images.

use mesh_types::Rgb;

use crate::error::{PrintError, PrintResult};

/// A row-major grid of palette indices and the palette they refer to.
///
/// This is the hand-off point from image decoding and quantization, which
/// happen outside this crate.
///
/// # Example
///
/// ```
/// use mesh_types::Rgb;
/// use print_mosaic::PalettedImage;
///
/// let image = PalettedImage::new(
///     2,
///     1,
///     vec![0, 1],
///     vec![Rgb::new(255, 0, 0), Rgb::new(0, 0, 255)],
/// )
/// .unwrap();
/// assert_eq!(image.color_at(1, 0), Some(Rgb::new(0, 0, 255)));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PalettedImage {
    width: usize,
    height: usize,
    indices: Vec<u8>,
    palette: Vec<Rgb>,
}

impl PalettedImage {
    /// Create an image from its index grid and palette.
    ///
    /// # Errors
    ///
    /// Returns [`PrintError::InvalidImage`] if a dimension is zero, the
    /// index count is not `width * height`, the palette is empty, or an
    /// index points past the palette.
    pub fn new(
        width: usize,
        height: usize,
        indices: Vec<u8>,
        palette: Vec<Rgb>,
    ) -> PrintResult<Self> {
        if width == 0 || height == 0 {
            return Err(PrintError::invalid_image(format!(
                "dimensions {width}x{height} must be non-zero"
            )));
        }
        if width.checked_mul(height) != Some(indices.len()) {
            return Err(PrintError::invalid_image(format!(
                "{} indices for a {width}x{height} image",
                indices.len()
            )));
        }
        if palette.is_empty() {
            return Err(PrintError::invalid_image("palette is empty"));
        }
        if let Some(pos) = indices.iter().position(|&i| usize::from(i) >= palette.len()) {
            return Err(PrintError::invalid_image(format!(
                "pixel ({}, {}) uses index {} but the palette has {} colors",
                pos % width,
                pos / width,
                indices[pos],
                palette.len()
            )));
        }

        Ok(Self {
            width,
            height,
            indices,
            palette,
        })
    }

    /// Image width in pixels.
    #[must_use]
    pub const fn width(&self) -> usize {
        self.width
    }

    /// Image height in pixels.
    #[must_use]
    pub const fn height(&self) -> usize {
        self.height
    }

    /// Palette in index order.
    #[must_use]
    pub fn palette(&self) -> &[Rgb] {
        &self.palette
    }

    /// Palette index at `(x, y)`, or `None` outside the image.
    #[must_use]
    pub fn index_at(&self, x: usize, y: usize) -> Option<u8> {
        (x < self.width && y < self.height).then(|| self.indices[y * self.width + x])
    }

    /// Color at `(x, y)`, or `None` outside the image.
    #[must_use]
    pub fn color_at(&self, x: usize, y: usize) -> Option<Rgb> {
        self.index_at(x, y).map(|i| self.palette[usize::from(i)])
    }

    /// Iterate `(x, y, palette_index)` in row-major order.
    pub fn pixels(&self) -> impl Iterator<Item = (usize, usize, usize)> + '_ {
        self.indices
            .iter()
            .enumerate()
            .map(|(i, &p)| (i % self.width, i / self.width, usize::from(p)))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn rgb() -> Vec<Rgb> {
        vec![Rgb::new(255, 0, 0), Rgb::new(0, 255, 0), Rgb::new(0, 0, 255)]
    }

    #[test]
    fn rejects_wrong_length() {
        let err = PalettedImage::new(2, 2, vec![0, 1, 2], rgb()).unwrap_err();
        assert!(matches!(err, PrintError::InvalidImage { .. }));
    }

    #[test]
    fn rejects_index_past_palette() {
        let err = PalettedImage::new(2, 1, vec![0, 3], rgb()).unwrap_err();
        assert!(err.to_string().contains("pixel (1, 0) uses index 3"));
    }

    #[test]
    fn rejects_empty_inputs() {
        assert!(PalettedImage::new(0, 1, vec![], rgb()).is_err());
        assert!(PalettedImage::new(1, 1, vec![0], vec![]).is_err());
    }

    #[test]
    fn pixels_are_row_major() {
        let image = PalettedImage::new(2, 2, vec![0, 1, 2, 0], rgb()).unwrap();
        let pixels: Vec<_> = image.pixels().collect();

        assert_eq!(pixels, vec![(0, 0, 0), (1, 0, 1), (0, 1, 2), (1, 1, 0)]);
        assert_eq!(image.index_at(0, 1), Some(2));
        assert_eq!(image.index_at(2, 0), None);
    }
}
