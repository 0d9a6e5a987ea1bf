//! 8-bit RGB colors and their `#RRGGBB` notation.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// RGB color with 8-bit components.
///
/// Palette entries, object names and 3MF `displaycolor` attributes all use
/// the uppercase `#RRGGBB` form produced by [`Rgb::to_hex`].
///
/// # Example
///
/// ```
/// use mesh_types::Rgb;
///
/// let red = Rgb::new(255, 0, 0);
/// assert_eq!(red.to_hex(), "#FF0000");
/// assert_eq!(Rgb::parse_hex("#ff0000"), Some(red));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Rgb {
    /// Red component (0-255).
    pub r: u8,
    /// Green component (0-255).
    pub g: u8,
    /// Blue component (0-255).
    pub b: u8,
}

impl Rgb {
    /// Black (0, 0, 0).
    pub const BLACK: Self = Self::new(0, 0, 0);

    /// White (255, 255, 255).
    pub const WHITE: Self = Self::new(255, 255, 255);

    /// Create a color from RGB components.
    #[inline]
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Format as uppercase `#RRGGBB`.
    #[must_use]
    pub fn to_hex(self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }

    /// Parse `#RRGGBB` or `#RRGGBBAA` (alpha is ignored), case-insensitive.
    ///
    /// Returns `None` for anything else.
    #[must_use]
    pub fn parse_hex(text: &str) -> Option<Self> {
        let digits = text.strip_prefix('#')?;
        if !(digits.len() == 6 || digits.len() == 8) || !digits.is_ascii() {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).ok();
        Some(Self::new(channel(0)?, channel(2)?, channel(4)?))
    }

    /// Extract the color from a name whose first word is a hex color,
    /// such as `"#FF0000 layer"`.
    ///
    /// # Example
    ///
    /// ```
    /// use mesh_types::Rgb;
    ///
    /// assert_eq!(Rgb::from_name("#00FF00 layer"), Some(Rgb::new(0, 255, 0)));
    /// assert_eq!(Rgb::from_name("cohesion layer"), None);
    /// ```
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        name.split_whitespace().next().and_then(Self::parse_hex)
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

impl From<[u8; 3]> for Rgb {
    fn from([r, g, b]: [u8; 3]) -> Self {
        Self::new(r, g, b)
    }
}
