//! Multi-material mosaic prints from paletted images.
//!
//! Each palette color becomes its own extruded solid, standing on a shared
//! "cohesion" base, and the solids are written as named objects of a
//! single 3MF file. Slicers then assign one filament per object.
//!
//! The pipeline:
//!
//! 1. [`GridLayout::from_params`] turns physical [`PrintParams`] into an odd
//!    pixel resolution, a pixel pitch and a hole lattice.
//! 2. [`plot_layers`] splits a [`PalettedImage`] of that resolution into
//!    raster layers.
//! 3. [`build_package`] extrudes every layer at its height and collects the
//!    meshes into a [`ModelPackage`](mesh_package::ModelPackage).
//! 4. [`print_to_file`] does all of the above and saves the result.
//!
//! Image decoding and color quantization are left to the caller.
//!
//! # Example
//!
//! ```no_run
//! use mesh_types::Rgb;
//! use print_mosaic::{GridLayout, PalettedImage, PrintParams, print_to_file};
//!
//! let params = PrintParams::default();
//! let layout = GridLayout::from_params(&params).unwrap();
//!
//! let (w, h) = (layout.width(), layout.height());
//! let indices = (0..w * h).map(|i| u8::from(i % w >= w / 2)).collect();
//! let palette = vec![Rgb::new(255, 255, 255), Rgb::new(20, 20, 20)];
//! let image = PalettedImage::new(w, h, indices, palette).unwrap();
//!
//! print_to_file(&image, &params, "half.3mf").unwrap();
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

mod assemble;
mod error;
mod image;
mod layout;
mod params;

pub use assemble::{
    COHESION_LAYER_NAME, ColorLayer, PlottedLayers, build_package, plot_layers, print_to_file,
};
pub use error::{PrintError, PrintResult};
pub use image::PalettedImage;
pub use layout::{AxisLayout, GridLayout, MAX_RESOLUTION};
pub use params::{EmptyLayerPolicy, PrintParams};
