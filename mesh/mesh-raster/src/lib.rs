//! Pixel layers extruded into printable solids.
//!
//! A [`RasterLayer`] holds the occupancy of one material over the image
//! grid. [`RasterLayer::extrude`] turns the occupied pixels into a closed,
//! two-manifold [`IndexedMesh`](mesh_types::IndexedMesh) with outward
//! winding, placed and scaled by an [`Extrusion`].
//!
//! Only boundary walls are generated. Coplanar neighbors share their
//! lattice corners, so the triangle count grows with the occupied area
//! and region outline rather than with a box per pixel.
//!
//! # Example
//!
//! ```
//! use mesh_raster::{Extrusion, RasterLayer};
//!
//! let mut layer = RasterLayer::new(3, 3).unwrap();
//! for y in 0..3 {
//!     for x in 0..3 {
//!         layer.mark(x, y).unwrap();
//!     }
//! }
//!
//! let mesh = layer.extrude(&Extrusion::new(0.0, 2.0, 1.0, 1.0)).unwrap();
//! assert!((mesh.signed_volume() - 18.0).abs() < 1e-9);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

mod error;
mod extrude;
mod layer;

pub use error::{RasterError, RasterResult};
pub use extrude::Extrusion;
pub use layer::RasterLayer;
