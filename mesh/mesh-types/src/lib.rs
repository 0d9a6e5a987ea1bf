//! Core mesh types for pixel-mosaic printing.
//!
//! This crate provides the geometry shared by the raster extruder and the
//! 3MF packager:
//!
//! - [`Vertex`] - A point in 3D space
//! - [`IndexedMesh`] - A triangle mesh with indexed vertices
//! - [`Triangle`] - A concrete triangle with vertex positions
//! - [`Aabb`] - Axis-aligned bounding box
//! - [`Rgb`] - An 8-bit color, written as `#RRGGBB`
//!
//! # Units
//!
//! All coordinates are `f64` millimeters, the unit declared by the 3MF
//! packages this workspace writes.
//!
//! # Coordinate System
//!
//! Right-handed:
//! - X: image columns
//! - Y: image rows
//! - Z: print height (build plate at `z = 0`)
//!
//! Face winding is **counter-clockwise (CCW) when viewed from outside**, so
//! a closed mesh has a positive [`IndexedMesh::signed_volume`].
//!
//! # Example
//!
//! ```
//! use mesh_types::{MeshTopology, unit_cube};
//!
//! let cube = unit_cube();
//! assert_eq!(cube.face_count(), 12);
//! assert!((cube.signed_volume() - 1.0).abs() < 1e-12);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

mod bounds;
mod color;
mod mesh;
mod traits;
mod triangle;
mod vertex;

pub use bounds::Aabb;
pub use color::Rgb;
pub use mesh::{IndexedMesh, unit_cube};
pub use traits::{MeshBounds, MeshTopology};
pub use triangle::Triangle;
pub use vertex::Vertex;

// Re-export nalgebra types for convenience
pub use nalgebra::{Point3, Vector3};
