//! Printability checks for triangle meshes.
//!
//! Slicers reject 3MF objects that are not closed two-manifold solids. This
//! crate verifies that property for generated geometry:
//!
//! - Watertightness (no boundary edges)
//! - Manifoldness (no edge shared by more than two faces)
//! - Winding consistency (neighbors traverse shared edges in opposite directions)
//! - Orientation (positive signed volume)
//!
//! # Example
//!
//! ```
//! use mesh_types::unit_cube;
//! use mesh_validate::validate_mesh;
//!
//! let report = validate_mesh(&unit_cube());
//! assert!(report.is_watertight);
//! assert!(report.is_manifold);
//! assert!(report.is_printable());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

mod adjacency;
mod validate;

pub use adjacency::MeshAdjacency;
pub use validate::{MeshReport, ValidationOptions, validate_mesh, validate_mesh_with_options};
