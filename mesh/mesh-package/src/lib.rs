//! Multi-object 3MF packages for multi-material printing.
//!
//! A [`ModelPackage`] collects named meshes, each with a display color,
//! and writes them as separate objects of one 3MF model. Slicers list the
//! objects by name and offer the colors when assigning filaments, so a
//! multi-color print becomes one object per material.
//!
//! # 3MF layout
//!
//! - `[Content_Types].xml` and `_rels/.rels` - fixed OPC boilerplate
//! - `3D/3dmodel.model` - millimeter units, one `basematerials` group
//!   (id 1) with a `base` per object, objects numbered from 2 and one
//!   untransformed build item per object
//!
//! # Example
//!
//! ```no_run
//! use mesh_package::{ModelPackage, Placement, load_package};
//! use mesh_types::unit_cube;
//!
//! let mut package = ModelPackage::new();
//! package.add_object(unit_cube(), "#FFCC00 layer", Placement::default()).unwrap();
//! package.save("out.3mf").unwrap();
//!
//! let contents = load_package("out.3mf").unwrap();
//! assert_eq!(contents.objects.len(), 1);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

mod error;
mod object;
mod package;
mod reader;
mod writer;

pub use error::{PackageError, PackageResult};
pub use object::{BuildObject, Placement};
pub use package::{DEFAULT_COLOR, ModelPackage};
pub use reader::{PackageContents, PackagedObject, load_package};
