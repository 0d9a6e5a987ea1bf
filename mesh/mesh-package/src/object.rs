//! Named build objects.
//!
//! A [`BuildObject`] is one printable body in a package: its final mesh,
//! a unique name, the [`Placement`] it was generated with and the display
//! color slicers use to assign a filament.

use mesh_types::{IndexedMesh, MeshTopology, Rgb};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// How an object was placed when its mesh was generated.
///
/// Purely descriptive: mesh vertices are already in their final position
/// and nothing in the package re-applies these values.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Placement {
    /// Z of the object's bottom face, in millimeters.
    pub elevation: f64,
    /// Height of the object, in millimeters.
    pub thickness: f64,
    /// Millimeters per source unit along X.
    pub scale_x: f64,
    /// Millimeters per source unit along Y.
    pub scale_y: f64,
}

impl Default for Placement {
    fn default() -> Self {
        Self {
            elevation: 0.0,
            thickness: 1.0,
            scale_x: 1.0,
            scale_y: 1.0,
        }
    }
}

impl Placement {
    /// Create a placement record.
    #[must_use]
    pub const fn new(elevation: f64, thickness: f64, scale_x: f64, scale_y: f64) -> Self {
        Self {
            elevation,
            thickness,
            scale_x,
            scale_y,
        }
    }

    /// Z of the object's top face.
    #[inline]
    #[must_use]
    pub fn top(&self) -> f64 {
        self.elevation + self.thickness
    }
}

/// One named, colored object in a [`ModelPackage`](crate::ModelPackage).
#[derive(Debug, Clone, PartialEq)]
pub struct BuildObject {
    name: String,
    mesh: IndexedMesh,
    placement: Placement,
    color: Rgb,
}

impl BuildObject {
    pub(crate) fn new(name: String, mesh: IndexedMesh, placement: Placement, color: Rgb) -> Self {
        Self {
            name,
            mesh,
            placement,
            color,
        }
    }

    /// Unique object name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Final mesh geometry.
    #[must_use]
    pub fn mesh(&self) -> &IndexedMesh {
        &self.mesh
    }

    /// Placement the mesh was generated with.
    #[must_use]
    pub const fn placement(&self) -> &Placement {
        &self.placement
    }

    /// Display color written to the material group.
    #[must_use]
    pub const fn color(&self) -> Rgb {
        self.color
    }

    /// Number of triangles.
    #[must_use]
    pub fn face_count(&self) -> usize {
        self.mesh.face_count()
    }
}
