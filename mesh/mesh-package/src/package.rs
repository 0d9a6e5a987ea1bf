//! The in-memory model package.

use std::path::Path;

use hashbrown::HashSet;
use mesh_types::{IndexedMesh, MeshBounds, MeshTopology, Rgb};
use tracing::{debug, warn};

use crate::error::{PackageError, PackageResult};
use crate::object::{BuildObject, Placement};
use crate::writer::write_package;

/// Tolerance for comparing a mesh's Z extent against its placement.
const PLACEMENT_TOLERANCE: f64 = 1e-6;

/// Display color used when an object has neither an explicit color nor a
/// color-prefixed name.
pub const DEFAULT_COLOR: Rgb = Rgb::new(0x80, 0x80, 0x80);

/// An ordered collection of named, colored build objects destined for one
/// 3MF file.
///
/// Objects keep their insertion order, which is also their order in the
/// material group and in the build section. Names are unique.
///
/// # Example
///
/// ```no_run
/// use mesh_package::{ModelPackage, Placement};
/// use mesh_types::unit_cube;
///
/// let mut package = ModelPackage::new();
/// package
///     .add_object(unit_cube(), "#FF0000 layer", Placement::default())
///     .unwrap();
/// package.save("cube.3mf").unwrap();
/// ```
#[derive(Debug, Clone)]
pub struct ModelPackage {
    objects: Vec<BuildObject>,
    names: HashSet<String>,
    title: Option<String>,
    default_color: Rgb,
}

impl Default for ModelPackage {
    fn default() -> Self {
        Self::new()
    }
}

impl ModelPackage {
    /// Create an empty package.
    #[must_use]
    pub fn new() -> Self {
        Self {
            objects: Vec::new(),
            names: HashSet::new(),
            title: None,
            default_color: DEFAULT_COLOR,
        }
    }

    /// Use `color` for objects whose color cannot be resolved otherwise.
    #[must_use]
    pub const fn with_default_color(mut self, color: Rgb) -> Self {
        self.default_color = color;
        self
    }

    /// Set the model title written to the package metadata.
    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = Some(title.into());
    }

    /// Model title, if set.
    #[must_use]
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// Append an object.
    ///
    /// The display color is parsed from a leading `#RRGGBB` word in `name`
    /// and falls back to the package default.
    ///
    /// # Errors
    ///
    /// - [`PackageError::DuplicateName`] if `name` is already used
    /// - [`PackageError::EmptyObject`] if the mesh has no faces
    pub fn add_object(
        &mut self,
        mesh: IndexedMesh,
        name: impl Into<String>,
        placement: Placement,
    ) -> PackageResult<()> {
        let name = name.into();
        let color = Rgb::from_name(&name).unwrap_or(self.default_color);
        self.insert(mesh, name, placement, color)
    }

    /// Append an object with an explicit display color.
    ///
    /// # Errors
    ///
    /// Same as [`ModelPackage::add_object`].
    pub fn add_colored_object(
        &mut self,
        mesh: IndexedMesh,
        name: impl Into<String>,
        placement: Placement,
        color: Rgb,
    ) -> PackageResult<()> {
        self.insert(mesh, name.into(), placement, color)
    }

    fn insert(
        &mut self,
        mesh: IndexedMesh,
        name: String,
        placement: Placement,
        color: Rgb,
    ) -> PackageResult<()> {
        if self.names.contains(&name) {
            return Err(PackageError::DuplicateName { name });
        }
        if mesh.face_count() == 0 {
            return Err(PackageError::EmptyObject { name });
        }

        check_placement(&name, &mesh, &placement);
        debug!(
            object = %name,
            color = %color,
            vertices = mesh.vertex_count(),
            faces = mesh.face_count(),
            elevation = placement.elevation,
            "added object"
        );

        self.names.insert(name.clone());
        self.objects.push(BuildObject::new(name, mesh, placement, color));
        Ok(())
    }

    /// Objects in insertion order.
    #[must_use]
    pub fn objects(&self) -> &[BuildObject] {
        &self.objects
    }

    /// Look up an object by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&BuildObject> {
        self.objects.iter().find(|o| o.name() == name)
    }

    /// Number of objects.
    #[must_use]
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Check if no object has been added.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Write the package to a 3MF file.
    ///
    /// The archive is written next to `path` under a temporary name and
    /// renamed over `path` only once complete, so a failed save never
    /// leaves a partial file behind.
    ///
    /// # Errors
    ///
    /// - [`PackageError::EmptyPackage`] if no object was added; nothing is
    ///   written
    /// - [`PackageError::Io`] on filesystem failure
    /// - [`PackageError::Zip`] or [`PackageError::Xml`] if encoding fails
    pub fn save<P: AsRef<Path>>(&self, path: P) -> PackageResult<()> {
        write_package(self, path.as_ref())
    }
}

/// Warn when a mesh does not sit where its placement says it does.
fn check_placement(name: &str, mesh: &IndexedMesh, placement: &Placement) {
    let Some((lo, hi)) = mesh.bounds().z_range() else {
        return;
    };

    let off = (lo - placement.elevation).abs() > PLACEMENT_TOLERANCE
        || (hi - placement.top()).abs() > PLACEMENT_TOLERANCE;
    if off {
        warn!(
            object = name,
            mesh_z_min = lo,
            mesh_z_max = hi,
            placement_z_min = placement.elevation,
            placement_z_max = placement.top(),
            "mesh Z extent disagrees with placement"
        );
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use mesh_types::unit_cube;

    fn cube_placement() -> Placement {
        Placement::new(0.0, 1.0, 1.0, 1.0)
    }

    #[test]
    fn new_package_is_empty() {
        let package = ModelPackage::new();
        assert!(package.is_empty());
        assert_eq!(package.len(), 0);
        assert!(package.title().is_none());
    }

    #[test]
    fn objects_keep_insertion_order() {
        let mut package = ModelPackage::new();
        for name in ["cohesion layer", "#FF0000 layer", "#0000FF layer"] {
            package.add_object(unit_cube(), name, cube_placement()).unwrap();
        }

        let names: Vec<_> = package.objects().iter().map(BuildObject::name).collect();
        assert_eq!(names, ["cohesion layer", "#FF0000 layer", "#0000FF layer"]);
    }

    #[test]
    fn duplicate_name_rejected() {
        let mut package = ModelPackage::new();
        package
            .add_object(unit_cube(), "#FF0000 layer", cube_placement())
            .unwrap();

        let err = package
            .add_object(unit_cube(), "#FF0000 layer", cube_placement())
            .unwrap_err();
        assert!(matches!(err, PackageError::DuplicateName { ref name } if name == "#FF0000 layer"));
        assert_eq!(package.len(), 1);
    }

    #[test]
    fn empty_mesh_rejected() {
        let mut package = ModelPackage::new();
        let err = package
            .add_object(IndexedMesh::new(), "nothing", cube_placement())
            .unwrap_err();

        assert!(matches!(err, PackageError::EmptyObject { .. }));
        assert!(package.is_empty());
        // The rejected name stays available.
        package.add_object(unit_cube(), "nothing", cube_placement()).unwrap();
    }

    #[test]
    fn color_resolution_order() {
        let mut package = ModelPackage::new().with_default_color(Rgb::WHITE);
        package
            .add_object(unit_cube(), "#00FF00 layer", cube_placement())
            .unwrap();
        package
            .add_object(unit_cube(), "cohesion layer", cube_placement())
            .unwrap();
        package
            .add_colored_object(unit_cube(), "#00FF00 top", cube_placement(), Rgb::BLACK)
            .unwrap();

        assert_eq!(package.get("#00FF00 layer").unwrap().color(), Rgb::new(0, 255, 0));
        assert_eq!(package.get("cohesion layer").unwrap().color(), Rgb::WHITE);
        assert_eq!(package.get("#00FF00 top").unwrap().color(), Rgb::BLACK);
        assert!(package.get("missing").is_none());
    }

    #[test]
    fn mismatched_placement_is_still_accepted() {
        let mut package = ModelPackage::new();
        package
            .add_object(unit_cube(), "cube", Placement::new(5.0, 1.0, 1.0, 1.0))
            .unwrap();

        let placement = package.get("cube").unwrap().placement();
        assert!((placement.elevation - 5.0).abs() < f64::EPSILON);
    }

    #[test]
    fn title_is_stored() {
        let mut package = ModelPackage::new();
        package.set_title("mosaic");
        assert_eq!(package.title(), Some("mosaic"));
    }
}
