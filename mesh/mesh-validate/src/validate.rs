//! Mesh validation and health reporting.

use std::fmt;

use mesh_types::{IndexedMesh, MeshTopology};

use crate::adjacency::MeshAdjacency;

/// Result of validating a mesh.
#[derive(Debug, Clone, Default)]
pub struct MeshReport {
    /// Total number of vertices.
    pub vertex_count: usize,
    /// Total number of faces.
    pub face_count: usize,
    /// Total number of undirected edges.
    pub edge_count: usize,

    /// Edges with only one adjacent face.
    pub boundary_edge_count: usize,
    /// Edges with more than two adjacent faces.
    pub non_manifold_edge_count: usize,
    /// Two-face edges traversed in the same direction by both faces.
    pub inconsistent_edge_count: usize,
    /// Faces with area below the threshold.
    pub degenerate_face_count: usize,
    /// Faces referencing a vertex that does not exist.
    pub invalid_index_count: usize,

    /// Signed enclosed volume (only meaningful when watertight).
    pub signed_volume: f64,

    /// No boundary edges.
    pub is_watertight: bool,
    /// No non-manifold edges.
    pub is_manifold: bool,
    /// Negative signed volume.
    pub is_inside_out: bool,
}

impl MeshReport {
    /// A closed, two-manifold, consistently and outward-wound solid.
    ///
    /// This is what slicers require of every 3MF object.
    #[must_use]
    pub fn is_printable(&self) -> bool {
        self.face_count > 0
            && self.invalid_index_count == 0
            && self.is_watertight
            && self.is_manifold
            && self.inconsistent_edge_count == 0
            && !self.is_inside_out
    }

    /// Total count of problems found.
    #[must_use]
    pub fn issue_count(&self) -> usize {
        self.boundary_edge_count
            + self.non_manifold_edge_count
            + self.inconsistent_edge_count
            + self.degenerate_face_count
            + self.invalid_index_count
    }
}

impl fmt::Display for MeshReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let yes_no = |b: bool| if b { "Yes" } else { "No" };

        writeln!(f, "Mesh Report:")?;
        writeln!(f, "  Vertices: {}", self.vertex_count)?;
        writeln!(f, "  Faces: {}", self.face_count)?;
        writeln!(f, "  Edges: {}", self.edge_count)?;
        writeln!(f, "  Volume: {:.6}", self.signed_volume)?;
        writeln!(f, "  Watertight: {}", yes_no(self.is_watertight))?;
        writeln!(f, "  Manifold: {}", yes_no(self.is_manifold))?;
        writeln!(
            f,
            "  Winding: {}",
            if self.is_inside_out {
                "Inside-out"
            } else if self.inconsistent_edge_count > 0 {
                "Inconsistent"
            } else {
                "Correct"
            }
        )?;

        if self.issue_count() > 0 {
            writeln!(f, "  Issues: {}", self.issue_count())?;
        }

        Ok(())
    }
}

/// Options for mesh validation.
#[derive(Debug, Clone)]
pub struct ValidationOptions {
    /// Area threshold below which a face is considered degenerate.
    pub degenerate_area_threshold: f64,
}

impl Default for ValidationOptions {
    fn default() -> Self {
        Self {
            degenerate_area_threshold: 1e-12,
        }
    }
}

/// Validate a mesh with default options.
///
/// # Example
///
/// ```
/// use mesh_types::unit_cube;
/// use mesh_validate::validate_mesh;
///
/// let report = validate_mesh(&unit_cube());
/// assert!(report.is_printable());
/// assert_eq!(report.edge_count, 18);
/// ```
#[must_use]
pub fn validate_mesh(mesh: &IndexedMesh) -> MeshReport {
    validate_mesh_with_options(mesh, &ValidationOptions::default())
}

/// Validate a mesh with custom options.
#[must_use]
pub fn validate_mesh_with_options(mesh: &IndexedMesh, options: &ValidationOptions) -> MeshReport {
    let vertex_count = mesh.vertices.len();
    let invalid_index_count = mesh
        .faces
        .iter()
        .filter(|face| face.iter().any(|&i| i as usize >= vertex_count))
        .count();

    let adjacency = MeshAdjacency::build(&mesh.faces);

    // Geometry is only inspected when every index resolves.
    let (degenerate_face_count, signed_volume) = if invalid_index_count == 0 {
        let degenerate = mesh
            .triangles()
            .filter(|tri| tri.area() < options.degenerate_area_threshold)
            .count();
        (degenerate, mesh.signed_volume())
    } else {
        (0, 0.0)
    };

    MeshReport {
        vertex_count,
        face_count: mesh.faces.len(),
        edge_count: adjacency.edge_count(),
        boundary_edge_count: adjacency.boundary_edge_count(),
        non_manifold_edge_count: adjacency.non_manifold_edge_count(),
        inconsistent_edge_count: adjacency.inconsistent_edge_count(),
        degenerate_face_count,
        invalid_index_count,
        signed_volume,
        is_watertight: adjacency.is_watertight(),
        is_manifold: adjacency.is_manifold(),
        is_inside_out: signed_volume < 0.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mesh_types::{Vertex, unit_cube};

    fn simple_triangle() -> IndexedMesh {
        let mut mesh = IndexedMesh::new();
        mesh.vertices.push(Vertex::from_coords(0.0, 0.0, 0.0));
        mesh.vertices.push(Vertex::from_coords(10.0, 0.0, 0.0));
        mesh.vertices.push(Vertex::from_coords(0.0, 10.0, 0.0));
        mesh.faces.push([0, 1, 2]);
        mesh
    }

    #[test]
    fn single_triangle_not_printable() {
        let report = validate_mesh(&simple_triangle());

        assert_eq!(report.boundary_edge_count, 3);
        assert!(!report.is_watertight);
        assert!(!report.is_printable());
    }

    #[test]
    fn cube_is_printable() {
        let report = validate_mesh(&unit_cube());

        assert_eq!(report.vertex_count, 8);
        assert_eq!(report.face_count, 12);
        assert_eq!(report.issue_count(), 0);
        assert!((report.signed_volume - 1.0).abs() < 1e-12);
        assert!(report.is_printable());
    }

    #[test]
    fn flipped_cube_is_inside_out() {
        let mut cube = unit_cube();
        cube.flip_normals();
        let report = validate_mesh(&cube);

        assert!(report.is_inside_out);
        assert_eq!(report.inconsistent_edge_count, 0);
        assert!(!report.is_printable());
    }

    #[test]
    fn one_flipped_face_is_inconsistent() {
        let mut cube = unit_cube();
        cube.faces[0].swap(1, 2);
        let report = validate_mesh(&cube);

        assert_eq!(report.inconsistent_edge_count, 3);
        assert!(!report.is_printable());
    }

    #[test]
    fn out_of_range_index_is_reported() {
        let mut mesh = simple_triangle();
        mesh.faces.push([0, 1, 7]);
        let report = validate_mesh(&mesh);

        assert_eq!(report.invalid_index_count, 1);
        assert!(!report.is_printable());
    }

    #[test]
    fn degenerate_face_is_counted() {
        let mut mesh = simple_triangle();
        mesh.vertices.push(Vertex::from_coords(20.0, 0.0, 0.0));
        mesh.faces.push([0, 1, 3]);

        assert_eq!(validate_mesh(&mesh).degenerate_face_count, 1);
    }

    #[test]
    fn report_display() {
        let display = validate_mesh(&simple_triangle()).to_string();

        assert!(display.contains("Vertices: 3"));
        assert!(display.contains("Watertight: No"));
        assert!(display.contains("Issues: 3"));
    }
}
