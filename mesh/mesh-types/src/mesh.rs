//! Indexed triangle mesh.

use crate::{Aabb, MeshBounds, MeshTopology, Triangle, Vertex};
use nalgebra::Vector3;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// An indexed triangle mesh.
///
/// Vertices and faces are stored separately, with faces referencing
/// vertices by `u32` index. This is the layout 3MF stores on disk, so a
/// mesh is written out without any conversion.
///
/// # Winding Order
///
/// Faces use **counter-clockwise (CCW) winding** when viewed from outside.
///
/// # Example
///
/// ```
/// use mesh_types::{IndexedMesh, MeshTopology, Vertex};
///
/// let mut mesh = IndexedMesh::new();
/// mesh.vertices.push(Vertex::from_coords(0.0, 0.0, 0.0));
/// mesh.vertices.push(Vertex::from_coords(1.0, 0.0, 0.0));
/// mesh.vertices.push(Vertex::from_coords(0.0, 1.0, 0.0));
/// mesh.faces.push([0, 1, 2]);
///
/// assert_eq!(mesh.vertex_count(), 3);
/// assert_eq!(mesh.face_count(), 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct IndexedMesh {
    /// Vertex data.
    pub vertices: Vec<Vertex>,

    /// Triangle faces as indices into the vertex array.
    pub faces: Vec<[u32; 3]>,
}

impl IndexedMesh {
    /// Create a new empty mesh.
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self {
            vertices: Vec::new(),
            faces: Vec::new(),
        }
    }

    /// Create an empty mesh with pre-allocated capacity.
    #[inline]
    #[must_use]
    pub fn with_capacity(vertex_count: usize, face_count: usize) -> Self {
        Self {
            vertices: Vec::with_capacity(vertex_count),
            faces: Vec::with_capacity(face_count),
        }
    }

    /// Create a mesh from vertices and faces.
    #[inline]
    #[must_use]
    pub const fn from_parts(vertices: Vec<Vertex>, faces: Vec<[u32; 3]>) -> Self {
        Self { vertices, faces }
    }

    /// Enclosed volume, positive for outward winding.
    ///
    /// Each face spans a tetrahedron with the origin; their signed volumes
    /// sum to the enclosed volume of a closed surface. Open meshes give a
    /// value that depends on where the origin is.
    #[must_use]
    pub fn signed_volume(&self) -> f64 {
        self.triangles()
            .map(|t| t.v0.coords.dot(&t.v1.coords.cross(&t.v2.coords)))
            .sum::<f64>()
            / 6.0
    }

    /// Translate every vertex by `offset`.
    pub fn translate(&mut self, offset: Vector3<f64>) {
        for vertex in &mut self.vertices {
            vertex.position += offset;
        }
    }

    /// Reverse the winding of every face.
    pub fn flip_normals(&mut self) {
        for face in &mut self.faces {
            face.swap(1, 2);
        }
    }

    /// Append another mesh, offsetting its face indices.
    ///
    /// Vertices are not welded: the result has two disjoint shells.
    #[allow(clippy::cast_possible_truncation)]
    // Truncation: mesh indices are u32, so vertex counts > 4B are unsupported
    pub fn merge(&mut self, other: &Self) {
        let vertex_offset = self.vertices.len() as u32;

        self.vertices.extend_from_slice(&other.vertices);
        self.faces.extend(
            other
                .faces
                .iter()
                .map(|f| [f[0] + vertex_offset, f[1] + vertex_offset, f[2] + vertex_offset]),
        );
    }
}

impl MeshTopology for IndexedMesh {
    #[inline]
    fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    #[inline]
    fn face_count(&self) -> usize {
        self.faces.len()
    }

    fn triangles(&self) -> impl Iterator<Item = Triangle> {
        self.faces.iter().map(|&[i0, i1, i2]| Triangle {
            v0: self.vertices[i0 as usize].position,
            v1: self.vertices[i1 as usize].position,
            v2: self.vertices[i2 as usize].position,
        })
    }
}

impl MeshBounds for IndexedMesh {
    fn bounds(&self) -> Aabb {
        Aabb::from_points(self.vertices.iter().map(|v| &v.position))
    }
}

/// Create a unit cube from (0,0,0) to (1,1,1) with outward-facing winding.
///
/// # Example
///
/// ```
/// use mesh_types::{MeshTopology, unit_cube};
///
/// let cube = unit_cube();
/// assert_eq!(cube.vertex_count(), 8);
/// assert_eq!(cube.face_count(), 12);
/// ```
#[must_use]
pub fn unit_cube() -> IndexedMesh {
    let vertices = [
        [0.0, 0.0, 0.0],
        [1.0, 0.0, 0.0],
        [1.0, 1.0, 0.0],
        [0.0, 1.0, 0.0],
        [0.0, 0.0, 1.0],
        [1.0, 0.0, 1.0],
        [1.0, 1.0, 1.0],
        [0.0, 1.0, 1.0],
    ]
    .into_iter()
    .map(Vertex::from)
    .collect();

    let faces = vec![
        // bottom (-Z)
        [0, 2, 1],
        [0, 3, 2],
        // top (+Z)
        [4, 5, 6],
        [4, 6, 7],
        // front (-Y)
        [0, 1, 5],
        [0, 5, 4],
        // back (+Y)
        [3, 7, 6],
        [3, 6, 2],
        // left (-X)
        [0, 4, 7],
        [0, 7, 3],
        // right (+X)
        [1, 2, 6],
        [1, 6, 5],
    ];

    IndexedMesh::from_parts(vertices, faces)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn mesh_is_empty() {
        let mut mesh = IndexedMesh::new();
        assert!(mesh.is_empty());

        mesh.vertices.push(Vertex::from_coords(0.0, 0.0, 0.0));
        assert!(mesh.is_empty()); // no faces

        mesh.faces.push([0, 0, 0]);
        assert!(!mesh.is_empty());
    }

    #[test]
    fn unit_cube_has_unit_volume() {
        assert_relative_eq!(unit_cube().signed_volume(), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn flipping_negates_volume() {
        let mut cube = unit_cube();
        cube.flip_normals();
        assert_relative_eq!(cube.signed_volume(), -1.0, epsilon = 1e-12);
    }

    #[test]
    fn volume_is_translation_invariant() {
        let mut cube = unit_cube();
        cube.translate(Vector3::new(12.5, -3.0, 1.0));
        assert_relative_eq!(cube.signed_volume(), 1.0, epsilon = 1e-9);
        assert_eq!(cube.bounds().z_range(), Some((1.0, 2.0)));
    }

    #[test]
    fn merge_offsets_indices() {
        let mut a = unit_cube();
        let b = unit_cube();
        a.merge(&b);

        assert_eq!(a.vertex_count(), 16);
        assert_eq!(a.face_count(), 24);
        assert_eq!(a.faces[12], [8, 10, 9]);
        assert_relative_eq!(a.signed_volume(), 2.0, epsilon = 1e-12);
    }

    #[test]
    fn empty_mesh_bounds() {
        assert!(IndexedMesh::new().bounds_opt().is_none());
    }
}
