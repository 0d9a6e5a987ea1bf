//! Property-based tests for mesh validation.
//!
//! Run with: cargo test -p mesh-validate -- proptest

use mesh_types::{IndexedMesh, Vector3, Vertex, unit_cube};
use mesh_validate::validate_mesh;
use proptest::prelude::*;

// =============================================================================
// Strategies
// =============================================================================

fn arb_vertex() -> impl Strategy<Value = Vertex> {
    prop::array::uniform3(-100.0..100.0f64).prop_map(Vertex::from)
}

/// Random triangle soup. Indices may point past the vertex array.
fn arb_soup(max_vertices: usize, max_faces: usize) -> impl Strategy<Value = IndexedMesh> {
    let vertices = prop::collection::vec(arb_vertex(), 0..=max_vertices);
    let faces = prop::collection::vec(prop::array::uniform3(0u32..40), 0..=max_faces);
    (vertices, faces).prop_map(|(vertices, faces)| IndexedMesh::from_parts(vertices, faces))
}

// =============================================================================
// Properties
// =============================================================================

proptest! {
    /// Validation must not panic, even on dangling indices.
    #[test]
    fn validation_never_panics(mesh in arb_soup(30, 60)) {
        let _ = validate_mesh(&mesh);
    }

    /// Running validation twice yields the same verdict.
    #[test]
    fn validation_is_idempotent(mesh in arb_soup(30, 60)) {
        let a = validate_mesh(&mesh);
        let b = validate_mesh(&mesh);

        prop_assert_eq!(a.edge_count, b.edge_count);
        prop_assert_eq!(a.is_manifold, b.is_manifold);
        prop_assert_eq!(a.is_watertight, b.is_watertight);
        prop_assert_eq!(a.inconsistent_edge_count, b.inconsistent_edge_count);
    }

    /// A cube stays printable wherever it is placed.
    #[test]
    fn translated_cube_is_printable(
        dx in -500.0..500.0f64,
        dy in -500.0..500.0f64,
        dz in 0.0..50.0f64,
    ) {
        let mut cube = unit_cube();
        cube.translate(Vector3::new(dx, dy, dz));
        let report = validate_mesh(&cube);

        prop_assert!(report.is_printable(), "{}", report);
        prop_assert!((report.signed_volume - 1.0).abs() < 1e-6);
    }
}

#[test]
fn disjoint_shells_are_printable() {
    let mut mesh = unit_cube();
    let mut other = unit_cube();
    other.translate(Vector3::new(3.0, 0.0, 0.0));
    mesh.merge(&other);

    let report = validate_mesh(&mesh);
    assert!(report.is_printable());
    assert!((report.signed_volume - 2.0).abs() < 1e-9);
}

#[test]
fn empty_mesh_is_not_printable() {
    let report = validate_mesh(&IndexedMesh::new());
    assert_eq!(report.face_count, 0);
    assert!(!report.is_printable());
}
