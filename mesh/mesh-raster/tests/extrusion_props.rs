//! Property-based and scenario tests for layer extrusion.
//!
//! Run with: cargo test -p mesh-raster

#![allow(clippy::unwrap_used)]

use approx::assert_relative_eq;
use mesh_raster::{Extrusion, RasterError, RasterLayer};
use mesh_types::MeshTopology;
use mesh_validate::validate_mesh;
use proptest::prelude::*;

// =============================================================================
// Strategies
// =============================================================================

/// Random occupancy grid with at least one occupied pixel.
fn arb_layer() -> impl Strategy<Value = RasterLayer> {
    (1usize..8, 1usize..8)
        .prop_flat_map(|(w, h)| {
            (
                Just((w, h)),
                prop::collection::vec(any::<bool>(), w * h),
                0..w * h,
            )
        })
        .prop_map(|((w, h), cells, forced)| {
            let mut layer = RasterLayer::new(w, h).unwrap();
            for (i, on) in cells.into_iter().enumerate() {
                if on || i == forced {
                    layer.mark((i % w) as i64, (i / w) as i64).unwrap();
                }
            }
            layer
        })
}

fn arb_extrusion() -> impl Strategy<Value = Extrusion> {
    (-5.0..5.0f64, 0.05..3.0f64, 0.1..2.0f64, 0.1..2.0f64)
        .prop_map(|(z, t, sx, sy)| Extrusion::new(z, t, sx, sy))
}

// =============================================================================
// Properties
// =============================================================================

proptest! {
    /// Any occupancy pattern extrudes into a closed, outward-wound surface.
    #[test]
    fn extrusion_is_printable(layer in arb_layer(), params in arb_extrusion()) {
        let mesh = layer.extrude(&params).unwrap();
        let report = validate_mesh(&mesh);

        prop_assert!(report.is_printable(), "{}", report);
        prop_assert!(report.signed_volume > 0.0);
    }

    /// Volume equals pixel count times pixel footprint times thickness.
    #[test]
    fn extrusion_volume_matches_pixel_count(layer in arb_layer(), params in arb_extrusion()) {
        let mesh = layer.extrude(&params).unwrap();

        #[allow(clippy::cast_precision_loss)]
        let expected =
            layer.occupied_count() as f64 * params.scale_x * params.scale_y * params.thickness;
        prop_assert!((mesh.signed_volume() - expected).abs() < 1e-9 * expected.max(1.0));
    }

    /// The mesh Z extent is exactly the slab.
    #[test]
    fn extrusion_spans_slab(layer in arb_layer(), params in arb_extrusion()) {
        use mesh_types::MeshBounds;

        let mesh = layer.extrude(&params).unwrap();
        let (lo, hi) = mesh.bounds().z_range().unwrap();

        prop_assert!((lo - params.base_z).abs() < 1e-12);
        prop_assert!((hi - params.top_z()).abs() < 1e-12);
    }
}

// =============================================================================
// Scenarios
// =============================================================================

#[test]
fn full_three_by_three_slab() {
    let mut layer = RasterLayer::new(3, 3).unwrap();
    for y in 0..3 {
        for x in 0..3 {
            layer.mark(x, y).unwrap();
        }
    }

    let mesh = layer.extrude(&Extrusion::new(0.0, 2.0, 1.0, 1.0)).unwrap();
    assert_relative_eq!(mesh.signed_volume(), 18.0, epsilon = 1e-12);
    assert_eq!(mesh.face_count(), 60);
    assert_eq!(mesh.vertex_count(), 32);

    let (mut up, mut down, mut side) = (0, 0, 0);
    for tri in mesh.triangles() {
        let n = tri.normal().unwrap();
        if n.z > 0.5 {
            up += 1;
        } else if n.z < -0.5 {
            down += 1;
        } else {
            side += 1;
        }
    }
    assert_eq!((up, down, side), (18, 18, 24));
    assert!(validate_mesh(&mesh).is_printable());
}

#[test]
fn remarking_yields_identical_mesh() {
    let params = Extrusion::new(1.0, 0.6, 0.8, 0.8);
    let mut once = RasterLayer::new(4, 3).unwrap();
    let mut twice = RasterLayer::new(4, 3).unwrap();

    for (x, y) in [(0, 0), (1, 0), (3, 2), (2, 1)] {
        once.mark(x, y).unwrap();
        twice.mark(x, y).unwrap();
        twice.mark(x, y).unwrap();
    }

    assert_eq!(once, twice);
    assert_eq!(once.extrude(&params).unwrap(), twice.extrude(&params).unwrap());
}

#[test]
fn marking_rejects_outside_coordinates() {
    let (w, h) = (5_i64, 4_i64);
    let mut layer = RasterLayer::new(5, 4).unwrap();

    assert!(matches!(layer.mark(-1, 0), Err(RasterError::OutOfBounds { .. })));
    assert!(matches!(layer.mark(w, 0), Err(RasterError::OutOfBounds { .. })));
    assert!(matches!(layer.mark(0, h), Err(RasterError::OutOfBounds { .. })));
    assert!(layer.mark(w - 1, h - 1).is_ok());
    assert_eq!(layer.occupied_count(), 1);
}

#[test]
fn error_messages_name_the_problem() {
    let err = RasterLayer::new(0, 3).unwrap_err();
    assert!(err.to_string().contains("0x3"));

    let err = RasterLayer::new(2, 2).unwrap().mark(7, 1).unwrap_err();
    assert_eq!(err.to_string(), "pixel (7, 1) is outside the 2x2 raster");
}

#[test]
fn checkerboard_is_manifold() {
    let mut layer = RasterLayer::new(6, 6).unwrap();
    for y in 0..6 {
        for x in 0..6 {
            if (x + y) % 2 == 0 {
                layer.mark(x, y).unwrap();
            }
        }
    }

    let mesh = layer.extrude(&Extrusion::default()).unwrap();
    let report = validate_mesh(&mesh);

    assert_eq!(report.non_manifold_edge_count, 0);
    assert!(report.is_printable(), "{report}");
    assert_relative_eq!(mesh.signed_volume(), 18.0, epsilon = 1e-12);
}
