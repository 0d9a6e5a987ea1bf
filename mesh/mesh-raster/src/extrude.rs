//! Extrusion of occupied pixels into a closed triangle mesh.
//!
//! Every occupied pixel contributes its top and bottom quad. A side quad is
//! emitted only where the neighbor in that direction is unoccupied or off
//! the grid, so walls appear on region boundaries and nowhere else.
//!
//! Vertices live on the corner lattice and are shared between pixels,
//! which stitches the quads into one surface. Each quad is split into two
//! triangles `(a, b, c)` and `(a, c, d)`, so every lattice edge ends up in
//! exactly two triangles.
//!
//! The one exception is a *pinched* corner, touched by exactly two
//! diagonally opposite occupied pixels. Sharing its vertices would put
//! four wall triangles on the vertical corner edge, so each of the two
//! pixels gets a private copy instead.

use hashbrown::HashMap;
use mesh_types::{IndexedMesh, Vertex};
use tracing::debug;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{RasterError, RasterResult};
use crate::layer::RasterLayer;

/// Placement and scale of an extruded layer.
///
/// # Example
///
/// ```
/// use mesh_raster::Extrusion;
///
/// let params = Extrusion::new(1.0, 0.6, 0.8, 0.8);
/// assert!(params.validate().is_ok());
/// assert!((params.top_z() - 1.6).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Extrusion {
    /// Elevation of the bottom faces, in millimeters.
    pub base_z: f64,
    /// Height of the solid, in millimeters.
    pub thickness: f64,
    /// Width of one pixel along X, in millimeters.
    pub scale_x: f64,
    /// Depth of one pixel along Y, in millimeters.
    pub scale_y: f64,
}

impl Default for Extrusion {
    fn default() -> Self {
        Self {
            base_z: 0.0,
            thickness: 1.0,
            scale_x: 1.0,
            scale_y: 1.0,
        }
    }
}

impl Extrusion {
    /// Create extrusion parameters.
    #[must_use]
    pub const fn new(base_z: f64, thickness: f64, scale_x: f64, scale_y: f64) -> Self {
        Self {
            base_z,
            thickness,
            scale_x,
            scale_y,
        }
    }

    /// Elevation of the top faces.
    #[inline]
    #[must_use]
    pub fn top_z(&self) -> f64 {
        self.base_z + self.thickness
    }

    /// Check that every parameter describes a real, non-degenerate solid.
    ///
    /// # Errors
    ///
    /// Returns the first offending parameter as a [`RasterError`].
    pub fn validate(&self) -> RasterResult<()> {
        if !self.base_z.is_finite() {
            return Err(RasterError::InvalidElevation {
                base_z: self.base_z,
            });
        }
        if !(self.thickness.is_finite() && self.thickness > 0.0) {
            return Err(RasterError::InvalidThickness {
                thickness: self.thickness,
            });
        }
        for (axis, scale) in [('x', self.scale_x), ('y', self.scale_y)] {
            if !(scale.is_finite() && scale > 0.0) {
                return Err(RasterError::InvalidScale { axis, scale });
            }
        }
        Ok(())
    }
}

/// Sentinel for a lattice corner whose vertex has not been created yet.
const UNSET: u32 = u32::MAX;

/// Below one occupied pixel per this many lattice slots, shared corners are
/// kept in a map instead of a full lattice array.
const SPARSE_RATIO: usize = 16;

/// Shared vertex index per `(level, corner)` slot.
#[derive(Debug)]
enum SharedCorners {
    Dense(Vec<u32>),
    Sparse(HashMap<usize, u32>),
}

impl SharedCorners {
    fn for_layer(layer: &RasterLayer) -> Self {
        let slots = (layer.width() + 1) * (layer.height() + 1) * 2;
        if layer.occupied_count().saturating_mul(SPARSE_RATIO) < slots {
            Self::Sparse(HashMap::with_capacity(layer.occupied_count() * 4))
        } else {
            Self::Dense(vec![UNSET; slots])
        }
    }

    fn get(&self, slot: usize) -> Option<u32> {
        match self {
            Self::Dense(slots) => Some(slots[slot]).filter(|&i| i != UNSET),
            Self::Sparse(map) => map.get(&slot).copied(),
        }
    }

    fn insert(&mut self, slot: usize, index: u32) {
        match self {
            Self::Dense(slots) => slots[slot] = index,
            Self::Sparse(map) => {
                map.insert(slot, index);
            }
        }
    }
}

/// Bottom or top of the slab.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum Level {
    Bottom = 0,
    Top = 1,
}

/// Lazily creates one vertex per lattice corner and level.
struct VertexLattice<'a> {
    layer: &'a RasterLayer,
    params: &'a Extrusion,
    mesh: IndexedMesh,
    /// Shared vertices, indexed by `level * corners + corner`.
    shared: SharedCorners,
    /// Private vertices at pinched corners, keyed by `(corner, level, pixel)`.
    split: HashMap<(usize, Level, usize), u32>,
}

impl<'a> VertexLattice<'a> {
    fn new(layer: &'a RasterLayer, params: &'a Extrusion, shared: SharedCorners) -> Self {
        let occupied = layer.occupied_count();

        Self {
            layer,
            params,
            // Roughly one corner per pixel per level, and two top plus two
            // bottom triangles per pixel before walls.
            mesh: IndexedMesh::with_capacity(occupied * 2 + 8, occupied * 4 + 8),
            shared,
            split: HashMap::new(),
        }
    }

    /// Vertex index of corner `(cx, cy)` as seen from pixel `(px, py)`.
    fn vertex(&mut self, cx: usize, cy: usize, level: Level, px: usize, py: usize) -> u32 {
        let stride = self.layer.width() + 1;
        let corner = cy * stride + cx;

        if self.is_pinched(cx, cy) {
            let pixel = py * self.layer.width() + px;
            let key = (corner, level, pixel);
            if let Some(&index) = self.split.get(&key) {
                return index;
            }
            let index = self.push(cx, cy, level);
            self.split.insert(key, index);
            return index;
        }

        let corners = stride * (self.layer.height() + 1);
        let slot = level as usize * corners + corner;
        if let Some(index) = self.shared.get(slot) {
            return index;
        }
        let index = self.push(cx, cy, level);
        self.shared.insert(slot, index);
        index
    }

    /// Exactly two diagonally opposite pixels around the corner are occupied.
    fn is_pinched(&self, cx: usize, cy: usize) -> bool {
        let (x, y) = (to_i64(cx), to_i64(cy));
        let sw = self.layer.is_marked(x - 1, y - 1);
        let se = self.layer.is_marked(x, y - 1);
        let nw = self.layer.is_marked(x - 1, y);
        let ne = self.layer.is_marked(x, y);

        (sw && ne && !se && !nw) || (se && nw && !sw && !ne)
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
    // Truncation: RasterLayer::new caps the lattice well below u32::MAX vertices
    fn push(&mut self, cx: usize, cy: usize, level: Level) -> u32 {
        let z = match level {
            Level::Bottom => self.params.base_z,
            Level::Top => self.params.top_z(),
        };
        let index = self.mesh.vertices.len() as u32;
        self.mesh.vertices.push(Vertex::from_coords(
            cx as f64 * self.params.scale_x,
            cy as f64 * self.params.scale_y,
            z,
        ));
        index
    }

    /// Emit quad `a b c d`, counter-clockwise as seen from outside.
    fn quad(&mut self, [a, b, c, d]: [u32; 4]) {
        self.mesh.faces.push([a, b, c]);
        self.mesh.faces.push([a, c, d]);
    }
}

#[inline]
#[allow(clippy::cast_possible_wrap)]
// Wrap: lattice coordinates are bounded by RasterLayer::new
const fn to_i64(v: usize) -> i64 {
    v as i64
}

/// Build the solid for a non-empty layer with validated parameters.
pub(crate) fn extrude_layer(layer: &RasterLayer, params: &Extrusion) -> IndexedMesh {
    extrude_with(layer, params, SharedCorners::for_layer(layer))
}

fn extrude_with(layer: &RasterLayer, params: &Extrusion, shared: SharedCorners) -> IndexedMesh {
    let mut lattice = VertexLattice::new(layer, params, shared);
    let mut walls = 0_usize;

    for (px, py) in layer.occupied() {
        let (x, y) = (to_i64(px), to_i64(py));

        // Corners in CCW order seen from above: (x,y) (x+1,y) (x+1,y+1) (x,y+1)
        let mut corners = |level| {
            [
                lattice.vertex(px, py, level, px, py),
                lattice.vertex(px + 1, py, level, px, py),
                lattice.vertex(px + 1, py + 1, level, px, py),
                lattice.vertex(px, py + 1, level, px, py),
            ]
        };
        let [b00, b10, b11, b01] = corners(Level::Bottom);
        let [t00, t10, t11, t01] = corners(Level::Top);

        lattice.quad([t00, t10, t11, t01]);
        lattice.quad([b00, b01, b11, b10]);

        if !layer.is_marked(x, y - 1) {
            lattice.quad([b00, b10, t10, t00]);
            walls += 1;
        }
        if !layer.is_marked(x, y + 1) {
            lattice.quad([b11, b01, t01, t11]);
            walls += 1;
        }
        if !layer.is_marked(x + 1, y) {
            lattice.quad([b10, b11, t11, t10]);
            walls += 1;
        }
        if !layer.is_marked(x - 1, y) {
            lattice.quad([b01, b00, t00, t01]);
            walls += 1;
        }
    }

    let mesh = lattice.mesh;
    debug!(
        width = layer.width(),
        height = layer.height(),
        pixels = layer.occupied_count(),
        walls,
        pinched = lattice.split.len(),
        sparse = matches!(lattice.shared, SharedCorners::Sparse(_)),
        vertices = mesh.vertices.len(),
        faces = mesh.faces.len(),
        "extruded raster layer"
    );
    mesh
}
