//! Plotting a paletted image into layers and packaging the extruded result.
//!
//! 1. Every non-hole pixel is marked in the cohesion layer and in the layer
//!    of its color (and, when stacked, in every lower palette color).
//! 2. Layers are extruded independently, in parallel when enabled.
//! 3. Meshes are registered in palette order: cohesion first, then colors.

use std::path::Path;

use hashbrown::HashMap;
use mesh_package::{ModelPackage, Placement};
use mesh_raster::{Extrusion, RasterLayer, RasterResult};
use mesh_types::{IndexedMesh, Rgb};
use rayon::prelude::*;
use tracing::{debug, info, warn};

use crate::error::{PrintError, PrintResult};
use crate::image::PalettedImage;
use crate::layout::GridLayout;
use crate::params::{EmptyLayerPolicy, PrintParams};

/// Object name of the shared base.
pub const COHESION_LAYER_NAME: &str = "cohesion layer";

/// One color's occupancy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorLayer {
    /// Display color.
    pub color: Rgb,
    /// Pixels printed in this color.
    pub layer: RasterLayer,
}

impl ColorLayer {
    /// Object name, `"#RRGGBB layer"`.
    #[must_use]
    pub fn name(&self) -> String {
        format!("{} layer", self.color.to_hex())
    }
}

/// Occupancy of every layer of a mosaic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlottedLayers {
    /// The base under every printed pixel.
    pub cohesion: RasterLayer,
    /// One layer per distinct palette color, in first-occurrence order.
    pub colors: Vec<ColorLayer>,
}

/// Split `image` into a cohesion layer and one layer per distinct color.
///
/// Palette entries with the same color share a layer. Its stacking position
/// is that of the color's first palette entry. When stacked, a pixel is
/// marked in the layers below its own layer rather than in the layers of
/// every lower palette index, so a repeated color is never covered by a
/// color stacked above it.
///
/// # Errors
///
/// Returns [`PrintError::Raster`] if a layer cannot be created or marked.
pub fn plot_layers(
    image: &PalettedImage,
    layout: &GridLayout,
    layered: bool,
) -> PrintResult<PlottedLayers> {
    let (width, height) = (image.width(), image.height());

    let mut slot_of_color: HashMap<Rgb, usize> = HashMap::new();
    let mut colors: Vec<ColorLayer> = Vec::new();
    let mut slot_of_index = Vec::with_capacity(image.palette().len());
    for &color in image.palette() {
        let slot = match slot_of_color.get(&color) {
            Some(&slot) => slot,
            None => {
                colors.push(ColorLayer {
                    color,
                    layer: RasterLayer::new(width, height)?,
                });
                slot_of_color.insert(color, colors.len() - 1);
                colors.len() - 1
            }
        };
        slot_of_index.push(slot);
    }

    let mut cohesion = RasterLayer::new(width, height)?;
    let mut holes = 0_usize;
    for (x, y, index) in image.pixels() {
        if layout.is_hole(x, y) {
            holes += 1;
            continue;
        }
        let (px, py) = (to_i64(x), to_i64(y));

        cohesion.mark(px, py)?;
        colors[slot_of_index[index]].layer.mark(px, py)?;
        if layered {
            // Slots are numbered in stacking order.
            for below in &mut colors[..slot_of_index[index]] {
                below.layer.mark(px, py)?;
            }
        }
    }

    debug!(
        width,
        height,
        holes,
        colors = colors.len(),
        layered,
        "plotted layers"
    );
    Ok(PlottedLayers { cohesion, colors })
}

/// One extrusion to run.
struct LayerJob<'a> {
    name: String,
    color: Option<Rgb>,
    layer: &'a RasterLayer,
    extrusion: Extrusion,
}

impl LayerJob<'_> {
    fn run(&self) -> RasterResult<IndexedMesh> {
        self.layer.extrude(&self.extrusion)
    }

    fn placement(&self) -> Placement {
        let e = &self.extrusion;
        Placement::new(e.base_z, e.thickness, e.scale_x, e.scale_y)
    }
}

/// Build the complete package for `image`.
///
/// The cohesion layer spans `[0, cohesion)`. Color layer `k` spans
/// `[cohesion + k·color, cohesion + (k+1)·color)` when stacked and
/// `[cohesion, cohesion + color)` otherwise.
///
/// # Errors
///
/// - [`PrintError::InvalidParams`] if `params` do not validate
/// - [`PrintError::ResolutionMismatch`] if the image size differs from the
///   derived layout
/// - [`PrintError::Raster`] for an empty layer under
///   [`EmptyLayerPolicy::Abort`]
pub fn build_package(image: &PalettedImage, params: &PrintParams) -> PrintResult<ModelPackage> {
    let layout = GridLayout::from_params(params)?;
    if (image.width(), image.height()) != (layout.width(), layout.height()) {
        return Err(PrintError::ResolutionMismatch {
            expected_width: layout.width(),
            expected_height: layout.height(),
            actual_width: image.width(),
            actual_height: image.height(),
        });
    }

    let plotted = plot_layers(image, &layout, params.layered)?;
    let (sx, sy) = (layout.x.scale, layout.y.scale);
    let cohesion_h = params.cohesion_layer_height;
    let color_h = params.color_layer_height;

    let mut jobs = Vec::with_capacity(plotted.colors.len() + 1);
    jobs.push(LayerJob {
        name: COHESION_LAYER_NAME.to_string(),
        color: None,
        layer: &plotted.cohesion,
        extrusion: Extrusion::new(0.0, cohesion_h, sx, sy),
    });
    for (k, color_layer) in plotted.colors.iter().enumerate() {
        let base_z = if params.layered {
            cohesion_h + to_f64(k) * color_h
        } else {
            cohesion_h
        };
        jobs.push(LayerJob {
            name: color_layer.name(),
            color: Some(color_layer.color),
            layer: &color_layer.layer,
            extrusion: Extrusion::new(base_z, color_h, sx, sy),
        });
    }

    let meshes: Vec<RasterResult<IndexedMesh>> = if params.parallel {
        jobs.par_iter().map(LayerJob::run).collect()
    } else {
        jobs.iter().map(LayerJob::run).collect()
    };

    let mut package = ModelPackage::new();
    for (job, mesh) in jobs.iter().zip(meshes) {
        let mesh = match mesh {
            Ok(mesh) => mesh,
            Err(err) if err.is_empty_layer() && params.empty_layers == EmptyLayerPolicy::Skip => {
                warn!(object = %job.name, "skipping layer with no pixels");
                continue;
            }
            Err(err) => return Err(err.into()),
        };

        match job.color {
            Some(color) => {
                package.add_colored_object(mesh, job.name.clone(), job.placement(), color)?;
            }
            None => package.add_object(mesh, job.name.clone(), job.placement())?,
        }
    }

    info!(
        objects = package.len(),
        colors = plotted.colors.len(),
        layered = params.layered,
        "built mosaic package"
    );
    Ok(package)
}

/// Build the package for `image` and save it to `path`.
///
/// # Errors
///
/// Any error of [`build_package`], plus [`PrintError::Package`] if saving
/// fails, including when every layer was skipped as empty.
pub fn print_to_file<P: AsRef<Path>>(
    image: &PalettedImage,
    params: &PrintParams,
    path: P,
) -> PrintResult<()> {
    let package = build_package(image, params)?;
    package.save(path)?;
    Ok(())
}

#[inline]
#[allow(clippy::cast_possible_wrap)]
const fn to_i64(v: usize) -> i64 {
    v as i64
}

#[inline]
#[allow(clippy::cast_precision_loss)]
fn to_f64(v: usize) -> f64 {
    v as f64
}
