use std::{path::Path, sync::Arc};

use anyhow::Context as _;
use image::RgbaImage;

use crate::{
    chart::{
        svg::{ChartStyle, chart_svg},
        table::WeightTable,
    },
    foundation::{
        core::Dimensions,
        error::{GazerError, GazerResult},
    },
};

/// Anything that can rasterize the diary chart at a requested pixel size.
///
/// `scale` is the render resolution (pixels per chart unit at the "100%" reference); the
/// returned raster must be exactly `size`.
pub trait ChartRenderer: Send + Sync {
    fn render_chart(&self, size: Dimensions, scale: f64) -> GazerResult<RgbaImage>;
}

/// Renders [`WeightTable`] charts through an SVG document rasterized with `resvg`.
pub struct SvgChartRenderer {
    table: WeightTable,
    style: ChartStyle,
    base_resolution: f64,
    fontdb: Arc<usvg::fontdb::Database>,
}

impl SvgChartRenderer {
    pub fn new(table: WeightTable, base_resolution: f64) -> GazerResult<Self> {
        if !base_resolution.is_finite() || base_resolution <= 0.0 {
            return Err(GazerError::config(format!(
                "base resolution must be > 0, got {base_resolution}"
            )));
        }
        Ok(Self {
            table,
            style: ChartStyle::default(),
            base_resolution,
            fontdb: build_fontdb(None),
        })
    }

    /// Also load `.ttf`/`.otf`/`.ttc` files found directly in `dir`.
    pub fn with_font_dir(mut self, dir: &Path) -> Self {
        self.fontdb = build_fontdb(Some(dir));
        self
    }
}

impl ChartRenderer for SvgChartRenderer {
    #[tracing::instrument(skip(self), fields(rows = self.table.rows.len()))]
    fn render_chart(&self, size: Dimensions, scale: f64) -> GazerResult<RgbaImage> {
        size.validate()?;
        if !scale.is_finite() || scale <= 0.0 {
            return Err(GazerError::render(format!("invalid render scale {scale}")));
        }

        let unit = scale / self.base_resolution;
        let svg = chart_svg(&self.table, &self.style, size, unit);

        let opts = usvg::Options {
            fontdb: self.fontdb.clone(),
            ..Default::default()
        };
        let tree = usvg::Tree::from_data(svg.as_bytes(), &opts).context("parse chart svg")?;

        let mut pixmap = resvg::tiny_skia::Pixmap::new(size.width, size.height)
            .ok_or_else(|| GazerError::resource(format!("failed to allocate {size} pixmap")))?;
        resvg::render(
            &tree,
            resvg::tiny_skia::Transform::identity(),
            &mut pixmap.as_mut(),
        );

        let mut rgba = pixmap.take();
        unpremultiply_rgba8_in_place(&mut rgba);
        RgbaImage::from_raw(size.width, size.height, rgba)
            .ok_or_else(|| GazerError::render("chart pixmap size mismatch"))
    }
}

fn build_fontdb(extra_dir: Option<&Path>) -> Arc<usvg::fontdb::Database> {
    let mut db = usvg::fontdb::Database::new();
    db.load_system_fonts();
    if let Some(dir) = extra_dir {
        load_fonts_from_dir(&mut db, dir);
    }
    Arc::new(db)
}

fn load_fonts_from_dir(db: &mut usvg::fontdb::Database, dir: &Path) {
    let Ok(rd) = std::fs::read_dir(dir) else {
        tracing::warn!(dir = %dir.display(), "font directory not readable");
        return;
    };

    for entry in rd.flatten() {
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let Some(ext) = path.extension().and_then(|s| s.to_str()) else {
            continue;
        };
        let ext = ext.to_ascii_lowercase();
        if ext != "ttf" && ext != "otf" && ext != "ttc" {
            continue;
        }
        if let Err(e) = db.load_font_file(&path) {
            tracing::warn!(font = %path.display(), "skipping font: {e}");
        }
    }
}

fn unpremultiply_rgba8_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = u32::from(px[3]);
        if a == 0 || a == 255 {
            continue;
        }
        for c in &mut px[..3] {
            *c = ((u32::from(*c) * 255 + a / 2) / a).min(255) as u8;
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/chart/renderer.rs"]
mod tests;
