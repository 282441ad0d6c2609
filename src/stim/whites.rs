//! stim/whites.rs — White's illusion gratings with a target marker strip.
//!
//! Layout: `n_bars` vertical square-wave bars (even index black, odd white)
//! over `visual_size` degrees. The left target replaces part of bar
//! `6 + context_left`, the right target part of bar `12 + context_right`, so
//! context 0 puts a target on a black bar and context 1 on a white bar.
//! Below the grating a strip of background shows a dark band under each
//! target.

use std::path::Path;

use image::{GrayImage, Luma};
use tracing::{debug, info};

use crate::config::WhitesConfig;
use crate::core::combinations::{cross, pairs};
use crate::core::naming::WhiteName;
use crate::error::Result;
use crate::stim::ensure_dir;
use crate::stim::manifest::{AssetEntry, Experiment, Manifest};

pub const BAR_INTENSITIES: (f64, f64) = (0.0, 1.0);

/// Mask value per pixel: 0 background, 1 left target, 2 right target.
pub type TargetMask = Vec<u8>;

/// Row-major grayscale field in [0, 1].
#[derive(Clone, Debug, PartialEq)]
pub struct Field {
    pub width: usize,
    pub height: usize,
    pub data: Vec<f64>,
}

impl Field {
    pub fn filled(width: usize, height: usize, value: f64) -> Self {
        Self {
            width,
            height,
            data: vec![value; width * height],
        }
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> f64 {
        self.data[y * self.width + x]
    }

    #[inline]
    pub fn set(&mut self, x: usize, y: usize, v: f64) {
        self.data[y * self.width + x] = v;
    }

    pub fn to_gray_image(&self) -> GrayImage {
        let mut img = GrayImage::new(self.width as u32, self.height as u32);
        for y in 0..self.height {
            for x in 0..self.width {
                img.put_pixel(x as u32, y as u32, Luma([to_u8(self.get(x, y))]));
            }
        }
        img
    }
}

#[inline]
pub fn to_u8(v: f64) -> u8 {
    (v.clamp(0.0, 1.0) * 255.0).round() as u8
}

/// Bar indices of the (left, right) targets.
pub fn target_bar_indices(contexts: (u8, u8)) -> (usize, usize) {
    (6 + contexts.0 as usize, 12 + contexts.1 as usize)
}

/// Pixel geometry derived from the degree-based configuration.
#[derive(Clone, Debug, PartialEq)]
pub struct Geometry {
    pub width: usize,
    pub height: usize,
    pub n_bars: usize,
    pub target_rows: std::ops::Range<usize>,
}

impl Geometry {
    pub fn from_config(cfg: &WhitesConfig) -> Self {
        let height = (cfg.visual_size.0 * cfg.ppd).round() as usize;
        let width = (cfg.visual_size.1 * cfg.ppd).round() as usize;
        let target_h = ((cfg.target_height * cfg.ppd).round() as usize).min(height);
        let top = (height - target_h) / 2;
        Self {
            width,
            height,
            n_bars: cfg.n_bars,
            target_rows: top..top + target_h,
        }
    }

    pub fn bar_width(&self) -> f64 {
        self.width as f64 / self.n_bars as f64
    }

    /// Bar under the centre of column `x`.
    pub fn bar_of_column(&self, x: usize) -> usize {
        let bar = ((x as f64 + 0.5) / self.bar_width()).floor() as usize;
        bar.min(self.n_bars.saturating_sub(1))
    }
}

/// The uncropped grating and its target mask.
pub fn grating(geom: &Geometry, targets: (f64, f64), contexts: (u8, u8)) -> (Field, TargetMask) {
    let (left_bar, right_bar) = target_bar_indices(contexts);
    let mut field = Field::filled(geom.width, geom.height, 0.0);
    let mut mask = vec![0u8; geom.width * geom.height];

    for x in 0..geom.width {
        let bar = geom.bar_of_column(x);
        let bar_value = if bar % 2 == 0 {
            BAR_INTENSITIES.0
        } else {
            BAR_INTENSITIES.1
        };
        let target = if bar == left_bar {
            Some((1u8, targets.0))
        } else if bar == right_bar {
            Some((2u8, targets.1))
        } else {
            None
        };
        for y in 0..geom.height {
            match target {
                Some((id, value)) if geom.target_rows.contains(&y) => {
                    field.set(x, y, value);
                    mask[y * geom.width + x] = id;
                }
                _ => field.set(x, y, bar_value),
            }
        }
    }
    (field, mask)
}

/// Full stimulus: cropped grating stacked on the marker strip.
pub fn render_white(cfg: &WhitesConfig, name: &WhiteName) -> Field {
    let geom = Geometry::from_config(cfg);
    let (img, mask) = grating(
        &geom,
        (name.lum_left, name.lum_right),
        (name.context_left, name.context_right),
    );

    let width = geom.width.saturating_sub(cfg.crop_columns);
    let mut out = Field::filled(width, geom.height + cfg.marker_rows, cfg.background);
    for y in 0..geom.height {
        for x in 0..width {
            out.set(x, y, img.get(x, y));
        }
    }

    let mid = geom.height / 2;
    let band_start = geom.height + cfg.marker_rows - cfg.marker_band_rows;
    for x in 0..width {
        let marker = match mask[mid * geom.width + x] {
            0 => cfg.background,
            _ => 0.0,
        };
        for y in band_start..geom.height + cfg.marker_rows {
            out.set(x, y, marker);
        }
    }
    out
}

pub fn save_white(cfg: &WhitesConfig, name: &WhiteName, out_dir: &Path) -> Result<()> {
    let field = render_white(cfg, name);
    field.to_gray_image().save(out_dir.join(name.to_string()))?;
    Ok(())
}

/// Every stimulus the pairwise design can reference: each pair of atoms in
/// both left/right orders.
pub fn all_white_names(cfg: &WhitesConfig) -> Vec<WhiteName> {
    let atoms = cross(&cfg.luminances(), &cfg.contexts);
    let mut names = Vec::new();
    for [a, b] in pairs(&atoms) {
        let forward = WhiteName {
            lum_left: a.level,
            lum_right: b.level,
            context_left: a.context,
            context_right: b.context,
        };
        names.push(forward);
        names.push(forward.swapped());
    }
    names
}

pub fn generate_white_stimuli(cfg: &WhitesConfig, out_dir: &Path) -> Result<Manifest> {
    ensure_dir(out_dir)?;
    let mut manifest = Manifest::new(Experiment::Whites);
    for name in all_white_names(cfg) {
        debug!("generating {name}");
        save_white(cfg, &name, out_dir)?;
        manifest.push(AssetEntry::white(name));
    }
    manifest.write(out_dir)?;
    info!(images = manifest.len(), dir = %out_dir.display(), "White's stimuli done");
    Ok(manifest)
}
