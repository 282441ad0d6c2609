//! stim/dots.rs — non-overlapping dot clouds for the numerosity experiment.
//!
//! Dots are sampled uniformly inside the unit disk by rejection: a candidate
//! is kept only if it is farther than `min_distance` from every placed dot.
//! Each dot gets a bounded number of candidates so an infeasible density
//! fails instead of spinning forever.

use std::f64::consts::PI;
use std::path::Path;

use plotters::prelude::*;
use rand::Rng;
use tracing::{debug, info};

use crate::config::NumerosityConfig;
use crate::core::naming::DotCloudName;
use crate::error::{Result, StimError};
use crate::stim::ensure_dir;
use crate::stim::manifest::{AssetEntry, Experiment, Manifest};

/// Half-width of the plotted square in disk units.
pub const AXIS_LIMIT: f64 = 1.1;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn distance(&self, other: &Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// Uniform point in a disk of `radius` centred at the origin.
pub fn random_point_in_disk<R: Rng + ?Sized>(rng: &mut R, radius: f64) -> Point {
    let r = radius * rng.random::<f64>().sqrt();
    let theta = 2.0 * PI * rng.random::<f64>();
    Point {
        x: r * theta.cos(),
        y: r * theta.sin(),
    }
}

/// Place `n` dots in the unit disk, pairwise distance strictly above
/// `min_distance`.
pub fn place_dots<R: Rng + ?Sized>(
    rng: &mut R,
    n: usize,
    min_distance: f64,
    max_attempts_per_dot: u32,
) -> Result<Vec<Point>> {
    let mut placed: Vec<Point> = Vec::with_capacity(n);
    if n == 0 {
        return Ok(placed);
    }
    placed.push(random_point_in_disk(rng, 1.0));

    while placed.len() < n {
        let mut accepted = None;
        for _ in 0..max_attempts_per_dot {
            let candidate = random_point_in_disk(rng, 1.0);
            if placed.iter().all(|p| p.distance(&candidate) > min_distance) {
                accepted = Some(candidate);
                break;
            }
        }
        match accepted {
            Some(p) => placed.push(p),
            None => {
                return Err(StimError::InfeasibleDensity {
                    placed: placed.len(),
                    requested: n,
                    min_distance,
                });
            }
        }
    }
    Ok(placed)
}

/// Smallest pairwise distance, `None` for fewer than two dots.
pub fn min_pairwise_distance(points: &[Point]) -> Option<f64> {
    let mut best: Option<f64> = None;
    for (i, a) in points.iter().enumerate() {
        for b in &points[i + 1..] {
            let d = a.distance(b);
            best = Some(best.map_or(d, |m| m.min(d)));
        }
    }
    best
}

#[derive(Clone, Copy, Debug)]
pub struct DotStyle {
    pub size_px: u32,
    pub dot_radius_px: u32,
    pub background: RGBColor,
    pub dot: RGBColor,
}

impl DotStyle {
    pub fn from_config(cfg: &NumerosityConfig) -> Self {
        Self {
            size_px: cfg.image_size_px,
            dot_radius_px: cfg.dot_radius_px,
            ..Self::default()
        }
    }
}

impl Default for DotStyle {
    fn default() -> Self {
        Self {
            size_px: 400,
            dot_radius_px: 6,
            background: RGBColor(128, 128, 128),
            dot: BLACK,
        }
    }
}

/// Draw the dots on a gray square, no axes, both axes spanning
/// `[-AXIS_LIMIT, AXIS_LIMIT]`.
pub fn render_dot_cloud(out_path: &Path, points: &[Point], style: &DotStyle) -> Result<()> {
    let root = BitMapBackend::new(out_path, (style.size_px, style.size_px)).into_drawing_area();
    root.fill(&style.background).map_err(StimError::plot)?;

    let mut chart = ChartBuilder::on(&root)
        .build_cartesian_2d(-AXIS_LIMIT..AXIS_LIMIT, -AXIS_LIMIT..AXIS_LIMIT)
        .map_err(StimError::plot)?;

    let radius = style.dot_radius_px as i32;
    chart
        .draw_series(
            points
                .iter()
                .map(|p| Circle::new((p.x, p.y), radius, style.dot.filled())),
        )
        .map_err(StimError::plot)?;

    root.present().map_err(StimError::plot)?;
    Ok(())
}

/// Render every level × realization into `out_dir` and write the manifest.
pub fn generate_dot_stimuli<R: Rng + ?Sized>(
    cfg: &NumerosityConfig,
    out_dir: &Path,
    rng: &mut R,
) -> Result<Manifest> {
    ensure_dir(out_dir)?;
    let style = DotStyle::from_config(cfg);
    let mut manifest = Manifest::new(Experiment::Numerosity);

    for &level in &cfg.levels {
        for realization in 1..=cfg.n_realizations {
            let points = place_dots(
                rng,
                level as usize,
                cfg.min_distance,
                cfg.max_attempts_per_dot,
            )?;
            let name = DotCloudName::new(level, realization);
            render_dot_cloud(&out_dir.join(name.to_string()), &points, &style)?;
            debug!("rendered {name}");
            manifest.push(AssetEntry::dot_cloud(name));
        }
        info!(level, realizations = cfg.n_realizations, "dot clouds done");
    }

    manifest.write(out_dir)?;
    Ok(manifest)
}
