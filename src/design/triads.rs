//! MLDS method-of-triads design for the numerosity experiment.

use rand::Rng;
use tracing::debug;

use crate::config::NumerosityConfig;
use crate::core::combinations::triads;
use crate::core::naming::{DotCloudName, strip_prefix, with_prefix};
use crate::core::utils::draw_realization;
use crate::design::table::TableRow;
use crate::design::{Block, Orientation};

/// One triad trial: levels in presentation order plus the image per slot.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TriadTrial {
    pub levels: [u32; 3],
    pub images: [String; 3],
}

impl TableRow for TriadTrial {
    type Image = DotCloudName;

    const COLUMNS: &'static [&'static str] = &["s1", "s2", "s3", "im1", "im2", "im3"];

    fn cells(&self) -> Vec<String> {
        self.levels
            .iter()
            .map(u32::to_string)
            .chain(self.images.iter().cloned())
            .collect()
    }

    fn from_cells(cells: &[&str]) -> Result<Self, String> {
        let &[s1, s2, s3, im1, im2, im3] = cells else {
            return Err(format!("expected 6 data cells, got {}", cells.len()));
        };
        let level = |s: &str| s.parse::<u32>().map_err(|_| format!("bad level {s:?}"));
        Ok(Self {
            levels: [level(s1)?, level(s2)?, level(s3)?],
            images: [im1.to_string(), im2.to_string(), im3.to_string()],
        })
    }

    fn image_refs(&self) -> Vec<&str> {
        self.images.iter().map(String::as_str).collect()
    }
}

#[derive(Clone, Debug)]
pub struct TriadDesign {
    levels: Vec<u32>,
    n_realizations: u32,
    image_prefix: String,
}

impl TriadDesign {
    pub fn new(levels: Vec<u32>, n_realizations: u32, image_prefix: impl Into<String>) -> Self {
        Self {
            levels,
            n_realizations,
            image_prefix: image_prefix.into(),
        }
    }

    pub fn from_config(cfg: &NumerosityConfig) -> Self {
        Self::new(cfg.levels.clone(), cfg.n_realizations, cfg.image_prefix.clone())
    }

    pub fn levels(&self) -> &[u32] {
        &self.levels
    }

    pub fn n_realizations(&self) -> u32 {
        self.n_realizations
    }

    pub fn image_prefix(&self) -> &str {
        &self.image_prefix
    }

    /// All C(n, 3) triads in input order.
    pub fn units(&self) -> Vec<[u32; 3]> {
        triads(&self.levels)
    }

    /// Orient one triad and attach a realization to each slot.
    pub fn trial<R: Rng + ?Sized>(&self, unit: [u32; 3], rng: &mut R) -> TriadTrial {
        let realizations = [(); 3].map(|_| draw_realization(rng, self.n_realizations));
        let levels = Orientation::draw(rng).apply(unit);
        let mut images = [String::new(), String::new(), String::new()];
        for (slot, image) in images.iter_mut().enumerate() {
            let name = DotCloudName::new(levels[slot], realizations[slot]);
            *image = with_prefix(&self.image_prefix, &name);
        }
        TriadTrial { levels, images }
    }

    pub fn block<R: Rng + ?Sized>(&self, index: u32, rng: &mut R) -> Block<TriadTrial> {
        let rows: Vec<TriadTrial> = self
            .units()
            .into_iter()
            .map(|unit| self.trial(unit, rng))
            .collect();
        debug!(block = index, trials = rows.len(), "assembled triad block");
        Block::assemble(index, rows, rng)
    }

    /// Decode the image names of a row, stripping this design's prefix.
    pub fn decode_images(&self, trial: &TriadTrial) -> Option<[DotCloudName; 3]> {
        let mut out = [DotCloudName::new(0, 1); 3];
        for (slot, image) in trial.images.iter().enumerate() {
            out[slot] = strip_prefix(&self.image_prefix, image).parse().ok()?;
        }
        Some(out)
    }
}
