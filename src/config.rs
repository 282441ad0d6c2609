use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::core::combinations::PairingMode;
use crate::core::levels::luminance_levels;
use crate::error::StimError;

/// Shared image directory. Block tables live under each experiment's own
/// `design_dir` so the two sets of `block_N.csv` never collide.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default = "OutputConfig::default_image_dir")]
    pub image_dir: PathBuf,
}

impl OutputConfig {
    fn default_image_dir() -> PathBuf {
        PathBuf::from("imgs")
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            image_dir: Self::default_image_dir(),
        }
    }
}

/// MLDS numerosity experiment: triads of dot clouds.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NumerosityConfig {
    #[serde(default = "NumerosityConfig::default_design_dir")]
    pub design_dir: PathBuf,
    #[serde(default = "NumerosityConfig::default_levels")]
    pub levels: Vec<u32>,
    #[serde(default = "NumerosityConfig::default_n_realizations")]
    pub n_realizations: u32,
    #[serde(default = "NumerosityConfig::default_n_blocks")]
    pub n_blocks: u32,
    /// Prepended to every `im*` cell of the triad tables.
    #[serde(default)]
    pub image_prefix: String,
    #[serde(default = "NumerosityConfig::default_min_distance")]
    pub min_distance: f64,
    #[serde(default = "NumerosityConfig::default_max_attempts_per_dot")]
    pub max_attempts_per_dot: u32,
    #[serde(default = "NumerosityConfig::default_image_size_px")]
    pub image_size_px: u32,
    #[serde(default = "NumerosityConfig::default_dot_radius_px")]
    pub dot_radius_px: u32,
}

impl NumerosityConfig {
    fn default_design_dir() -> PathBuf {
        PathBuf::from("numerosity")
    }
    fn default_levels() -> Vec<u32> {
        vec![5, 10, 15, 20, 25, 30, 40, 50, 60]
    }
    fn default_n_realizations() -> u32 {
        10
    }
    fn default_n_blocks() -> u32 {
        5
    }
    fn default_min_distance() -> f64 {
        0.125
    }
    fn default_max_attempts_per_dot() -> u32 {
        10_000
    }
    fn default_image_size_px() -> u32 {
        400
    }
    fn default_dot_radius_px() -> u32 {
        6
    }

    pub fn validate(&self) -> Result<(), StimError> {
        if self.levels.len() < 3 {
            return Err(StimError::InvalidConfig(format!(
                "numerosity.levels needs at least 3 entries for triads, got {}",
                self.levels.len()
            )));
        }
        let mut sorted = self.levels.clone();
        sorted.sort_unstable();
        sorted.dedup();
        if sorted.len() != self.levels.len() {
            return Err(StimError::InvalidConfig(
                "numerosity.levels must be distinct".into(),
            ));
        }
        if self.n_realizations == 0 {
            return Err(StimError::InvalidConfig(
                "numerosity.n_realizations must be at least 1".into(),
            ));
        }
        if !(self.min_distance.is_finite() && self.min_distance >= 0.0) {
            return Err(StimError::InvalidConfig(
                "numerosity.min_distance must be finite and non-negative".into(),
            ));
        }
        if self.max_attempts_per_dot == 0 {
            return Err(StimError::InvalidConfig(
                "numerosity.max_attempts_per_dot must be at least 1".into(),
            ));
        }
        Ok(())
    }
}

impl Default for NumerosityConfig {
    fn default() -> Self {
        Self {
            design_dir: Self::default_design_dir(),
            levels: Self::default_levels(),
            n_realizations: Self::default_n_realizations(),
            n_blocks: Self::default_n_blocks(),
            image_prefix: String::new(),
            min_distance: Self::default_min_distance(),
            max_attempts_per_dot: Self::default_max_attempts_per_dot(),
            image_size_px: Self::default_image_size_px(),
            dot_radius_px: Self::default_dot_radius_px(),
        }
    }
}

/// MLCM White's illusion experiment: pairs of (luminance, context) targets.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WhitesConfig {
    #[serde(default = "WhitesConfig::default_design_dir")]
    pub design_dir: PathBuf,
    #[serde(default = "WhitesConfig::default_lum_start")]
    pub lum_start: f64,
    #[serde(default = "WhitesConfig::default_lum_stop")]
    pub lum_stop: f64,
    #[serde(default = "WhitesConfig::default_lum_count")]
    pub lum_count: usize,
    #[serde(default = "WhitesConfig::default_lum_decimals")]
    pub lum_decimals: u32,
    #[serde(default = "WhitesConfig::default_contexts")]
    pub contexts: Vec<u8>,
    /// Cross-context pairs only, presented twice.
    #[serde(default)]
    pub reduced: bool,
    #[serde(default = "WhitesConfig::default_n_blocks")]
    pub n_blocks: u32,
    #[serde(default = "WhitesConfig::default_image_prefix")]
    pub image_prefix: String,
    #[serde(default = "WhitesConfig::default_ppd")]
    pub ppd: f64,
    /// (height, width) in degrees of visual angle.
    #[serde(default = "WhitesConfig::default_visual_size")]
    pub visual_size: (f64, f64),
    #[serde(default = "WhitesConfig::default_n_bars")]
    pub n_bars: usize,
    /// Degrees.
    #[serde(default = "WhitesConfig::default_target_height")]
    pub target_height: f64,
    #[serde(default = "WhitesConfig::default_crop_columns")]
    pub crop_columns: usize,
    #[serde(default = "WhitesConfig::default_background")]
    pub background: f64,
    #[serde(default = "WhitesConfig::default_marker_rows")]
    pub marker_rows: usize,
    /// Bottom rows of the marker strip that show the target positions.
    #[serde(default = "WhitesConfig::default_marker_band_rows")]
    pub marker_band_rows: usize,
}

impl WhitesConfig {
    fn default_design_dir() -> PathBuf {
        PathBuf::from("whites")
    }
    fn default_lum_start() -> f64 {
        0.25
    }
    fn default_lum_stop() -> f64 {
        0.75
    }
    fn default_lum_count() -> usize {
        7
    }
    fn default_lum_decimals() -> u32 {
        2
    }
    fn default_contexts() -> Vec<u8> {
        vec![0, 1]
    }
    fn default_n_blocks() -> u32 {
        5
    }
    fn default_image_prefix() -> String {
        "imgs/".to_string()
    }
    fn default_ppd() -> f64 {
        34.0
    }
    fn default_visual_size() -> (f64, f64) {
        (12.0, 16.0)
    }
    fn default_n_bars() -> usize {
        18
    }
    fn default_target_height() -> f64 {
        5.0
    }
    fn default_crop_columns() -> usize {
        7
    }
    fn default_background() -> f64 {
        0.5
    }
    fn default_marker_rows() -> usize {
        30
    }
    fn default_marker_band_rows() -> usize {
        10
    }

    pub fn luminances(&self) -> Vec<f64> {
        luminance_levels(self.lum_start, self.lum_stop, self.lum_count, self.lum_decimals)
    }

    pub fn pairing_mode(&self) -> PairingMode {
        PairingMode::from_reduced_flag(self.reduced)
    }

    pub fn validate(&self) -> Result<(), StimError> {
        let lums = self.luminances();
        if lums.iter().any(|l| !(0.0..=1.0).contains(l)) {
            return Err(StimError::InvalidConfig(
                "whites luminances must lie in [0, 1]".into(),
            ));
        }
        if lums.windows(2).any(|w| w[0] == w[1]) {
            return Err(StimError::InvalidConfig(format!(
                "whites luminances collapse after rounding to {} decimals",
                self.lum_decimals
            )));
        }
        if self.contexts.is_empty() || self.contexts.iter().any(|&c| c > 1) {
            return Err(StimError::InvalidConfig(
                "whites.contexts must be drawn from {0, 1}".into(),
            ));
        }
        if lums.len() * self.contexts.len() < 2 {
            return Err(StimError::InvalidConfig(
                "whites needs at least two (luminance, context) atoms".into(),
            ));
        }
        // Right target sits at bar 12 + context.
        if self.n_bars < 14 {
            return Err(StimError::InvalidConfig(format!(
                "whites.n_bars must be at least 14, got {}",
                self.n_bars
            )));
        }
        if self.marker_band_rows > self.marker_rows {
            return Err(StimError::InvalidConfig(
                "whites.marker_band_rows exceeds marker_rows".into(),
            ));
        }
        if !(self.ppd > 0.0 && self.visual_size.0 > 0.0 && self.visual_size.1 > 0.0) {
            return Err(StimError::InvalidConfig(
                "whites.ppd and whites.visual_size must be positive".into(),
            ));
        }
        let width_px = (self.visual_size.1 * self.ppd).round() as usize;
        if self.crop_columns >= width_px {
            return Err(StimError::InvalidConfig(format!(
                "whites.crop_columns ({}) leaves no image of a {width_px} px wide grating",
                self.crop_columns
            )));
        }
        Ok(())
    }
}

impl Default for WhitesConfig {
    fn default() -> Self {
        Self {
            design_dir: Self::default_design_dir(),
            lum_start: Self::default_lum_start(),
            lum_stop: Self::default_lum_stop(),
            lum_count: Self::default_lum_count(),
            lum_decimals: Self::default_lum_decimals(),
            contexts: Self::default_contexts(),
            reduced: false,
            n_blocks: Self::default_n_blocks(),
            image_prefix: Self::default_image_prefix(),
            ppd: Self::default_ppd(),
            visual_size: Self::default_visual_size(),
            n_bars: Self::default_n_bars(),
            target_height: Self::default_target_height(),
            crop_columns: Self::default_crop_columns(),
            background: Self::default_background(),
            marker_rows: Self::default_marker_rows(),
            marker_band_rows: Self::default_marker_band_rows(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    /// Unset: every run draws a fresh seed from the OS.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub numerosity: NumerosityConfig,
    #[serde(default)]
    pub whites: WhitesConfig,
}

impl AppConfig {
    fn comment_out(text: &str) -> String {
        let mut commented = String::new();
        for line in text.lines() {
            let trimmed = line.trim();
            if trimmed.is_empty() {
                commented.push('\n');
            } else if trimmed.starts_with('[') && trimmed.ends_with(']') {
                commented.push_str(line);
                commented.push('\n');
            } else {
                commented.push_str("# ");
                commented.push_str(line);
                commented.push('\n');
            }
        }
        commented
    }

    /// Read `path`, or write a commented template of the defaults there and
    /// use the defaults. A broken file is reported and ignored.
    pub fn load_or_default(path: &Path) -> Self {
        if path.exists() {
            match fs::read_to_string(path) {
                Ok(contents) => match toml::from_str(&contents) {
                    Ok(cfg) => {
                        info!("loaded config from {}", path.display());
                        return cfg;
                    }
                    Err(err) => {
                        warn!(
                            "failed to parse config {}: {err}. Using defaults.",
                            path.display()
                        );
                    }
                },
                Err(err) => {
                    warn!(
                        "failed to read config {}: {err}. Using defaults.",
                        path.display()
                    );
                }
            }
            return Self::default();
        }

        let default_cfg = Self::default();
        match toml::to_string_pretty(&default_cfg) {
            Ok(text) => {
                if let Err(err) = fs::write(path, Self::comment_out(&text)) {
                    warn!(
                        "failed to write default config to {}: {err}",
                        path.display()
                    );
                }
            }
            Err(err) => warn!("failed to serialize default config: {err}"),
        }
        default_cfg
    }

    pub fn validate(&self) -> Result<(), StimError> {
        self.numerosity.validate()?;
        self.whites.validate()
    }
}
