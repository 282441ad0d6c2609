//! Command handlers: one linear pass per command, randomness injected.

use std::path::{Path, PathBuf};

use rand::Rng;
use tracing::info;

use crate::cli::{Command, ExperimentArg};
use crate::config::AppConfig;
use crate::design::Block;
use crate::design::pairs::{PairDesign, PairTrial};
use crate::design::table::{TableRow, write_block_table};
use crate::design::triads::{TriadDesign, TriadTrial};
use crate::design::verify::{VerifyReport, rendered_images, verify_tables};
use crate::error::Result;
use crate::stim::dots::generate_dot_stimuli;
use crate::stim::manifest::{Experiment, Manifest};
use crate::stim::preview::render_context_preview;
use crate::stim::whites::generate_white_stimuli;

/// What a command produced, for the caller to report.
#[derive(Debug)]
pub enum Outcome {
    Tables(Vec<PathBuf>),
    Images(Manifest),
    Preview(PathBuf),
    Verified(VerifyReport),
}

fn write_blocks<T, R, F>(dir: &Path, n_blocks: u32, rng: &mut R, mut make: F) -> Result<Vec<PathBuf>>
where
    T: TableRow,
    R: Rng + ?Sized,
    F: FnMut(u32, &mut R) -> Block<T>,
{
    let mut written = Vec::with_capacity(n_blocks as usize);
    for index in 1..=n_blocks {
        let block = make(index, rng);
        written.push(write_block_table(dir, &block)?);
    }
    Ok(written)
}

pub fn design_triads<R: Rng + ?Sized>(cfg: &AppConfig, rng: &mut R) -> Result<Vec<PathBuf>> {
    let design = TriadDesign::from_config(&cfg.numerosity);
    info!(
        levels = ?design.levels(),
        units = design.units().len(),
        blocks = cfg.numerosity.n_blocks,
        "triad design"
    );
    write_blocks::<TriadTrial, _, _>(
        &cfg.numerosity.design_dir,
        cfg.numerosity.n_blocks,
        rng,
        |index, rng| design.block(index, rng),
    )
}

pub fn design_pairs<R: Rng + ?Sized>(cfg: &AppConfig, rng: &mut R) -> Result<Vec<PathBuf>> {
    let design = PairDesign::from_config(&cfg.whites);
    info!(
        luminances = ?cfg.whites.luminances(),
        mode = ?design.mode(),
        units = design.units().len(),
        blocks = cfg.whites.n_blocks,
        "pair design"
    );
    write_blocks::<PairTrial, _, _>(
        &cfg.whites.design_dir,
        cfg.whites.n_blocks,
        rng,
        |index, rng| design.block(index, rng),
    )
}

pub fn verify(cfg: &AppConfig, experiment: ExperimentArg) -> Result<VerifyReport> {
    let image_dir = &cfg.output.image_dir;
    match experiment {
        ExperimentArg::Triads => {
            let images = rendered_images(image_dir, Experiment::Numerosity)?;
            verify_tables::<TriadTrial>(
                &cfg.numerosity.design_dir,
                &images,
                &cfg.numerosity.image_prefix,
            )
        }
        ExperimentArg::Pairs => {
            let images = rendered_images(image_dir, Experiment::Whites)?;
            verify_tables::<PairTrial>(&cfg.whites.design_dir, &images, &cfg.whites.image_prefix)
        }
    }
}

/// Validate only the config section `command` reads.
pub fn validate_for(cfg: &AppConfig, command: &Command) -> Result<()> {
    match command {
        Command::DesignTriads { .. }
        | Command::StimDots { .. }
        | Command::Verify {
            experiment: ExperimentArg::Triads,
            ..
        } => cfg.numerosity.validate(),
        Command::DesignPairs { .. }
        | Command::StimWhites { .. }
        | Command::PreviewWhites { .. }
        | Command::Verify {
            experiment: ExperimentArg::Pairs,
            ..
        } => cfg.whites.validate(),
    }
}

/// Run one command against an already-overridden config.
pub fn run<R: Rng + ?Sized>(cfg: &AppConfig, command: &Command, rng: &mut R) -> Result<Outcome> {
    validate_for(cfg, command)?;
    let outcome = match command {
        Command::DesignTriads { .. } => Outcome::Tables(design_triads(cfg, rng)?),
        Command::DesignPairs { .. } => Outcome::Tables(design_pairs(cfg, rng)?),
        Command::StimDots { .. } => Outcome::Images(generate_dot_stimuli(
            &cfg.numerosity,
            &cfg.output.image_dir,
            rng,
        )?),
        Command::StimWhites { .. } => {
            Outcome::Images(generate_white_stimuli(&cfg.whites, &cfg.output.image_dir)?)
        }
        Command::PreviewWhites { out } => {
            render_context_preview(out, &cfg.whites)?;
            Outcome::Preview(out.clone())
        }
        Command::Verify { experiment, .. } => Outcome::Verified(verify(cfg, *experiment)?),
    };
    Ok(outcome)
}

/// Fold command-line overrides into the loaded config.
pub fn apply_overrides(cfg: &mut AppConfig, seed: Option<u64>, command: &Command) {
    if seed.is_some() {
        cfg.seed = seed;
    }
    match command {
        Command::DesignTriads { blocks, out } => {
            if let Some(n) = blocks {
                cfg.numerosity.n_blocks = *n;
            }
            if let Some(dir) = out {
                cfg.numerosity.design_dir = dir.clone();
            }
        }
        Command::DesignPairs {
            blocks,
            out,
            reduced,
        } => {
            if let Some(n) = blocks {
                cfg.whites.n_blocks = *n;
            }
            if let Some(dir) = out {
                cfg.whites.design_dir = dir.clone();
            }
            if let Some(r) = reduced {
                cfg.whites.reduced = *r;
            }
        }
        Command::StimDots { out } | Command::StimWhites { out } => {
            if let Some(dir) = out {
                cfg.output.image_dir = dir.clone();
            }
        }
        Command::Verify { experiment, out } => {
            if let Some(dir) = out {
                match experiment {
                    ExperimentArg::Triads => cfg.numerosity.design_dir = dir.clone(),
                    ExperimentArg::Pairs => cfg.whites.design_dir = dir.clone(),
                }
            }
        }
        Command::PreviewWhites { .. } => {}
    }
}
