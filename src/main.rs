// Entry point: parse args, load config, run one generation pass.
use std::error::Error;
use std::io;
use std::process::ExitCode;

use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use psychostim::app::{self, Outcome};
use psychostim::cli::Args;
use psychostim::config::AppConfig;
use psychostim::core::utils::seeded_rng;

fn main() -> Result<ExitCode, Box<dyn Error>> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .with_writer(io::stderr)
        .init();

    let mut cfg = AppConfig::load_or_default(&args.config);
    app::apply_overrides(&mut cfg, args.seed, &args.command);
    if let Some(seed) = cfg.seed {
        info!("seeded run: {seed}");
    }
    let mut rng = seeded_rng(cfg.seed);

    match app::run(&cfg, &args.command, &mut rng)? {
        Outcome::Tables(paths) => {
            for p in &paths {
                println!("{}", p.display());
            }
        }
        Outcome::Images(manifest) => {
            println!(
                "rendered {} images into {}",
                manifest.len(),
                cfg.output.image_dir.display()
            );
        }
        Outcome::Preview(path) => println!("saved preview to {}", path.display()),
        Outcome::Verified(report) => {
            println!(
                "checked {} references in {} rows across {} tables",
                report.references, report.rows, report.tables
            );
            if !report.is_clean() {
                for d in &report.dangling {
                    println!(
                        "{} trial {}: {} ({:?})",
                        d.table.display(),
                        d.trial,
                        d.reference,
                        d.problem
                    );
                }
                error!("{} dangling image references", report.dangling.len());
                return Ok(ExitCode::FAILURE);
            }
        }
    }
    Ok(ExitCode::SUCCESS)
}
