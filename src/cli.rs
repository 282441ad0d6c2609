use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser, Debug, Clone)]
#[command(author, version, about)]
pub struct Args {
    /// Path to config TOML (written with defaults if missing)
    #[arg(long, default_value = "psychostim.toml", global = true)]
    pub config: PathBuf,

    /// Seed for every random decision (overrides config)
    #[arg(long, global = true)]
    pub seed: Option<u64>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Write block tables of randomized numerosity triads
    DesignTriads {
        /// Number of blocks (overrides config)
        #[arg(long)]
        blocks: Option<u32>,
        /// Directory for block_N.csv (overrides config)
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Write block tables of randomized White's illusion pairs
    DesignPairs {
        /// Number of blocks (overrides config)
        #[arg(long)]
        blocks: Option<u32>,
        /// Directory for block_N.csv (overrides config)
        #[arg(long)]
        out: Option<PathBuf>,
        /// Cross-context pairs only, each presented twice
        #[arg(long, num_args = 0..=1, default_missing_value = "true")]
        reduced: Option<bool>,
    },
    /// Render dot-cloud images for every level and realization
    StimDots {
        /// Image directory (overrides config)
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Render White's illusion images for every pair in both orders
    StimWhites {
        /// Image directory (overrides config)
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Render a 2x2 preview of the four context combinations
    PreviewWhites {
        /// Output PNG
        #[arg(long, default_value = "whites_preview.png")]
        out: PathBuf,
    },
    /// Check that every image referenced by the block tables exists
    Verify {
        #[arg(value_enum)]
        experiment: ExperimentArg,
        /// Directory holding the block tables (overrides config)
        #[arg(long)]
        out: Option<PathBuf>,
    },
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExperimentArg {
    Triads,
    Pairs,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_subcommands_and_globals() {
        let args = Args::try_parse_from([
            "psychostim",
            "design-pairs",
            "--blocks",
            "2",
            "--reduced",
            "--seed",
            "7",
        ])
        .unwrap();
        assert_eq!(args.seed, Some(7));
        match args.command {
            Command::DesignPairs {
                blocks, reduced, ..
            } => {
                assert_eq!(blocks, Some(2));
                assert_eq!(reduced, Some(true));
            }
            other => panic!("unexpected {other:?}"),
        }

        let args = Args::try_parse_from(["psychostim", "verify", "triads"]).unwrap();
        assert!(matches!(
            args.command,
            Command::Verify {
                experiment: ExperimentArg::Triads,
                out: None,
            }
        ));

        let args =
            Args::try_parse_from(["psychostim", "verify", "pairs", "--out", "mlcm"]).unwrap();
        match args.command {
            Command::Verify { experiment, out } => {
                assert_eq!(experiment, ExperimentArg::Pairs);
                assert_eq!(out, Some(PathBuf::from("mlcm")));
            }
            other => panic!("unexpected {other:?}"),
        }
        assert_eq!(args.config, PathBuf::from("psychostim.toml"));
    }
}
