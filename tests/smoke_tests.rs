use std::fs;
use std::path::PathBuf;

use psychostim::StimError;
use psychostim::app::{self, Outcome};
use psychostim::cli::Command;
use psychostim::config::AppConfig;
use rand::SeedableRng;
use rand::rngs::StdRng;

fn unique_path(name: &str) -> PathBuf {
    let mut path = std::env::temp_dir();
    path.push(format!(
        "psychostim_smoke_{}_{}",
        name,
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos()
    ));
    path
}

#[test]
fn smoke_design_commands_create_missing_dirs() {
    let root = unique_path("design");
    let mut cfg = AppConfig::default();
    cfg.numerosity.design_dir = root.join("nested").join("blocks");
    let mut rng = StdRng::seed_from_u64(1);

    let cmd = Command::DesignTriads {
        blocks: None,
        out: None,
    };
    let Outcome::Tables(paths) = app::run(&cfg, &cmd, &mut rng).unwrap() else {
        panic!("expected tables");
    };
    let names: Vec<String> = paths
        .iter()
        .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    assert_eq!(
        names,
        ["block_1.csv", "block_2.csv", "block_3.csv", "block_4.csv", "block_5.csv"]
    );

    let _ = fs::remove_dir_all(&root);
}

#[test]
fn smoke_infeasible_density_is_an_error() {
    let root = unique_path("dense");
    let mut cfg = AppConfig::default();
    cfg.output.image_dir = root.clone();
    cfg.numerosity.levels = vec![50, 60, 70];
    cfg.numerosity.n_realizations = 1;
    cfg.numerosity.min_distance = 0.9;
    cfg.numerosity.max_attempts_per_dot = 50;
    let mut rng = StdRng::seed_from_u64(2);

    let err = app::run(&cfg, &Command::StimDots { out: None }, &mut rng).unwrap_err();
    assert!(matches!(err, StimError::InfeasibleDensity { requested: 50, .. }));

    let _ = fs::remove_dir_all(&root);
}

#[test]
fn smoke_invalid_config_is_rejected_before_writing() {
    let root = unique_path("invalid");
    let mut cfg = AppConfig::default();
    cfg.numerosity.design_dir = root.clone();
    cfg.numerosity.levels = vec![5, 10];
    let mut rng = StdRng::seed_from_u64(3);

    let cmd = Command::DesignTriads {
        blocks: None,
        out: None,
    };
    let err = app::run(&cfg, &cmd, &mut rng).unwrap_err();
    assert!(matches!(err, StimError::InvalidConfig(_)));
    assert!(!root.exists());
}

#[test]
fn smoke_verify_on_empty_design_dir() {
    let root = unique_path("empty");
    let mut cfg = AppConfig::default();
    cfg.numerosity.design_dir = root.join("design");
    cfg.output.image_dir = root.join("imgs");
    fs::create_dir_all(&cfg.numerosity.design_dir).unwrap();
    fs::create_dir_all(&cfg.output.image_dir).unwrap();

    let report = app::verify(&cfg, psychostim::cli::ExperimentArg::Triads).unwrap();
    assert_eq!(report.tables, 0);
    assert!(report.is_clean());

    let _ = fs::remove_dir_all(&root);
}

#[test]
fn smoke_numerosity_commands_ignore_whites_section() {
    let root = unique_path("independent");
    let mut cfg = AppConfig::default();
    cfg.numerosity.design_dir = root.join("numerosity");
    cfg.whites.design_dir = root.join("whites");
    cfg.whites.n_bars = 10;
    let mut rng = StdRng::seed_from_u64(4);

    let cmd = Command::DesignTriads {
        blocks: Some(1),
        out: None,
    };
    let Outcome::Tables(paths) = app::run(&cfg, &cmd, &mut rng).unwrap() else {
        panic!("expected tables");
    };
    assert_eq!(paths.len(), 1);

    let cmd = Command::DesignPairs {
        blocks: Some(1),
        out: None,
        reduced: None,
    };
    let err = app::run(&cfg, &cmd, &mut rng).unwrap_err();
    assert!(matches!(err, StimError::InvalidConfig(_)));
    assert!(!cfg.whites.design_dir.exists());

    let _ = fs::remove_dir_all(&root);
}
