use std::collections::BTreeSet;
use std::fs;
use std::path::PathBuf;

use psychostim::config::NumerosityConfig;
use psychostim::core::combinations::triads;
use psychostim::core::naming::DotCloudName;
use psychostim::design::table::{read_block_table, write_block_table};
use psychostim::design::triads::{TriadDesign, TriadTrial};
use rand::SeedableRng;
use rand::rngs::StdRng;

const LEVELS: [u32; 9] = [5, 10, 15, 20, 25, 30, 40, 50, 60];

fn unique_path(name: &str) -> PathBuf {
    let mut path = std::env::temp_dir();
    path.push(format!(
        "psychostim_triads_{}_{}",
        name,
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos()
    ));
    path
}

fn design() -> TriadDesign {
    TriadDesign::from_config(&NumerosityConfig::default())
}

fn canonical(levels: [u32; 3]) -> [u32; 3] {
    if levels[0] > levels[2] {
        [levels[2], levels[1], levels[0]]
    } else {
        levels
    }
}

#[test]
fn block_has_every_triad_once() {
    let mut rng = StdRng::seed_from_u64(2025);
    let block = design().block(1, &mut rng);
    assert_eq!(block.len(), 84);

    let expected: BTreeSet<[u32; 3]> = triads(&LEVELS).into_iter().collect();
    let seen: BTreeSet<[u32; 3]> = block.rows.iter().map(|t| canonical(t.levels)).collect();
    assert_eq!(seen, expected);

    for t in &block.rows {
        for (slot, image) in t.images.iter().enumerate() {
            let name: DotCloudName = image.parse().expect("image follows s_{level}_r_{r}.png");
            assert_eq!(name.level, t.levels[slot]);
            assert!((1..=10).contains(&name.realization));
        }
    }
}

#[test]
fn row_count_does_not_depend_on_block_index() {
    let d = design();
    let mut rng = StdRng::seed_from_u64(1);
    for index in 1..=5 {
        let block = d.block(index, &mut rng);
        assert_eq!(block.index, index);
        assert_eq!(block.len(), 84);
    }
}

#[test]
fn both_orientations_and_many_realizations_appear() {
    let mut rng = StdRng::seed_from_u64(77);
    let block = design().block(1, &mut rng);
    let ascending = block
        .rows
        .iter()
        .filter(|t| t.levels[0] < t.levels[2])
        .count();
    assert!(ascending > 20 && ascending < 64, "ascending={ascending}");

    let realizations: BTreeSet<u32> = block
        .rows
        .iter()
        .flat_map(|t| t.images.iter())
        .map(|im| im.parse::<DotCloudName>().unwrap().realization)
        .collect();
    assert_eq!(realizations, (1..=10).collect::<BTreeSet<u32>>());
}

#[test]
fn same_seed_same_block_different_seed_different_order() {
    let d = design();
    let a = d.block(1, &mut StdRng::seed_from_u64(5));
    let b = d.block(1, &mut StdRng::seed_from_u64(5));
    let c = d.block(1, &mut StdRng::seed_from_u64(6));
    assert_eq!(a.rows, b.rows);
    assert_eq!(a.len(), c.len());
    assert_ne!(a.rows, c.rows);
}

#[test]
fn written_table_reads_back_and_is_overwritten() {
    let dir = unique_path("table");
    let d = design();
    let mut rng = StdRng::seed_from_u64(8);

    let first = d.block(3, &mut rng);
    let path = write_block_table(&dir, &first).expect("write block");
    assert_eq!(path.file_name().unwrap(), "block_3.csv");

    let text = fs::read_to_string(&path).unwrap();
    assert!(text.starts_with("trial,s1,s2,s3,im1,im2,im3\n0,"));
    assert_eq!(text.lines().count(), 85);

    let second = d.block(3, &mut rng);
    write_block_table(&dir, &second).expect("overwrite block");
    let back: Vec<TriadTrial> = read_block_table(&path).expect("read block");
    assert_eq!(back, second.rows);

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn prefix_is_carried_into_image_cells() {
    let cfg = NumerosityConfig {
        image_prefix: "imgs/".into(),
        ..NumerosityConfig::default()
    };
    let d = TriadDesign::from_config(&cfg);
    let block = d.block(1, &mut StdRng::seed_from_u64(3));
    assert!(block.rows.iter().all(|t| t.images.iter().all(|im| im.starts_with("imgs/s_"))));
    assert!(block.rows.iter().all(|t| d.decode_images(t).is_some()));
}
