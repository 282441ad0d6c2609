//! Property-based tests for enumeration, placement and the naming contract.

use std::collections::BTreeSet;

use proptest::prelude::*;

use psychostim::core::combinations::{combinations, cross, n_choose_k, pairs};
use psychostim::core::naming::{DotCloudName, WhiteName};
use psychostim::design::Orientation;
use psychostim::stim::dots::place_dots;
use rand::SeedableRng;
use rand::rngs::StdRng;

proptest! {
    // 1. C(n, k) units, all distinct, indices strictly increasing
    #[test]
    fn combination_count_and_uniqueness(n in 0usize..12, k in 0usize..5) {
        let items: Vec<usize> = (0..n).collect();
        let combos = combinations(&items, k);
        prop_assert_eq!(combos.len(), n_choose_k(n, k));
        let distinct: BTreeSet<Vec<usize>> = combos.iter().cloned().collect();
        prop_assert_eq!(distinct.len(), combos.len());
        for c in &combos {
            prop_assert_eq!(c.len(), k);
            prop_assert!(c.windows(2).all(|w| w[0] < w[1]));
        }
    }

    // 2. Pairs over the level × context cross product number C(2N, 2)
    #[test]
    fn atom_pair_count(n in 1usize..10) {
        let levels: Vec<f64> = (0..n).map(|i| i as f64 / 10.0).collect();
        let atoms = cross(&levels, &[0, 1]);
        prop_assert_eq!(atoms.len(), 2 * n);
        prop_assert_eq!(pairs(&atoms).len(), n_choose_k(2 * n, 2));
    }

    // 3. Placed dots are pairwise farther apart than min_d
    #[test]
    fn dots_respect_min_distance(n in 0usize..40, min_d in 0.0f64..0.2, seed in any::<u64>()) {
        let mut rng = StdRng::seed_from_u64(seed);
        let pts = place_dots(&mut rng, n, min_d, 100_000).expect("density is feasible");
        prop_assert_eq!(pts.len(), n);
        for (i, a) in pts.iter().enumerate() {
            prop_assert!(a.x.hypot(a.y) <= 1.0);
            for b in &pts[i + 1..] {
                prop_assert!(a.distance(b) > min_d);
            }
        }
    }

    // 4. Orientation only ever keeps or reverses
    #[test]
    fn orientation_keeps_members(seed in any::<u64>(), unit in prop::array::uniform3(0u32..100)) {
        let mut rng = StdRng::seed_from_u64(seed);
        let out = Orientation::draw(&mut rng).apply(unit);
        let mut rev = unit;
        rev.reverse();
        prop_assert!(out == unit || out == rev);
    }

    // 5. Dot-cloud names round-trip
    #[test]
    fn dot_cloud_name_round_trip(level in 0u32..10_000, realization in 1u32..1000) {
        let name = DotCloudName::new(level, realization);
        prop_assert_eq!(name.to_string().parse::<DotCloudName>().unwrap(), name);
    }

    // 6. White's names round-trip for any two-decimal luminance
    #[test]
    fn white_name_round_trip(l in 0u32..=100, r in 0u32..=100, cl in 0u8..2, cr in 0u8..2) {
        let name = WhiteName {
            lum_left: l as f64 / 100.0,
            lum_right: r as f64 / 100.0,
            context_left: cl,
            context_right: cr,
        };
        let text = name.to_string();
        prop_assert_eq!(text.parse::<WhiteName>().unwrap(), name);
        prop_assert_eq!(name.swapped().swapped(), name);
    }
}
