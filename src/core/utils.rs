use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Fixed seed gives a reproducible stream; `None` draws from OS entropy.
pub fn seeded_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    }
}

/// Unbiased coin: true keeps the natural order.
pub fn coin_flip<R: Rng + ?Sized>(rng: &mut R) -> bool {
    rng.random_bool(0.5)
}

/// Uniform realization index in `1..=n`.
pub fn draw_realization<R: Rng + ?Sized>(rng: &mut R, n: u32) -> u32 {
    rng.random_range(1..=n.max(1))
}
