//! core/combinations.rs — k-combinations without repetition.
//!
//! Order inside a combination follows the input order; combinations are
//! emitted in lexicographic index order, each exactly once.

use serde::{Deserialize, Serialize};

/// All k-combinations of `items`. `k == 0` yields a single empty combination,
/// `k > items.len()` yields none.
pub fn combinations<T: Clone>(items: &[T], k: usize) -> Vec<Vec<T>> {
    let n = items.len();
    if k > n {
        return Vec::new();
    }
    let mut out = Vec::with_capacity(n_choose_k(n, k));
    let mut idx: Vec<usize> = (0..k).collect();
    loop {
        out.push(idx.iter().map(|&i| items[i].clone()).collect());

        // Rightmost index that can still advance.
        let Some(pos) = (0..k).rev().find(|&i| idx[i] != i + n - k) else {
            break;
        };
        idx[pos] += 1;
        for j in pos + 1..k {
            idx[j] = idx[j - 1] + 1;
        }
    }
    out
}

pub fn pairs<T: Clone>(items: &[T]) -> Vec<[T; 2]> {
    combinations(items, 2)
        .into_iter()
        .map(|c| [c[0].clone(), c[1].clone()])
        .collect()
}

pub fn triads<T: Clone>(items: &[T]) -> Vec<[T; 3]> {
    combinations(items, 3)
        .into_iter()
        .map(|c| [c[0].clone(), c[1].clone(), c[2].clone()])
        .collect()
}

/// Binomial coefficient C(n, k); `usize::MAX` when the result does not fit.
pub fn n_choose_k(n: usize, k: usize) -> usize {
    if k > n {
        return 0;
    }
    let k = k.min(n - k);
    let mut acc: usize = 1;
    for i in 0..k {
        // acc = C(n, i) fits usize, so the product fits u128 and divides exactly.
        let next = acc as u128 * (n - i) as u128 / (i + 1) as u128;
        match usize::try_from(next) {
            Ok(v) => acc = v,
            Err(_) => return usize::MAX,
        }
    }
    acc
}

/// One element of the level × context cross product.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Atom {
    pub level: f64,
    pub context: u8,
}

/// Level-major cross product: (l0,c0), (l0,c1), (l1,c0), ...
pub fn cross(levels: &[f64], contexts: &[u8]) -> Vec<Atom> {
    levels
        .iter()
        .flat_map(|&level| contexts.iter().map(move |&context| Atom { level, context }))
        .collect()
}

/// How pairwise comparison units are selected from the atom pairs.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PairingMode {
    /// Every unordered pair of atoms, once.
    #[default]
    Full,
    /// Cross-context pairs only, the whole list repeated twice.
    Reduced,
}

impl PairingMode {
    pub fn from_reduced_flag(reduced: bool) -> Self {
        if reduced { Self::Reduced } else { Self::Full }
    }
}

/// Comparison units for the pairwise design under `mode`.
pub fn atom_pairs(atoms: &[Atom], mode: PairingMode) -> Vec<[Atom; 2]> {
    let all = pairs(atoms);
    match mode {
        PairingMode::Full => all,
        PairingMode::Reduced => {
            let across: Vec<[Atom; 2]> = all
                .into_iter()
                .filter(|[a, b]| a.context != b.context)
                .collect();
            let mut doubled = Vec::with_capacity(across.len() * 2);
            doubled.extend_from_slice(&across);
            doubled.extend_from_slice(&across);
            doubled
        }
    }
}
