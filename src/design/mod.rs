//! Trial-order designs: every comparison unit once per block, sides
//! randomized per trial, rows shuffled.

pub mod pairs;
pub mod table;
pub mod triads;
pub mod verify;

use rand::Rng;
use rand::seq::SliceRandom;

use crate::core::utils::coin_flip;

/// Which way a comparison unit is laid out across the positional slots.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Orientation {
    /// Enumeration order: left→right, first→last.
    Natural,
    Reversed,
}

impl Orientation {
    pub fn draw<R: Rng + ?Sized>(rng: &mut R) -> Self {
        if coin_flip(rng) {
            Self::Natural
        } else {
            Self::Reversed
        }
    }

    pub fn apply<T, const N: usize>(self, mut unit: [T; N]) -> [T; N] {
        if self == Self::Reversed {
            unit.reverse();
        }
        unit
    }
}

/// One randomized pass over all comparison units.
#[derive(Clone, Debug)]
pub struct Block<T> {
    /// 1-based.
    pub index: u32,
    /// Post-shuffle order; the trial number is the position in this vector.
    pub rows: Vec<T>,
}

impl<T> Block<T> {
    /// Shuffle `rows` into presentation order.
    pub fn assemble<R: Rng + ?Sized>(index: u32, mut rows: Vec<T>, rng: &mut R) -> Self {
        rows.shuffle(rng);
        Self { index, rows }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn file_name(&self) -> String {
        block_file_name(self.index)
    }

    /// (trial, row) with zero-based trial numbers.
    pub fn trials(&self) -> impl Iterator<Item = (usize, &T)> {
        self.rows.iter().enumerate()
    }
}

pub fn block_file_name(index: u32) -> String {
    format!("block_{index}.csv")
}

/// Inverse of [`block_file_name`].
pub fn parse_block_file_name(name: &str) -> Option<u32> {
    name.strip_prefix("block_")?
        .strip_suffix(".csv")?
        .parse()
        .ok()
}
