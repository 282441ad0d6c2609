//! Pure building blocks shared by the design and stimulus stages.

pub mod combinations;
pub mod levels;
pub mod naming;
pub mod utils;
