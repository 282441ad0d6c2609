//! Trial designs and stimuli for two psychophysics experiments: MLDS
//! numerosity triads (dot clouds) and MLCM White's illusion pairs.

pub mod app;
pub mod cli;
pub mod config;
pub mod core;
pub mod design;
pub mod error;
pub mod stim;

pub use error::{Result, StimError};
