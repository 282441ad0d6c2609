//! Error type shared by design generation and stimulus rendering.

use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, StimError>;

#[derive(Error, Debug)]
pub enum StimError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("image encode error: {0}")]
    Image(#[from] image::ImageError),

    /// Plot backends carry their own error types; only the message survives.
    #[error("plot backend error: {0}")]
    Plot(String),

    #[error("manifest error: {0}")]
    Manifest(#[from] serde_json::Error),

    /// Rejection sampling ran out of attempts for the next dot.
    #[error(
        "infeasible dot density: placed {placed} of {requested} dots with min distance {min_distance}"
    )]
    InfeasibleDensity {
        placed: usize,
        requested: usize,
        min_distance: f64,
    },

    #[error("malformed stimulus filename: {0}")]
    MalformedName(String),

    #[error("malformed table {path} at line {line}: {reason}")]
    MalformedTable {
        path: PathBuf,
        line: usize,
        reason: String,
    },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

impl StimError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub fn plot<E: std::fmt::Display>(err: E) -> Self {
        Self::Plot(err.to_string())
    }
}
